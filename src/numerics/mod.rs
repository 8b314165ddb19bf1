//! numerics — shared tolerances and `ndarray` ↔ `nalgebra` bridges.
//!
//! Purpose
//! -------
//! Collect the small numerical constants and matrix conversion helpers used
//! by the RE solver and the state reducer, so that every layer agrees on the
//! same thresholds and on how public `ndarray` matrices enter the
//! `nalgebra` kernels (SVD, LU, complex QZ).
//!
//! Key behaviors
//! -------------
//! - Centralize solver tolerances ([`REALSMALL`], [`DEFAULT_DIV`],
//!   [`INFINITE_ROOT_EPS`], [`SWITCH_SMALL`]) and the default reduction
//!   tolerance [`DEFAULT_REDUCTION_TOL`].
//! - Copy `ndarray` views into `DMatrix<f64>` / `DMatrix<Complex<f64>>`
//!   and back, column by column.
//!
//! Invariants & assumptions
//! ------------------------
//! - Conversions preserve shapes exactly; callers validate shapes upstream.
//! - Complex-to-real conversions keep the real part only. Callers decide
//!   whether the discarded imaginary part is meaningful.
//!
//! Conventions
//! -----------
//! - Public crate surfaces speak `ndarray`; `nalgebra` stays internal.
//! - This module never logs and never allocates beyond the returned
//!   matrices.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`conversions`] check element placement for non-square
//!   shapes and the real-part projection.

pub mod constants;
pub mod conversions;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::constants::{
    DEFAULT_DIV, DEFAULT_REDUCTION_TOL, INFINITE_ROOT_EPS, REALSMALL, SWITCH_SMALL,
};
pub use self::conversions::{
    complex_to_array, from_dmatrix, real_part, to_complex_dmatrix, to_dmatrix,
};
