//! Numerical thresholds shared by the RE solver and the state reducer.
//!
//! # Provided items
//! - [`REALSMALL`]: rank / coincident-zero threshold used by gensys (1e-7).
//! - [`DEFAULT_DIV`]: initial stability boundary for `|b/a|` (1.01).
//! - [`INFINITE_ROOT_EPS`]: below this `|a_ii|` a root is treated as
//!   infinite during reordering (1e-13).
//! - [`SWITCH_SMALL`]: smallness test used when swapping adjacent roots.
//! - [`DEFAULT_REDUCTION_TOL`]: grid size of the residual check in the
//!   multiplier reduction (1e-6).

/// Threshold below which singular values, diagonal entries and loose
/// endogenous errors are treated as zero inside the gensys partition.
pub const REALSMALL: f64 = 1e-7;

/// Starting stability boundary for generalized eigenvalues `|b_ii / a_ii|`
/// when no fixed boundary is configured.
pub const DEFAULT_DIV: f64 = 1.01;

/// Magnitude of `|a_ii|` under which a root `b_ii / a_ii` counts as
/// infinite (and therefore unstable) while reordering.
pub const INFINITE_ROOT_EPS: f64 = 1e-13;

/// Smallness test for diagonal entries while swapping two adjacent roots
/// of the triangular pencil: `10 * sqrt(f64::EPSILON)`.
pub const SWITCH_SMALL: f64 = 1.490_116_119_384_765_6e-7;

/// Default grid size for the rounding-based residual check of the
/// multiplier reduction.
pub const DEFAULT_REDUCTION_TOL: f64 = 1e-6;
