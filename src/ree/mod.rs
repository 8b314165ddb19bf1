//! ree — LQ rational-expectations equilibrium: solve, reduce, assemble.
//!
//! Purpose
//! -------
//! Turn a validated LQ coefficient bundle into a compact law of motion
//! `z_t = Phi1 z_{t-1} + Phi2 ε_t`, where `z_t` keeps only the variables that
//! cannot be eliminated algebraically.
//!
//! Key behaviors
//! -------------
//! - [`prefilter`]: rewrite expectational rows with no forward content.
//! - [`solve`]: orchestrate pre-filter, RE solver, diagnostics, reduction and
//!   assembly ([`solve_lq_ree`], [`solve_lq_ree_with`]).
//! - [`reduction`] and [`kron`]: drop lag duplication and eliminate
//!   constraint multipliers through a Kronecker least-squares fit with a
//!   tolerance-grid residual check.
//! - [`result`] and [`selection`]: the tagged [`REE`] record, selection
//!   matrices and [`LQSolution`].
//! - [`diagnostics`]: advisories for `eu ≠ (1, 1)` and failed reductions.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only configuration errors and ill-posed pencils are errors
//!   ([`REEError`]); everything else is a [`Diagnostic`] on the result.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; scenario tests covering the
//!   whole pipeline live in `tests/integration_lq_ree.rs`.

pub mod diagnostics;
pub mod errors;
pub mod kron;
pub mod options;
pub mod prefilter;
pub mod reduction;
pub mod result;
pub mod selection;
pub mod solve;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::diagnostics::Diagnostic;
pub use self::errors::{REEError, REEResult};
pub use self::options::REEOptions;
pub use self::prefilter::{DegeneracyPatch, patch_degenerate_rows};
pub use self::reduction::{Reduction, collapse_lags, reduce_state};
pub use self::result::{FullyReduced, LQSolution, PartiallyReduced, REE, REEKind, Unreduced};
pub use self::solve::{solve_lq_ree, solve_lq_ree_with};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::diagnostics::Diagnostic;
    pub use super::errors::{REEError, REEResult};
    pub use super::options::REEOptions;
    pub use super::result::{LQSolution, REE, REEKind};
    pub use super::solve::{solve_lq_ree, solve_lq_ree_with};
}
