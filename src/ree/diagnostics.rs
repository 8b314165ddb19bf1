//! ree::diagnostics — non-fatal advisories attached to a solution.
//!
//! Purpose
//! -------
//! Represent the conditions under which a solution is returned but should
//! not be trusted blindly: the RE solver's `eu ≠ (1, 1)` verdicts and a
//! rejected multiplier fit. Each advisory is logged once as a
//! `tracing::warn!` event and stored on the result.
//!
//! Conventions
//! -----------
//! - Callers branch on the [`Diagnostic`] value, never on the log text.
//! - The library installs no subscriber; embedding applications decide
//!   where the events go.
use crate::gensys::status::ExistUnique;
use tracing::warn;

/// Diagnostic — advisory produced during an LQ RE solve.
///
/// Variants
/// --------
/// - `NoStableSolution`: `exist ≠ 1`.
/// - `Indeterminacy`: `unique ≠ 1` (sunspot solutions).
/// - `NoStableSolutionAndIndeterminacy`: both of the above.
/// - `CoincidentZeros`: `eu = (-2, -2)`; numeric outputs are placeholders.
/// - `ReductionFailed { max_abs_residual, tol }`: multipliers were kept in
///   the state because the static law missed the tolerance grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diagnostic {
    NoStableSolution,
    Indeterminacy,
    NoStableSolutionAndIndeterminacy,
    CoincidentZeros,
    ReductionFailed { max_abs_residual: f64, tol: f64 },
}

impl Diagnostic {
    /// Translate a solver verdict; `None` for `(1, 1)`.
    pub fn from_eu(eu: ExistUnique) -> Option<Diagnostic> {
        if eu.is_coincident_zeros() {
            return Some(Diagnostic::CoincidentZeros);
        }
        match (eu.lacks_existence(), eu.lacks_uniqueness()) {
            (false, false) => None,
            (true, false) => Some(Diagnostic::NoStableSolution),
            (false, true) => Some(Diagnostic::Indeterminacy),
            (true, true) => Some(Diagnostic::NoStableSolutionAndIndeterminacy),
        }
    }

    /// Log the advisory as a `warn` event.
    pub fn emit(&self) {
        match self {
            Diagnostic::ReductionFailed { max_abs_residual, tol } => {
                warn!(max_abs_residual, tol, "{self}");
            }
            _ => warn!("{self}"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::NoStableSolution => write!(f, "no stable solution exists"),
            Diagnostic::Indeterminacy => {
                write!(f, "stable solution is not unique (indeterminacy)")
            }
            Diagnostic::NoStableSolutionAndIndeterminacy => {
                write!(f, "no stable solution exists and the solution is not unique")
            }
            Diagnostic::CoincidentZeros => write!(
                f,
                "coincident zeros in the pencil; indeterminacy and/or nonexistence"
            ),
            Diagnostic::ReductionFailed { max_abs_residual, tol } => write!(
                f,
                "multiplier reduction failed: residual {max_abs_residual:e} exceeds tolerance grid {tol:e}; multipliers kept in the state"
            ),
        }
    }
}
