//! ree::options — configuration of the state reduction.
//!
//! Purpose
//! -------
//! Hold the two knobs of an LQ RE solve: the grid size of the residual check
//! and whether multiplier elimination is attempted at all.
//!
//! Invariants & assumptions
//! ------------------------
//! - `tol` is finite and strictly positive (checked by [`REEOptions::new`]).
//! - A larger `tol` can only turn a failed reduction into a successful one.
use crate::numerics::DEFAULT_REDUCTION_TOL;
use crate::ree::errors::{REEError, REEResult};

/// REEOptions — options for [`solve_lq_ree`](crate::ree::solve::solve_lq_ree).
///
/// Fields
/// ------
/// - `tol`: `f64`
///   Grid size `ε` of the residual check; a residual entry passes when it
///   rounds to zero on the `ε` grid.
/// - `reduce`: `bool`
///   When `false`, skip lag collapsing and multiplier elimination and
///   return the current-period state `(hy, csi, FLM, GLM)`.
///
/// Default
/// -------
/// - `tol = 1e-6`, `reduce = true`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct REEOptions {
    pub tol: f64,
    pub reduce: bool,
}

impl REEOptions {
    /// Errors
    /// ------
    /// - `REEError::InvalidTolerance` when `tol` is NaN, infinite or `≤ 0`.
    pub fn new(tol: f64, reduce: bool) -> REEResult<Self> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(REEError::InvalidTolerance { tol });
        }
        Ok(Self { tol, reduce })
    }
}

impl Default for REEOptions {
    fn default() -> Self {
        Self { tol: DEFAULT_REDUCTION_TOL, reduce: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Defaults match the documented values and invalid tolerances fail.
    //
    // Given
    // -----
    // - `REEOptions::default()`, and `new` with 0, -1, NaN, ∞.
    //
    // Expect
    // ------
    // - Default is `(1e-6, true)`; every invalid tolerance is rejected.
    fn options_default_and_validation() {
        // Arrange
        let default = REEOptions::default();

        // Assert
        assert_eq!(default, REEOptions::new(1e-6, true).unwrap());
        for tol in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(REEOptions::new(tol, true), Err(REEError::InvalidTolerance { .. })),
                "tol = {tol} accepted"
            );
        }
    }
}
