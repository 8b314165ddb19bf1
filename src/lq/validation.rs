//! lq::validation — shape and finiteness guards for LQ matrices.
//!
//! Purpose
//! -------
//! Centralize the fail-fast checks run when an [`LQSystem`] is assembled:
//! every matrix must match the shape implied by [`LQBlocks`] and contain
//! only finite values. Nothing is ever truncated or padded.
//!
//! Key behaviors
//! -------------
//! - [`validate_shape`] compares a matrix against an expected shape.
//! - [`validate_square`] checks squareness for matrices without an implied
//!   size (the loss matrices `A0`–`D0`).
//! - [`validate_finite`] reports the first non-finite entry.
//! - [`validate_system`] runs all checks for `G0`–`G3`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each error branch and a passing configuration.
//!
//! [`LQSystem`]: crate::lq::system::LQSystem
use ndarray::{Array2, ArrayView2};

use crate::lq::{
    blocks::LQBlocks,
    errors::{LQError, LQResult},
};

/// Check that `m` has exactly the `expected` shape.
pub fn validate_shape(
    name: &'static str, m: &ArrayView2<f64>, expected: (usize, usize),
) -> LQResult<()> {
    if m.dim() != expected {
        return Err(LQError::MatrixShape { name, expected, found: m.dim() });
    }
    Ok(())
}

/// Check that `m` is square.
pub fn validate_square(name: &'static str, m: &ArrayView2<f64>) -> LQResult<()> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(LQError::NotSquare { name, rows, cols });
    }
    Ok(())
}

/// Check that every entry of `m` is finite, reporting the first offender
/// in row-major order.
pub fn validate_finite(name: &'static str, m: &ArrayView2<f64>) -> LQResult<()> {
    for ((row, col), &value) in m.indexed_iter() {
        if !value.is_finite() {
            return Err(LQError::NonFinite { name, row, col, value });
        }
    }
    Ok(())
}

/// validate_system — full shape/finiteness check of the pencil matrices.
///
/// Parameters
/// ----------
/// - `blocks`: `&LQBlocks`
///   Block sizes; determine `nk` and `ncsi`.
/// - `g0`, `g1`: `&Array2<f64>`
///   Leading and lag matrices, both `nk × nk`.
/// - `g2`: `&Array2<f64>`
///   Shock loadings, `nk × ncsi`.
/// - `g3`: `&Array2<f64>`
///   Expectational-error loadings, `nk × neta` with `neta ≥ ny`.
///
/// Returns
/// -------
/// `LQResult<()>`
///   `Ok(())` when every check passes; the first violation otherwise.
///
/// Errors
/// ------
/// - `LQError::MatrixShape` on any shape mismatch.
/// - `LQError::ExpectationColumns` when `g3` has fewer than `ny` columns.
/// - `LQError::NonFinite` on NaN/±∞ entries.
pub fn validate_system(
    blocks: &LQBlocks, g0: &Array2<f64>, g1: &Array2<f64>, g2: &Array2<f64>, g3: &Array2<f64>,
) -> LQResult<()> {
    let nk = blocks.nk();
    validate_shape("G0", &g0.view(), (nk, nk))?;
    validate_shape("G1", &g1.view(), (nk, nk))?;
    validate_shape("G2", &g2.view(), (nk, blocks.ncsi))?;
    if g3.nrows() != nk {
        return Err(LQError::MatrixShape {
            name: "G3",
            expected: (nk, g3.ncols().max(blocks.ny)),
            found: g3.dim(),
        });
    }
    if g3.ncols() < blocks.ny {
        return Err(LQError::ExpectationColumns { name: "G3", min: blocks.ny, found: g3.ncols() });
    }
    validate_finite("G0", &g0.view())?;
    validate_finite("G1", &g1.view())?;
    validate_finite("G2", &g2.view())?;
    validate_finite("G3", &g3.view())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Every error branch of `validate_system`.
    // - A passing configuration.
    // -------------------------------------------------------------------------

    fn blocks() -> LQBlocks {
        LQBlocks::new(1, 1, 0, 0).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Accept a consistent 4×4 system.
    //
    // Given
    // -----
    // - ny=1, ncsi=1 → nk=4; G2 is 4×1, G3 is 4×1.
    //
    // Expect
    // ------
    // - `Ok(())`.
    fn consistent_system_passes() {
        let g = Array2::<f64>::eye(4);
        let g2 = Array2::<f64>::zeros((4, 1));
        let g3 = Array2::<f64>::zeros((4, 1));
        assert!(validate_system(&blocks(), &g, &g, &g2, &g3).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Fail fast when G1 has a row too few instead of truncating.
    //
    // Given
    // -----
    // - G1 with shape 3×4 for nk=4.
    //
    // Expect
    // ------
    // - `MatrixShape` naming G1.
    fn mismatched_lag_matrix_is_rejected() {
        let g0 = Array2::<f64>::eye(4);
        let g1 = Array2::<f64>::zeros((3, 4));
        let g2 = Array2::<f64>::zeros((4, 1));
        let g3 = Array2::<f64>::zeros((4, 1));
        let err = validate_system(&blocks(), &g0, &g1, &g2, &g3).unwrap_err();
        assert_eq!(err, LQError::MatrixShape { name: "G1", expected: (4, 4), found: (3, 4) });
    }

    #[test]
    // Purpose
    // -------
    // Reject an expectational matrix with fewer than ny columns.
    //
    // Given
    // -----
    // - G3 with zero columns while ny = 1.
    //
    // Expect
    // ------
    // - `ExpectationColumns { min: 1, found: 0 }`.
    fn too_few_expectational_columns_are_rejected() {
        let g = Array2::<f64>::eye(4);
        let g2 = Array2::<f64>::zeros((4, 1));
        let g3 = Array2::<f64>::zeros((4, 0));
        let err = validate_system(&blocks(), &g, &g, &g2, &g3).unwrap_err();
        assert_eq!(err, LQError::ExpectationColumns { name: "G3", min: 1, found: 0 });
    }

    #[test]
    // Purpose
    // -------
    // Report the first non-finite entry with its position.
    //
    // Given
    // -----
    // - A 2×2 matrix with NaN at (1, 0).
    //
    // Expect
    // ------
    // - `NonFinite { row: 1, col: 0 }`.
    fn non_finite_entry_is_located() {
        let m = array![[1.0, 2.0], [f64::NAN, 4.0]];
        match validate_finite("A0", &m.view()) {
            Err(LQError::NonFinite { name, row, col, value }) => {
                assert_eq!(name, "A0");
                assert_eq!((row, col), (1, 0));
                assert!(value.is_nan());
            }
            other => panic!("expected NonFinite, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the squareness guard.
    //
    // Given
    // -----
    // - A 2×3 matrix.
    //
    // Expect
    // ------
    // - `NotSquare { rows: 2, cols: 3 }`.
    fn non_square_matrix_is_rejected() {
        let m = Array2::<f64>::zeros((2, 3));
        assert_eq!(
            validate_square("B0", &m.view()),
            Err(LQError::NotSquare { name: "B0", rows: 2, cols: 3 })
        );
    }
}
