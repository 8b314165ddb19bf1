//! lq::system — the LQ coefficient bundle consumed by the RE solve.
//!
//! Purpose
//! -------
//! Hold the numeric matrices of a linear system of expectational difference
//! equations produced by an LQ approximation to an optimal-policy problem,
//!
//!   `G0 k_t = G1 k_{t-1} + C + G2 eps_t + G3 eta_t`,
//!
//! together with the block sizes that give the augmented state `k_t` its
//! meaning. The bundle is validated once at construction and is immutable
//! afterwards.
//!
//! Key behaviors
//! -------------
//! - [`LQSystem::new`] validates `G0`–`G3` against [`LQBlocks`].
//! - [`LQSystem::with_constant`] attaches a constant vector (zeros by
//!   default).
//! - [`LQSystem::with_loss_matrices`] attaches the quadratic-loss and
//!   constraint coefficients `A0`–`D0` of the underlying LQ problem; they
//!   are carried for reference and never enter the solve.
//!
//! Invariants & assumptions
//! ------------------------
//! - `G0`, `G1` are `nk × nk`; `G2` is `nk × ncsi`; `G3` is `nk × neta`
//!   with `neta ≥ ny`, column `i < ny` belonging to expectational row `i`.
//! - All stored entries are finite.
//!
//! Downstream usage
//! ----------------
//! - Build an [`LQSystem`], pair it with [`StateLabels`], and pass both to
//!   [`crate::ree::solve_lq_ree`].
//!
//! [`StateLabels`]: crate::lq::labels::StateLabels
use ndarray::{Array1, Array2};

use crate::lq::{
    blocks::LQBlocks,
    errors::{LQError, LQResult},
    validation::{validate_finite, validate_system},
};

/// LQLossMatrices — coefficients of the LQ problem behind `G0`–`G3`.
///
/// Fields
/// ------
/// - `a0`, `b0`, `c0`, `d0`: `Array2<f64>`
///   Quadratic-loss and linearized-constraint coefficient matrices as
///   produced by the symbolic LQ construction. Shapes are model specific;
///   only finiteness is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct LQLossMatrices {
    pub a0: Array2<f64>,
    pub b0: Array2<f64>,
    pub c0: Array2<f64>,
    pub d0: Array2<f64>,
}

impl LQLossMatrices {
    pub fn new(
        a0: Array2<f64>, b0: Array2<f64>, c0: Array2<f64>, d0: Array2<f64>,
    ) -> LQResult<LQLossMatrices> {
        validate_finite("A0", &a0.view())?;
        validate_finite("B0", &b0.view())?;
        validate_finite("C0", &c0.view())?;
        validate_finite("D0", &d0.view())?;
        Ok(LQLossMatrices { a0, b0, c0, d0 })
    }
}

/// LQSystem — validated, immutable LQ coefficient bundle.
///
/// Purpose
/// -------
/// Bundle the pencil `(G0, G1)`, the shock loadings `G2`, the expectational
/// loadings `G3`, an optional constant, and optional LQ loss matrices for a
/// given block layout.
///
/// Parameters
/// ----------
/// Constructed via [`LQSystem::new`]; see the module docs for shapes.
///
/// Invariants
/// ----------
/// - Shapes match [`LQBlocks`] exactly; construction fails otherwise.
/// - The constant has length `nk`.
///
/// Notes
/// -----
/// - Fields are private; accessors return borrowed views so a constructed
///   bundle cannot drift out of its validated state.
#[derive(Debug, Clone, PartialEq)]
pub struct LQSystem {
    blocks: LQBlocks,
    g0: Array2<f64>,
    g1: Array2<f64>,
    g2: Array2<f64>,
    g3: Array2<f64>,
    constant: Array1<f64>,
    loss: Option<LQLossMatrices>,
}

impl LQSystem {
    /// Validate and wrap the pencil matrices.
    ///
    /// Errors
    /// ------
    /// - Any [`LQError`] raised by [`validate_system`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::Array2;
    /// # use rust_ree::lq::{LQBlocks, LQSystem};
    /// let blocks = LQBlocks::new(1, 1, 0, 0).unwrap();
    /// let g0 = Array2::<f64>::eye(4);
    /// let g1 = Array2::<f64>::zeros((4, 4));
    /// let g2 = Array2::<f64>::zeros((4, 1));
    /// let g3 = Array2::<f64>::zeros((4, 1));
    /// let system = LQSystem::new(blocks, g0, g1, g2, g3).unwrap();
    /// assert_eq!(system.constant().len(), 4);
    /// ```
    pub fn new(
        blocks: LQBlocks, g0: Array2<f64>, g1: Array2<f64>, g2: Array2<f64>, g3: Array2<f64>,
    ) -> LQResult<LQSystem> {
        validate_system(&blocks, &g0, &g1, &g2, &g3)?;
        let constant = Array1::zeros(blocks.nk());
        Ok(LQSystem { blocks, g0, g1, g2, g3, constant, loss: None })
    }

    /// Replace the (zero) constant vector.
    ///
    /// Errors
    /// ------
    /// - `LQError::ConstantLength` when `constant.len() != nk`.
    /// - `LQError::NonFinite` on NaN/±∞ entries.
    pub fn with_constant(mut self, constant: Array1<f64>) -> LQResult<LQSystem> {
        if constant.len() != self.blocks.nk() {
            return Err(LQError::ConstantLength {
                expected: self.blocks.nk(),
                found: constant.len(),
            });
        }
        if let Some((row, &value)) = constant.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(LQError::NonFinite { name: "C", row, col: 0, value });
        }
        self.constant = constant;
        Ok(self)
    }

    /// Attach the LQ loss/constraint coefficients.
    pub fn with_loss_matrices(mut self, loss: LQLossMatrices) -> LQSystem {
        self.loss = Some(loss);
        self
    }

    pub fn blocks(&self) -> &LQBlocks {
        &self.blocks
    }

    pub fn g0(&self) -> &Array2<f64> {
        &self.g0
    }

    pub fn g1(&self) -> &Array2<f64> {
        &self.g1
    }

    pub fn g2(&self) -> &Array2<f64> {
        &self.g2
    }

    pub fn g3(&self) -> &Array2<f64> {
        &self.g3
    }

    pub fn constant(&self) -> &Array1<f64> {
        &self.constant
    }

    pub fn loss(&self) -> Option<&LQLossMatrices> {
        self.loss.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction with and without a constant.
    // - Rejection of a wrongly sized constant and of non-finite loss
    //   matrices.
    //
    // They intentionally DO NOT cover:
    // - Every shape branch, which lives in `lq::validation`.
    // -------------------------------------------------------------------------

    fn small_system() -> LQSystem {
        let blocks = LQBlocks::new(1, 1, 0, 0).unwrap();
        LQSystem::new(
            blocks,
            Array2::eye(4),
            Array2::zeros((4, 4)),
            Array2::zeros((4, 1)),
            Array2::zeros((4, 1)),
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that the default constant is a zero vector of length nk.
    //
    // Given
    // -----
    // - A valid 4×4 system.
    //
    // Expect
    // ------
    // - `constant()` is all zeros with length 4 and no loss matrices.
    fn default_constant_is_zero() {
        let system = small_system();
        assert_eq!(system.constant(), &Array1::<f64>::zeros(4));
        assert!(system.loss().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Ensure a constant of the wrong length is rejected.
    //
    // Given
    // -----
    // - A length-3 constant for nk = 4.
    //
    // Expect
    // ------
    // - `ConstantLength { expected: 4, found: 3 }`.
    fn wrong_constant_length_is_rejected() {
        let err = small_system().with_constant(Array1::zeros(3)).unwrap_err();
        assert_eq!(err, LQError::ConstantLength { expected: 4, found: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Check that loss matrices are validated for finiteness and stored.
    //
    // Given
    // -----
    // - A finite set and a set with an infinite `C0` entry.
    //
    // Expect
    // ------
    // - The finite set is attached; the other yields `NonFinite` for C0.
    fn loss_matrices_are_validated_and_carried() {
        // Arrange
        let ok = LQLossMatrices::new(
            array![[1.0]],
            array![[0.5, 0.0]],
            array![[0.0]],
            array![[2.0]],
        )
        .unwrap();
        let bad = LQLossMatrices::new(
            array![[1.0]],
            array![[0.5]],
            array![[f64::INFINITY]],
            array![[2.0]],
        );

        // Act
        let system = small_system().with_loss_matrices(ok.clone());

        // Assert
        assert_eq!(system.loss(), Some(&ok));
        assert!(matches!(bad, Err(LQError::NonFinite { name: "C0", .. })));
    }
}
