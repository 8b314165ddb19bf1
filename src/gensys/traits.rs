//! Public API surface of the generalized RE solver.
//!
//! - [`RationalExpectationsSolver`]: capability trait the orchestrator calls.
//! - [`GensysInput`]: borrowed, shape-checked pencil `(G0, G1, C, Ψ, Π)`.
//! - [`GensysOutput`]: owned raw solution plus the existence/uniqueness code.
//!
//! Convention: the system is written as
//! `G0 k_t = G1 k_{t-1} + C + Ψ ε_t + Π η_t` with `E_t[η_{t+1}] = 0`, and the
//! solution as `k_t = B1 k_{t-1} + const_out + B2 ε_t`.
use crate::gensys::{
    errors::{GensysError, GensysResult},
    status::ExistUnique,
};
use nalgebra::Complex;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Capability interface for linear RE solvers.
///
/// Required:
/// - `solve(&GensysInput) -> GensysResult<GensysOutput>`: compute the stable
///   solution of the pencil.
///   - Errors: only ill-posed inputs (singular transforms, non-convergent
///     decompositions) are errors. Non-existence and indeterminacy are
///     reported through `GensysOutput::eu` with numeric outputs still filled.
///
/// Implementors must be pure over their inputs; the orchestrator calls
/// `solve` exactly once per RE solve.
pub trait RationalExpectationsSolver {
    fn solve(&self, input: &GensysInput<'_>) -> GensysResult<GensysOutput>;
}

/// GensysInput — borrowed pencil with validated shapes.
///
/// Fields
/// ------
/// - `g0`, `g1`: `n × n` pencil matrices.
/// - `c`: constant, length `n`.
/// - `psi`: `n × n_shock` shock loadings.
/// - `pi`: `n × n_eta` expectational-error loadings.
#[derive(Debug, Clone)]
pub struct GensysInput<'a> {
    pub g0: ArrayView2<'a, f64>,
    pub g1: ArrayView2<'a, f64>,
    pub c: ArrayView1<'a, f64>,
    pub psi: ArrayView2<'a, f64>,
    pub pi: ArrayView2<'a, f64>,
}

impl<'a> GensysInput<'a> {
    /// Bundle the pencil after checking that every piece conforms to `G0`.
    ///
    /// Errors
    /// ------
    /// - `GensysError::EmptySystem` when `G0` is `0 × 0`.
    /// - `GensysError::DimensionMismatch` when `G0` is not square or any other
    ///   input has the wrong number of rows.
    pub fn new(
        g0: ArrayView2<'a, f64>, g1: ArrayView2<'a, f64>, c: ArrayView1<'a, f64>,
        psi: ArrayView2<'a, f64>, pi: ArrayView2<'a, f64>,
    ) -> GensysResult<Self> {
        let (n, m) = g0.dim();
        if n == 0 && m == 0 {
            return Err(GensysError::EmptySystem);
        }
        if n != m {
            return Err(GensysError::DimensionMismatch {
                name: "G0",
                expected: (n, n),
                found: (n, m),
            });
        }
        if g1.dim() != (n, n) {
            return Err(GensysError::DimensionMismatch {
                name: "G1",
                expected: (n, n),
                found: g1.dim(),
            });
        }
        if c.len() != n {
            return Err(GensysError::DimensionMismatch {
                name: "C",
                expected: (n, 1),
                found: (c.len(), 1),
            });
        }
        if psi.nrows() != n {
            return Err(GensysError::DimensionMismatch {
                name: "Psi",
                expected: (n, psi.ncols()),
                found: psi.dim(),
            });
        }
        if pi.nrows() != n {
            return Err(GensysError::DimensionMismatch {
                name: "Pi",
                expected: (n, pi.ncols()),
                found: pi.dim(),
            });
        }
        Ok(Self { g0, g1, c, psi, pi })
    }

    /// System dimension `n`.
    pub fn n(&self) -> usize {
        self.g0.nrows()
    }
}

/// GensysOutput — raw solution of the pencil.
///
/// Fields
/// ------
/// - `b1`: `n × n` transition matrix.
/// - `const_out`: length-`n` constant.
/// - `b2`: `n × n_shock` impact matrix.
/// - `fmat`: `nu × nu` forward dynamics of the unstable block.
/// - `fwt`: `nu × n_shock` forward shock weights.
/// - `ywt`: `n × nu` loading of the unstable block on the state.
/// - `gev`: `n × 2`, columns `diag(a)` and `diag(b)` of the ordered QZ form.
/// - `eu`: existence/uniqueness code.
///
/// `nu` is the number of unstable generalized eigenvalues.
#[derive(Debug, Clone, PartialEq)]
pub struct GensysOutput {
    pub b1: Array2<f64>,
    pub const_out: Array1<f64>,
    pub b2: Array2<f64>,
    pub fmat: Array2<Complex<f64>>,
    pub fwt: Array2<Complex<f64>>,
    pub ywt: Array2<Complex<f64>>,
    pub gev: Array2<Complex<f64>>,
    pub eu: ExistUnique,
}

impl GensysOutput {
    /// Number of roots classified as unstable.
    pub fn n_unstable(&self) -> usize {
        self.fmat.nrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Shape validation performed by `GensysInput::new`.
    //
    // They intentionally DO NOT cover:
    // - Solving; see `gensys::sims`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Reject a constant vector whose length does not match `G0`.
    //
    // Given
    // -----
    // - 2×2 `G0`/`G1`, a length-3 constant.
    //
    // Expect
    // ------
    // - `DimensionMismatch { name: "C", .. }`.
    fn input_rejects_constant_of_wrong_length() {
        // Arrange
        let g = Array2::<f64>::eye(2);
        let c = Array1::<f64>::zeros(3);
        let psi = Array2::<f64>::zeros((2, 1));

        // Act
        let err = GensysInput::new(g.view(), g.view(), c.view(), psi.view(), psi.view())
            .unwrap_err();

        // Assert
        assert!(matches!(err, GensysError::DimensionMismatch { name: "C", .. }), "Got: {err}");
    }

    #[test]
    // Purpose
    // -------
    // Reject an empty pencil.
    //
    // Given
    // -----
    // - 0×0 matrices.
    //
    // Expect
    // ------
    // - `GensysError::EmptySystem`.
    fn input_rejects_empty_pencil() {
        let g = Array2::<f64>::zeros((0, 0));
        let c = Array1::<f64>::zeros(0);
        let err =
            GensysInput::new(g.view(), g.view(), c.view(), g.view(), g.view()).unwrap_err();
        assert_eq!(err, GensysError::EmptySystem);
    }

    #[test]
    // Purpose
    // -------
    // Accept conforming inputs with zero shock and zero expectational columns.
    //
    // Given
    // -----
    // - 3×3 pencil, `Ψ` and `Π` of shape 3×0.
    //
    // Expect
    // ------
    // - `Ok`, with `n() == 3`.
    fn input_accepts_zero_width_loadings() {
        let g = Array2::<f64>::eye(3);
        let c = Array1::<f64>::zeros(3);
        let empty = Array2::<f64>::zeros((3, 0));
        let input =
            GensysInput::new(g.view(), g.view(), c.view(), empty.view(), empty.view()).unwrap();
        assert_eq!(input.n(), 3);
    }
}
