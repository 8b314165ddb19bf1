//! ree::kron — least-squares fit of a static multiplier law.
//!
//! Purpose
//! -------
//! Find `Csi` such that `C_GLM ≈ Csi · C_z`, the vectorized form of which is
//! the Kronecker-structured system
//!
//! ```text
//! vec(C_GLM) = (C_zᵀ ⊗ I_ng) · vec(Csi),
//! ```
//!
//! and decide whether the fit is exact on a tolerance grid.
//!
//! Key behaviors
//! -------------
//! - [`fit_multiplier_law`] solves the system through the identity
//!   `(C_zᵀ ⊗ I)⁺ = (C_zᵀ)⁺ ⊗ I`, i.e. `Csi = C_GLM · C_z⁺`, without ever
//!   materializing the `ng·m × ng·nz` operator.
//! - [`rounds_to_zero`] is the residual check: every entry of `R / ε` must
//!   round (half away from zero) to `0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The pseudo-inverse drops singular values below
//!   `max(rows, cols) · σ_max · f64::EPSILON`.
//! - The grid check passes exactly when `|R_ij| < ε/2` for all entries; a
//!   residual of exactly `ε/2` fails.
//!
//! Testing notes
//! -------------
//! - Tests compare the implicit solve with an explicitly built Kronecker
//!   operator, and pin the boundary behavior of the grid check.
use crate::numerics::{from_dmatrix, to_dmatrix};
use crate::ree::errors::REEResult;
use anyhow::anyhow;
use ndarray::{Array2, ArrayView2};

/// MultiplierFit — least-squares multiplier law and its residual.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierFit {
    /// `ng × nz` coefficient matrix `Csi`.
    pub csi: Array2<f64>,
    /// `C_GLM − Csi · C_z`.
    pub residual: Array2<f64>,
}

impl MultiplierFit {
    pub fn max_abs_residual(&self) -> f64 {
        self.residual.iter().fold(0.0, |acc, r| acc.max(r.abs()))
    }
}

/// fit_multiplier_law — best-fit `Csi` for `C_GLM = Csi · C_z`.
///
/// Parameters
/// ----------
/// - `c_glm`: `&ArrayView2<f64>`
///   `ng × m` multiplier rows `[C1_GLM | C2_GLM]`.
/// - `c_z`: `&ArrayView2<f64>`
///   `nz × m` flow rows `[C1_z | C2_z]`.
///
/// Returns
/// -------
/// `REEResult<MultiplierFit>`
///   Minimum-norm least-squares `Csi` and the residual.
///
/// Errors
/// ------
/// - `REEError::Anyhow` when the pseudo-inverse cannot be formed.
pub fn fit_multiplier_law(
    c_glm: &ArrayView2<f64>, c_z: &ArrayView2<f64>,
) -> REEResult<MultiplierFit> {
    let pinv = pseudo_inverse(c_z)?;
    let csi = c_glm.dot(&pinv);
    let residual = c_glm - &csi.dot(c_z);
    Ok(MultiplierFit { csi, residual })
}

/// Moore–Penrose inverse with the usual rank cut-off.
fn pseudo_inverse(m: &ArrayView2<f64>) -> REEResult<Array2<f64>> {
    let (rows, cols) = m.dim();
    if rows == 0 || cols == 0 {
        return Ok(Array2::zeros((cols, rows)));
    }
    let svd = to_dmatrix(m).svd(true, true);
    let sigma_max = svd.singular_values.iter().fold(0.0_f64, |acc, &s| acc.max(s));
    let cutoff = rows.max(cols) as f64 * sigma_max * f64::EPSILON;
    let pinv = svd.pseudo_inverse(cutoff).map_err(|msg| anyhow!("pseudo-inverse failed: {msg}"))?;
    Ok(from_dmatrix(&pinv))
}

/// rounds_to_zero — residual check on the `tol` grid.
///
/// Returns `true` when `round(r / tol) == 0` for every entry, with
/// `f64::round` semantics (ties away from zero).
pub fn rounds_to_zero(residual: &ArrayView2<f64>, tol: f64) -> bool {
    residual.iter().all(|&r| (r / tol).round() == 0.0)
}
