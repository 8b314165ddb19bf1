//! ree::reduction — shrink the raw RE state to its essential block.
//!
//! Purpose
//! -------
//! The RE solver returns `(B1, B2)` on the full augmented state
//! `(hy_t, csi_t, FLM_t, GLM_t, hy_{t-1}, csi_{t-1}, GLM_{t-1})`. This module
//! drops the lag duplication and the forward multipliers, then tries to
//! express the constraint multipliers as a static function of
//! `z_t = (hy_t, csi_t)`.
//!
//! Key behaviors
//! -------------
//! - [`collapse_lags`] keeps the leading `(hy, csi, FLM, GLM)` block and
//!   removes `FLM`, giving `C1` and `C2` on `(hy, csi, GLM)`.
//! - [`reduce_state`] fits `GLM_t = Csi z_t` with
//!   [`fit_multiplier_law`] and checks the residual on the `tol` grid:
//!   - success: `Phi1 = C1_zz + C1_{z,GLM} Csi`, `Phi2 = C2_z`;
//!   - failure: `Phi1 = C1`, `Phi2 = C2` plus the multiplier sub-blocks.
//! - Without multipliers (`ng = 0`) the collapsed matrices pass through.
//! - With `reduce = false` the leading current-period block is returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - `b1` is `nk × nk` and `b2` is `nk × ncsi` (checked by the caller).
//! - A failed fit is not an error; it selects [`Reduction::Partial`].
//!
//! Downstream usage
//! ----------------
//! - `ree::result` turns a [`Reduction`] into the labelled [`REE`] record.
//!
//! [`REE`]: crate::ree::result::REE
use crate::lq::blocks::{LQBlocks, StateBlock};
use crate::ree::{
    errors::REEResult,
    kron::{MultiplierFit, fit_multiplier_law, rounds_to_zero},
};
use ndarray::{Array2, ArrayView2, Axis, concatenate, s};
use tracing::debug;

/// Reduction — transition matrices of the reduced state.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    /// Multipliers eliminated; state `(hy, csi)`.
    Full { phi1: Array2<f64>, phi2: Array2<f64>, csi_map: Array2<f64> },
    /// Fit rejected; state `(hy, csi, GLM)`.
    Partial {
        phi1: Array2<f64>,
        phi2: Array2<f64>,
        phi_vphi_z: Array2<f64>,
        phi_vphi_vphi: Array2<f64>,
        phi_vphi_eps: Array2<f64>,
        max_abs_residual: f64,
    },
    /// Reduction disabled; state `(hy, csi, FLM, GLM)`.
    Unreduced { phi1: Array2<f64>, phi2: Array2<f64> },
}

/// collapse_lags — `(C1, C2)` on `(hy, csi, GLM)`.
///
/// Keeps rows/columns `0..ny+ncsi` and the current `GLM` block of `b1`
/// (rows of `b2`), dropping the forward multipliers and every lag.
pub fn collapse_lags(
    b1: &ArrayView2<f64>, b2: &ArrayView2<f64>, blocks: &LQBlocks,
) -> (Array2<f64>, Array2<f64>) {
    let keep: Vec<usize> = (0..blocks.n_flow())
        .chain(blocks.range(StateBlock::ConstraintMultipliers))
        .collect();
    let c1 = b1.select(Axis(0), &keep).select(Axis(1), &keep);
    let c2 = b2.select(Axis(0), &keep);
    (c1, c2)
}

/// reduce_state — lag collapse plus multiplier elimination.
///
/// Parameters
/// ----------
/// - `b1`: `&ArrayView2<f64>`
///   Raw `nk × nk` transition matrix.
/// - `b2`: `&ArrayView2<f64>`
///   Raw `nk × ncsi` impact matrix.
/// - `blocks`: `&LQBlocks`
///   Block layout of the raw state.
/// - `tol`: `f64`
///   Grid size of the residual check.
/// - `reduce`: `bool`
///   When `false`, return the current-period block unchanged.
///
/// Returns
/// -------
/// `REEResult<Reduction>`
///
/// Errors
/// ------
/// - `REEError::Anyhow` when the pseudo-inverse or a block concatenation
///   fails.
pub fn reduce_state(
    b1: &ArrayView2<f64>, b2: &ArrayView2<f64>, blocks: &LQBlocks, tol: f64, reduce: bool,
) -> REEResult<Reduction> {
    if !reduce {
        let n = blocks.n_current();
        return Ok(Reduction::Unreduced {
            phi1: b1.slice(s![..n, ..n]).to_owned(),
            phi2: b2.slice(s![..n, ..]).to_owned(),
        });
    }

    let (c1, c2) = collapse_lags(b1, b2, blocks);
    let nz = blocks.n_flow();

    if blocks.ng == 0 {
        return Ok(Reduction::Full {
            phi1: c1,
            phi2: c2,
            csi_map: Array2::zeros((0, nz)),
        });
    }

    let c_z = concatenate(Axis(1), &[c1.slice(s![..nz, ..]), c2.slice(s![..nz, ..])])
        .map_err(anyhow::Error::from)?;
    let c_glm = concatenate(Axis(1), &[c1.slice(s![nz.., ..]), c2.slice(s![nz.., ..])])
        .map_err(anyhow::Error::from)?;
    let fit = fit_multiplier_law(&c_glm.view(), &c_z.view())?;

    if rounds_to_zero(&fit.residual.view(), tol) {
        debug!(ng = blocks.ng, max_abs_residual = fit.max_abs_residual(), "multipliers eliminated");
        let MultiplierFit { csi, .. } = fit;
        let phi1 = &c1.slice(s![..nz, ..nz]) + &c1.slice(s![..nz, nz..]).dot(&csi);
        let phi2 = c2.slice(s![..nz, ..]).to_owned();
        return Ok(Reduction::Full { phi1, phi2, csi_map: csi });
    }

    Ok(Reduction::Partial {
        phi_vphi_z: c1.slice(s![nz.., ..nz]).to_owned(),
        phi_vphi_vphi: c1.slice(s![nz.., nz..]).to_owned(),
        phi_vphi_eps: c2.slice(s![nz.., ..]).to_owned(),
        max_abs_residual: fit.max_abs_residual(),
        phi1: c1,
        phi2: c2,
    })
}
