//! ree::result — the labelled LQ RE solution record.
//!
//! Purpose
//! -------
//! Package the reduced transition matrices, the state labels `z_t`, the
//! block selection matrices and the solver verdict into one immutable
//! record.
//!
//! Key behaviors
//! -------------
//! - [`REE`] is a tagged variant. Each case carries exactly the fields that
//!   exist on its code path:
//!   - [`FullyReduced`]: state `(hy, csi)`, `Sy`, `Scsi`, and `Csi`.
//!   - [`PartiallyReduced`]: state `(hy, csi, GLM)`, `Sy`, `Scsi`, `Svphi`,
//!     and the multiplier sub-blocks `Phi_vphi_*`.
//!   - [`Unreduced`]: state `(hy, csi, FLM, GLM)`, `Sy`, `Scsi`, `SFLM`,
//!     `Svphi`.
//! - Accessors on [`REE`] return `Option` for fields that only some cases
//!   carry; `None` means "not applicable", not failure.
//! - [`LQSolution`] adds `eu`, the generalized eigenvalues and the
//!   [`Diagnostic`]s, and is never mutated after assembly.
//!
//! Invariants & assumptions
//! ------------------------
//! - `phi1` is square of size `z_t.len()`; `phi2` has `z_t.len()` rows.
//! - The selection matrices of a case partition the columns of its state.
//!
//! Testing notes
//! -------------
//! - Assembly is covered here; end-to-end behavior in `tests/`.
use crate::gensys::status::ExistUnique;
use crate::lq::{
    blocks::{LQBlocks, StateBlock},
    labels::StateLabels,
};
use crate::ree::{diagnostics::Diagnostic, reduction::Reduction, selection::block_selections};
use nalgebra::Complex;
use ndarray::{Array2, Axis, concatenate};

const FULL_ORDER: [StateBlock; 2] = [StateBlock::Endogenous, StateBlock::Shocks];
const PARTIAL_ORDER: [StateBlock; 3] =
    [StateBlock::Endogenous, StateBlock::Shocks, StateBlock::ConstraintMultipliers];
const UNREDUCED_ORDER: [StateBlock; 4] = [
    StateBlock::Endogenous,
    StateBlock::Shocks,
    StateBlock::ForwardMultipliers,
    StateBlock::ConstraintMultipliers,
];

/// Multipliers eliminated: `z_t = (hy_t, csi_t)`, `GLM_t = Csi z_t`.
#[derive(Debug, Clone, PartialEq)]
pub struct FullyReduced {
    pub phi1: Array2<f64>,
    pub phi2: Array2<f64>,
    pub csi_map: Array2<f64>,
    pub z_t: Vec<String>,
    pub sy: Array2<f64>,
    pub scsi: Array2<f64>,
}

/// Multipliers kept: `z_t = (hy_t, csi_t, GLM_t)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartiallyReduced {
    pub phi1: Array2<f64>,
    pub phi2: Array2<f64>,
    pub z_t: Vec<String>,
    pub sy: Array2<f64>,
    pub scsi: Array2<f64>,
    pub svphi: Array2<f64>,
    pub phi_vphi_z: Array2<f64>,
    pub phi_vphi_vphi: Array2<f64>,
    pub phi_vphi_eps: Array2<f64>,
}

/// Reduction disabled: `z_t = (hy_t, csi_t, FLM_t, GLM_t)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unreduced {
    pub phi1: Array2<f64>,
    pub phi2: Array2<f64>,
    pub z_t: Vec<String>,
    pub sy: Array2<f64>,
    pub scsi: Array2<f64>,
    pub sflm: Array2<f64>,
    pub svphi: Array2<f64>,
}

/// REEKind — which case of [`REE`] a solution is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum REEKind {
    FullyReduced,
    PartiallyReduced,
    Unreduced,
}

impl std::fmt::Display for REEKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            REEKind::FullyReduced => "fully_reduced",
            REEKind::PartiallyReduced => "partially_reduced",
            REEKind::Unreduced => "unreduced",
        };
        write!(f, "{name}")
    }
}

/// REE — reduced law of motion `z_t = Phi1 z_{t-1} + Phi2 ε_t`.
#[derive(Debug, Clone, PartialEq)]
pub enum REE {
    FullyReduced(FullyReduced),
    PartiallyReduced(PartiallyReduced),
    Unreduced(Unreduced),
}

impl REE {
    /// Attach labels and selections to a [`Reduction`].
    pub fn assemble(reduction: Reduction, blocks: &LQBlocks, labels: &StateLabels) -> REE {
        match reduction {
            Reduction::Full { phi1, phi2, csi_map } => {
                let mut sel = block_selections(blocks, &FULL_ORDER).into_iter().map(|(_, s)| s);
                let (sy, scsi) = (next_or_empty(&mut sel), next_or_empty(&mut sel));
                REE::FullyReduced(FullyReduced {
                    phi1,
                    phi2,
                    csi_map,
                    z_t: labels.for_blocks(blocks, &FULL_ORDER),
                    sy,
                    scsi,
                })
            }
            Reduction::Partial {
                phi1, phi2, phi_vphi_z, phi_vphi_vphi, phi_vphi_eps, ..
            } => {
                let mut sel =
                    block_selections(blocks, &PARTIAL_ORDER).into_iter().map(|(_, s)| s);
                let (sy, scsi, svphi) =
                    (next_or_empty(&mut sel), next_or_empty(&mut sel), next_or_empty(&mut sel));
                REE::PartiallyReduced(PartiallyReduced {
                    phi1,
                    phi2,
                    z_t: labels.for_blocks(blocks, &PARTIAL_ORDER),
                    sy,
                    scsi,
                    svphi,
                    phi_vphi_z,
                    phi_vphi_vphi,
                    phi_vphi_eps,
                })
            }
            Reduction::Unreduced { phi1, phi2 } => {
                let mut sel =
                    block_selections(blocks, &UNREDUCED_ORDER).into_iter().map(|(_, s)| s);
                let (sy, scsi, sflm, svphi) = (
                    next_or_empty(&mut sel),
                    next_or_empty(&mut sel),
                    next_or_empty(&mut sel),
                    next_or_empty(&mut sel),
                );
                REE::Unreduced(Unreduced {
                    phi1,
                    phi2,
                    z_t: labels.for_blocks(blocks, &UNREDUCED_ORDER),
                    sy,
                    scsi,
                    sflm,
                    svphi,
                })
            }
        }
    }

    pub fn kind(&self) -> REEKind {
        match self {
            REE::FullyReduced(_) => REEKind::FullyReduced,
            REE::PartiallyReduced(_) => REEKind::PartiallyReduced,
            REE::Unreduced(_) => REEKind::Unreduced,
        }
    }

    pub fn phi1(&self) -> &Array2<f64> {
        match self {
            REE::FullyReduced(r) => &r.phi1,
            REE::PartiallyReduced(r) => &r.phi1,
            REE::Unreduced(r) => &r.phi1,
        }
    }

    pub fn phi2(&self) -> &Array2<f64> {
        match self {
            REE::FullyReduced(r) => &r.phi2,
            REE::PartiallyReduced(r) => &r.phi2,
            REE::Unreduced(r) => &r.phi2,
        }
    }

    /// Labels of the reduced state `z_t`.
    pub fn z_t(&self) -> &[String] {
        match self {
            REE::FullyReduced(r) => &r.z_t,
            REE::PartiallyReduced(r) => &r.z_t,
            REE::Unreduced(r) => &r.z_t,
        }
    }

    pub fn sy(&self) -> &Array2<f64> {
        match self {
            REE::FullyReduced(r) => &r.sy,
            REE::PartiallyReduced(r) => &r.sy,
            REE::Unreduced(r) => &r.sy,
        }
    }

    pub fn scsi(&self) -> &Array2<f64> {
        match self {
            REE::FullyReduced(r) => &r.scsi,
            REE::PartiallyReduced(r) => &r.scsi,
            REE::Unreduced(r) => &r.scsi,
        }
    }

    pub fn sflm(&self) -> Option<&Array2<f64>> {
        match self {
            REE::Unreduced(r) => Some(&r.sflm),
            _ => None,
        }
    }

    pub fn svphi(&self) -> Option<&Array2<f64>> {
        match self {
            REE::PartiallyReduced(r) => Some(&r.svphi),
            REE::Unreduced(r) => Some(&r.svphi),
            REE::FullyReduced(_) => None,
        }
    }

    pub fn csi_map(&self) -> Option<&Array2<f64>> {
        match self {
            REE::FullyReduced(r) => Some(&r.csi_map),
            _ => None,
        }
    }

    pub fn phi_vphi_z(&self) -> Option<&Array2<f64>> {
        match self {
            REE::PartiallyReduced(r) => Some(&r.phi_vphi_z),
            _ => None,
        }
    }

    pub fn phi_vphi_vphi(&self) -> Option<&Array2<f64>> {
        match self {
            REE::PartiallyReduced(r) => Some(&r.phi_vphi_vphi),
            _ => None,
        }
    }

    pub fn phi_vphi_eps(&self) -> Option<&Array2<f64>> {
        match self {
            REE::PartiallyReduced(r) => Some(&r.phi_vphi_eps),
            _ => None,
        }
    }

    /// Selection matrix of a current-period block, if the state carries it.
    pub fn selection(&self, block: StateBlock) -> Option<&Array2<f64>> {
        match block {
            StateBlock::Endogenous => Some(self.sy()),
            StateBlock::Shocks => Some(self.scsi()),
            StateBlock::ForwardMultipliers => self.sflm(),
            StateBlock::ConstraintMultipliers => self.svphi(),
            _ => None,
        }
    }

    /// expand_state_transition — law of motion of `(hy, csi, GLM)` implied
    /// by a fully reduced solution.
    ///
    /// Returns
    /// -------
    /// `Option<(Array2<f64>, Array2<f64>)>`
    ///   `([Phi1; Csi Phi1], [Phi2; Csi Phi2])`, mapping `z_{t-1}` and `ε_t`
    ///   to `(z_t, GLM_t)`. `None` unless the case is `FullyReduced`.
    ///
    /// Notes
    /// -----
    /// - Along paths with `GLM_{t-1} = Csi z_{t-1}` this reproduces the
    ///   lag-collapsed raw dynamics `C1 [I; Csi]` and `C2`.
    pub fn expand_state_transition(&self) -> Option<(Array2<f64>, Array2<f64>)> {
        let REE::FullyReduced(r) = self else {
            return None;
        };
        let glm1 = r.csi_map.dot(&r.phi1);
        let glm2 = r.csi_map.dot(&r.phi2);
        let t1 = concatenate(Axis(0), &[r.phi1.view(), glm1.view()]).ok()?;
        let t2 = concatenate(Axis(0), &[r.phi2.view(), glm2.view()]).ok()?;
        Some((t1, t2))
    }
}

fn next_or_empty(it: &mut impl Iterator<Item = Array2<f64>>) -> Array2<f64> {
    it.next().unwrap_or_else(|| Array2::zeros((0, 0)))
}

/// LQSolution — complete output of an LQ RE solve.
///
/// Fields
/// ------
/// - `ree`: reduced law of motion with labels and selections.
/// - `eu`: existence/uniqueness verdict of the RE solver.
/// - `diagnostics`: advisories raised during the solve, in order.
/// - `gev`: `nk × 2` generalized eigenvalue pairs `(a_ii, b_ii)`.
///
/// Notes
/// -----
/// - Check [`LQSolution::is_determinate`] before trusting `Phi1`, `Phi2`.
#[derive(Debug, Clone, PartialEq)]
pub struct LQSolution {
    ree: REE,
    eu: ExistUnique,
    diagnostics: Vec<Diagnostic>,
    gev: Array2<Complex<f64>>,
}

impl LQSolution {
    pub fn new(
        ree: REE, eu: ExistUnique, diagnostics: Vec<Diagnostic>, gev: Array2<Complex<f64>>,
    ) -> Self {
        Self { ree, eu, diagnostics, gev }
    }

    pub fn ree(&self) -> &REE {
        &self.ree
    }

    pub fn into_ree(self) -> REE {
        self.ree
    }

    pub fn eu(&self) -> ExistUnique {
        self.eu
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn gev(&self) -> &Array2<Complex<f64>> {
        &self.gev
    }

    /// Labels of the reduced state vector `z_t`.
    pub fn state_labels(&self) -> &[String] {
        self.ree.z_t()
    }

    pub fn is_determinate(&self) -> bool {
        self.eu.is_determinate()
    }

    pub fn selection(&self, block: StateBlock) -> Option<&Array2<f64>> {
        self.ree.selection(block)
    }
}
