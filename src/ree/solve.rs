//! ree::solve — end-to-end LQ rational-expectations solve.
//!
//! Purpose
//! -------
//! Run the full pipeline on a validated [`LQSystem`]:
//!
//! 1. check the labels against the block layout,
//! 2. rewrite expectational rows without forward content
//!    ([`patch_degenerate_rows`]),
//! 3. solve the pencil with a [`RationalExpectationsSolver`],
//! 4. translate `eu` into a [`Diagnostic`] (logged, never fatal),
//! 5. reduce the state ([`reduce_state`]) and log a failed fit,
//! 6. assemble the [`LQSolution`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Only configuration errors and fatal solver errors abort; every quality
//!   issue is attached to the result as a [`Diagnostic`].
//! - The solver output is checked against the block layout before it is
//!   reduced.
//!
//! Downstream usage
//! ----------------
//! - [`solve_lq_ree`] uses [`Gensys`] with its default options.
//! - [`solve_lq_ree_with`] accepts any solver, e.g. a `Gensys` with a fixed
//!   boundary.
use crate::gensys::{
    sims::Gensys,
    traits::{GensysInput, GensysOutput, RationalExpectationsSolver},
};
use crate::lq::{
    blocks::LQBlocks, errors::LQError, labels::StateLabels, system::LQSystem,
};
use crate::ree::{
    diagnostics::Diagnostic,
    errors::{REEError, REEResult},
    options::REEOptions,
    prefilter::patch_degenerate_rows,
    reduction::{Reduction, reduce_state},
    result::{LQSolution, REE},
};
use tracing::debug;

/// solve_lq_ree — solve and reduce an LQ system with the default solver.
///
/// Parameters
/// ----------
/// - `system`: `&LQSystem`
///   Validated coefficient bundle.
/// - `labels`: `&StateLabels`
///   One label per augmented state entry.
/// - `opts`: `&REEOptions`
///   Reduction tolerance and switch.
///
/// Returns
/// -------
/// `REEResult<LQSolution>`
///
/// Errors
/// ------
/// - `REEError::Model(LQError::LabelCount)` when labels do not match `nk`.
/// - `REEError::Solver(_)` on a fatal solver failure.
/// - `REEError::RawShape` when solver output does not fit the layout.
/// - `REEError::Anyhow` when the multiplier fit cannot be computed.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::{Array2, array};
/// # use rust_ree::lq::{LQBlocks, LQSystem, StateLabels};
/// # use rust_ree::ree::{REEOptions, solve_lq_ree};
/// // y_t = 0.5 y_{t-1} + csi_t,  csi_t = 0.9 csi_{t-1} + eps_t
/// let blocks = LQBlocks::new(1, 1, 0, 0).unwrap();
/// let g0 = array![[1.0, -1.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]];
/// let g1 = array![[0.5, 0.0, 0.0, 0.0], [0.0, 0.9, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0]];
/// let g2 = array![[0.0], [1.0], [0.0], [0.0]];
/// let g3 = Array2::<f64>::zeros((4, 1));
/// let system = LQSystem::new(blocks, g0, g1, g2, g3).unwrap();
/// let labels = StateLabels::generated(&blocks);
///
/// let sol = solve_lq_ree(&system, &labels, &REEOptions::default()).unwrap();
/// assert!(sol.is_determinate());
/// assert_eq!(sol.state_labels(), &["y1", "csi1"]);
/// ```
pub fn solve_lq_ree(
    system: &LQSystem, labels: &StateLabels, opts: &REEOptions,
) -> REEResult<LQSolution> {
    solve_lq_ree_with(&Gensys::default(), system, labels, opts)
}

/// solve_lq_ree_with — as [`solve_lq_ree`], with a caller-chosen solver.
pub fn solve_lq_ree_with<S: RationalExpectationsSolver + ?Sized>(
    solver: &S, system: &LQSystem, labels: &StateLabels, opts: &REEOptions,
) -> REEResult<LQSolution> {
    let blocks = system.blocks();
    if labels.len() != blocks.nk() {
        return Err(LQError::LabelCount { expected: blocks.nk(), found: labels.len() }.into());
    }
    let opts = REEOptions::new(opts.tol, opts.reduce)?;

    let patch = patch_degenerate_rows(
        blocks.ny,
        &system.g0().view(),
        &system.g1().view(),
        &system.g3().view(),
    );
    let input = GensysInput::new(
        patch.g0.view(),
        patch.g1.view(),
        system.constant().view(),
        system.g2().view(),
        patch.g3.view(),
    )?;
    let raw = solver.solve(&input)?;
    check_raw_shapes(&raw, blocks)?;

    let mut diagnostics = Vec::new();
    if let Some(d) = Diagnostic::from_eu(raw.eu) {
        d.emit();
        diagnostics.push(d);
    }

    let reduction = reduce_state(&raw.b1.view(), &raw.b2.view(), blocks, opts.tol, opts.reduce)?;
    if let Reduction::Partial { max_abs_residual, .. } = &reduction {
        let d = Diagnostic::ReductionFailed { max_abs_residual: *max_abs_residual, tol: opts.tol };
        d.emit();
        diagnostics.push(d);
    }

    let ree = REE::assemble(reduction, blocks, labels);
    debug!(
        nk = blocks.nk(),
        patched = patch.patched_rows.len(),
        kind = %ree.kind(),
        eu = %raw.eu,
        "LQ RE solve complete"
    );

    Ok(LQSolution::new(ree, raw.eu, diagnostics, raw.gev))
}

fn check_raw_shapes(raw: &GensysOutput, blocks: &LQBlocks) -> REEResult<()> {
    let nk = blocks.nk();
    if raw.b1.dim() != (nk, nk) {
        return Err(REEError::RawShape { name: "B1", expected: (nk, nk), found: raw.b1.dim() });
    }
    if raw.b2.dim() != (nk, blocks.ncsi) {
        return Err(REEError::RawShape {
            name: "B2",
            expected: (nk, blocks.ncsi),
            found: raw.b2.dim(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gensys::{errors::GensysResult, status::ExistUnique};
    use crate::ree::result::REEKind;
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Label validation before any solver work.
    // - The solver seam: a stub solver with a fixed verdict and a stub that
    //   violates the output shape contract.
    //
    // They intentionally DO NOT cover:
    // - Economic scenarios, which live in `tests/integration_lq_ree.rs`.
    // -------------------------------------------------------------------------

    // ny=1, ncsi=1: y_t = 0.5 y_{t-1} + csi_t, csi_t = 0.9 csi_{t-1} + eps_t.
    fn passthrough_system() -> LQSystem {
        let blocks = LQBlocks::new(1, 1, 0, 0).unwrap();
        let mut g0 = Array2::<f64>::eye(4);
        g0[[0, 1]] = -1.0;
        let g1 = array![
            [0.5, 0.0, 0.0, 0.0],
            [0.0, 0.9, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0]
        ];
        let g2 = array![[0.0], [1.0], [0.0], [0.0]];
        LQSystem::new(blocks, g0, g1, g2, Array2::zeros((4, 1))).unwrap()
    }

    struct FixedSolver {
        n: usize,
        eu: ExistUnique,
    }

    impl RationalExpectationsSolver for FixedSolver {
        fn solve(&self, input: &GensysInput<'_>) -> GensysResult<GensysOutput> {
            Ok(GensysOutput {
                b1: Array2::eye(self.n),
                const_out: Array1::zeros(self.n),
                b2: Array2::zeros((self.n, input.psi.ncols())),
                fmat: Array2::zeros((0, 0)),
                fwt: Array2::zeros((0, input.psi.ncols())),
                ywt: Array2::zeros((self.n, 0)),
                gev: Array2::zeros((self.n, 2)),
                eu: self.eu,
            })
        }
    }

    #[test]
    // Purpose
    // -------
    // Wrong label counts fail before the solver runs.
    //
    // Given
    // -----
    // - A 4-state system and labels generated for a 6-state layout.
    //
    // Expect
    // ------
    // - `REEError::Model(LQError::LabelCount { expected: 4, found: 6 })`.
    fn solve_rejects_mismatched_labels() {
        // Arrange
        let system = passthrough_system();
        let other = LQBlocks::new(1, 1, 0, 1).unwrap();
        let labels = StateLabels::generated(&other);

        // Act
        let err = solve_lq_ree(&system, &labels, &REEOptions::default()).unwrap_err();

        // Assert
        assert_eq!(err, REEError::Model(LQError::LabelCount { expected: 4, found: 6 }));
    }

    #[test]
    // Purpose
    // -------
    // A non-determinate verdict becomes a diagnostic without aborting.
    //
    // Given
    // -----
    // - A stub solver reporting `eu = (0, 0)`.
    //
    // Expect
    // ------
    // - `Ok` solution with that `eu` and one
    //   `NoStableSolutionAndIndeterminacy` diagnostic.
    fn solve_attaches_solver_verdict() {
        // Arrange
        let system = passthrough_system();
        let labels = StateLabels::generated(system.blocks());
        let solver = FixedSolver { n: 4, eu: ExistUnique::new(0, 0) };

        // Act
        let sol = solve_lq_ree_with(&solver, &system, &labels, &REEOptions::default()).unwrap();

        // Assert
        assert_eq!(sol.eu(), ExistUnique::new(0, 0));
        assert!(!sol.is_determinate());
        assert_eq!(sol.diagnostics(), &[Diagnostic::NoStableSolutionAndIndeterminacy]);
        assert_eq!(sol.ree().kind(), REEKind::FullyReduced);
    }

    #[test]
    // Purpose
    // -------
    // Solver output that violates the layout is rejected.
    //
    // Given
    // -----
    // - A stub solver returning a 3×3 `B1` for a 4-state system.
    //
    // Expect
    // ------
    // - `REEError::RawShape { name: "B1", .. }`.
    fn solve_rejects_misshaped_solver_output() {
        let system = passthrough_system();
        let labels = StateLabels::generated(system.blocks());
        let solver = FixedSolver { n: 3, eu: ExistUnique::DETERMINATE };
        let err = solve_lq_ree_with(&solver, &system, &labels, &REEOptions::default());
        assert!(matches!(err, Err(REEError::RawShape { name: "B1", .. })), "Got: {err:?}");
    }

    #[test]
    // Purpose
    // -------
    // Options built by hand are re-validated.
    //
    // Given
    // -----
    // - `REEOptions { tol: -1.0, reduce: true }` built with a struct literal.
    //
    // Expect
    // ------
    // - `REEError::InvalidTolerance`.
    fn solve_revalidates_options() {
        let system = passthrough_system();
        let labels = StateLabels::generated(system.blocks());
        let opts = REEOptions { tol: -1.0, reduce: true };
        let err = solve_lq_ree(&system, &labels, &opts).unwrap_err();
        assert_eq!(err, REEError::InvalidTolerance { tol: -1.0 });
    }
}
