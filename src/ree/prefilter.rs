//! ree::prefilter — rewrite expectational rows without forward content.
//!
//! Purpose
//! -------
//! The first `ny` rows of `G0` encode one-period-ahead expectational
//! first-order conditions. For some parameterizations such a row is
//! identically zero in `G0`: the equation carries no forward-looking term and
//! is really a backward-looking identity. Left as is, it hands the RE solver a
//! degenerate leading matrix.
//!
//! Key behaviors
//! -------------
//! - For every all-zero row `i < ny` of `G0`: set `G0[i, :] = -G1[i, :]`,
//!   zero `G1[i, :]`, and drop column `i` of `G3`.
//! - Rows are patched independently; column deletions refer to the original
//!   column indices.
//! - Rows that are zero in both `G0` and `G1` carry no equation at all and
//!   are left untouched (the RE solver then reports coincident zeros).
//!
//! Invariants & assumptions
//! ------------------------
//! - The pass is idempotent: after one pass no patchable row remains.
//! - `G3` has at least `ny` columns (checked when the system is built).
use ndarray::{Array2, ArrayView2, Axis};
use tracing::debug;

/// DegeneracyPatch — cleaned matrices plus the patched row indices.
#[derive(Debug, Clone, PartialEq)]
pub struct DegeneracyPatch {
    pub g0: Array2<f64>,
    pub g1: Array2<f64>,
    pub g3: Array2<f64>,
    pub patched_rows: Vec<usize>,
}

impl DegeneracyPatch {
    pub fn is_noop(&self) -> bool {
        self.patched_rows.is_empty()
    }
}

/// patch_degenerate_rows — rewrite all-zero expectational rows of `G0`.
///
/// Parameters
/// ----------
/// - `ny`: `usize`
///   Number of leading expectational rows to scan.
/// - `g0`, `g1`: `&ArrayView2<f64>`
///   Square pencil matrices.
/// - `g3`: `&ArrayView2<f64>`
///   Expectational loadings; column `i < ny` belongs to row `i`.
///
/// Returns
/// -------
/// `DegeneracyPatch`
///   Owned copies of the (possibly) patched matrices and the list of rows
///   that were rewritten, in increasing order.
pub fn patch_degenerate_rows(
    ny: usize, g0: &ArrayView2<f64>, g1: &ArrayView2<f64>, g3: &ArrayView2<f64>,
) -> DegeneracyPatch {
    let mut g0 = g0.to_owned();
    let mut g1 = g1.to_owned();

    let patched_rows: Vec<usize> = (0..ny.min(g0.nrows()))
        .filter(|&i| {
            g0.row(i).iter().all(|&v| v == 0.0) && g1.row(i).iter().any(|&v| v != 0.0)
        })
        .collect();

    for &i in &patched_rows {
        let negated = g1.row(i).mapv(|v| -v);
        g0.row_mut(i).assign(&negated);
        g1.row_mut(i).fill(0.0);
    }

    let kept: Vec<usize> = (0..g3.ncols()).filter(|j| !patched_rows.contains(j)).collect();
    let g3 = g3.select(Axis(1), &kept);

    if !patched_rows.is_empty() {
        debug!(rows = ?patched_rows, "rewrote expectational rows without forward content");
    }

    DegeneracyPatch { g0, g1, g3, patched_rows }
}
