//! rust_ree — rational-expectations equilibria of LQ policy problems.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the LQ rational-expectations solver to Python via the `_rust_ree`
//! extension module. The solver takes the first-order conditions of a linear
//! quadratic optimal-policy problem in the canonical form
//! `G0 x_t = G1 x_{t-1} + G2 ε_t + G3 η_t`, solves them with a gensys-style
//! generalized Schur method, and collapses the multiplier states out of the
//! law of motion wherever that is possible.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`lq`, `gensys`, `ree`, `numerics`) as the
//!   public crate surface.
//! - Define the `#[pyclass]` result wrapper, the `solve_lq_ree` Python
//!   function, and the `#[pymodule]` initializer for `_rust_ree`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - Once Python inputs are converted into an [`lq::LQSystem`], the invariants
//!   documented in `lq` are assumed to hold.
//!
//! Conventions
//! -----------
//! - Matrices returned to Python are row-major `list[list[float]]`.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary.
//! - Solver advisories (indeterminacy, failed reduction, ...) are emitted as
//!   `tracing` events and also kept on the result as `warnings`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`ree::solve_lq_ree`] (or
//!   [`ree::solve_lq_ree_with`] to supply its own solver) and can ignore the
//!   PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_ree` and wraps `LQSolution` in
//!   its own facade.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the end-to-end scenarios in `tests/integration_lq_ree.rs`.

pub mod gensys;
pub mod lq;
pub mod numerics;
pub mod ree;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    gensys::{Gensys, GensysOptions},
    lq::{LQBlocks, LQSystem, StateBlock, StateLabels},
    ree::{LQSolution, REEOptions, solve_lq_ree_with},
    utils::{extract_f64_matrix, to_rows},
};

/// LQSolution — Python-facing wrapper around a solved LQ equilibrium.
///
/// Purpose
/// -------
/// Hold a [`LQSolution`] produced by `solve_lq_ree` and expose the reduced
/// law of motion, the selection matrices, and the solver verdict as Python
/// properties.
///
/// Fields
/// ------
/// - `inner`: [`LQSolution`]
///   Rust-side result; all accessors read from it.
///
/// Notes
/// -----
/// - Properties that only exist for some result shapes (`sflm`, `svphi`,
///   `csi_map`, `phi_vphi_*`) return `None` when absent.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_ree.lq_ree", name = "LQSolution")]
pub struct LQSolutionPy {
    inner: LQSolution,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl LQSolutionPy {
    /// Result shape: `"fully_reduced"`, `"partially_reduced"` or `"unreduced"`.
    #[getter]
    fn kind(&self) -> String {
        self.inner.ree().kind().to_string()
    }

    /// State transition `Phi1` of `z_t = Phi1 z_{t-1} + Phi2 ε_t`.
    #[getter]
    fn phi1(&self) -> Vec<Vec<f64>> {
        to_rows(self.inner.ree().phi1())
    }

    /// Shock loading `Phi2`.
    #[getter]
    fn phi2(&self) -> Vec<Vec<f64>> {
        to_rows(self.inner.ree().phi2())
    }

    /// Labels of the reduced state `z_t`, in order.
    #[getter]
    fn z_t(&self) -> Vec<String> {
        self.inner.ree().z_t().to_vec()
    }

    /// Selection of the endogenous variables from `z_t`.
    #[getter]
    fn sy(&self) -> Vec<Vec<f64>> {
        to_rows(self.inner.ree().sy())
    }

    /// Selection of the shocks from `z_t`.
    #[getter]
    fn scsi(&self) -> Vec<Vec<f64>> {
        to_rows(self.inner.ree().scsi())
    }

    #[getter]
    fn sflm(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.ree().sflm().map(to_rows)
    }

    #[getter]
    fn svphi(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.ree().svphi().map(to_rows)
    }

    /// Multiplier law `Csi` with `GLM_t = Csi [y_t; csi_t]`.
    #[getter]
    fn csi_map(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.ree().csi_map().map(to_rows)
    }

    #[getter]
    fn phi_vphi_z(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.ree().phi_vphi_z().map(to_rows)
    }

    #[getter]
    fn phi_vphi_vphi(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.ree().phi_vphi_vphi().map(to_rows)
    }

    #[getter]
    fn phi_vphi_eps(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.ree().phi_vphi_eps().map(to_rows)
    }

    /// Existence/uniqueness verdict `(exist, unique)`.
    #[getter]
    fn eu(&self) -> (i32, i32) {
        let eu = self.inner.eu();
        (eu.exist, eu.unique)
    }

    #[getter]
    fn is_determinate(&self) -> bool {
        self.inner.is_determinate()
    }

    /// Human-readable advisories raised while solving.
    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.inner.diagnostics().iter().map(ToString::to_string).collect()
    }

    /// Generalized eigenvalue pairs as `((a_re, a_im), (b_re, b_im))`.
    #[getter]
    fn gev(&self) -> Vec<((f64, f64), (f64, f64))> {
        self.inner
            .gev()
            .rows()
            .into_iter()
            .map(|r| ((r[0].re, r[0].im), (r[1].re, r[1].im)))
            .collect()
    }

    /// Expand the reduced transition back onto `[y; csi; GLM]`.
    ///
    /// Returns `None` unless the result is fully reduced.
    fn expand_state_transition(&self) -> Option<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
        self.inner.ree().expand_state_transition().map(|(t1, t2)| (to_rows(&t1), to_rows(&t2)))
    }

    /// Selection matrix of a named block (e.g. `"Endogenous"`).
    ///
    /// Returns `None` when the block is not part of this result's `z_t`.
    fn selection(&self, name: &str) -> PyResult<Option<Vec<Vec<f64>>>> {
        let block = StateBlock::ALL
            .iter()
            .copied()
            .find(|b| format!("{b:?}") == name)
            .ok_or_else(|| PyValueError::new_err(format!("unknown state block '{name}'")))?;
        Ok(self.inner.selection(block).map(to_rows))
    }

    fn __repr__(&self) -> String {
        let ree = self.inner.ree();
        format!(
            "LQSolution(kind={}, states={}, eu={})",
            ree.kind(),
            ree.z_t().len(),
            self.inner.eu()
        )
    }
}

/// Solve an LQ policy problem for its rational-expectations equilibrium.
///
/// Parameters
/// ----------
/// - `ny`, `ncsi`, `nf`, `ng`: `usize`
///   Sizes of the endogenous, shock, forward-multiplier and
///   constraint-multiplier blocks. `nk = 2*ny + 2*ncsi + nf + 2*ng`.
/// - `g0`, `g1`: array-like `(nk, nk)`
/// - `g2`: array-like `(nk, ncsi)`
/// - `g3`: array-like `(nk, m)` with `m ≥ ny`
/// - `labels`: optional `list[str]` of length `nk`; generated when omitted.
/// - `constant`: optional `list[float]` of length `nk`; zero when omitted.
/// - `tol`: reduction tolerance, `> 0`.
/// - `reduce`: skip the multiplier reduction when `False`.
/// - `div`: optional stability boundary; chosen adaptively when omitted.
///
/// Errors
/// ------
/// - `ValueError` for malformed dimensions, labels, tolerance or `div`, and
///   when the decomposition fails to converge.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "solve_lq_ree")]
#[pyo3(
    signature = (
        ny, ncsi, nf, ng, g0, g1, g2, g3,
        labels=None, constant=None, tol=1e-6, reduce=true, div=None
    ),
    text_signature = "(ny, ncsi, nf, ng, g0, g1, g2, g3, /, labels=None, constant=None, tol=1e-6, reduce=True, div=None)"
)]
#[allow(clippy::too_many_arguments)]
fn py_solve_lq_ree<'py>(
    py: Python<'py>, ny: usize, ncsi: usize, nf: usize, ng: usize, g0: &Bound<'py, PyAny>,
    g1: &Bound<'py, PyAny>, g2: &Bound<'py, PyAny>, g3: &Bound<'py, PyAny>,
    labels: Option<Vec<String>>, constant: Option<Vec<f64>>, tol: f64, reduce: bool,
    div: Option<f64>,
) -> PyResult<LQSolutionPy> {
    let blocks = LQBlocks::new(ny, ncsi, nf, ng)?;
    let g0: Array2<f64> = extract_f64_matrix("G0", g0)?;
    let g1: Array2<f64> = extract_f64_matrix("G1", g1)?;
    let g2: Array2<f64> = extract_f64_matrix("G2", g2)?;
    let g3: Array2<f64> = extract_f64_matrix("G3", g3)?;

    let mut system = LQSystem::new(blocks, g0, g1, g2, g3)?;
    if let Some(c) = constant {
        system = system.with_constant(Array1::from_vec(c))?;
    }
    let labels = match labels {
        Some(l) => StateLabels::new(l, &blocks)?,
        None => StateLabels::generated(&blocks),
    };
    let opts = REEOptions::new(tol, reduce)?;
    let solver = Gensys::new(GensysOptions::new(div)?);

    let inner = py.allow_threads(|| solve_lq_ree_with(&solver, &system, &labels, &opts))?;
    Ok(LQSolutionPy { inner })
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_ree<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let lq_ree = PyModule::new(py, "lq_ree")?;
    lq_ree.add_class::<LQSolutionPy>()?;
    lq_ree.add_function(wrap_pyfunction!(py_solve_lq_ree, &lq_ree)?)?;
    m.add_submodule(&lq_ree)?;

    py.import("sys")?.getattr("modules")?.set_item("rust_ree.lq_ree", lq_ree)?;
    Ok(())
}
