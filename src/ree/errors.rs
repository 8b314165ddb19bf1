//! ree::errors — fatal failures of the LQ RE solve.
//!
//! Purpose
//! -------
//! Unify the errors that abort an LQ RE solve: configuration errors from the
//! model bundle, fatal errors from the RE primitive, invalid options, and a
//! primitive that returns matrices of the wrong shape.
//!
//! Key behaviors
//! -------------
//! - Wrap [`LQError`] and [`GensysError`] via `From`, so orchestrator code
//!   can use `?` across layers.
//! - Bridge `anyhow::Error` into `REEError::Anyhow`.
//! - Convert into Python `ValueError` under the `python-bindings` feature.
//!
//! Conventions
//! -----------
//! - Advisory conditions (non-existence, indeterminacy, coincident zeros,
//!   failed reduction) are never errors; they travel as
//!   [`Diagnostic`](crate::ree::diagnostics::Diagnostic) values.
use crate::{gensys::errors::GensysError, lq::errors::LQError};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for LQ RE operations.
pub type REEResult<T> = Result<T, REEError>;

/// REEError — fatal errors of the LQ RE pipeline.
///
/// Variants
/// --------
/// - `Model(LQError)`
///   Invalid block sizes, shapes, labels or non-finite inputs.
/// - `Solver(GensysError)`
///   The RE primitive failed on an ill-posed pencil.
/// - `InvalidTolerance { tol }`
///   The reduction tolerance is not finite and strictly positive.
/// - `RawShape { name, expected, found }`
///   The RE primitive returned a matrix that does not fit the block layout.
/// - `Anyhow(String)`
///   Catch-all for wrapped foreign errors.
#[derive(Debug, Clone, PartialEq)]
pub enum REEError {
    // ---- Upstream layers ----
    Model(LQError),
    Solver(GensysError),

    // ---- Options ----
    InvalidTolerance { tol: f64 },

    // ---- Primitive contract ----
    RawShape { name: &'static str, expected: (usize, usize), found: (usize, usize) },

    // ---- Anyhow catchall ----
    Anyhow(String),
}

impl std::error::Error for REEError {}

impl From<LQError> for REEError {
    fn from(err: LQError) -> Self {
        REEError::Model(err)
    }
}

impl From<GensysError> for REEError {
    fn from(err: GensysError) -> Self {
        REEError::Solver(err)
    }
}

impl From<anyhow::Error> for REEError {
    fn from(err: anyhow::Error) -> Self {
        REEError::Anyhow(err.to_string())
    }
}

impl std::fmt::Display for REEError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            REEError::Model(err) => write!(f, "{err}"),
            REEError::Solver(err) => write!(f, "{err}"),
            REEError::InvalidTolerance { tol } => {
                write!(f, "REE Error: tolerance must be finite and > 0 (tol = {tol})")
            }
            REEError::RawShape { name, expected, found } => write!(
                f,
                "REE Error: solver returned {name} with shape {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            REEError::Anyhow(msg) => write!(f, "REE Error: {msg}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<REEError> for PyErr {
    fn from(err: REEError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
