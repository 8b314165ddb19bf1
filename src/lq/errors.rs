//! lq::errors — configuration errors for LQ coefficient bundles.
//!
//! Purpose
//! -------
//! Provide the error type raised while assembling an LQ system: block sizes,
//! matrix shapes, finiteness and label counts. Every variant is fatal and
//! is reported before any solver work starts.
//!
//! Key behaviors
//! -------------
//! - Define [`LQError`] and the alias [`LQResult`].
//! - Attach human-readable `Display` messages naming the offending matrix
//!   and the expected vs found dimensions.
//! - Convert to `PyErr` (`ValueError`) when `python-bindings` is enabled.
//!
//! Conventions
//! -----------
//! - Matrix names follow the usual LQ notation (`G0`, `G1`, `G2`, `G3`,
//!   `C`, `A0`, …) so messages can be matched against model code.
//! - Indices are 0-based.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for LQ bundle construction and validation.
pub type LQResult<T> = Result<T, LQError>;

/// LQError — fatal configuration errors of an LQ system.
///
/// Variants
/// --------
/// - `EmptyFlowBlock`
///   `ny + ncsi == 0`; the reduced state would be empty.
/// - `NotSquare { name, rows, cols }`
///   A matrix that must be square is not.
/// - `MatrixShape { name, expected, found }`
///   A matrix does not have the shape implied by the block sizes.
/// - `ExpectationColumns { name, min, found }`
///   The expectational loading matrix has fewer than `ny` columns.
/// - `ConstantLength { expected, found }`
///   The constant vector length differs from `nk`.
/// - `NonFinite { name, row, col, value }`
///   A matrix entry is NaN or ±∞.
/// - `LabelCount { expected, found }`
///   The label vector length differs from `nk`.
/// - `Anyhow(String)`
///   Catch-all for wrapped foreign errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LQError {
    // ---- Block sizes ----
    EmptyFlowBlock,

    // ---- Matrix shapes ----
    NotSquare { name: &'static str, rows: usize, cols: usize },
    MatrixShape { name: &'static str, expected: (usize, usize), found: (usize, usize) },
    ExpectationColumns { name: &'static str, min: usize, found: usize },
    ConstantLength { expected: usize, found: usize },

    // ---- Matrix contents ----
    NonFinite { name: &'static str, row: usize, col: usize, value: f64 },

    // ---- Labels ----
    LabelCount { expected: usize, found: usize },

    // ---- Anyhow catchall ----
    Anyhow(String),
}

impl std::error::Error for LQError {}

impl From<anyhow::Error> for LQError {
    fn from(err: anyhow::Error) -> Self {
        LQError::Anyhow(err.to_string())
    }
}

impl std::fmt::Display for LQError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LQError::EmptyFlowBlock => {
                write!(f, "LQ Error: ny + ncsi must be at least 1")
            }
            LQError::NotSquare { name, rows, cols } => {
                write!(f, "LQ Error: {name} must be square, found {rows}x{cols}")
            }
            LQError::MatrixShape { name, expected, found } => write!(
                f,
                "LQ Error: {name} has shape {}x{}, expected {}x{} from block sizes",
                found.0, found.1, expected.0, expected.1
            ),
            LQError::ExpectationColumns { name, min, found } => write!(
                f,
                "LQ Error: {name} needs at least {min} expectational columns (one per forward row), found {found}"
            ),
            LQError::ConstantLength { expected, found } => write!(
                f,
                "LQ Error: constant vector has length {found}, expected {expected}"
            ),
            LQError::NonFinite { name, row, col, value } => write!(
                f,
                "LQ Error: {name}[{row}, {col}] = {value} is not finite"
            ),
            LQError::LabelCount { expected, found } => write!(
                f,
                "LQ Error: {found} state labels supplied, expected {expected}"
            ),
            LQError::Anyhow(msg) => write!(f, "LQ Error: {msg}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<LQError> for PyErr {
    fn from(err: LQError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
