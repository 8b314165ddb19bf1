//! gensys::errors — fatal failures of the generalized RE solver.
//!
//! Purpose
//! -------
//! Represent the conditions under which the RE primitive cannot return any
//! transition matrices at all: malformed inputs, a QZ iteration that does
//! not converge, or singular blocks that make the partition ill-posed.
//! Solution-quality issues (non-existence, indeterminacy, coincident zeros)
//! are *not* errors; they travel in [`ExistUnique`].
//!
//! [`ExistUnique`]: crate::gensys::status::ExistUnique

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for RE solver operations.
pub type GensysResult<T> = Result<T, GensysError>;

/// GensysError — fatal RE solver failures.
///
/// Variants
/// --------
/// - `EmptySystem`
///   The pencil has dimension zero.
/// - `DimensionMismatch { name, expected, found }`
///   An input does not conform to `G0`.
/// - `InvalidDiv { div }`
///   A fixed stability boundary is not finite and positive.
/// - `QzNoConvergence { iterations }`
///   The QZ iteration exhausted its budget.
/// - `SvdNoConvergence { name }`
///   The SVD of a partition block did not converge.
/// - `SingularTransform`
///   The stable-block transform `G0` of the partition is singular.
/// - `SingularUnstableBlock`
///   The unstable diagonal block (or `a - b` on it) is singular.
/// - `NonFiniteOutput`
///   The solver produced NaN/±∞ entries.
#[derive(Debug, Clone, PartialEq)]
pub enum GensysError {
    // ---- Input ----
    EmptySystem,
    DimensionMismatch { name: &'static str, expected: (usize, usize), found: (usize, usize) },
    InvalidDiv { div: f64 },

    // ---- Decomposition ----
    QzNoConvergence { iterations: usize },

    // ---- Partition ----
    SvdNoConvergence { name: &'static str },
    SingularTransform,
    SingularUnstableBlock,
    NonFiniteOutput,
}

impl std::error::Error for GensysError {}

impl std::fmt::Display for GensysError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GensysError::EmptySystem => write!(f, "Gensys Error: empty system"),
            GensysError::DimensionMismatch { name, expected, found } => write!(
                f,
                "Gensys Error: {name} has shape {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            GensysError::InvalidDiv { div } => {
                write!(f, "Gensys Error: stability boundary must be finite and > 0 (div = {div})")
            }
            GensysError::QzNoConvergence { iterations } => write!(
                f,
                "Gensys Error: QZ iteration did not converge after {iterations} sweeps"
            ),
            GensysError::SvdNoConvergence { name } => {
                write!(f, "Gensys Error: SVD of {name} did not converge")
            }
            GensysError::SingularTransform => {
                write!(f, "Gensys Error: stable-block transform is singular")
            }
            GensysError::SingularUnstableBlock => {
                write!(f, "Gensys Error: unstable block of the pencil is singular")
            }
            GensysError::NonFiniteOutput => {
                write!(f, "Gensys Error: solution contains non-finite entries")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<GensysError> for PyErr {
    fn from(err: GensysError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
