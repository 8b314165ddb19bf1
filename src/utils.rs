//! Python conversion helpers shared by the PyO3 bindings in `lib.rs`.
//!
//! Matrices cross the boundary as 2-D float64 arrays on the way in and as
//! row-major `Vec<Vec<f64>>` on the way out.
#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray2;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

/// Copy a 2-D numpy array, pandas DataFrame, or sequence of float rows into
/// an owned `Array2<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(name: &str, raw: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr.as_array().to_owned());
    }

    if let Ok(obj) = raw.call_method0("to_numpy") {
        if let Ok(arr) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(arr.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| {
        PyTypeError::new_err(format!(
            "{name} must be a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows"
        ))
    })?;
    rows_to_array(name, rows)
}

#[cfg(feature = "python-bindings")]
fn rows_to_array(name: &str, rows: Vec<Vec<f64>>) -> PyResult<Array2<f64>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(PyValueError::new_err(format!("{name} rows must all have the same length")));
    }
    Array2::from_shape_vec((nrows, ncols), rows.into_iter().flatten().collect())
        .map_err(|e| PyValueError::new_err(format!("{name}: {e}")))
}

/// Convert `Array2<f64>` → `Vec<Vec<f64>>` (row-major).
#[cfg(feature = "python-bindings")]
pub fn to_rows(m: &Array2<f64>) -> Vec<Vec<f64>> {
    m.rows().into_iter().map(|r| r.to_vec()).collect()
}
