//! numerics::conversions — copy matrices between `ndarray` and `nalgebra`.
//!
//! Purpose
//! -------
//! Bridge the public `ndarray` surface and the `nalgebra` kernels used for
//! SVD, LU and the complex QZ decomposition. All helpers copy column by
//! column, matching the column-major storage of `DMatrix`.
//!
//! Conventions
//! -----------
//! - Shapes are preserved exactly; no helper validates finiteness.
//! - Complex matrices use `nalgebra::Complex<f64>` on both sides so that no
//!   extra complex-number crate is needed.
use nalgebra::{Complex, DMatrix};
use ndarray::{Array2, ArrayView2};

/// Copy a real `ndarray` view into a freshly allocated `DMatrix<f64>`.
pub fn to_dmatrix(a: &ArrayView2<f64>) -> DMatrix<f64> {
    let (nrows, ncols) = a.dim();
    let mut out = DMatrix::<f64>::zeros(nrows, ncols);
    for j in 0..ncols {
        for i in 0..nrows {
            out[(i, j)] = a[[i, j]];
        }
    }
    out
}

/// Copy a real `ndarray` view into a complex `DMatrix` with zero imaginary
/// parts. This is the entry point of the QZ decomposition.
pub fn to_complex_dmatrix(a: &ArrayView2<f64>) -> DMatrix<Complex<f64>> {
    let (nrows, ncols) = a.dim();
    let mut out = DMatrix::<Complex<f64>>::zeros(nrows, ncols);
    for j in 0..ncols {
        for i in 0..nrows {
            out[(i, j)] = Complex::new(a[[i, j]], 0.0);
        }
    }
    out
}

/// Copy a real `DMatrix` back into an owned `Array2<f64>`.
pub fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// real_part — keep the real component of a complex matrix.
///
/// Parameters
/// ----------
/// - `m`: `&DMatrix<Complex<f64>>`
///   Complex matrix, typically `Z * X * Zᴴ` products whose imaginary parts
///   vanish up to rounding for real input pencils.
///
/// Returns
/// -------
/// `Array2<f64>`
///   Matrix of the same shape holding `Re(m_ij)`.
///
/// Notes
/// -----
/// - Imaginary parts are discarded without inspection, as gensys does for
///   its transition and impact matrices.
pub fn real_part(m: &DMatrix<Complex<f64>>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)].re)
}

/// Copy a complex `DMatrix` into an owned `ndarray` matrix.
pub fn complex_to_array(m: &DMatrix<Complex<f64>>) -> Array2<Complex<f64>> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}
