//! gensys::reorder — move unstable roots to the bottom of a QZ form.
//!
//! Purpose
//! -------
//! Reorder an upper-triangular pencil `(a, b)` so that every root with
//! `|b_ii / a_ii| > stake` (including infinite roots) sits in the
//! lower-right block, updating `Q` and `Z` so that `Q G0 Z = a` and
//! `Q G1 Z = b` keep holding.
//!
//! Key behaviors
//! -------------
//! - [`qzdiv`] bubbles each unstable root down by adjacent swaps.
//! - [`qzswitch`] swaps two adjacent diagonal entries with a pair of 2×2
//!   unitary transformations.
//!
//! Invariants & assumptions
//! ------------------------
//! - `a`, `b` are upper triangular and no root has `a_ii = b_ii = 0`
//!   (coincident zeros are screened out before reordering).
//! - A root counts as infinite when `|a_ii| < 1e-13`; its working ratio is
//!   made negative so it always qualifies as unstable.
use crate::gensys::qz::QzDecomposition;
use crate::numerics::{INFINITE_ROOT_EPS, SWITCH_SMALL};
use nalgebra::{Complex, DMatrix, Matrix2};

type C64 = Complex<f64>;

/// qzdiv — push roots with modulus above `stake` to the bottom.
///
/// Parameters
/// ----------
/// - `stake`: `f64`
///   Stability boundary. Roots with `|b/a| > stake`, and infinite roots,
///   end up after all other roots.
/// - `f`: `&mut QzDecomposition`
///   Factors updated in place.
///
/// Notes
/// -----
/// - Relative order within the stable and the unstable group is preserved.
pub fn qzdiv(stake: f64, f: &mut QzDecomposition) {
    let n = f.a.nrows();
    let mut roots: Vec<f64> = (0..n)
        .map(|i| {
            let ra = f.a[(i, i)].norm();
            let rb = f.b[(i, i)].norm();
            let ra = if ra < INFINITE_ROOT_EPS { ra - (ra + rb) } else { ra };
            rb / ra
        })
        .collect();

    for i in (0..n).rev() {
        let Some(m) = (0..=i).rev().find(|&j| roots[j] > stake || roots[j] < -0.1) else {
            return;
        };
        for k in m..i {
            qzswitch(k, f);
            roots.swap(k, k + 1);
        }
    }
}

/// qzswitch — swap the roots at positions `i` and `i + 1`.
///
/// Parameters
/// ----------
/// - `i`: `usize`
///   Upper index of the 2×2 diagonal block to swap; `i + 1 < n`.
/// - `f`: `&mut QzDecomposition`
///   Factors updated in place.
///
/// Notes
/// -----
/// - Degenerate blocks (both entries of a root negligible, or a rotation
///   of negligible norm) are left untouched.
pub fn qzswitch(i: usize, f: &mut QzDecomposition) {
    let a = f.a[(i, i)];
    let d = f.b[(i, i)];
    let b = f.a[(i, i + 1)];
    let e = f.b[(i, i + 1)];
    let c = f.a[(i + 1, i + 1)];
    let g = f.b[(i + 1, i + 1)];

    let small = |v: C64| v.norm() < SWITCH_SMALL;
    let one = C64::from(1.0);
    let zero = C64::from(0.0);

    let (wz, xy) = if small(c) && small(g) {
        if small(a) {
            return;
        }
        // Root i+1 is 0/0-like; rotate columns only.
        let nrm = a.norm().hypot(b.norm());
        let (w1, w2) = (b / nrm, -a / nrm);
        let wz = Matrix2::new(w1, w2.conj(), w2, -w1.conj());
        (wz, Matrix2::new(one, zero, zero, one))
    } else if small(a) && small(d) {
        if small(c) {
            return;
        }
        // Root i is 0/0-like; rotate rows only.
        let nrm = c.norm().hypot(b.norm());
        let (x1, x2) = (c / nrm, -b / nrm);
        let xy = Matrix2::new(x2.conj(), -x1.conj(), x1, x2);
        (Matrix2::new(one, zero, zero, one), xy)
    } else {
        let w1 = c * e - g * b;
        let w2 = (c * d - g * a).conj();
        let x1 = (b * d - e * a).conj();
        let x2 = (c * d - g * a).conj();
        let wn = w1.norm().hypot(w2.norm());
        let xn = x1.norm().hypot(x2.norm());
        if xn < f64::EPSILON * 100.0 {
            return;
        }
        let (w1, w2) = (w1 / wn, w2 / wn);
        let (x1, x2) = (x1 / xn, x2 / xn);
        (
            Matrix2::new(w1, w2, -w2.conj(), w1.conj()),
            Matrix2::new(x1, x2, -x2.conj(), x1.conj()),
        )
    };

    apply_rows(&mut f.a, i, &xy);
    apply_rows(&mut f.b, i, &xy);
    apply_rows(&mut f.q, i, &xy);
    apply_cols(&mut f.a, i, &wz);
    apply_cols(&mut f.b, i, &wz);
    apply_cols(&mut f.z, i, &wz);
}

/// `m[i..=i+1, :] = t * m[i..=i+1, :]`.
fn apply_rows(m: &mut DMatrix<C64>, i: usize, t: &Matrix2<C64>) {
    for col in 0..m.ncols() {
        let top = m[(i, col)];
        let bot = m[(i + 1, col)];
        m[(i, col)] = t[(0, 0)] * top + t[(0, 1)] * bot;
        m[(i + 1, col)] = t[(1, 0)] * top + t[(1, 1)] * bot;
    }
}

/// `m[:, i..=i+1] = m[:, i..=i+1] * t`.
fn apply_cols(m: &mut DMatrix<C64>, i: usize, t: &Matrix2<C64>) {
    for row in 0..m.nrows() {
        let left = m[(row, i)];
        let right = m[(row, i + 1)];
        m[(row, i)] = left * t[(0, 0)] + right * t[(1, 0)];
        m[(row, i + 1)] = left * t[(0, 1)] + right * t[(1, 1)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gensys::qz::qz;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Swapping two adjacent finite roots while keeping the factorization.
    // - Ordering of stable vs unstable vs infinite roots by `qzdiv`.
    //
    // They intentionally DO NOT cover:
    // - The gensys partition built on the ordered form.
    // -------------------------------------------------------------------------

    fn complex(rows: &[&[f64]]) -> DMatrix<C64> {
        DMatrix::from_fn(rows.len(), rows[0].len(), |i, j| C64::from(rows[i][j]))
    }

    fn modulus(f: &QzDecomposition, i: usize) -> f64 {
        f.b[(i, i)].norm() / f.a[(i, i)].norm()
    }

    fn reconstruction_error(f: &QzDecomposition, g0: &DMatrix<C64>, g1: &DMatrix<C64>) -> f64 {
        let e0 = f.q.adjoint() * &f.a * f.z.adjoint() - g0;
        let e1 = f.q.adjoint() * &f.b * f.z.adjoint() - g1;
        e0.iter().chain(e1.iter()).map(|v| v.norm()).fold(0.0, f64::max)
    }

    #[test]
    // Purpose
    // -------
    // Swap two finite roots of a triangular pencil.
    //
    // Given
    // -----
    // - `a = [[1, 0.4], [0, 2]]`, `b = [[3, 1], [0, 1]]` with roots 3 and 0.5,
    //   and identity `Q`, `Z`.
    //
    // Expect
    // ------
    // - Roots appear as 0.5 then 3; the form stays triangular and still
    //   factors the original pencil.
    fn qzswitch_swaps_two_finite_roots() {
        // Arrange
        let g0 = complex(&[&[1.0, 0.4], &[0.0, 2.0]]);
        let g1 = complex(&[&[3.0, 1.0], &[0.0, 1.0]]);
        let mut f = QzDecomposition {
            a: g0.clone(),
            b: g1.clone(),
            q: DMatrix::identity(2, 2),
            z: DMatrix::identity(2, 2),
        };

        // Act
        qzswitch(0, &mut f);

        // Assert
        assert_abs_diff_eq!(modulus(&f, 0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(modulus(&f, 1), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.a[(1, 0)].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.b[(1, 0)].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(reconstruction_error(&f, &g0, &g1), 0.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // `qzdiv` places unstable and infinite roots after the stable ones.
    //
    // Given
    // -----
    // - `G0 = diag(1, 0, 1)` (one infinite root) and a dense `G1` with a
    //   mixture of stable and unstable finite roots.
    //
    // Expect
    // ------
    // - After reordering, once a root exceeds the boundary all following
    //   roots do too; the factorization still reproduces the pencil.
    fn qzdiv_sorts_unstable_and_infinite_roots_last() {
        // Arrange
        let g0 = complex(&[&[1.0, 0.0, 0.0], &[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0]]);
        let g1 = complex(&[&[2.5, 0.1, 0.0], &[0.2, 1.0, 0.3], &[0.0, 0.4, 0.3]]);
        let mut f = qz(&g0, &g1).unwrap();

        // Act
        qzdiv(1.01, &mut f);

        // Assert
        let unstable: Vec<bool> = (0..3)
            .map(|i| f.a[(i, i)].norm() < 1e-13 || modulus(&f, i) > 1.01)
            .collect();
        let first = unstable.iter().position(|&u| u).unwrap();
        assert!(unstable[first..].iter().all(|&u| u), "Got: {unstable:?}");
        assert!(f.a[(2, 2)].norm() < 1e-12 || modulus(&f, 2) > 1.01);
        assert_abs_diff_eq!(reconstruction_error(&f, &g0, &g1), 0.0, epsilon = 1e-10);
    }
}
