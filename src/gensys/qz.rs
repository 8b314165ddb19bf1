//! gensys::qz — complex generalized Schur (QZ) decomposition.
//!
//! Purpose
//! -------
//! Factor a square real pencil `(G0, G1)` as
//!
//! ```text
//! Q G0 Z = a,    Q G1 Z = b,
//! ```
//!
//! with `Q`, `Z` unitary and `a`, `b` upper triangular, so that the
//! generalized eigenvalues are the ratios `b_ii / a_ii`. This is the
//! decomposition the gensys partition is built on.
//!
//! Key behaviors
//! -------------
//! - Reduce the pencil to Hessenberg-triangular form with Givens rotations.
//! - Run single-shift complex QZ sweeps (Wilkinson shift on the trailing
//!   2×2 block, exceptional shift every 10 stagnant sweeps) until every
//!   subdiagonal entry of the Hessenberg factor is negligible.
//! - Chase zeros on the diagonal of the triangular factor to the bottom of
//!   the active block and deflate them as infinite eigenvalues.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are square, of equal size and finite (checked upstream).
//! - Negligibility is relative: `ε·‖G1‖_F` for subdiagonals, `ε·‖G0‖_F` for
//!   the triangular diagonal.
//! - Entries below the diagonal of `a` and `b` are exactly zero on return.
//!
//! Conventions
//! -----------
//! - `b` plays the Hessenberg role and `a` the triangular role during the
//!   iteration, so that the ratios `b_ii / a_ii` are the roots gensys
//!   classifies.
//! - Rotations are always applied to full rows/columns; `Q` accumulates the
//!   row rotations and `Z` the column rotations.
//!
//! Testing notes
//! -------------
//! - Unit tests check the reconstruction `Qᴴ a Zᴴ = G0`, unitarity,
//!   triangularity, known eigenvalues and detection of an infinite root.
use crate::gensys::errors::{GensysError, GensysResult};
use nalgebra::{Complex, DMatrix};
use tracing::debug;

type C64 = Complex<f64>;

const ZERO: C64 = Complex { re: 0.0, im: 0.0 };

/// Sweeps without a deflation before an exceptional shift is used.
const EXCEPTIONAL_SHIFT_PERIOD: usize = 10;

/// Sweep budget per unit of system dimension.
const MAX_SWEEPS_PER_ROW: usize = 60;

/// QzDecomposition — factors of the generalized Schur form.
///
/// Fields
/// ------
/// - `a`: upper-triangular `Q G0 Z`.
/// - `b`: upper-triangular `Q G1 Z`.
/// - `q`: unitary left factor (rows are applied to the pencil).
/// - `z`: unitary right factor.
#[derive(Debug, Clone, PartialEq)]
pub struct QzDecomposition {
    pub a: DMatrix<C64>,
    pub b: DMatrix<C64>,
    pub q: DMatrix<C64>,
    pub z: DMatrix<C64>,
}

/// Complex plane rotation `[c s; -s̄ c]` with real `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Givens {
    c: f64,
    s: C64,
}

impl Givens {
    /// Rotation that maps `(x, y)` onto `(r, 0)` when applied to rows, and
    /// maps a row `(x, y)` onto `(r, 0)` when applied to columns.
    pub(crate) fn new(x: C64, y: C64) -> Givens {
        let ax = x.norm();
        let ay = y.norm();
        if ay == 0.0 {
            return Givens { c: 1.0, s: ZERO };
        }
        if ax == 0.0 {
            return Givens { c: 0.0, s: y.conj() / ay };
        }
        let r = ax.hypot(ay);
        Givens { c: ax / r, s: (x / ax) * y.conj() / r }
    }
}

/// Apply `g` to rows `i` and `j` of `m` (left multiplication).
pub(crate) fn rotate_rows(m: &mut DMatrix<C64>, i: usize, j: usize, g: Givens) {
    for col in 0..m.ncols() {
        let mi = m[(i, col)];
        let mj = m[(j, col)];
        m[(i, col)] = mi * g.c + g.s * mj;
        m[(j, col)] = -g.s.conj() * mi + mj * g.c;
    }
}

/// Apply `g` to columns `a` and `b` of `m` (right multiplication). With
/// `g = Givens::new(m[(row, a)], m[(row, b)])` this zeroes `m[(row, b)]`.
pub(crate) fn rotate_cols(m: &mut DMatrix<C64>, a: usize, b: usize, g: Givens) {
    for row in 0..m.nrows() {
        let xa = m[(row, a)];
        let xb = m[(row, b)];
        m[(row, a)] = xa * g.c + g.s * xb;
        m[(row, b)] = -g.s.conj() * xa + xb * g.c;
    }
}

struct Workspace {
    n: usize,
    // Hessenberg factor (from G1) and triangular factor (from G0).
    h: DMatrix<C64>,
    r: DMatrix<C64>,
    q: DMatrix<C64>,
    z: DMatrix<C64>,
}

impl Workspace {
    fn left(&mut self, i: usize, j: usize, g: Givens) {
        rotate_rows(&mut self.h, i, j, g);
        rotate_rows(&mut self.r, i, j, g);
        rotate_rows(&mut self.q, i, j, g);
    }

    fn right(&mut self, a: usize, b: usize, g: Givens) {
        rotate_cols(&mut self.h, a, b, g);
        rotate_cols(&mut self.r, a, b, g);
        rotate_cols(&mut self.z, a, b, g);
    }

    /// Bring `(h, r)` to Hessenberg-triangular form.
    fn hessenberg_triangular(&mut self) {
        let n = self.n;
        for j in 0..n {
            for i in (j + 1..n).rev() {
                let g = Givens::new(self.r[(i - 1, j)], self.r[(i, j)]);
                self.left(i - 1, i, g);
                self.r[(i, j)] = ZERO;
            }
        }
        if n < 3 {
            return;
        }
        for j in 0..n - 2 {
            for i in (j + 2..n).rev() {
                let g = Givens::new(self.h[(i - 1, j)], self.h[(i, j)]);
                self.left(i - 1, i, g);
                self.h[(i, j)] = ZERO;

                let g = Givens::new(self.r[(i, i)], self.r[(i, i - 1)]);
                self.right(i, i - 1, g);
                self.r[(i, i - 1)] = ZERO;
            }
        }
    }

    /// Move the zero at `r[(k, k)]` down to `r[(ihi, ihi)]` and deflate the
    /// resulting infinite eigenvalue at `ihi`.
    fn chase_zero(&mut self, p: usize, ihi: usize, k: usize) {
        for j in k..ihi {
            let g = Givens::new(self.r[(j, j + 1)], self.r[(j + 1, j + 1)]);
            self.left(j, j + 1, g);
            self.r[(j + 1, j + 1)] = ZERO;
            if j > p {
                let g = Givens::new(self.h[(j + 1, j)], self.h[(j + 1, j - 1)]);
                self.right(j, j - 1, g);
                self.h[(j + 1, j - 1)] = ZERO;
            }
        }
        let g = Givens::new(self.h[(ihi, ihi)], self.h[(ihi, ihi - 1)]);
        self.right(ihi, ihi - 1, g);
        self.h[(ihi, ihi - 1)] = ZERO;
    }

    /// Shift from the trailing 2×2 block of `h r⁻¹` on the active window.
    fn shift(&self, ihi: usize, exceptional: bool) -> C64 {
        let m = ihi - 1;
        let (h11, h12, h21, h22) =
            (self.h[(m, m)], self.h[(m, ihi)], self.h[(ihi, m)], self.h[(ihi, ihi)]);
        let (r11, r12, r22) = (self.r[(m, m)], self.r[(m, ihi)], self.r[(ihi, ihi)]);

        let k11 = h11 / r11;
        let k12 = h12 / r22 - h11 * r12 / (r11 * r22);
        let k21 = h21 / r11;
        let k22 = h22 / r22 - h21 * r12 / (r11 * r22);

        if exceptional {
            return k22 + C64::from(k21.norm());
        }

        let half = (k11 - k22) * 0.5;
        let disc = (half * half + k12 * k21).sqrt();
        let l1 = k22 + half + disc;
        let l2 = k22 + half - disc;
        if (l1 - k22).norm() <= (l2 - k22).norm() { l1 } else { l2 }
    }

    /// One implicit single-shift sweep over the window `p..=ihi`.
    fn sweep(&mut self, p: usize, ihi: usize, mu: C64) {
        let g = Givens::new(self.h[(p, p)] - mu * self.r[(p, p)], self.h[(p + 1, p)]);
        self.left(p, p + 1, g);
        for k in p..ihi {
            let g = Givens::new(self.r[(k + 1, k + 1)], self.r[(k + 1, k)]);
            self.right(k + 1, k, g);
            self.r[(k + 1, k)] = ZERO;
            if k + 1 < ihi {
                let g = Givens::new(self.h[(k + 1, k)], self.h[(k + 2, k)]);
                self.left(k + 1, k + 2, g);
                self.h[(k + 2, k)] = ZERO;
            }
        }
    }

    fn clear_lower_triangles(&mut self) {
        for j in 0..self.n {
            for i in j + 1..self.n {
                self.h[(i, j)] = ZERO;
                self.r[(i, j)] = ZERO;
            }
        }
    }
}

/// qz — generalized Schur decomposition of a square pencil.
///
/// Parameters
/// ----------
/// - `g0`: `&DMatrix<Complex<f64>>`
///   Left-hand matrix of `G0 k_t = G1 k_{t-1} + …`; becomes `a`.
/// - `g1`: `&DMatrix<Complex<f64>>`
///   Lag matrix; becomes `b`.
///
/// Returns
/// -------
/// `GensysResult<QzDecomposition>`
///   Factors with `Q G0 Z = a`, `Q G1 Z = b`.
///
/// Errors
/// ------
/// - `GensysError::EmptySystem` when the pencil is `0 × 0`.
/// - `GensysError::DimensionMismatch` when the inputs are not square and
///   equally sized.
/// - `GensysError::QzNoConvergence` when `60·n` sweeps do not reduce the
///   Hessenberg factor to triangular form.
pub fn qz(g0: &DMatrix<C64>, g1: &DMatrix<C64>) -> GensysResult<QzDecomposition> {
    let n = g0.nrows();
    if n == 0 {
        return Err(GensysError::EmptySystem);
    }
    if g0.ncols() != n {
        return Err(GensysError::DimensionMismatch {
            name: "G0",
            expected: (n, n),
            found: g0.shape(),
        });
    }
    if g1.shape() != (n, n) {
        return Err(GensysError::DimensionMismatch {
            name: "G1",
            expected: (n, n),
            found: g1.shape(),
        });
    }

    let mut ws = Workspace {
        n,
        h: g1.clone(),
        r: g0.clone(),
        q: DMatrix::<C64>::identity(n, n),
        z: DMatrix::<C64>::identity(n, n),
    };
    let atol = f64::EPSILON * g1.norm();
    let btol = f64::EPSILON * g0.norm();

    ws.hessenberg_triangular();

    let max_sweeps = MAX_SWEEPS_PER_ROW * n;
    let mut sweeps = 0usize;
    let mut stagnant = 0usize;
    let mut ihi = n - 1;
    while ihi > 0 {
        // Top of the unreduced block ending at `ihi`.
        let mut p = ihi;
        while p > 0 && ws.h[(p, p - 1)].norm() > atol {
            p -= 1;
        }
        if p > 0 {
            ws.h[(p, p - 1)] = ZERO;
        }
        if p == ihi {
            ihi -= 1;
            stagnant = 0;
            continue;
        }

        if let Some(k) = (p..=ihi).find(|&k| ws.r[(k, k)].norm() <= btol) {
            ws.r[(k, k)] = ZERO;
            ws.chase_zero(p, ihi, k);
            stagnant = 0;
            continue;
        }

        sweeps += 1;
        if sweeps > max_sweeps {
            return Err(GensysError::QzNoConvergence { iterations: max_sweeps });
        }
        stagnant += 1;
        let mu = ws.shift(ihi, stagnant % EXCEPTIONAL_SHIFT_PERIOD == 0);
        ws.sweep(p, ihi, mu);
    }

    ws.clear_lower_triangles();
    debug!(n, sweeps, "QZ decomposition converged");

    Ok(QzDecomposition { a: ws.r, b: ws.h, q: ws.q, z: ws.z })
}
