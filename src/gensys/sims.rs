//! gensys::sims — Sims' partition of an ordered QZ form into the RE solution.
//!
//! Purpose
//! -------
//! Turn the pencil `G0 k_t = G1 k_{t-1} + C + Ψ ε_t + Π η_t` into the stable
//! law of motion `k_t = B1 k_{t-1} + const_out + B2 ε_t` and report whether
//! such a law exists and is unique.
//!
//! Key behaviors
//! -------------
//! - Factor the pencil with [`qz`], classify roots `|b_ii / a_ii|` against an
//!   (optionally adaptive) boundary `div`, and flag coincident zeros.
//! - Reorder with [`qzdiv`] so unstable roots occupy the trailing block.
//! - Existence: the expectational errors must span the unstable block,
//!   `rank(q2 Π) ≥ nunstab`.
//! - Uniqueness: the expectational errors hitting the stable block must be
//!   pinned down by those hitting the unstable block.
//! - Build `tmat`, the block transform `G0`, and from it `B1`, `const_out`,
//!   `B2`, `fmat`, `fwt`, `ywt`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Rank decisions use singular values above `REALSMALL`; the looseness
//!   test uses `REALSMALL · n`.
//! - Non-existence and indeterminacy are *not* errors: the numeric outputs
//!   are still computed and `eu` carries the verdict.
//! - On coincident zeros the numeric outputs are zero matrices of the
//!   documented shapes and `eu = (-2, -2)`.
//!
//! Conventions
//! -----------
//! - Without a fixed boundary, `div` starts at 1.01 and is lowered to
//!   `(1 + |b/a|)/2` for roots in `(1 + REALSMALL, div]`; roots are counted
//!   against the boundary as it stands when they are visited.
//!
//! Testing notes
//! -------------
//! - Unit tests cover a backward AR(1), a forward-looking determinate model,
//!   its indeterminate twin, an explosive system without expectational
//!   errors, coincident zeros and a fixed boundary.
use crate::gensys::{
    errors::{GensysError, GensysResult},
    qz::{QzDecomposition, qz},
    reorder::qzdiv,
    status::ExistUnique,
    traits::{GensysInput, GensysOutput, RationalExpectationsSolver},
};
use crate::numerics::{
    DEFAULT_DIV, REALSMALL, complex_to_array, real_part, to_complex_dmatrix,
};
use nalgebra::{Complex, DMatrix, DVector};
use ndarray::{Array1, Array2};
use tracing::debug;

type C64 = Complex<f64>;

/// GensysOptions — configuration of the default RE solver.
///
/// Fields
/// ------
/// - `div`: `Option<f64>`
///   Fixed stability boundary for `|b/a|`. `None` selects the adaptive
///   boundary starting at `1.01`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GensysOptions {
    pub div: Option<f64>,
}

impl GensysOptions {
    /// Validate the boundary.
    ///
    /// Errors
    /// ------
    /// - `GensysError::InvalidDiv` when `div` is given but not finite or not
    ///   strictly positive.
    pub fn new(div: Option<f64>) -> GensysResult<Self> {
        if let Some(d) = div {
            if !d.is_finite() || d <= 0.0 {
                return Err(GensysError::InvalidDiv { div: d });
            }
        }
        Ok(Self { div })
    }
}

/// Gensys — default implementation of [`RationalExpectationsSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gensys {
    options: GensysOptions,
}

impl Gensys {
    pub fn new(options: GensysOptions) -> Self {
        Self { options }
    }

    /// Solver with a fixed stability boundary.
    pub fn with_div(div: f64) -> GensysResult<Self> {
        Ok(Self { options: GensysOptions::new(Some(div))? })
    }

    pub fn options(&self) -> &GensysOptions {
        &self.options
    }
}

impl RationalExpectationsSolver for Gensys {
    /// Solve the pencil; see the module docs for the algorithm.
    ///
    /// Errors
    /// ------
    /// - `GensysError::QzNoConvergence` from the decomposition.
    /// - `GensysError::SvdNoConvergence` from the partition SVDs.
    /// - `GensysError::SingularTransform` when the block transform cannot be
    ///   inverted.
    /// - `GensysError::SingularUnstableBlock` when `b_uu` or `a_uu − b_uu` is
    ///   singular.
    /// - `GensysError::NonFiniteOutput` when the real outputs contain NaN/±∞.
    fn solve(&self, input: &GensysInput<'_>) -> GensysResult<GensysOutput> {
        let n = input.n();
        let nshock = input.psi.ncols();
        let g0 = to_complex_dmatrix(&input.g0);
        let g1 = to_complex_dmatrix(&input.g1);
        let mut f = qz(&g0, &g1)?;

        let (fixdiv, mut div) = match self.options.div {
            Some(d) => (true, d),
            None => (false, DEFAULT_DIV),
        };
        let mut nunstab = 0usize;
        let mut zxz = false;
        for i in 0..n {
            let aa = f.a[(i, i)].norm();
            let bb = f.b[(i, i)].norm();
            if !fixdiv && aa > 0.0 {
                let divhat = bb / aa;
                if 1.0 + REALSMALL < divhat && divhat <= div {
                    div = 0.5 * (1.0 + divhat);
                }
            }
            if bb > div * aa {
                nunstab += 1;
            }
            if aa < REALSMALL && bb < REALSMALL {
                zxz = true;
            }
        }

        if zxz {
            debug!(n, "coincident zeros in the pencil");
            return Ok(GensysOutput {
                b1: Array2::zeros((n, n)),
                const_out: Array1::zeros(n),
                b2: Array2::zeros((n, nshock)),
                fmat: Array2::zeros((0, 0)),
                fwt: Array2::zeros((0, nshock)),
                ywt: Array2::zeros((n, 0)),
                gev: generalized_eigenvalues(&f),
                eu: ExistUnique::COINCIDENT_ZEROS,
            });
        }

        qzdiv(div, &mut f);
        let gev = generalized_eigenvalues(&f);
        let ns = n - nunstab;

        let pi = to_complex_dmatrix(&input.pi);
        let psi = to_complex_dmatrix(&input.psi);
        let c = DMatrix::<C64>::from_fn(n, 1, |i, _| C64::from(input.c[i]));
        let q1 = f.q.rows(0, ns).into_owned();
        let q2 = f.q.rows(ns, nunstab).into_owned();

        // Existence: expectational errors must span the unstable block.
        let eta = SignificantSvd::new(&(&q2 * &pi), REALSMALL, "q2 * Pi")?;
        let exist = eta.rank() >= nunstab;

        // Uniqueness: stable-block errors must be determined by unstable ones.
        let eta1 = SignificantSvd::new(&(&q1 * &pi), REALSMALL, "q1 * Pi")?;
        let unique = if eta1.rank() == 0 {
            true
        } else {
            let loose = &eta1.v - &eta.v * (eta.v.adjoint() * &eta1.v);
            SignificantSvd::new(&loose, REALSMALL * n as f64, "loose")?.rank() == 0
        };

        let coupling = &eta.u
            * eta.diagonal_inverse()
            * eta.v.adjoint()
            * &eta1.v
            * eta1.diagonal()
            * eta1.u.adjoint();
        let mut tmat = DMatrix::<C64>::zeros(ns, n);
        tmat.view_mut((0, 0), (ns, ns)).fill_with_identity();
        tmat.view_mut((0, ns), (ns, nunstab)).copy_from(&(-coupling.adjoint()));

        let mut big_g0 = DMatrix::<C64>::zeros(n, n);
        big_g0.rows_mut(0, ns).copy_from(&(&tmat * &f.a));
        big_g0.view_mut((ns, ns), (nunstab, nunstab)).fill_with_identity();
        let mut big_g1 = DMatrix::<C64>::zeros(n, n);
        big_g1.rows_mut(0, ns).copy_from(&(&tmat * &f.b));

        let g0i = big_g0.try_inverse().ok_or(GensysError::SingularTransform)?;
        let transition = &g0i * big_g1;

        let a_uu = f.a.view((ns, ns), (nunstab, nunstab)).into_owned();
        let b_uu = f.b.view((ns, ns), (nunstab, nunstab)).into_owned();

        let mut const_rhs = DMatrix::<C64>::zeros(n, 1);
        const_rhs.rows_mut(0, ns).copy_from(&(&tmat * &f.q * &c));
        const_rhs
            .rows_mut(ns, nunstab)
            .copy_from(&solve_block(&(&a_uu - &b_uu), &(&q2 * &c))?);
        let constant = &g0i * const_rhs;

        let mut impact_rhs = DMatrix::<C64>::zeros(n, nshock);
        impact_rhs.rows_mut(0, ns).copy_from(&(&tmat * &f.q * &psi));
        let impact = &g0i * impact_rhs;

        let fmat = solve_block(&b_uu, &a_uu)?;
        let fwt = -solve_block(&b_uu, &(&q2 * &psi))?;
        let ywt = &f.z * g0i.columns(ns, nunstab);

        let b1 = real_part(&(&f.z * transition * f.z.adjoint()));
        let const_out = real_part(&(&f.z * constant)).column(0).to_owned();
        let b2 = real_part(&(&f.z * impact));

        let finite = b1.iter().chain(b2.iter()).chain(const_out.iter()).all(|v| v.is_finite());
        if !finite {
            return Err(GensysError::NonFiniteOutput);
        }

        debug!(n, nunstab, div, exist, unique, "gensys partition complete");

        Ok(GensysOutput {
            b1,
            const_out,
            b2,
            fmat: complex_to_array(&fmat),
            fwt: complex_to_array(&fwt),
            ywt: complex_to_array(&ywt),
            gev,
            eu: ExistUnique::from_flags(exist, unique),
        })
    }
}

/// `[diag(a) diag(b)]` of the (ordered) QZ form.
fn generalized_eigenvalues(f: &QzDecomposition) -> Array2<C64> {
    let n = f.a.nrows();
    Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { f.a[(i, i)] } else { f.b[(i, i)] })
}

/// Solve `m x = rhs` for a square block, treating the empty block as trivial.
fn solve_block(m: &DMatrix<C64>, rhs: &DMatrix<C64>) -> GensysResult<DMatrix<C64>> {
    if m.nrows() == 0 {
        return Ok(DMatrix::zeros(0, rhs.ncols()));
    }
    m.clone().lu().solve(rhs).ok_or(GensysError::SingularUnstableBlock)
}

/// Thin SVD restricted to singular values above a threshold.
struct SignificantSvd {
    u: DMatrix<C64>,
    d: Vec<f64>,
    v: DMatrix<C64>,
}

impl SignificantSvd {
    fn new(m: &DMatrix<C64>, tol: f64, name: &'static str) -> GensysResult<Self> {
        let (rows, cols) = m.shape();
        if rows == 0 || cols == 0 {
            return Ok(Self { u: DMatrix::zeros(rows, 0), d: Vec::new(), v: DMatrix::zeros(cols, 0) });
        }
        let svd = m
            .clone()
            .try_svd(true, true, f64::EPSILON, 0)
            .ok_or(GensysError::SvdNoConvergence { name })?;
        let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
            return Err(GensysError::SvdNoConvergence { name });
        };
        let keep: Vec<usize> =
            (0..svd.singular_values.len()).filter(|&k| svd.singular_values[k] > tol).collect();
        Ok(Self {
            u: u.select_columns(keep.iter()),
            d: keep.iter().map(|&k| svd.singular_values[k]).collect(),
            v: v_t.adjoint().select_columns(keep.iter()),
        })
    }

    fn rank(&self) -> usize {
        self.d.len()
    }

    fn diagonal(&self) -> DMatrix<C64> {
        DMatrix::from_diagonal(&DVector::from_iterator(
            self.d.len(),
            self.d.iter().map(|&s| C64::from(s)),
        ))
    }

    fn diagonal_inverse(&self) -> DMatrix<C64> {
        DMatrix::from_diagonal(&DVector::from_iterator(
            self.d.len(),
            self.d.iter().map(|&s| C64::from(1.0 / s)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Determinate backward and forward-looking systems (`eu = (1, 1)`).
    // - Indeterminacy, non-existence and coincident zeros.
    // - Fixed vs adaptive stability boundary and option validation.
    //
    // They intentionally DO NOT cover:
    // - QZ internals; see `gensys::qz` and `gensys::reorder`.
    // -------------------------------------------------------------------------

    struct Pencil {
        g0: Array2<f64>,
        g1: Array2<f64>,
        c: Array1<f64>,
        psi: Array2<f64>,
        pi: Array2<f64>,
    }

    impl Pencil {
        fn solve_with(&self, solver: &Gensys) -> GensysOutput {
            let input = GensysInput::new(
                self.g0.view(),
                self.g1.view(),
                self.c.view(),
                self.psi.view(),
                self.pi.view(),
            )
            .unwrap();
            solver.solve(&input).unwrap()
        }

        fn solve(&self) -> GensysOutput {
            self.solve_with(&Gensys::default())
        }
    }

    // y_t = θ E_t y_{t+1} + csi_t, csi_t = 0.8 csi_{t-1} + eps_t, with state
    // (y_t, csi_t, E_t y_{t+1}).
    fn forward_model(theta: f64) -> Pencil {
        Pencil {
            g0: array![[1.0, -1.0, -theta], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
            g1: array![[0.0, 0.0, 0.0], [0.0, 0.8, 0.0], [0.0, 0.0, 1.0]],
            c: Array1::zeros(3),
            psi: array![[0.0], [1.0], [0.0]],
            pi: array![[0.0], [0.0], [1.0]],
        }
    }

    fn scalar(g1: f64) -> Pencil {
        Pencil {
            g0: array![[1.0]],
            g1: array![[g1]],
            c: Array1::zeros(1),
            psi: array![[1.0]],
            pi: Array2::zeros((1, 0)),
        }
    }

    #[test]
    // Purpose
    // -------
    // A stable AR(1) passes through unchanged.
    //
    // Given
    // -----
    // - `k_t = 0.9 k_{t-1} + ε_t` with no expectational errors.
    //
    // Expect
    // ------
    // - `eu = (1, 1)`, `B1 = 0.9`, `B2 = 1`, no unstable roots.
    fn gensys_solves_backward_ar1() {
        // Act
        let out = scalar(0.9).solve();

        // Assert
        assert!(out.eu.is_determinate());
        assert_abs_diff_eq!(out.b1[[0, 0]], 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(out.b2[[0, 0]], 1.0, epsilon = 1e-12);
        assert_eq!(out.n_unstable(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Solve a determinate forward-looking model.
    //
    // Given
    // -----
    // - `y_t = 0.5 E_t y_{t+1} + csi_t`, `csi` AR(1) with ρ = 0.8, whose
    //   stable solution is `y_t = csi_t / 0.6`.
    //
    // Expect
    // ------
    // - `eu = (1, 1)` with one unstable root.
    // - `B2 = (1/0.6, 1, 0.8/0.6)`.
    // - Along the equilibrium path `B1 x = 0.8 x`.
    fn gensys_solves_forward_looking_model() {
        // Arrange
        let model = forward_model(0.5);

        // Act
        let out = model.solve();

        // Assert
        assert!(out.eu.is_determinate(), "Got: {}", out.eu);
        assert_eq!(out.n_unstable(), 1);
        assert_abs_diff_eq!(out.b2[[0, 0]], 1.0 / 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(out.b2[[1, 0]], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out.b2[[2, 0]], 0.8 / 0.6, epsilon = 1e-9);

        let path = array![1.0 / 0.6, 1.0, 0.8 / 0.6];
        let next = out.b1.dot(&path);
        for i in 0..3 {
            assert_abs_diff_eq!(next[i], 0.8 * path[i], epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Report indeterminacy when the forward root is stable.
    //
    // Given
    // -----
    // - The forward model with θ = 2.
    //
    // Expect
    // ------
    // - `eu = (1, 0)`.
    fn gensys_flags_indeterminacy() {
        let out = forward_model(2.0).solve();
        assert_eq!(out.eu, ExistUnique::new(1, 0));
    }

    #[test]
    // Purpose
    // -------
    // Report non-existence for an explosive root without expectational
    // errors to offset it.
    //
    // Given
    // -----
    // - `k_t = 1.5 k_{t-1} + ε_t`, `Π` empty.
    //
    // Expect
    // ------
    // - `eu = (0, 1)`; outputs are still finite.
    fn gensys_flags_nonexistence() {
        let out = scalar(1.5).solve();
        assert_eq!(out.eu, ExistUnique::new(0, 1));
        assert_eq!(out.n_unstable(), 1);
        assert!(out.b1.iter().all(|v| v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // Coincident zeros short-circuit with zero outputs.
    //
    // Given
    // -----
    // - `G0 = diag(1, 0)`, `G1 = diag(0.5, 0)`.
    //
    // Expect
    // ------
    // - `eu = (-2, -2)`, `B1` is a 2×2 zero matrix, `B2` is 2×1 zeros.
    fn gensys_flags_coincident_zeros() {
        // Arrange
        let model = Pencil {
            g0: array![[1.0, 0.0], [0.0, 0.0]],
            g1: array![[0.5, 0.0], [0.0, 0.0]],
            c: Array1::zeros(2),
            psi: array![[1.0], [0.0]],
            pi: array![[0.0], [1.0]],
        };

        // Act
        let out = model.solve();

        // Assert
        assert!(out.eu.is_coincident_zeros());
        assert_eq!(out.b1, Array2::<f64>::zeros((2, 2)));
        assert_eq!(out.b2, Array2::<f64>::zeros((2, 1)));
        assert_eq!(out.gev.dim(), (2, 2));
    }

    #[test]
    // Purpose
    // -------
    // A fixed boundary below a root reclassifies it as unstable.
    //
    // Given
    // -----
    // - The stable AR(1) with root 0.9 and `div = 0.5`.
    //
    // Expect
    // ------
    // - `eu = (0, 1)` instead of `(1, 1)`.
    fn gensys_respects_fixed_boundary() {
        let solver = Gensys::with_div(0.5).unwrap();
        let out = scalar(0.9).solve_with(&solver);
        assert_eq!(out.eu, ExistUnique::new(0, 1));
    }

    #[test]
    // Purpose
    // -------
    // A constant term is carried into `const_out`.
    //
    // Given
    // -----
    // - `k_t = 0.5 k_{t-1} + 1`.
    //
    // Expect
    // ------
    // - `const_out = 1` (the one-step constant, not the steady state).
    fn gensys_carries_constant() {
        let mut model = scalar(0.5);
        model.c = array![1.0];
        let out = model.solve();
        assert_abs_diff_eq!(out.const_out[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Reject invalid fixed boundaries.
    //
    // Given
    // -----
    // - `div = 0`, `div = NaN`.
    //
    // Expect
    // ------
    // - `GensysError::InvalidDiv` in both cases; `None` is accepted.
    fn gensys_options_reject_invalid_div() {
        assert!(matches!(GensysOptions::new(Some(0.0)), Err(GensysError::InvalidDiv { .. })));
        assert!(matches!(GensysOptions::new(Some(f64::NAN)), Err(GensysError::InvalidDiv { .. })));
        assert_eq!(GensysOptions::new(None).unwrap(), GensysOptions::default());
    }
}
