//! gensys — generalized linear rational-expectations solver.
//!
//! Purpose
//! -------
//! Solve `G0 k_t = G1 k_{t-1} + C + Ψ ε_t + Π η_t`, `E_t[η_{t+1}] = 0`, for the
//! stable law of motion `k_t = B1 k_{t-1} + const_out + B2 ε_t`, reporting
//! existence and uniqueness through [`ExistUnique`].
//!
//! Key behaviors
//! -------------
//! - [`RationalExpectationsSolver`] is the seam the orchestrator calls;
//!   [`Gensys`] is the default implementation.
//! - [`qz`] computes the complex generalized Schur form; [`qzdiv`] and
//!   [`qzswitch`] order it so unstable roots come last.
//! - [`GensysError`] covers only ill-posed inputs and numerical breakdowns.
//!
//! Downstream usage
//! ----------------
//! - `ree::solve` builds a [`GensysInput`] from the cleaned LQ matrices and
//!   consumes `B1`, `B2` and `eu` from the [`GensysOutput`].

pub mod errors;
pub mod qz;
pub mod reorder;
pub mod sims;
pub mod status;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{GensysError, GensysResult};
pub use self::qz::{QzDecomposition, qz};
pub use self::reorder::{qzdiv, qzswitch};
pub use self::sims::{Gensys, GensysOptions};
pub use self::status::ExistUnique;
pub use self::traits::{GensysInput, GensysOutput, RationalExpectationsSolver};
