//! lq — LQ coefficient bundles, block layout and state labels.
//!
//! Purpose
//! -------
//! Describe the input of the RE solve: the numeric matrices of an LQ
//! approximation to an optimal-policy problem, the block sizes that give the
//! augmented state its structure, and one label per state entry.
//!
//! Key behaviors
//! -------------
//! - [`LQBlocks`] derives `nk = 2·ny + 2·ncsi + nf + 2·ng` and per-block
//!   index ranges ([`StateBlock`]).
//! - [`LQSystem`] validates `G0`–`G3` (plus optional constant and loss
//!   matrices) against the block sizes and is immutable afterwards.
//! - [`StateLabels`] carries user or generated labels of length `nk`.
//! - [`LQError`] / [`LQResult`] report every configuration failure before
//!   any solver work.
//!
//! Invariants & assumptions
//! ------------------------
//! - Dimension mismatches are fatal and never silently truncated.
//! - Symbolic construction of the matrices happens upstream.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its invariants; end-to-end
//!   behavior is exercised in `tests/`.

pub mod blocks;
pub mod errors;
pub mod labels;
pub mod system;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::blocks::{LQBlocks, StateBlock};
pub use self::errors::{LQError, LQResult};
pub use self::labels::StateLabels;
pub use self::system::{LQLossMatrices, LQSystem};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::blocks::{LQBlocks, StateBlock};
    pub use super::errors::{LQError, LQResult};
    pub use super::labels::StateLabels;
    pub use super::system::{LQLossMatrices, LQSystem};
}
