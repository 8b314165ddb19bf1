//! lq::blocks — block sizes and offsets of the augmented LQ state.
//!
//! Purpose
//! -------
//! Describe how the augmented state vector of an LQ optimal-policy system
//! is partitioned, and derive its total dimension `nk` from the four block
//! sizes. Every other layer asks [`LQBlocks`] for index ranges instead of
//! doing offset arithmetic on its own.
//!
//! Key behaviors
//! -------------
//! - Validate block sizes (`ny + ncsi ≥ 1`) via [`LQBlocks::new`].
//! - Compute `nk = 2·ny + 2·ncsi + nf + 2·ng`.
//! - Map each [`StateBlock`] to its contiguous index range.
//!
//! Invariants & assumptions
//! ------------------------
//! - Block order is fixed:
//!   `hy_t | csi_t | FLM_t | GLM_t | hy_{t-1} | csi_{t-1} | GLM_{t-1}`.
//!   Forward multipliers are not carried with a lag.
//!
//! Testing notes
//! -------------
//! - Unit tests check `nk`, the ranges of every block, and the rejection of
//!   an empty flow block.
use std::ops::Range;

use crate::lq::errors::{LQError, LQResult};

/// StateBlock — one contiguous block of the augmented state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateBlock {
    /// Current endogenous flow variables `hy_t`.
    Endogenous,
    /// Current exogenous shocks `csi_t`.
    Shocks,
    /// Current forward-looking multipliers `FLM_t`.
    ForwardMultipliers,
    /// Current constraint multipliers `GLM_t`.
    ConstraintMultipliers,
    /// Lagged endogenous variables `hy_{t-1}`.
    LaggedEndogenous,
    /// Lagged shocks `csi_{t-1}`.
    LaggedShocks,
    /// Lagged constraint multipliers `GLM_{t-1}`.
    LaggedConstraintMultipliers,
}

impl StateBlock {
    /// All blocks in state order.
    pub const ALL: [StateBlock; 7] = [
        StateBlock::Endogenous,
        StateBlock::Shocks,
        StateBlock::ForwardMultipliers,
        StateBlock::ConstraintMultipliers,
        StateBlock::LaggedEndogenous,
        StateBlock::LaggedShocks,
        StateBlock::LaggedConstraintMultipliers,
    ];

    /// Prefix and suffix used by generated labels.
    pub(crate) fn label_parts(self) -> (&'static str, &'static str) {
        match self {
            StateBlock::Endogenous => ("y", ""),
            StateBlock::Shocks => ("csi", ""),
            StateBlock::ForwardMultipliers => ("FLM", ""),
            StateBlock::ConstraintMultipliers => ("GLM", ""),
            StateBlock::LaggedEndogenous => ("y", "_lag"),
            StateBlock::LaggedShocks => ("csi", "_lag"),
            StateBlock::LaggedConstraintMultipliers => ("GLM", "_lag"),
        }
    }
}

/// LQBlocks — block sizes of an LQ optimal-policy system.
///
/// Purpose
/// -------
/// Hold the four block sizes that determine the layout and the dimension of
/// the augmented state, and answer index-range queries for each block.
///
/// Fields
/// ------
/// - `ny`: `usize`
///   Number of endogenous flow variables (and of one-period-ahead
///   expectational first-order conditions).
/// - `ncsi`: `usize`
///   Number of exogenous shocks.
/// - `nf`: `usize`
///   Number of forward-looking multipliers.
/// - `ng`: `usize`
///   Number of constraint multipliers.
///
/// Invariants
/// ----------
/// - `ny + ncsi ≥ 1`, enforced by [`LQBlocks::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LQBlocks {
    pub ny: usize,
    pub ncsi: usize,
    pub nf: usize,
    pub ng: usize,
}

impl LQBlocks {
    /// Build validated block sizes.
    ///
    /// Errors
    /// ------
    /// - `LQError::EmptyFlowBlock` when `ny + ncsi == 0`.
    pub fn new(ny: usize, ncsi: usize, nf: usize, ng: usize) -> LQResult<LQBlocks> {
        if ny + ncsi == 0 {
            return Err(LQError::EmptyFlowBlock);
        }
        Ok(LQBlocks { ny, ncsi, nf, ng })
    }

    /// Dimension of the augmented state, `2·ny + 2·ncsi + nf + 2·ng`.
    pub fn nk(&self) -> usize {
        2 * self.ny + 2 * self.ncsi + self.nf + 2 * self.ng
    }

    /// Size of the flow block `z = (hy, csi)`.
    pub fn n_flow(&self) -> usize {
        self.ny + self.ncsi
    }

    /// Size of the current-period block `(hy, csi, FLM, GLM)`.
    pub fn n_current(&self) -> usize {
        self.ny + self.ncsi + self.nf + self.ng
    }

    /// Size of the lag-collapsed state `(hy, csi, GLM)`.
    pub fn n_collapsed(&self) -> usize {
        self.ny + self.ncsi + self.ng
    }

    /// Number of entries in `block`.
    pub fn len(&self, block: StateBlock) -> usize {
        match block {
            StateBlock::Endogenous | StateBlock::LaggedEndogenous => self.ny,
            StateBlock::Shocks | StateBlock::LaggedShocks => self.ncsi,
            StateBlock::ForwardMultipliers => self.nf,
            StateBlock::ConstraintMultipliers | StateBlock::LaggedConstraintMultipliers => {
                self.ng
            }
        }
    }

    /// Index range of `block` inside the augmented state.
    pub fn range(&self, block: StateBlock) -> Range<usize> {
        let mut start = 0;
        for b in StateBlock::ALL {
            if b == block {
                break;
            }
            start += self.len(b);
        }
        start..start + self.len(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `nk` and derived sizes for a generic configuration.
    // - Contiguity and ordering of the seven block ranges.
    // - Rejection of an empty flow block.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify `nk` and the derived sizes for ny=2, ncsi=1, nf=1, ng=2.
    //
    // Given
    // -----
    // - Block sizes (2, 1, 1, 2).
    //
    // Expect
    // ------
    // - nk = 4 + 2 + 1 + 4 = 11, n_current = 6, n_collapsed = 5.
    fn nk_follows_block_sizes() {
        // Arrange / Act
        let blocks = LQBlocks::new(2, 1, 1, 2).unwrap();

        // Assert
        assert_eq!(blocks.nk(), 11);
        assert_eq!(blocks.n_flow(), 3);
        assert_eq!(blocks.n_current(), 6);
        assert_eq!(blocks.n_collapsed(), 5);
    }

    #[test]
    // Purpose
    // -------
    // Check that block ranges tile `0..nk` in state order.
    //
    // Given
    // -----
    // - Block sizes (2, 1, 1, 2).
    //
    // Expect
    // ------
    // - Each range starts where the previous one ended and the last ends
    //   at nk; FLM occupies 3..4 and lagged GLM 9..11.
    fn ranges_tile_the_state_in_order() {
        // Arrange
        let blocks = LQBlocks::new(2, 1, 1, 2).unwrap();

        // Act
        let ranges: Vec<Range<usize>> = StateBlock::ALL.iter().map(|&b| blocks.range(b)).collect();

        // Assert
        let mut cursor = 0;
        for r in &ranges {
            assert_eq!(r.start, cursor);
            cursor = r.end;
        }
        assert_eq!(cursor, blocks.nk());
        assert_eq!(blocks.range(StateBlock::ForwardMultipliers), 3..4);
        assert_eq!(blocks.range(StateBlock::LaggedConstraintMultipliers), 9..11);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a configuration without flow variables is rejected.
    //
    // Given
    // -----
    // - ny = 0 and ncsi = 0.
    //
    // Expect
    // ------
    // - `LQError::EmptyFlowBlock`.
    fn empty_flow_block_is_rejected() {
        assert_eq!(LQBlocks::new(0, 0, 1, 1), Err(LQError::EmptyFlowBlock));
    }
}
