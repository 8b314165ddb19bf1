//! lq::labels — ordered state labels for the augmented LQ state.
//!
//! Purpose
//! -------
//! Carry one label per row/column of the augmented state so that reduced
//! solutions can report which variables their state vector `z_t` holds.
//!
//! Key behaviors
//! -------------
//! - Validate user-supplied labels against `nk` via [`StateLabels::new`].
//! - Generate default labels (`y1`, `csi1`, `FLM1`, `GLM1`, `y1_lag`, …)
//!   via [`StateLabels::generated`].
//! - Extract the sub-sequence belonging to a list of blocks.
//!
//! Invariants & assumptions
//! ------------------------
//! - Labels follow the block order documented in [`crate::lq::blocks`];
//!   they are opaque strings and are never parsed.
use crate::lq::{
    blocks::{LQBlocks, StateBlock},
    errors::{LQError, LQResult},
};

/// StateLabels — validated label vector of length `nk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLabels {
    labels: Vec<String>,
}

impl StateLabels {
    /// Wrap user labels after checking their count against `blocks.nk()`.
    ///
    /// Errors
    /// ------
    /// - `LQError::LabelCount` when `labels.len() != nk`.
    pub fn new<S: Into<String>>(labels: Vec<S>, blocks: &LQBlocks) -> LQResult<StateLabels> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != blocks.nk() {
            return Err(LQError::LabelCount { expected: blocks.nk(), found: labels.len() });
        }
        Ok(StateLabels { labels })
    }

    /// Default labels: 1-based counters per block with `_lag` on lags.
    pub fn generated(blocks: &LQBlocks) -> StateLabels {
        let mut labels = Vec::with_capacity(blocks.nk());
        for block in StateBlock::ALL {
            let (prefix, suffix) = block.label_parts();
            for i in 1..=blocks.len(block) {
                labels.push(format!("{prefix}{i}{suffix}"));
            }
        }
        StateLabels { labels }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Concatenate the labels of `order`, block by block.
    pub(crate) fn for_blocks(&self, blocks: &LQBlocks, order: &[StateBlock]) -> Vec<String> {
        order
            .iter()
            .flat_map(|&b| self.labels[blocks.range(b)].iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the naming scheme of generated labels.
    //
    // Given
    // -----
    // - Blocks (1, 1, 1, 1): nk = 7.
    //
    // Expect
    // ------
    // - Labels in state order with `_lag` suffixes on the lagged blocks.
    fn generated_labels_follow_block_order() {
        // Arrange
        let blocks = LQBlocks::new(1, 1, 1, 1).unwrap();

        // Act
        let labels = StateLabels::generated(&blocks);

        // Assert
        assert_eq!(
            labels.as_slice(),
            &["y1", "csi1", "FLM1", "GLM1", "y1_lag", "csi1_lag", "GLM1_lag"]
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure a wrong label count is a fatal configuration error.
    //
    // Given
    // -----
    // - Blocks with nk = 4 and three labels.
    //
    // Expect
    // ------
    // - `LQError::LabelCount { expected: 4, found: 3 }`.
    fn wrong_label_count_is_rejected() {
        let blocks = LQBlocks::new(1, 1, 0, 0).unwrap();
        let err = StateLabels::new(vec!["pi", "u", "pi_lag"], &blocks).unwrap_err();
        assert_eq!(err, LQError::LabelCount { expected: 4, found: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Check block-wise extraction used to build `z_t`.
    //
    // Given
    // -----
    // - Custom labels for blocks (2, 1, 0, 1).
    //
    // Expect
    // ------
    // - Extracting (Endogenous, Shocks, ConstraintMultipliers) skips nothing
    //   but the lagged blocks.
    fn for_blocks_extracts_requested_sub_sequence() {
        // Arrange
        let blocks = LQBlocks::new(2, 1, 0, 1).unwrap();
        let labels = StateLabels::new(
            vec!["pi", "x", "u", "phi", "pi_lag", "x_lag", "u_lag", "phi_lag"],
            &blocks,
        )
        .unwrap();

        // Act
        let z = labels.for_blocks(
            &blocks,
            &[StateBlock::Endogenous, StateBlock::Shocks, StateBlock::ConstraintMultipliers],
        );

        // Assert
        assert_eq!(z, vec!["pi", "x", "u", "phi"]);
    }
}
