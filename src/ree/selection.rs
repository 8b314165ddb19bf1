//! ree::selection — 0/1 selection matrices over a reduced state.
//!
//! A selection matrix `S` for a block of `len` entries starting at `start`
//! in a state of length `n` is the `len × n` matrix with `S[i, start + i] = 1`
//! and zeros elsewhere, so `S z_t` extracts the block. Rows are orthonormal;
//! the selections of consecutive blocks partition the columns of the state.
use crate::lq::blocks::{LQBlocks, StateBlock};
use ndarray::Array2;
use std::ops::Range;

/// `range.len() × n` indicator matrix extracting `range` from a length-`n`
/// state.
pub fn selection_matrix(range: Range<usize>, n: usize) -> Array2<f64> {
    let mut s = Array2::zeros((range.len(), n));
    for (row, col) in range.enumerate() {
        s[[row, col]] = 1.0;
    }
    s
}

/// Selections for `order` laid out back to back, each paired with its block.
pub fn block_selections(blocks: &LQBlocks, order: &[StateBlock]) -> Vec<(StateBlock, Array2<f64>)> {
    let n: usize = order.iter().map(|&b| blocks.len(b)).sum();
    let mut start = 0;
    order
        .iter()
        .map(|&b| {
            let len = blocks.len(b);
            let s = selection_matrix(start..start + len, n);
            start += len;
            (b, s)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Selections over `(hy, csi, GLM)` partition the state columns.
    //
    // Given
    // -----
    // - ny=2, ncsi=1, ng=2 → state of length 5.
    //
    // Expect
    // ------
    // - Shapes 2×5, 1×5, 2×5; summing `Sᵀ S` over blocks gives `I₅`.
    fn block_selections_partition_the_state() {
        // Arrange
        let blocks = LQBlocks::new(2, 1, 3, 2).unwrap();
        let order = [StateBlock::Endogenous, StateBlock::Shocks, StateBlock::ConstraintMultipliers];

        // Act
        let sel = block_selections(&blocks, &order);

        // Assert
        let mut cover = Array2::<f64>::zeros((5, 5));
        for (_, s) in &sel {
            cover = cover + s.t().dot(s);
        }
        assert_eq!(cover, Array2::<f64>::eye(5));
        assert_eq!(sel[1].1, array![[0.0, 0.0, 1.0, 0.0, 0.0]]);
    }

    #[test]
    // Purpose
    // -------
    // An empty block yields a `0 × n` selection.
    //
    // Given
    // -----
    // - `selection_matrix(2..2, 3)`.
    //
    // Expect
    // ------
    // - Shape `(0, 3)`.
    fn empty_block_has_zero_rows() {
        assert_eq!(selection_matrix(2..2, 3).dim(), (0, 3));
    }
}
