//! Completion table and progress aggregation.

use serde::{Deserialize, Serialize};
use waypost_core::Structure;

/// Per-card completion flags, index-aligned with a [`Structure`].
///
/// Built once from the structure; the structure never changes afterwards,
/// so every module's flag list keeps the length of its card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    blocks: Vec<Vec<Vec<bool>>>,
}

impl CompletionState {
    /// All cards not done.
    pub fn new(structure: &Structure) -> Self {
        Self {
            blocks: aligned(structure, false),
        }
    }

    /// Flags of one module, by position.
    pub fn module(&self, block: usize, module: usize) -> Option<&[bool]> {
        self.blocks
            .get(block)
            .and_then(|modules| modules.get(module))
            .map(Vec::as_slice)
    }

    /// Whether a card is done, by position.
    pub fn is_done(&self, block: usize, module: usize, card: usize) -> bool {
        self.module(block, module)
            .and_then(|cards| cards.get(card))
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn set_done(&mut self, block: usize, module: usize, card: usize) -> bool {
        let flag = &mut self.blocks[block][module][card];
        let changed = !*flag;
        *flag = true;
        changed
    }

    /// Done and total cards of one block.
    pub fn block_counts(&self, block: usize) -> (usize, usize) {
        self.blocks
            .get(block)
            .map(|modules| count(modules.iter().flatten()))
            .unwrap_or((0, 0))
    }

    /// Done and total cards across all blocks.
    pub fn counts(&self) -> (usize, usize) {
        count(self.blocks.iter().flatten().flatten())
    }
}

fn count<'a>(flags: impl Iterator<Item = &'a bool>) -> (usize, usize) {
    flags.fold((0, 0), |(done, total), flag| (done + usize::from(*flag), total + 1))
}

/// A table shaped like the structure's cards, filled with `init`.
pub(crate) fn aligned<T: Clone>(structure: &Structure, init: T) -> Vec<Vec<Vec<T>>> {
    structure
        .blocks()
        .iter()
        .map(|block| {
            block
                .modules
                .iter()
                .map(|module| vec![init.clone(); module.cards.len()])
                .collect()
        })
        .collect()
}

/// `100 * done / total`, or 0 when there is nothing to do.
pub fn percentage(done: usize, total: usize) -> f32 {
    if total > 0 {
        (done as f32 / total as f32) * 100.0
    } else {
        0.0
    }
}

/// Progress of one block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockProgress {
    /// Cards marked done
    pub completed_cards: usize,

    /// Cards in the block
    pub total_cards: usize,

    /// Percentage complete
    pub percentage: f32,
}

impl BlockProgress {
    /// Build from counts.
    pub fn from_counts(completed_cards: usize, total_cards: usize) -> Self {
        Self {
            completed_cards,
            total_cards,
            percentage: percentage(completed_cards, total_cards),
        }
    }
}

impl Default for BlockProgress {
    fn default() -> Self {
        Self::from_counts(0, 0)
    }
}
