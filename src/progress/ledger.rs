//! The aggregated progress ledger.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Number of positions in the vault code.
pub const CODE_LENGTH: usize = 4;

/// Canonical ledger key for the digit at `position` (`digit_0`..`digit_3`).
pub fn digit_key(position: usize) -> String {
    format!("digit_{position}")
}

/// Solved puzzles, revealed digits and the completion flag for one session.
///
/// Only [`ProgressManager`](super::ProgressManager) can mutate it; everyone
/// else gets a shared reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgress {
    solved_puzzles: BTreeSet<String>,
    revealed_digits: BTreeMap<String, i32>,
    game_complete: bool,
}

impl GameProgress {
    /// Whether `puzzle_id` has been recorded as solved.
    pub fn is_puzzle_solved(&self, puzzle_id: &str) -> bool {
        self.solved_puzzles.contains(puzzle_id)
    }

    /// Solved puzzle ids in sorted order.
    pub fn solved_puzzles(&self) -> impl Iterator<Item = &str> {
        self.solved_puzzles.iter().map(String::as_str)
    }

    /// Number of distinct solved puzzles.
    pub fn solved_count(&self) -> usize {
        self.solved_puzzles.len()
    }

    /// Value revealed under `key`, if any.
    pub fn revealed_digit(&self, key: &str) -> Option<i32> {
        self.revealed_digits.get(key).copied()
    }

    /// Number of distinct revealed digit keys.
    pub fn revealed_count(&self) -> usize {
        self.revealed_digits.len()
    }

    /// Set once by `complete_game` and never cleared except by a reset.
    pub fn is_game_complete(&self) -> bool {
        self.game_complete
    }

    /// Code digits in `digit_0..digit_3` order; unrevealed positions are 0.
    pub fn code_digits(&self) -> [i32; CODE_LENGTH] {
        let mut code = [0; CODE_LENGTH];
        for (position, slot) in code.iter_mut().enumerate() {
            if let Some(value) = self.revealed_digit(&digit_key(position)) {
                *slot = value;
            }
        }
        code
    }

    /// Returns `true` if the puzzle was not already present.
    pub(super) fn mark_solved(&mut self, puzzle_id: &str) -> bool {
        self.solved_puzzles.insert(puzzle_id.to_string())
    }

    /// Upsert; returns the previous value for the key.
    pub(super) fn reveal(&mut self, key: &str, value: i32) -> Option<i32> {
        self.revealed_digits.insert(key.to_string(), value)
    }

    /// Returns `true` if the flag was not already set.
    pub(super) fn mark_complete(&mut self) -> bool {
        !std::mem::replace(&mut self.game_complete, true)
    }

    pub(super) fn clear(&mut self) {
        self.solved_puzzles.clear();
        self.revealed_digits.clear();
        self.game_complete = false;
    }
}
