//! Sole owner and mutator of [`GameProgress`].

use super::ledger::{GameProgress, CODE_LENGTH};
use crate::events::{EventChannel, GameEvent};
use tracing::{debug, info};

/// Default threshold for [`ProgressManager::are_all_digits_found`].
pub const DEFAULT_DIGITS_REQUIRED: usize = CODE_LENGTH;

/// Queries and named mutations over the session's progress ledger.
///
/// `solve_puzzle` deliberately does not publish anything: the puzzle
/// lifecycle publishes `PuzzleSolved` after calling it. `complete_game` is the
/// only operation here that publishes.
#[derive(Debug)]
pub struct ProgressManager {
    progress: GameProgress,
    events: EventChannel,
    digits_required: usize,
}

impl ProgressManager {
    pub fn new(events: EventChannel) -> Self {
        Self::with_digits_required(events, DEFAULT_DIGITS_REQUIRED)
    }

    pub fn with_digits_required(events: EventChannel, digits_required: usize) -> Self {
        Self {
            progress: GameProgress::default(),
            events,
            digits_required,
        }
    }

    /// Read-only view of the ledger.
    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    pub fn is_puzzle_solved(&self, puzzle_id: &str) -> bool {
        self.progress.is_puzzle_solved(puzzle_id)
    }

    /// Add a puzzle to the solved set. No-op if already solved.
    ///
    /// Returns `true` if this call solved it.
    pub fn solve_puzzle(&mut self, puzzle_id: &str) -> bool {
        if !self.progress.mark_solved(puzzle_id) {
            debug!(puzzle_id, "Puzzle already solved, ignoring");
            return false;
        }
        info!(puzzle_id, "Puzzle solved");
        true
    }

    /// Idempotent upsert of a revealed digit.
    pub fn reveal_digit(&mut self, key: &str, value: i32) {
        self.progress.reveal(key, value);
        info!(
            key,
            value,
            revealed = self.progress.revealed_count(),
            required = self.digits_required,
            "Digit revealed"
        );
        if self.are_all_digits_found() {
            debug!("All digits found, code panel is now solvable");
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.progress.revealed_count()
    }

    /// True once at least `digits_required` distinct keys are revealed,
    /// regardless of which keys they are.
    pub fn are_all_digits_found(&self) -> bool {
        self.progress.revealed_count() >= self.digits_required
    }

    /// Current code from `digit_0..digit_3`, 0 where a digit is missing.
    pub fn get_code(&self) -> [i32; CODE_LENGTH] {
        self.progress.code_digits()
    }

    pub fn is_game_complete(&self) -> bool {
        self.progress.is_game_complete()
    }

    /// Set the completion flag and publish `GameComplete`, at most once per
    /// session no matter how often it is called.
    ///
    /// Returns `true` if this call completed the game.
    pub fn complete_game(&mut self) -> bool {
        if !self.progress.mark_complete() {
            return false;
        }
        info!("Game complete");
        self.events.publish(GameEvent::GameComplete);
        true
    }

    /// Explicit full reset of the ledger. The only way a solved puzzle
    /// becomes unsolved again.
    pub fn reset(&mut self) {
        self.progress.clear();
        info!("Progress reset");
    }
}
