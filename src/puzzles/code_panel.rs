//! Wall keypad validated against the code assembled from other puzzles.

use super::definition::PuzzleDefinition;
use super::lifecycle::{Puzzle, PuzzleCore};
use crate::progress::CODE_LENGTH;
use crate::session::SessionContext;
use std::time::Duration;
use tracing::debug;

/// Four-slot digit buffer.
///
/// Unlike every other puzzle this one ignores its own `solution` and compares
/// against `ProgressManager::get_code` read at submit time. A wrong submit
/// flags the buffer; it clears once the flag duration has been advanced past.
#[derive(Debug)]
pub struct CodePanelPuzzle {
    core: PuzzleCore,
    buffer: [i32; CODE_LENGTH],
    filled: usize,
    flag_remaining: Option<Duration>,
    flag_duration: Duration,
}

impl CodePanelPuzzle {
    pub fn new(definition: PuzzleDefinition, flag_duration: Duration) -> Self {
        Self {
            core: PuzzleCore::new(definition),
            buffer: [0; CODE_LENGTH],
            filled: 0,
            flag_remaining: None,
            flag_duration,
        }
    }

    /// Digits entered so far, in entry order.
    pub fn entered(&self) -> &[i32] {
        &self.buffer[..self.filled]
    }

    pub fn is_full(&self) -> bool {
        self.filled == CODE_LENGTH
    }

    /// Whether the buffer is showing a wrong code and waiting to clear.
    pub fn is_flagged(&self) -> bool {
        self.flag_remaining.is_some()
    }

    fn accepts_input(&self) -> bool {
        !self.is_solved() && !self.is_flagged()
    }

    /// Append a digit. No-op once four digits are in, or for values outside
    /// `0..=9`.
    pub fn enter_digit(&mut self, digit: i32) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if !(0..=9).contains(&digit) {
            debug!(puzzle = self.core.id(), digit, "Ignoring non-decimal digit");
            return false;
        }
        let Some(slot) = self.buffer.get_mut(self.filled) else {
            return false;
        };
        *slot = digit;
        self.filled += 1;
        true
    }

    /// Remove the most recently entered digit.
    pub fn delete_digit(&mut self) -> bool {
        if !self.accepts_input() || self.filled == 0 {
            return false;
        }
        self.filled -= 1;
        self.buffer[self.filled] = 0;
        true
    }

    /// Explicit submit action.
    pub fn submit(&mut self, session: &mut SessionContext) {
        self.check_solution(session);
    }

    /// Move the flag timer forward. Returns `true` when this call cleared a
    /// flagged buffer.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let Some(remaining) = self.flag_remaining else {
            return false;
        };
        match remaining.checked_sub(elapsed) {
            Some(left) if !left.is_zero() => {
                self.flag_remaining = Some(left);
                false
            }
            _ => {
                self.clear();
                true
            }
        }
    }

    fn clear(&mut self) {
        self.buffer = [0; CODE_LENGTH];
        self.filled = 0;
        self.flag_remaining = None;
    }
}

impl Puzzle for CodePanelPuzzle {
    fn core(&self) -> &PuzzleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PuzzleCore {
        &mut self.core
    }

    fn check_solution(&mut self, session: &mut SessionContext) {
        if !self.accepts_input() || !self.is_full() {
            return;
        }

        let code = session.progress().get_code();
        if self.buffer == code {
            self.core.complete(session);
            return;
        }

        debug!(puzzle = self.core.id(), entered = ?self.buffer, "Wrong code");
        if self.flag_duration.is_zero() {
            self.clear();
        } else {
            self.flag_remaining = Some(self.flag_duration);
        }
        self.core.report_failed_attempt(session);
    }

    fn restore_solved(&mut self, session: &SessionContext) {
        self.buffer = session.progress().get_code();
        self.filled = CODE_LENGTH;
        self.flag_remaining = None;
    }
}
