//! Dial safe: independent rings checked on an explicit confirm.

use super::definition::PuzzleDefinition;
use super::lifecycle::{Puzzle, PuzzleCore};
use crate::session::SessionContext;
use tracing::{debug, warn};

pub const DEFAULT_RING_COUNT: usize = 3;

/// N rings, each cycling `0..=max_value`.
///
/// Rotating never validates; only [`DialPuzzle::confirm`] does. A wrong
/// confirm keeps the ring values so the player can adjust and retry.
#[derive(Debug)]
pub struct DialPuzzle {
    core: PuzzleCore,
    values: Vec<i32>,
    max_value: i32,
}

impl DialPuzzle {
    pub fn new(definition: PuzzleDefinition, ring_count: usize, max_value: i32) -> Self {
        Self {
            core: PuzzleCore::new(definition),
            values: vec![0; ring_count],
            max_value: max_value.max(0),
        }
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    /// Advance one ring by a step, wrapping to 0 after `max_value`.
    ///
    /// Returns `false` when the input was ignored (solved, or no such ring).
    pub fn rotate(&mut self, ring: usize) -> bool {
        if self.is_solved() {
            return false;
        }
        let Some(value) = self.values.get_mut(ring) else {
            debug!(puzzle = self.core.id(), ring, "Ignoring rotate of unknown ring");
            return false;
        };
        *value = if *value >= self.max_value { 0 } else { *value + 1 };
        true
    }

    /// Explicit confirm action.
    pub fn confirm(&mut self, session: &mut SessionContext) {
        self.check_solution(session);
    }
}

impl Puzzle for DialPuzzle {
    fn core(&self) -> &PuzzleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PuzzleCore {
        &mut self.core
    }

    fn check_solution(&mut self, session: &mut SessionContext) {
        if self.is_solved() {
            return;
        }
        let definition = self.core.definition();
        if !definition.solution_fits(self.values.len()) {
            warn!(
                puzzle = definition.label(),
                rings = self.values.len(),
                solution_len = definition.solution.len(),
                "Dial solution does not match ring count; puzzle cannot be solved"
            );
            return;
        }

        if self.values == definition.solution {
            self.core.complete(session);
        } else {
            self.core.report_failed_attempt(session);
        }
    }

    fn restore_solved(&mut self, _session: &SessionContext) {
        let solution = &self.core.definition().solution;
        if solution.len() == self.values.len() {
            self.values.clone_from(solution);
        }
    }
}
