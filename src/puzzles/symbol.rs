//! Symbol sequence: press symbols in the exact solution order.

use super::definition::PuzzleDefinition;
use super::lifecycle::{Puzzle, PuzzleCore};
use crate::session::SessionContext;
use tracing::{debug, warn};

pub const DEFAULT_SYMBOL_COUNT: usize = 4;

/// Accepted-prefix matcher over `symbol_count` buttons.
///
/// A correct press extends the prefix; any wrong press throws the whole
/// prefix away and reports one failed attempt.
#[derive(Debug)]
pub struct SymbolPuzzle {
    core: PuzzleCore,
    symbol_count: usize,
    cursor: usize,
}

impl SymbolPuzzle {
    pub fn new(definition: PuzzleDefinition, symbol_count: usize) -> Self {
        Self {
            core: PuzzleCore::new(definition),
            symbol_count,
            cursor: 0,
        }
    }

    /// Length of the accepted prefix.
    pub fn progress(&self) -> usize {
        self.cursor
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Press one symbol button.
    ///
    /// Returns `false` when the input was ignored.
    pub fn press(&mut self, symbol: usize, session: &mut SessionContext) -> bool {
        if self.is_solved() {
            return false;
        }
        if symbol >= self.symbol_count {
            debug!(puzzle = self.core.id(), symbol, "Ignoring press of unknown symbol");
            return false;
        }
        let Some(&expected) = self.core.definition().solution.get(self.cursor) else {
            warn!(
                puzzle = self.core.definition().label(),
                "Symbol puzzle has no solution; puzzle cannot be solved"
            );
            return false;
        };

        if i32::try_from(symbol).is_ok_and(|pressed| pressed == expected) {
            self.cursor += 1;
            self.check_solution(session);
        } else {
            debug!(
                puzzle = self.core.id(),
                symbol,
                expected,
                discarded = self.cursor,
                "Wrong symbol, sequence reset"
            );
            self.cursor = 0;
            self.core.report_failed_attempt(session);
        }
        true
    }
}

impl Puzzle for SymbolPuzzle {
    fn core(&self) -> &PuzzleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PuzzleCore {
        &mut self.core
    }

    /// Completes only once the full sequence has been matched; a partial
    /// prefix is not a wrong answer.
    fn check_solution(&mut self, session: &mut SessionContext) {
        if self.is_solved() {
            return;
        }
        let length = self.core.definition().solution.len();
        if length > 0 && self.cursor == length {
            self.core.complete(session);
        }
    }

    fn restore_solved(&mut self, _session: &SessionContext) {
        self.cursor = self.core.definition().solution.len();
    }
}
