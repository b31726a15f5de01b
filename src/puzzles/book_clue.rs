//! Book clue: a single click reveals its digit.

use super::definition::PuzzleDefinition;
use super::lifecycle::{Puzzle, PuzzleCore};
use crate::session::SessionContext;

#[derive(Debug)]
pub struct BookCluePuzzle {
    core: PuzzleCore,
}

impl BookCluePuzzle {
    pub fn new(definition: PuzzleDefinition) -> Self {
        Self {
            core: PuzzleCore::new(definition),
        }
    }

    /// Open the book. Returns `false` once it has already been read.
    pub fn click(&mut self, session: &mut SessionContext) -> bool {
        if self.is_solved() {
            return false;
        }
        self.check_solution(session);
        true
    }
}

impl Puzzle for BookCluePuzzle {
    fn core(&self) -> &PuzzleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PuzzleCore {
        &mut self.core
    }

    fn check_solution(&mut self, session: &mut SessionContext) {
        self.core.complete(session);
    }
}
