//! Switch bank: toggles checked automatically after every flip.

use super::definition::PuzzleDefinition;
use super::lifecycle::{Puzzle, PuzzleCore};
use crate::session::SessionContext;
use tracing::{debug, warn};

pub const DEFAULT_SWITCH_COUNT: usize = 5;

/// M on/off switches. The solution is read as 1 = on, anything else = off.
///
/// There is no failure path: a non-matching pattern simply leaves the
/// puzzle unsolved.
#[derive(Debug)]
pub struct SwitchPuzzle {
    core: PuzzleCore,
    switches: Vec<bool>,
}

impl SwitchPuzzle {
    pub fn new(definition: PuzzleDefinition, switch_count: usize) -> Self {
        Self {
            core: PuzzleCore::new(definition),
            switches: vec![false; switch_count],
        }
    }

    pub fn switches(&self) -> &[bool] {
        &self.switches
    }

    /// Flip one switch and immediately check the pattern.
    ///
    /// Returns `false` when the input was ignored.
    pub fn toggle(&mut self, index: usize, session: &mut SessionContext) -> bool {
        if self.is_solved() {
            return false;
        }
        let Some(switch) = self.switches.get_mut(index) else {
            debug!(puzzle = self.core.id(), index, "Ignoring toggle of unknown switch");
            return false;
        };
        *switch = !*switch;
        self.check_solution(session);
        true
    }

    fn target(&self) -> impl Iterator<Item = bool> + '_ {
        self.core.definition().solution.iter().map(|&v| v == 1)
    }
}

impl Puzzle for SwitchPuzzle {
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
        if !definition.solution_fits(self.switches.len()) {
            warn!(
                puzzle = definition.label(),
                switches = self.switches.len(),
                solution_len = definition.solution.len(),
                "Switch solution does not match switch count; puzzle cannot be solved"
            );
            return;
        }

        if self.target().eq(self.switches.iter().copied()) {
            self.core.complete(session);
        }
    }

    fn restore_solved(&mut self, _session: &SessionContext) {
        if self.core.definition().solution.len() == self.switches.len() {
            self.switches = self.target().collect();
        }
    }
}
