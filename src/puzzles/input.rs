//! Uniform input routing over the concrete puzzle kinds.

use super::book_clue::BookCluePuzzle;
use super::code_panel::CodePanelPuzzle;
use super::dial::DialPuzzle;
use super::lifecycle::{Puzzle, PuzzleCore};
use super::switch::SwitchPuzzle;
use super::symbol::SymbolPuzzle;
use crate::session::SessionContext;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// One player action on a puzzle element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PuzzleInput {
    RotateRing(usize),
    ToggleSwitch(usize),
    PressSymbol(usize),
    EnterDigit(i32),
    DeleteDigit,
    /// Confirm on a dial, submit on a code panel.
    Check,
    ClickBook,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Applied,
    Ignored,
}

impl InputOutcome {
    fn from_applied(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Ignored
        }
    }
}

#[derive(Debug)]
pub enum AnyPuzzle {
    Dial(DialPuzzle),
    Switch(SwitchPuzzle),
    Symbol(SymbolPuzzle),
    CodePanel(CodePanelPuzzle),
    BookClue(BookCluePuzzle),
}

impl AnyPuzzle {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dial(_) => "dial",
            Self::Switch(_) => "switch",
            Self::Symbol(_) => "symbol",
            Self::CodePanel(_) => "code_panel",
            Self::BookClue(_) => "book_clue",
        }
    }

    /// Route one input to the puzzle if it fits the puzzle kind.
    pub fn handle(&mut self, input: PuzzleInput, session: &mut SessionContext) -> InputOutcome {
        if self.is_solved() {
            return InputOutcome::Ignored;
        }
        let applied = match (&mut *self, input) {
            (Self::Dial(dial), PuzzleInput::RotateRing(ring)) => dial.rotate(ring),
            (Self::Dial(dial), PuzzleInput::Check) => {
                dial.confirm(session);
                true
            }
            (Self::Switch(switch), PuzzleInput::ToggleSwitch(index)) => {
                switch.toggle(index, session)
            }
            (Self::Symbol(symbol), PuzzleInput::PressSymbol(index)) => {
                symbol.press(index, session)
            }
            (Self::CodePanel(panel), PuzzleInput::EnterDigit(digit)) => panel.enter_digit(digit),
            (Self::CodePanel(panel), PuzzleInput::DeleteDigit) => panel.delete_digit(),
            (Self::CodePanel(panel), PuzzleInput::Check) => {
                if panel.is_flagged() || !panel.is_full() {
                    false
                } else {
                    panel.submit(session);
                    true
                }
            }
            (Self::BookClue(book), PuzzleInput::ClickBook) => book.click(session),
            (puzzle, input) => {
                debug!(
                    puzzle = puzzle.id(),
                    kind = puzzle.kind(),
                    ?input,
                    "Input does not apply to this puzzle kind"
                );
                false
            }
        };
        InputOutcome::from_applied(applied)
    }

    /// Forward elapsed time to puzzles with timed state.
    pub fn advance(&mut self, elapsed: Duration) {
        if let Self::CodePanel(panel) = self {
            panel.advance(elapsed);
        }
    }

    fn inner(&self) -> &dyn Puzzle {
        match self {
            Self::Dial(puzzle) => puzzle,
            Self::Switch(puzzle) => puzzle,
            Self::Symbol(puzzle) => puzzle,
            Self::CodePanel(puzzle) => puzzle,
            Self::BookClue(puzzle) => puzzle,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Puzzle {
        match self {
            Self::Dial(puzzle) => puzzle,
            Self::Switch(puzzle) => puzzle,
            Self::Symbol(puzzle) => puzzle,
            Self::CodePanel(puzzle) => puzzle,
            Self::BookClue(puzzle) => puzzle,
        }
    }
}

impl Puzzle for AnyPuzzle {
    fn core(&self) -> &PuzzleCore {
        self.inner().core()
    }

    fn core_mut(&mut self) -> &mut PuzzleCore {
        self.inner_mut().core_mut()
    }

    fn check_solution(&mut self, session: &mut SessionContext) {
        self.inner_mut().check_solution(session);
    }

    fn restore_solved(&mut self, session: &SessionContext) {
        self.inner_mut().restore_solved(session);
    }
}

macro_rules! impl_from_puzzle {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for AnyPuzzle {
                fn from(puzzle: $ty) -> Self {
                    Self::$variant(puzzle)
                }
            }
        )*
    };
}

impl_from_puzzle!(
    Dial(DialPuzzle),
    Switch(SwitchPuzzle),
    Symbol(SymbolPuzzle),
    CodePanel(CodePanelPuzzle),
    BookClue(BookCluePuzzle),
);
