//! Puzzle definitions, the shared lifecycle and the five concrete puzzles.

mod book_clue;
mod code_panel;
mod definition;
mod dial;
mod input;
mod lifecycle;
mod switch;
mod symbol;

pub use book_clue::BookCluePuzzle;
pub use code_panel::CodePanelPuzzle;
pub use definition::{PuzzleCatalog, PuzzleDefinition};
pub use dial::{DialPuzzle, DEFAULT_RING_COUNT};
pub use input::{AnyPuzzle, InputOutcome, PuzzleInput};
pub use lifecycle::{Puzzle, PuzzleCore, PuzzleFeedback, PuzzleStatus};
pub use switch::{SwitchPuzzle, DEFAULT_SWITCH_COUNT};
pub use symbol::{SymbolPuzzle, DEFAULT_SYMBOL_COUNT};
