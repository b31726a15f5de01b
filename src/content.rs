//! The shipped room: five puzzles and the vault door they unlock.

use crate::config::SessionConfig;
use crate::error::CatalogError;
use crate::interaction::{GateSpec, GatedInteractable};
use crate::puzzles::{
    AnyPuzzle, BookCluePuzzle, CodePanelPuzzle, DialPuzzle, PuzzleCatalog, SwitchPuzzle,
    SymbolPuzzle, DEFAULT_RING_COUNT, DEFAULT_SWITCH_COUNT, DEFAULT_SYMBOL_COUNT,
};
use tracing::info;

const PUZZLES_JSON: &str = include_str!("../content/puzzles.json");

pub const DIAL_SAFE_ID: &str = "dial_safe";
pub const SWITCH_PUZZLE_ID: &str = "switch_puzzle";
pub const SYMBOL_PUZZLE_ID: &str = "symbol_puzzle";
pub const BOOK_CLUE_ID: &str = "book_clue";
pub const CODE_PANEL_ID: &str = "code_panel";
pub const VAULT_DOOR_ID: &str = "vault_door";

pub fn default_catalog() -> Result<PuzzleCatalog, CatalogError> {
    PuzzleCatalog::from_json_str(PUZZLES_JSON)
}

/// Build fresh runtime puzzles for the shipped room, in catalog order of
/// discovery: dial, switches, symbols, book, code panel.
pub fn default_puzzles(config: &SessionConfig) -> Result<Vec<AnyPuzzle>, CatalogError> {
    let catalog = default_catalog()?;
    let definition = |id: &str| catalog.get(id).cloned();

    Ok(vec![
        DialPuzzle::new(definition(DIAL_SAFE_ID)?, DEFAULT_RING_COUNT, config.dial_max_value).into(),
        SwitchPuzzle::new(definition(SWITCH_PUZZLE_ID)?, DEFAULT_SWITCH_COUNT).into(),
        SymbolPuzzle::new(definition(SYMBOL_PUZZLE_ID)?, DEFAULT_SYMBOL_COUNT).into(),
        BookCluePuzzle::new(definition(BOOK_CLUE_ID)?).into(),
        CodePanelPuzzle::new(definition(CODE_PANEL_ID)?, config.code_flag_duration()).into(),
    ])
}

/// The exit. Opens once the code panel is solved and completes the game.
pub fn vault_door() -> GatedInteractable {
    GatedInteractable::new(VAULT_DOOR_ID, GateSpec::open().requires_puzzle(CODE_PANEL_ID))
        .with_action(|session| {
            if session.progress_mut().complete_game() {
                info!("Vault door opened");
            }
        })
}
