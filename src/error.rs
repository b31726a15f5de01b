//! Errors for the configuration-time surface.
//!
//! Gameplay operations never fail; only loading puzzle definitions and
//! session configuration can.

use thiserror::Error;

/// Errors raised while loading or querying a puzzle catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse puzzle catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Puzzle definition at index {index} has an empty puzzle id")]
    EmptyPuzzleId { index: usize },

    #[error("Duplicate puzzle id '{puzzle_id}' in catalog")]
    DuplicatePuzzleId { puzzle_id: String },

    #[error("Unknown puzzle id '{puzzle_id}'")]
    UnknownPuzzle { puzzle_id: String },
}

/// Errors raised while loading session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse session config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
