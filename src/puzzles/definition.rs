//! Immutable puzzle configuration records and the catalog that holds them.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static configuration of one puzzle.
///
/// The meaning of `solution` depends on the puzzle kind: ring values for a
/// dial, 1/0 switch positions, symbol indices in press order. The code panel
/// ignores it and validates against the live code instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDefinition {
    pub puzzle_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub solution: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_digit_key: Option<String>,
    #[serde(default)]
    pub reward_digit_value: i32,
    /// Not read by any puzzle today; kept for gating that spans puzzles.
    #[serde(default)]
    pub required_puzzle_ids: Vec<String>,
}

impl PuzzleDefinition {
    pub fn new(puzzle_id: impl Into<String>) -> Self {
        Self {
            puzzle_id: puzzle_id.into(),
            display_name: None,
            solution: Vec::new(),
            reward_digit_key: None,
            reward_digit_value: 0,
            required_puzzle_ids: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_solution(mut self, solution: impl Into<Vec<i32>>) -> Self {
        self.solution = solution.into();
        self
    }

    pub fn with_reward(mut self, key: impl Into<String>, value: i32) -> Self {
        self.reward_digit_key = Some(key.into());
        self.reward_digit_value = value;
        self
    }

    pub fn requires(mut self, puzzle_id: impl Into<String>) -> Self {
        self.required_puzzle_ids.push(puzzle_id.into());
        self
    }

    /// Name for log lines, falling back to the id.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.puzzle_id)
    }

    /// The digit this puzzle reveals when solved. An empty key counts as no
    /// reward.
    pub fn reward(&self) -> Option<(&str, i32)> {
        self.reward_digit_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(|key| (key, self.reward_digit_value))
    }

    /// Whether `solution` has exactly the shape a puzzle with `elements`
    /// inputs can ever match.
    pub fn solution_fits(&self, elements: usize) -> bool {
        !self.solution.is_empty() && self.solution.len() == elements
    }
}

/// Already-resolved set of puzzle definitions keyed by id.
#[derive(Clone, Debug, Default)]
pub struct PuzzleCatalog {
    definitions: Vec<PuzzleDefinition>,
    index: BTreeMap<String, usize>,
}

impl PuzzleCatalog {
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = PuzzleDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for (position, definition) in definitions.into_iter().enumerate() {
            if definition.puzzle_id.is_empty() {
                return Err(CatalogError::EmptyPuzzleId { index: position });
            }
            if catalog.index.contains_key(&definition.puzzle_id) {
                return Err(CatalogError::DuplicatePuzzleId {
                    puzzle_id: definition.puzzle_id,
                });
            }
            catalog
                .index
                .insert(definition.puzzle_id.clone(), catalog.definitions.len());
            catalog.definitions.push(definition);
        }
        Ok(catalog)
    }

    /// Parse a JSON array of definitions.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<PuzzleDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    pub fn get(&self, puzzle_id: &str) -> Result<&PuzzleDefinition, CatalogError> {
        self.index
            .get(puzzle_id)
            .map(|&position| &self.definitions[position])
            .ok_or_else(|| CatalogError::UnknownPuzzle {
                puzzle_id: puzzle_id.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PuzzleDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_records_with_defaults() {
        let catalog = PuzzleCatalog::from_json_str(
            r#"[
                { "puzzleId": "dial_safe", "solution": [3, 7, 1],
                  "rewardDigitKey": "digit_0", "rewardDigitValue": 3 },
                { "puzzleId": "code_panel" }
            ]"#,
        )
        .unwrap();

        let dial = catalog.get("dial_safe").unwrap();
        assert_eq!(dial.solution, vec![3, 7, 1]);
        assert_eq!(dial.reward(), Some(("digit_0", 3)));

        let panel = catalog.get("code_panel").unwrap();
        assert!(panel.solution.is_empty());
        assert!(panel.reward().is_none());
        assert!(panel.required_puzzle_ids.is_empty());
    }

    #[test]
    fn empty_reward_key_means_no_reward() {
        let definition = PuzzleDefinition::new("code_panel").with_reward("", 0);
        assert!(definition.reward().is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = PuzzleCatalog::from_definitions([
            PuzzleDefinition::new("book_clue"),
            PuzzleDefinition::new("book_clue"),
        ])
        .unwrap_err();

        assert!(matches!(err, CatalogError::DuplicatePuzzleId { puzzle_id } if puzzle_id == "book_clue"));
    }

    #[test]
    fn empty_ids_are_rejected() {
        let err = PuzzleCatalog::from_definitions([PuzzleDefinition::new("")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyPuzzleId { index: 0 }));
    }

    #[test]
    fn unknown_lookup_is_an_error() {
        let catalog = PuzzleCatalog::default();
        assert!(matches!(
            catalog.get("missing"),
            Err(CatalogError::UnknownPuzzle { .. })
        ));
    }

    #[test]
    fn solution_fits_requires_exact_nonempty_length() {
        let definition = PuzzleDefinition::new("dial").with_solution([1, 2, 3]);
        assert!(definition.solution_fits(3));
        assert!(!definition.solution_fits(2));
        assert!(!PuzzleDefinition::new("dial").solution_fits(0));
    }

    #[test]
    fn label_prefers_display_name() {
        let definition = PuzzleDefinition::new("dial_safe");
        assert_eq!(definition.label(), "dial_safe");
        assert_eq!(definition.with_display_name("Dial Safe").label(), "Dial Safe");
    }
}
