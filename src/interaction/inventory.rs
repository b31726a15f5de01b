//! Items the player has picked up this session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeSet<String>,
}

impl Inventory {
    /// Add an item. Empty ids and items already held are ignored.
    pub fn add_item(&mut self, item_id: &str) -> bool {
        if item_id.is_empty() || !self.items.insert(item_id.to_string()) {
            return false;
        }
        debug!(item_id, "Item added to inventory");
        true
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.items.contains(item_id)
    }

    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let removed = self.items.remove(item_id);
        if removed {
            debug!(item_id, "Item removed from inventory");
        }
        removed
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
