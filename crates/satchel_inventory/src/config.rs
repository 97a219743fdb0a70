//! Inventory configuration

use serde::{Deserialize, Serialize};

/// An item placed in a slot when the inventory is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingItem {
    /// Catalog id of the item
    pub item: String,
    /// Quantity in the slot
    pub quantity: u32,
}

impl StartingItem {
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// Inventory configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Number of slots
    pub capacity: usize,
    /// Whether this is the player's own inventory
    pub is_player: bool,
    /// Slot contents, in slot order. Stacks are not merged.
    pub starting_items: Vec<StartingItem>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            capacity: 12,
            is_player: false,
            starting_items: Vec::new(),
        }
    }
}

impl InventoryConfig {
    /// Player inventory preset
    pub fn player(capacity: usize) -> Self {
        Self {
            capacity,
            is_player: true,
            ..Default::default()
        }
    }

    /// Set slot count
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Add a starting item
    pub fn with_item(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.starting_items.push(StartingItem::new(item, quantity));
        self
    }
}
