//! Item definitions and identities

use crate::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Item category.
///
/// Menus decide which actions to offer (use, equip) from this tag instead of
/// probing the item's concrete kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Potions, food, scrolls
    Consumable,
    /// Weapons and armor
    Equipment,
    /// Crafting materials
    Material,
    /// Quest items
    Quest,
    /// Misc items
    Misc,
}

impl Default for ItemCategory {
    fn default() -> Self {
        Self::Misc
    }
}

impl ItemCategory {
    pub fn is_consumable(&self) -> bool {
        matches!(self, Self::Consumable)
    }

    pub fn is_equipment(&self) -> bool {
        matches!(self, Self::Equipment)
    }
}

/// Item rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Default for Rarity {
    fn default() -> Self {
        Self::Common
    }
}

impl Rarity {
    /// Get color associated with rarity (RGB)
    pub fn color(&self) -> [f32; 3] {
        match self {
            Self::Common => [1.0, 1.0, 1.0],    // White
            Self::Uncommon => [0.0, 1.0, 0.0],  // Green
            Self::Rare => [0.0, 0.5, 1.0],      // Blue
            Self::Epic => [0.5, 0.0, 1.0],      // Purple
            Self::Legendary => [1.0, 0.5, 0.0], // Orange
        }
    }
}

/// Item definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Category
    #[serde(default)]
    pub category: ItemCategory,
    /// Rarity
    #[serde(default)]
    pub rarity: Rarity,
    /// Maximum stack size (1 = not stackable)
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
}

fn default_max_stack() -> u32 {
    1
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: ItemCategory::default(),
            rarity: Rarity::default(),
            max_stack: 1,
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set category
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Set rarity
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set max stack size
    pub fn with_max_stack(mut self, max: u32) -> Self {
        self.max_stack = max.max(1);
        self
    }

    /// Check if stackable
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }
}

/// Shared handle to an item definition.
///
/// Two handles are the same item only if they point at the same definition;
/// two separately registered definitions with identical fields are different items.
#[derive(Clone)]
pub struct Item(Arc<ItemDefinition>);

impl Item {
    pub fn new(definition: ItemDefinition) -> Self {
        Self(Arc::new(definition))
    }

    pub fn definition(&self) -> &ItemDefinition {
        &self.0
    }

    pub fn max_stack(&self) -> u32 {
        self.0.max_stack.max(1)
    }

    pub fn is_stackable(&self) -> bool {
        self.max_stack() > 1
    }
}

impl Deref for Item {
    type Target = ItemDefinition;

    fn deref(&self) -> &ItemDefinition {
        &self.0
    }
}

impl From<ItemDefinition> for Item {
    fn from(definition: ItemDefinition) -> Self {
        Self::new(definition)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({})", self.0.id)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

/// Registry of item identities by id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition and return its identity.
    /// Registering an existing id replaces it with a new, distinct identity.
    pub fn register(&mut self, definition: ItemDefinition) -> Item {
        let item = Item::new(definition);
        if self.items.insert(item.id.clone(), item.clone()).is_some() {
            log::debug!("Replaced item definition '{}'", item.id);
        }
        item
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Look up an item, failing for unknown ids
    pub fn resolve(&self, id: &str) -> Result<Item> {
        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| InventoryError::UnknownItem(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
