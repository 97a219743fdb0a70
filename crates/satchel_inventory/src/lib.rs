//! Satchel Inventory - Item Entries, Inventories and Transfers
//!
//! This crate moves stacked items between fixed-capacity inventories and
//! the player's hand.
//!
//! # Features
//!
//! - Item identities shared by handle, with max stack sizes
//! - Pairwise entry transfers with stacking, remainders and swaps
//! - Inventories with ordered bulk add, combine and collect-all
//! - A drag/drop/split session with cancel-on-close
//! - Player-facing added/removed/move-failed notifications
//! - Per-entry signals for slot views
//!
//! # Example
//!
//! ```ignore
//! use satchel_inventory::prelude::*;
//! use std::sync::Arc;
//!
//! let mut catalog = ItemCatalog::new();
//! let potion = catalog.register(
//!     ItemDefinition::new("potion", "Potion")
//!         .with_category(ItemCategory::Consumable)
//!         .with_max_stack(5),
//! );
//!
//! let mut containers = Containers::new(Inventory::new(20, true));
//! let chest = containers.insert(Inventory::with_items([(potion, 3)], 8, false));
//!
//! let notifications = Arc::new(EventChannel::new());
//! let mut session = TransferSession::new(containers, ConfirmationGate::new(), notifications.clone());
//! session.open(chest)?;
//! session.shift_click(SlotRef::new(chest, 0))?;
//! ```

pub mod config;
pub mod containers;
pub mod entry;
pub mod error;
pub mod gate;
pub mod inventory;
pub mod item;
pub mod message;
pub mod session;

pub mod prelude {
    pub use crate::config::{InventoryConfig, StartingItem};
    pub use crate::containers::{ContainerEvent, Containers, InventoryId, SlotRef};
    pub use crate::entry::{EntryEvent, ItemEntry};
    pub use crate::error::{InventoryError, Result};
    pub use crate::gate::ConfirmationGate;
    pub use crate::inventory::Inventory;
    pub use crate::item::{Item, ItemCatalog, ItemCategory, ItemDefinition, Rarity};
    pub use crate::message::{InventoryEvent, InventoryMessage, NotificationSink, NullSink};
    pub use crate::session::{SessionEvent, SessionState, TransferSession};
    pub use satchel_event::{EventChannel, Recorder, Signal, SubscriberId};
}

pub use prelude::*;
