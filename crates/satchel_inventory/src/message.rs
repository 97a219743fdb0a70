//! Player-facing notification records

use crate::item::Item;
use satchel_event::EventChannel;
use std::fmt;

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryEvent {
    /// Items entered the player's inventory
    ItemAdded,
    /// Items left the player's inventory
    ItemRemoved,
    /// A move could not be made
    ItemMoveFailed,
}

/// A discrete notification emitted for transfers into or out of the player's inventory
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryMessage {
    pub event: InventoryEvent,
    pub item: Item,
    pub quantity: u32,
}

impl InventoryMessage {
    pub fn added(item: Item, quantity: u32) -> Self {
        Self {
            event: InventoryEvent::ItemAdded,
            item,
            quantity,
        }
    }

    pub fn removed(item: Item, quantity: u32) -> Self {
        Self {
            event: InventoryEvent::ItemRemoved,
            item,
            quantity,
        }
    }

    pub fn move_failed(item: Item, quantity: u32) -> Self {
        Self {
            event: InventoryEvent::ItemMoveFailed,
            item,
            quantity,
        }
    }
}

impl fmt::Display for InventoryMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event {
            InventoryEvent::ItemAdded => write!(f, "+{} {}", self.quantity, self.item),
            InventoryEvent::ItemRemoved => write!(f, "-{} {}", self.quantity, self.item),
            InventoryEvent::ItemMoveFailed => {
                write!(f, "[move failed] {} ({})", self.item, self.quantity)
            }
        }
    }
}

/// Receiver of notification records. Delivery is fire-and-forget.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: InventoryMessage);
}

impl NotificationSink for EventChannel<InventoryMessage> {
    fn notify(&self, message: InventoryMessage) {
        self.send(message);
    }
}

/// Sink that drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _message: InventoryMessage) {}
}
