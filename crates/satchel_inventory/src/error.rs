//! Inventory errors

use crate::containers::InventoryId;
use thiserror::Error;

/// Contract violations raised by entries, inventories and the transfer session.
///
/// Business outcomes (a rejected move, a stack that hit its cap, a full
/// inventory) are never errors: they come back as remainders or notifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Unknown inventory: {0}")]
    UnknownInventory(InventoryId),

    #[error("Slot {index} out of range for inventory {inventory} (capacity {capacity})")]
    SlotOutOfRange {
        inventory: InventoryId,
        index: usize,
        capacity: usize,
    },

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Cannot split {requested} from a stack of {available}")]
    InvalidSplit { requested: u32, available: u32 },
}

/// Inventory result alias
pub type Result<T> = std::result::Result<T, InventoryError>;
