//! Registry of inventories and which ones are open

use crate::entry::ItemEntry;
use crate::error::{InventoryError, Result};
use crate::inventory::Inventory;
use satchel_event::Signal;
use std::fmt;

/// Handle to an inventory owned by [`Containers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InventoryId(u32);

impl InventoryId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One slot in one inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub inventory: InventoryId,
    pub index: usize,
}

impl SlotRef {
    pub fn new(inventory: InventoryId, index: usize) -> Self {
        Self { inventory, index }
    }
}

/// Container visibility changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEvent {
    Opened(InventoryId),
    Closed(InventoryId),
}

/// Owns every inventory the session can reach, including the player's.
///
/// Open state is tracked in opening order so "the other open inventory"
/// is deterministic.
#[derive(Debug)]
pub struct Containers {
    inventories: Vec<Inventory>,
    player: InventoryId,
    open: Vec<InventoryId>,
    events: Signal<ContainerEvent>,
}

impl Containers {
    /// Create a registry around the player's inventory
    pub fn new(mut player: Inventory) -> Self {
        player.is_player = true;
        Self {
            inventories: vec![player],
            player: InventoryId(0),
            open: Vec::new(),
            events: Signal::new(),
        }
    }

    /// Register another inventory. It is never treated as the player's.
    pub fn insert(&mut self, mut inventory: Inventory) -> InventoryId {
        inventory.is_player = false;
        let id = InventoryId(self.inventories.len() as u32);
        self.inventories.push(inventory);
        id
    }

    pub fn player(&self) -> InventoryId {
        self.player
    }

    pub fn is_player(&self, id: InventoryId) -> bool {
        id == self.player
    }

    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }

    pub fn get(&self, id: InventoryId) -> Option<&Inventory> {
        self.inventories.get(id.index())
    }

    pub fn get_mut(&mut self, id: InventoryId) -> Option<&mut Inventory> {
        self.inventories.get_mut(id.index())
    }

    pub fn inventory(&self, id: InventoryId) -> Result<&Inventory> {
        self.get(id).ok_or(InventoryError::UnknownInventory(id))
    }

    pub fn inventory_mut(&mut self, id: InventoryId) -> Result<&mut Inventory> {
        self.get_mut(id).ok_or(InventoryError::UnknownInventory(id))
    }

    pub fn slot(&self, slot: SlotRef) -> Result<&ItemEntry> {
        let inventory = self.inventory(slot.inventory)?;
        inventory
            .entry(slot.index)
            .ok_or(InventoryError::SlotOutOfRange {
                inventory: slot.inventory,
                index: slot.index,
                capacity: inventory.capacity(),
            })
    }

    pub fn slot_mut(&mut self, slot: SlotRef) -> Result<&mut ItemEntry> {
        let inventory = self.inventory_mut(slot.inventory)?;
        let capacity = inventory.capacity();
        inventory
            .entry_mut(slot.index)
            .ok_or(InventoryError::SlotOutOfRange {
                inventory: slot.inventory,
                index: slot.index,
                capacity,
            })
    }

    /// Inventory that owns `slot`, after checking the slot exists
    pub fn owner_of(&self, slot: SlotRef) -> Result<InventoryId> {
        self.slot(slot)?;
        Ok(slot.inventory)
    }

    /// Borrow two distinct inventories mutably
    pub fn pair_mut(
        &mut self,
        a: InventoryId,
        b: InventoryId,
    ) -> Result<(&mut Inventory, &mut Inventory)> {
        if a == b {
            return Err(InventoryError::InvalidArgument(
                "cannot borrow the same inventory twice",
            ));
        }
        self.inventory(a)?;
        self.inventory(b)?;

        let (a, b) = (a.index(), b.index());
        if a < b {
            let (left, right) = self.inventories.split_at_mut(b);
            Ok((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.inventories.split_at_mut(a);
            Ok((&mut right[0], &mut left[b]))
        }
    }

    pub fn is_open(&self, id: InventoryId) -> bool {
        self.open.contains(&id)
    }

    /// Open inventories in opening order
    pub fn open_ids(&self) -> &[InventoryId] {
        &self.open
    }

    /// First open inventory, in opening order, other than `excluding`
    pub fn other_open(&self, excluding: InventoryId) -> Option<InventoryId> {
        self.open.iter().copied().find(|id| *id != excluding)
    }

    pub fn events(&self) -> &Signal<ContainerEvent> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Signal<ContainerEvent> {
        &mut self.events
    }

    /// Returns false if already open
    pub(crate) fn mark_open(&mut self, id: InventoryId) -> bool {
        if self.is_open(id) {
            return false;
        }
        self.open.push(id);
        self.events.emit(&ContainerEvent::Opened(id));
        true
    }

    /// Returns false if not open
    pub(crate) fn mark_closed(&mut self, id: InventoryId) -> bool {
        let before = self.open.len();
        self.open.retain(|open| *open != id);
        if self.open.len() == before {
            return false;
        }
        self.events.emit(&ContainerEvent::Closed(id));
        true
    }
}
