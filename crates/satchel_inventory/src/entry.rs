//! Item entries and the pairwise transfer protocol
//!
//! An [`ItemEntry`] is one (item, quantity) pair. Every movement of items,
//! whether stacking, splitting, swapping or bulk collection, is built from
//! [`ItemEntry::transfer_to`] and [`ItemEntry::swap_with`].

use crate::error::{InventoryError, Result};
use crate::item::Item;
use satchel_event::Signal;
use std::fmt;

/// Events emitted by an entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryEvent {
    /// The held item changed (None = entry emptied)
    ItemChanged(Option<Item>),
    /// The quantity changed
    QuantityChanged(u32),
    /// A transfer from this entry was rejected because the target holds a different item
    MoveFailed { item: Item, quantity: u32 },
}

/// One slot's worth of items.
///
/// `quantity == 0` exactly when `item` is `None`. Fields are only written
/// through the methods below, each of which keeps that invariant and fires
/// the entry's own signal for every actual change.
#[derive(Debug, Default)]
pub struct ItemEntry {
    item: Option<Item>,
    quantity: u32,
    events: Signal<EntryEvent>,
}

impl ItemEntry {
    /// Create an empty entry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an entry holding `quantity` of `item` (0 = empty)
    pub fn new(item: Item, quantity: u32) -> Self {
        let item = if quantity == 0 { None } else { Some(item) };
        Self {
            item,
            quantity,
            events: Signal::new(),
        }
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Whether this entry holds `item`
    pub fn holds(&self, item: &Item) -> bool {
        self.item.as_ref() == Some(item)
    }

    /// Item and quantity, if occupied
    pub fn contents(&self) -> Option<(Item, u32)> {
        self.item.clone().map(|item| (item, self.quantity))
    }

    /// Signal fired on every change to this entry
    pub fn events(&self) -> &Signal<EntryEvent> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Signal<EntryEvent> {
        &mut self.events
    }

    /// True if `target` is empty or holds this entry's item and that item stacks
    pub fn can_transfer_to(&self, target: &ItemEntry) -> bool {
        match &target.item {
            None => true,
            Some(held) => self.item.as_ref() == Some(held) && held.is_stackable(),
        }
    }

    /// Overwrite this entry.
    ///
    /// A quantity of 0 empties the entry. Asking an empty item to carry a
    /// quantity is rejected.
    pub fn set(&mut self, item: Option<Item>, quantity: u32) -> Result<()> {
        if item.is_none() && quantity > 0 {
            return Err(InventoryError::InvalidArgument(
                "an entry without an item cannot hold a quantity",
            ));
        }
        self.write(item, quantity);
        Ok(())
    }

    /// Overwrite this entry with a copy of another's contents
    pub fn set_entry(&mut self, other: &ItemEntry) {
        self.write(other.item.clone(), other.quantity);
    }

    /// Empty this entry
    pub fn clear(&mut self) {
        self.write(None, 0);
    }

    /// Exchange contents with another entry. Stack limits are not checked:
    /// each side keeps the quantity it already had.
    pub fn swap_with(&mut self, other: &mut ItemEntry) {
        let mine = (self.item.clone(), self.quantity);
        let theirs = (other.item.clone(), other.quantity);

        self.write(theirs.0, theirs.1);
        other.write(mine.0, mine.1);
    }

    /// Move this entry's whole quantity to `target`. Returns the leftover.
    pub fn transfer_all_to(&mut self, target: &mut ItemEntry) -> u32 {
        self.transfer_to(target, self.quantity)
    }

    /// Move up to `quantity` to `target`. Returns the leftover that stayed here.
    ///
    /// - Empty target: everything requested moves.
    /// - Same item: stacks up to the item's max stack; the rest is leftover.
    /// - Different item: nothing moves, [`EntryEvent::MoveFailed`] fires and the
    ///   whole request is leftover.
    ///
    /// Requests larger than this entry's quantity are capped at what it holds.
    pub fn transfer_to(&mut self, target: &mut ItemEntry, quantity: u32) -> u32 {
        let quantity = quantity.min(self.quantity);
        let Some(item) = self.item.clone() else {
            return 0;
        };
        if quantity == 0 {
            return 0;
        }

        match target.item.clone() {
            None => {
                target.write(Some(item), quantity);
                self.remove_quantity(quantity);
                0
            }
            Some(held) if held == item => {
                let remainder = target.add_quantity(quantity);
                self.remove_quantity(quantity - remainder);
                remainder
            }
            Some(held) => {
                log::debug!(
                    "Rejected move of {} x{} onto {}",
                    item.id,
                    quantity,
                    held.id
                );
                self.events
                    .emit(&EntryEvent::MoveFailed { item, quantity });
                quantity
            }
        }
    }

    /// Add to the stack, capped at the item's max stack.
    ///
    /// Returns the remainder that did not fit; non-zero means the stack is full.
    pub fn add_quantity(&mut self, quantity: u32) -> u32 {
        let Some(item) = &self.item else {
            return quantity;
        };
        let space = item.max_stack().saturating_sub(self.quantity);
        let to_add = quantity.min(space);
        self.write_quantity(self.quantity + to_add);
        quantity - to_add
    }

    /// Remove from the stack.
    ///
    /// Returns the remainder that could not be removed; non-zero means the
    /// stack ran out first. Reaching zero empties the entry.
    pub fn remove_quantity(&mut self, quantity: u32) -> u32 {
        let to_remove = quantity.min(self.quantity);
        self.write_quantity(self.quantity - to_remove);
        quantity - to_remove
    }

    fn write(&mut self, item: Option<Item>, quantity: u32) {
        if quantity == 0 {
            self.write_quantity(0);
            self.write_item(None);
        } else {
            self.write_item(item);
            self.write_quantity(quantity);
        }
    }

    fn write_item(&mut self, item: Option<Item>) {
        if self.item != item {
            self.item = item;
            self.events.emit(&EntryEvent::ItemChanged(self.item.clone()));
        }
    }

    fn write_quantity(&mut self, quantity: u32) {
        if self.quantity == quantity {
            return;
        }
        self.quantity = quantity;
        self.events.emit(&EntryEvent::QuantityChanged(quantity));
        if quantity == 0 {
            self.write_item(None);
        }
    }
}

/// Clones copy contents only; listeners stay with the original
impl Clone for ItemEntry {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            quantity: self.quantity,
            events: Signal::new(),
        }
    }
}

impl PartialEq for ItemEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item && self.quantity == other.quantity
    }
}

impl fmt::Display for ItemEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Some(item) => write!(f, "{} x{}", item, self.quantity),
            None => write!(f, "(empty)"),
        }
    }
}
