//! Drag, drop and partial-carry state machine
//!
//! A [`TransferSession`] owns the player's "hand": a single [`ItemEntry`]
//! that holds whatever is being moved between slots. Pointer gestures
//! reported by the UI drive it through three states:
//!
//! - `Idle`: nothing held
//! - `Dragging`: holding a whole stack lifted from the return slot
//! - `PartialDragging`: holding part of a stack; the return slot keeps the rest
//!
//! Every gesture runs to completion before returning. Whatever the gesture,
//! held items end up either in a slot, in the hand, or reported as disposed.

use crate::containers::{Containers, InventoryId, SlotRef};
use crate::entry::{EntryEvent, ItemEntry};
use crate::error::{InventoryError, Result};
use crate::gate::ConfirmationGate;
use crate::item::Item;
use crate::message::{InventoryMessage, NotificationSink};
use satchel_event::Signal;
use std::fmt;
use std::sync::Arc;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Dragging,
    PartialDragging,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Session events
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Dragging started (true) or ended (false)
    DraggingChanged(bool),
    /// Held items were thrown away
    Disposed { item: Item, quantity: u32 },
}

/// What a click on an occupied or empty slot resolves to while dragging
enum ClickAction {
    Transfer,
    Swap { item: Item, quantity: u32 },
    PickUp,
    Ignore,
}

/// The player's hand and the gestures that move items in and out of it
pub struct TransferSession {
    containers: Containers,
    gate: ConfirmationGate,
    sink: Arc<dyn NotificationSink>,
    held: ItemEntry,
    return_slot: Option<SlotRef>,
    is_partial: bool,
    is_dragging: bool,
    pointer: [f32; 2],
    events: Signal<SessionEvent>,
}

impl TransferSession {
    pub fn new(
        containers: Containers,
        gate: ConfirmationGate,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            containers,
            gate,
            sink,
            held: ItemEntry::empty(),
            return_slot: None,
            is_partial: false,
            is_dragging: false,
            pointer: [0.0, 0.0],
            events: Signal::new(),
        }
    }

    pub fn containers(&self) -> &Containers {
        &self.containers
    }

    pub fn containers_mut(&mut self) -> &mut Containers {
        &mut self.containers
    }

    pub fn state(&self) -> SessionState {
        match (self.is_dragging, self.is_partial) {
            (false, _) => SessionState::Idle,
            (true, false) => SessionState::Dragging,
            (true, true) => SessionState::PartialDragging,
        }
    }

    /// Entry currently in hand
    pub fn held(&self) -> &ItemEntry {
        &self.held
    }

    /// Signal of the entry in hand, for cursor views
    pub fn held_events_mut(&mut self) -> &mut Signal<EntryEvent> {
        self.held.events_mut()
    }

    /// Where held items go back to if the drag is cancelled
    pub fn return_slot(&self) -> Option<SlotRef> {
        self.return_slot
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn pointer(&self) -> [f32; 2] {
        self.pointer
    }

    pub fn events(&self) -> &Signal<SessionEvent> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Signal<SessionEvent> {
        &mut self.events
    }

    /// Pick up the whole stack in `slot`.
    ///
    /// While already dragging this acts as [`TransferSession::click`].
    pub fn pick_up(&mut self, slot: SlotRef) -> Result<()> {
        if self.is_dragging {
            return self.click(slot);
        }
        if self.containers.slot(slot)?.is_empty() {
            return Ok(());
        }
        self.start_dragging(slot)
    }

    /// Pick up `quantity` from `slot`, leaving the rest behind.
    ///
    /// Splitting the whole stack is a plain pick-up. Ignored while dragging.
    pub fn split(&mut self, slot: SlotRef, quantity: u32) -> Result<()> {
        if self.is_dragging {
            log::debug!("Ignored split on {:?} while dragging", slot);
            return Ok(());
        }

        let available = self.containers.slot(slot)?.quantity();
        if quantity == 0 || quantity > available {
            return Err(InventoryError::InvalidSplit {
                requested: quantity,
                available,
            });
        }
        if quantity == available {
            return self.start_dragging(slot);
        }

        let entry = self.containers.slot_mut(slot)?;
        entry.transfer_to(&mut self.held, quantity);
        self.return_slot = Some(slot);
        self.is_partial = true;
        self.set_dragging(true);
        Ok(())
    }

    /// Click on `slot`.
    ///
    /// Idle: picks up a non-empty slot. Dragging: moves the hand into an
    /// empty or stackable slot, swaps with a different item, or (when only
    /// part of a stack is held) puts the part back and picks up `slot` instead.
    pub fn click(&mut self, slot: SlotRef) -> Result<()> {
        if !self.is_dragging {
            if self.containers.slot(slot)?.is_empty() {
                return Ok(());
            }
            return self.start_dragging(slot);
        }

        let Some((item, quantity)) = self.held.contents() else {
            self.stop_dragging();
            return Ok(());
        };

        let action = {
            let target = self.containers.slot(slot)?;
            if self.held.can_transfer_to(target) {
                ClickAction::Transfer
            } else if target.holds(&item) {
                ClickAction::Ignore
            } else if self.is_partial {
                ClickAction::PickUp
            } else {
                match target.contents() {
                    Some((item, quantity)) => ClickAction::Swap { item, quantity },
                    None => ClickAction::Ignore,
                }
            }
        };

        match action {
            ClickAction::Transfer => {
                let target = self.containers.slot_mut(slot)?;
                let leftover = self.held.transfer_all_to(target);
                if let Some(start) = self.return_slot {
                    self.report_move(start.inventory, slot.inventory, &item, quantity - leftover);
                }
                if self.held.is_empty() {
                    self.stop_dragging();
                }
            }
            ClickAction::Swap {
                item: target_item,
                quantity: target_quantity,
            } => {
                let target = self.containers.slot_mut(slot)?;
                self.held.swap_with(target);
                if let Some(start) = self.return_slot {
                    self.report_move(start.inventory, slot.inventory, &item, quantity);
                    self.report_move(slot.inventory, start.inventory, &target_item, target_quantity);
                }
            }
            ClickAction::PickUp => self.start_dragging(slot)?,
            ClickAction::Ignore => {}
        }
        Ok(())
    }

    /// Release the hand over `slot` (or over empty space).
    ///
    /// Applies the click rules, then returns whatever is still held to the
    /// return slot and ends the drag.
    pub fn drop_on(&mut self, slot: Option<SlotRef>) -> Result<()> {
        if !self.is_dragging {
            return Ok(());
        }

        let result = match slot {
            Some(slot) => self.click(slot),
            None => Ok(()),
        };
        self.return_items_to_start();
        self.stop_dragging();
        result
    }

    /// Quick-move a whole slot to the player's inventory, or out of it into
    /// the other open inventory. Ignored while dragging.
    pub fn shift_click(&mut self, slot: SlotRef) -> Result<()> {
        if self.is_dragging {
            return Ok(());
        }
        let Some((item, quantity)) = self.containers.slot(slot)?.contents() else {
            return Ok(());
        };

        let source = slot.inventory;
        let player = self.containers.player();
        let target = if source != player {
            Some(player)
        } else {
            self.containers.other_open(source)
        };
        let Some(target) = target else {
            log::debug!("No open inventory to quick-move {} into", item.id);
            self.sink.notify(InventoryMessage::move_failed(item, quantity));
            return Ok(());
        };

        let (from, to) = self.containers.pair_mut(source, target)?;
        let leftover = to.try_add_item(&item, quantity);
        let accepted = quantity - leftover;
        if let Some(entry) = from.entry_mut(slot.index) {
            entry.remove_quantity(accepted);
        }
        if leftover > 0 {
            log::debug!("Quick-move left {} x{} in place", item.id, leftover);
        }
        self.report_move(source, target, &item, accepted);
        Ok(())
    }

    /// Merge partial stacks of the slot's item across the player's inventory.
    ///
    /// Only applies to player slots while idle.
    pub fn double_click(&mut self, slot: SlotRef) -> Result<()> {
        if self.is_dragging || !self.containers.is_player(slot.inventory) {
            return Ok(());
        }
        let Some(item) = self.containers.slot(slot)?.item().cloned() else {
            return Ok(());
        };
        self.containers
            .inventory_mut(slot.inventory)?
            .combine_like_items(&item);
        Ok(())
    }

    /// Throw away whatever is held and go idle. Returns what was discarded.
    pub fn discard_held(&mut self) -> Option<(Item, u32)> {
        let contents = self.held.contents();
        if let Some((item, quantity)) = &contents {
            log::debug!("Discarded {} x{}", item.id, quantity);
            self.events.emit(&SessionEvent::Disposed {
                item: item.clone(),
                quantity: *quantity,
            });
        }
        self.held.clear();
        self.stop_dragging();
        contents
    }

    /// Open an inventory. Opening a non-player inventory closes the other
    /// open non-player inventories first.
    ///
    /// Returns false if nothing changed or a blocking dialog is active.
    pub fn open(&mut self, id: InventoryId) -> Result<bool> {
        if self.gate.is_active() {
            log::debug!("Ignored open of {} while a dialog is active", id);
            return Ok(false);
        }
        self.containers.inventory(id)?;
        if self.containers.is_open(id) {
            return Ok(false);
        }

        if !self.containers.is_player(id) {
            let others: Vec<InventoryId> = self
                .containers
                .open_ids()
                .iter()
                .copied()
                .filter(|other| *other != id && !self.containers.is_player(*other))
                .collect();
            for other in others.into_iter().rev() {
                self.close(other)?;
            }
        }

        Ok(self.containers.mark_open(id))
    }

    /// Close an inventory. A drag that started in it is cancelled and the
    /// held items go back before the inventory closes.
    ///
    /// Returns false if nothing changed or a blocking dialog is active.
    pub fn close(&mut self, id: InventoryId) -> Result<bool> {
        if self.gate.is_active() {
            log::debug!("Ignored close of {} while a dialog is active", id);
            return Ok(false);
        }
        self.containers.inventory(id)?;
        if !self.containers.is_open(id) {
            return Ok(false);
        }

        if self.is_dragging && self.return_slot.map(|slot| slot.inventory) == Some(id) {
            self.return_items_to_start();
            self.stop_dragging();
        }

        Ok(self.containers.mark_closed(id))
    }

    pub fn toggle(&mut self, id: InventoryId) -> Result<bool> {
        if self.containers.is_open(id) {
            self.close(id)
        } else {
            self.open(id)
        }
    }

    /// Move everything possible from `id` into the player's inventory.
    /// Returns the total left behind.
    pub fn collect_all(&mut self, id: InventoryId) -> Result<u32> {
        let player = self.containers.player();
        if id == player {
            self.containers.inventory(id)?;
            return Ok(0);
        }

        let (source, target) = self.containers.pair_mut(id, player)?;
        let mut accepted = Vec::new();
        let leftover = source.collect_all_with(target, |item, quantity| {
            accepted.push((item.clone(), quantity));
        });
        for (item, quantity) in accepted {
            self.report_move(id, player, &item, quantity);
        }
        Ok(leftover)
    }

    /// Track the pointer while dragging.
    ///
    /// Returns false when not dragging or a blocking dialog is active.
    pub fn drag_tick(&mut self, pointer: [f32; 2]) -> bool {
        if !self.is_dragging || self.gate.is_active() {
            return false;
        }
        self.pointer = pointer;
        true
    }

    fn start_dragging(&mut self, slot: SlotRef) -> Result<()> {
        self.containers.slot(slot)?;
        if self.is_partial {
            self.return_items_to_start();
        }

        let entry = self.containers.slot_mut(slot)?;
        self.held.swap_with(entry);
        self.return_slot = Some(slot);
        self.is_partial = false;
        self.set_dragging(true);
        Ok(())
    }

    fn stop_dragging(&mut self) {
        self.return_slot = None;
        self.is_partial = false;
        self.set_dragging(false);
    }

    fn set_dragging(&mut self, dragging: bool) {
        if self.is_dragging == dragging {
            return;
        }
        self.is_dragging = dragging;
        log::debug!("Transfer session {:?}", self.state());
        self.events.emit(&SessionEvent::DraggingChanged(dragging));
    }

    /// Put the hand back into the return slot.
    ///
    /// Anything the slot cannot take goes to the owning inventory, then to
    /// the player's. What still does not fit is disposed.
    fn return_items_to_start(&mut self) {
        let start = self.return_slot.take();
        let Some((item, quantity)) = self.held.contents() else {
            return;
        };

        if let Some(slot) = start {
            if let Ok(entry) = self.containers.slot_mut(slot) {
                let blocked = !entry.is_empty() && !entry.holds(&item);
                self.held.transfer_all_to(entry);
                if blocked {
                    self.sink.notify(InventoryMessage::move_failed(item.clone(), quantity));
                }
            }
        }

        let mut remaining = self.held.quantity();
        if remaining == 0 {
            return;
        }

        let player = self.containers.player();
        let mut fallbacks = Vec::with_capacity(2);
        if let Some(slot) = start {
            fallbacks.push(slot.inventory);
        }
        if !fallbacks.contains(&player) {
            fallbacks.push(player);
        }

        for id in fallbacks {
            let Some(inventory) = self.containers.get_mut(id) else {
                continue;
            };
            let leftover = inventory.try_add_item(&item, remaining);
            let accepted = remaining - leftover;
            if accepted > 0 {
                self.held.remove_quantity(accepted);
                if let Some(slot) = start {
                    self.report_move(slot.inventory, id, &item, accepted);
                }
            }
            remaining = leftover;
            if remaining == 0 {
                return;
            }
        }

        log::warn!("No room to return {} x{}, disposing", item.id, remaining);
        self.held.clear();
        if start.is_some_and(|slot| self.containers.is_player(slot.inventory)) {
            self.sink.notify(InventoryMessage::removed(item.clone(), remaining));
        }
        self.events.emit(&SessionEvent::Disposed {
            item,
            quantity: remaining,
        });
    }

    /// Notify the sink of a move between inventories, from the player's point of view
    fn report_move(&self, from: InventoryId, to: InventoryId, item: &Item, quantity: u32) {
        if from == to || quantity == 0 {
            return;
        }
        if self.containers.is_player(from) {
            self.sink.notify(InventoryMessage::removed(item.clone(), quantity));
        }
        if self.containers.is_player(to) {
            self.sink.notify(InventoryMessage::added(item.clone(), quantity));
        }
    }
}

impl fmt::Debug for TransferSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferSession")
            .field("state", &self.state())
            .field("held", &self.held)
            .field("return_slot", &self.return_slot)
            .field("containers", &self.containers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use crate::item::ItemDefinition;
    use crate::message::NullSink;
    use satchel_event::Recorder;

    fn potion() -> Item {
        Item::new(ItemDefinition::new("potion", "Potion").with_max_stack(5))
    }

    fn session(player: Inventory) -> TransferSession {
        TransferSession::new(
            Containers::new(player),
            ConfirmationGate::new(),
            Arc::new(NullSink),
        )
    }

    #[test]
    fn test_idle_by_default() {
        let session = session(Inventory::new(2, true));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.held().is_empty());
        assert!(session.return_slot().is_none());
    }

    #[test]
    fn test_pick_up_empty_slot_is_noop() {
        let mut session = session(Inventory::new(2, true));
        let slot = SlotRef::new(session.containers().player(), 0);

        session.pick_up(slot).unwrap();
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_split_validation() {
        let potion = potion();
        let mut session = session(Inventory::with_items([(potion, 4)], 2, true));
        let slot = SlotRef::new(session.containers().player(), 0);

        assert_eq!(
            session.split(slot, 0).unwrap_err(),
            InventoryError::InvalidSplit {
                requested: 0,
                available: 4
            }
        );
        assert!(matches!(
            session.split(slot, 5),
            Err(InventoryError::InvalidSplit { requested: 5, .. })
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_split_whole_stack_is_pick_up() {
        let potion = potion();
        let mut session = session(Inventory::with_items([(potion.clone(), 4)], 2, true));
        let slot = SlotRef::new(session.containers().player(), 0);

        session.split(slot, 4).unwrap();

        assert_eq!(session.state(), SessionState::Dragging);
        assert!(session.held().holds(&potion));
        assert!(session.containers().slot(slot).unwrap().is_empty());
    }

    #[test]
    fn test_dragging_events() {
        let potion = potion();
        let mut session = session(Inventory::with_items([(potion, 4)], 2, true));
        let events: Recorder<SessionEvent> = Recorder::new();
        session.events_mut().subscribe(events.listener());
        let player = session.containers().player();

        session.pick_up(SlotRef::new(player, 0)).unwrap();
        session.click(SlotRef::new(player, 1)).unwrap();

        assert_eq!(
            events.snapshot(),
            vec![
                SessionEvent::DraggingChanged(true),
                SessionEvent::DraggingChanged(false)
            ]
        );
    }

    #[test]
    fn test_click_same_non_stackable_is_ignored() {
        let sword = Item::new(ItemDefinition::new("sword", "Sword"));
        let mut session = session(Inventory::with_items(
            [(sword.clone(), 1), (sword.clone(), 1)],
            2,
            true,
        ));
        let player = session.containers().player();

        session.pick_up(SlotRef::new(player, 0)).unwrap();
        session.click(SlotRef::new(player, 1)).unwrap();

        assert_eq!(session.state(), SessionState::Dragging);
        assert!(session.held().holds(&sword));
        assert_eq!(session.containers().slot(SlotRef::new(player, 1)).unwrap().quantity(), 1);
    }

    #[test]
    fn test_unknown_slot_is_error() {
        let mut session = session(Inventory::new(2, true));
        let player = session.containers().player();

        assert!(matches!(
            session.pick_up(SlotRef::new(player, 7)),
            Err(InventoryError::SlotOutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn test_drag_tick() {
        let potion = potion();
        let mut session = session(Inventory::with_items([(potion, 1)], 1, true));
        let player = session.containers().player();

        assert!(!session.drag_tick([1.0, 2.0]));

        session.pick_up(SlotRef::new(player, 0)).unwrap();
        assert!(session.drag_tick([3.0, 4.0]));
        assert_eq!(session.pointer(), [3.0, 4.0]);
    }
}
