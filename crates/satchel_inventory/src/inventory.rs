//! Fixed-capacity inventory

use crate::config::InventoryConfig;
use crate::entry::ItemEntry;
use crate::error::Result;
use crate::item::{Item, ItemCatalog};

/// A fixed array of item entries.
///
/// Capacity does not change after construction; [`Inventory::rebuild`]
/// replaces every slot instead of resizing in place.
#[derive(Debug)]
pub struct Inventory {
    entries: Vec<ItemEntry>,
    pub(crate) is_player: bool,
}

impl Inventory {
    /// Create an empty inventory with given capacity
    pub fn new(capacity: usize, is_player: bool) -> Self {
        Self {
            entries: (0..capacity).map(|_| ItemEntry::empty()).collect(),
            is_player,
        }
    }

    /// Create an inventory whose first slots hold `items`, in order.
    /// Stacks are taken as given and not merged.
    pub fn with_items(
        items: impl IntoIterator<Item = (Item, u32)>,
        capacity: usize,
        is_player: bool,
    ) -> Self {
        let mut inventory = Self::new(capacity, is_player);
        for (index, (item, quantity)) in items.into_iter().enumerate() {
            match inventory.entries.get_mut(index) {
                Some(entry) => entry.set_entry(&ItemEntry::new(item, quantity)),
                None => {
                    log::warn!(
                        "Dropped starting item {} x{}: inventory holds {} slots",
                        item.id,
                        quantity,
                        capacity
                    );
                }
            }
        }
        inventory
    }

    /// Build from config, resolving item ids through `catalog`
    pub fn from_config(config: &InventoryConfig, catalog: &ItemCatalog) -> Result<Self> {
        let items = config
            .starting_items
            .iter()
            .map(|start| Ok((catalog.resolve(&start.item)?, start.quantity)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::with_items(items, config.capacity, config.is_player))
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Whether this is the player's own inventory
    pub fn is_player(&self) -> bool {
        self.is_player
    }

    pub fn entry(&self, index: usize) -> Option<&ItemEntry> {
        self.entries.get(index)
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut ItemEntry> {
        self.entries.get_mut(index)
    }

    pub fn entries(&self) -> &[ItemEntry] {
        &self.entries
    }

    /// Slots by mutable reference, e.g. for subscribing views to each entry
    pub fn entries_mut(&mut self) -> &mut [ItemEntry] {
        &mut self.entries
    }

    /// Borrow two distinct slots mutably. None if they are the same slot or either is out of range.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut ItemEntry, &mut ItemEntry)> {
        if a == b || a.max(b) >= self.capacity() {
            return None;
        }

        if a < b {
            let (left, right) = self.entries.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.entries.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    /// Check if any slot holds `item`
    pub fn contains_item(&self, item: &Item) -> bool {
        self.entries.iter().any(|entry| entry.holds(item))
    }

    /// Total quantity of `item` across all slots
    pub fn count_item(&self, item: &Item) -> u32 {
        self.entries
            .iter()
            .filter(|entry| entry.holds(item))
            .map(ItemEntry::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Index of the first slot holding `item`
    pub fn find_item(&self, item: &Item) -> Option<usize> {
        self.entries.iter().position(|entry| entry.holds(item))
    }

    pub fn find_empty_slot(&self) -> Option<usize> {
        self.entries.iter().position(ItemEntry::is_empty)
    }

    pub fn used_slots(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_empty()).count()
    }

    pub fn free_slots(&self) -> usize {
        self.capacity() - self.used_slots()
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// Iterate occupied slots as (index, item, quantity)
    pub fn items(&self) -> impl Iterator<Item = (usize, &Item, u32)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.item().map(|item| (index, item, entry.quantity())))
    }

    /// Destroy every slot and recreate `capacity` empty ones.
    /// Existing entries and their subscriptions are dropped.
    pub fn rebuild(&mut self, capacity: usize) {
        self.entries = (0..capacity).map(|_| ItemEntry::empty()).collect();
    }

    /// Place up to `quantity` of `item`. Returns the remainder that did not fit.
    ///
    /// Existing stacks of the same item are topped up first, in slot order,
    /// then empty slots are filled in slot order.
    pub fn try_add_item(&mut self, item: &Item, quantity: u32) -> u32 {
        let mut remaining = quantity;
        if remaining == 0 {
            return 0;
        }

        if item.is_stackable() {
            for entry in self.entries.iter_mut().filter(|entry| entry.holds(item)) {
                remaining = entry.add_quantity(remaining);
                if remaining == 0 {
                    return 0;
                }
            }
        }

        for entry in self.entries.iter_mut().filter(|entry| entry.is_empty()) {
            let placed = remaining.min(item.max_stack());
            entry.set_entry(&ItemEntry::new(item.clone(), placed));
            remaining -= placed;
            if remaining == 0 {
                break;
            }
        }

        remaining
    }

    /// Place a copy of `entry`'s contents. The source entry is not changed;
    /// the caller removes the accepted portion.
    pub fn try_add_entry(&mut self, entry: &ItemEntry) -> u32 {
        match entry.item() {
            Some(item) => self.try_add_item(item, entry.quantity()),
            None => 0,
        }
    }

    /// Merge partial stacks of `item` into the earliest slots holding it
    pub fn combine_like_items(&mut self, item: &Item) {
        if !item.is_stackable() {
            return;
        }

        let capacity = self.capacity();
        for target in 0..capacity {
            if !self.entries[target].holds(item) {
                continue;
            }
            for source in target + 1..capacity {
                if self.entries[target].quantity() >= item.max_stack() {
                    break;
                }
                if !self.entries[source].holds(item) {
                    continue;
                }
                let (left, right) = self.entries.split_at_mut(source);
                right[0].transfer_all_to(&mut left[target]);
            }
        }
    }

    /// Move everything possible into `player`. Returns the total left behind.
    ///
    /// Does nothing for a player inventory.
    pub fn collect_all(&mut self, player: &mut Inventory) -> u32 {
        self.collect_all_with(player, |_, _| {})
    }

    /// [`Inventory::collect_all`], reporting each accepted (item, quantity)
    pub fn collect_all_with<F>(&mut self, player: &mut Inventory, mut on_accept: F) -> u32
    where
        F: FnMut(&Item, u32),
    {
        if self.is_player {
            return 0;
        }

        let mut leftover: u32 = 0;
        for entry in self.entries.iter_mut() {
            let Some((item, quantity)) = entry.contents() else {
                continue;
            };
            let remainder = player.try_add_item(&item, quantity);
            let accepted = quantity - remainder;
            if accepted > 0 {
                entry.remove_quantity(accepted);
                on_accept(&item, accepted);
            }
            leftover = leftover.saturating_add(remainder);
        }
        leftover
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::item::ItemDefinition;

    fn potion(max_stack: u32) -> Item {
        Item::new(ItemDefinition::new("potion", "Potion").with_max_stack(max_stack))
    }

    fn sword() -> Item {
        Item::new(ItemDefinition::new("sword", "Sword"))
    }

    fn quantities(inventory: &Inventory) -> Vec<u32> {
        inventory.entries().iter().map(ItemEntry::quantity).collect()
    }

    #[test]
    fn test_try_add_tops_up_then_fills() {
        let potion = potion(10);
        let mut inventory = Inventory::with_items([(potion.clone(), 5)], 3, true);

        let leftover = inventory.try_add_item(&potion, 8);

        assert_eq!(leftover, 0);
        assert_eq!(quantities(&inventory), vec![10, 3, 0]);
        assert_eq!(inventory.count_item(&potion), 13);
    }

    #[test]
    fn test_try_add_returns_remainder_when_full() {
        let potion = potion(10);
        let mut inventory =
            Inventory::with_items([(potion.clone(), 5), (sword(), 1), (sword(), 1)], 3, true);

        let leftover = inventory.try_add_item(&potion, 8);

        assert_eq!(leftover, 3);
        assert_eq!(quantities(&inventory), vec![10, 1, 1]);
        assert!(inventory.is_full());
    }

    #[test]
    fn test_try_add_prefers_existing_stack_over_earlier_empty() {
        let potion = potion(10);
        let mut inventory = Inventory::new(3, false);
        inventory
            .entry_mut(2)
            .unwrap()
            .set(Some(potion.clone()), 4)
            .unwrap();

        assert_eq!(inventory.try_add_item(&potion, 3), 0);
        assert_eq!(quantities(&inventory), vec![0, 0, 7]);
    }

    #[test]
    fn test_try_add_non_stackable_uses_one_slot_each() {
        let sword = sword();
        let mut inventory = Inventory::with_items([(sword.clone(), 1)], 4, false);

        assert_eq!(inventory.try_add_item(&sword, 2), 0);
        assert_eq!(quantities(&inventory), vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_try_add_entry_leaves_source() {
        let potion = potion(5);
        let source = ItemEntry::new(potion.clone(), 4);
        let mut inventory = Inventory::new(2, false);

        assert_eq!(inventory.try_add_entry(&source), 0);
        assert_eq!(source.quantity(), 4);
        assert_eq!(inventory.count_item(&potion), 4);
        assert_eq!(inventory.try_add_entry(&ItemEntry::empty()), 0);
    }

    #[test]
    fn test_combine_like_items() {
        let potion = potion(5);
        let sword = sword();
        let mut inventory = Inventory::with_items(
            [
                (potion.clone(), 2),
                (sword.clone(), 1),
                (potion.clone(), 4),
                (potion.clone(), 3),
            ],
            5,
            true,
        );

        inventory.combine_like_items(&potion);

        assert_eq!(quantities(&inventory), vec![5, 1, 4, 0, 0]);
        assert_eq!(inventory.count_item(&potion), 9);
        assert!(inventory.entry(1).unwrap().holds(&sword));
        assert!(inventory
            .entries()
            .iter()
            .all(|entry| entry.quantity() <= potion.max_stack()));
    }

    #[test]
    fn test_combine_ignores_non_stackable() {
        let sword = sword();
        let mut inventory = Inventory::with_items([(sword.clone(), 1), (sword.clone(), 1)], 2, true);

        inventory.combine_like_items(&sword);
        assert_eq!(quantities(&inventory), vec![1, 1]);
    }

    #[test]
    fn test_collect_all() {
        let potion = potion(5);
        let sword = sword();
        let mut chest =
            Inventory::with_items([(potion.clone(), 4), (sword.clone(), 1)], 2, false);
        let mut player = Inventory::with_items([(potion.clone(), 3)], 2, true);

        let mut accepted = Vec::new();
        let leftover = chest.collect_all_with(&mut player, |item, quantity| {
            accepted.push((item.clone(), quantity))
        });

        // Potions: 2 top up slot 0, 2 land in slot 1. No room for the sword.
        assert_eq!(leftover, 1);
        assert_eq!(quantities(&player), vec![5, 2]);
        assert!(chest.entry(0).unwrap().is_empty());
        assert!(chest.entry(1).unwrap().holds(&sword));
        assert_eq!(accepted, vec![(potion, 4)]);
    }

    #[test]
    fn test_collect_all_from_player_is_noop() {
        let potion = potion(5);
        let mut player = Inventory::with_items([(potion.clone(), 2)], 2, true);
        let mut other = Inventory::new(2, true);

        assert_eq!(player.collect_all(&mut other), 0);
        assert_eq!(player.count_item(&potion), 2);
        assert!(other.is_empty());
    }

    #[test]
    fn test_totals_saturate() {
        let sand = Item::new(ItemDefinition::new("sand", "Sand").with_max_stack(u32::MAX));
        let mut chest =
            Inventory::with_items([(sand.clone(), u32::MAX), (sand.clone(), u32::MAX)], 2, false);
        let mut player = Inventory::with_items([(sand.clone(), u32::MAX)], 1, true);

        assert_eq!(chest.count_item(&sand), u32::MAX);
        assert_eq!(chest.collect_all(&mut player), u32::MAX);
        assert_eq!(player.count_item(&sand), u32::MAX);
    }

    #[test]
    fn test_with_items_drops_overflow() {
        let sword = sword();
        let inventory = Inventory::with_items(
            [(sword.clone(), 1), (sword.clone(), 1), (sword.clone(), 1)],
            2,
            false,
        );

        assert_eq!(inventory.used_slots(), 2);
        assert_eq!(inventory.count_item(&sword), 2);
    }

    #[test]
    fn test_pair_mut() {
        let sword = sword();
        let mut inventory = Inventory::with_items([(sword.clone(), 1)], 3, false);

        let (a, b) = inventory.pair_mut(2, 0).unwrap();
        assert!(a.is_empty());
        assert!(b.holds(&sword));
        a.swap_with(b);
        assert!(inventory.entry(2).unwrap().holds(&sword));

        assert!(inventory.pair_mut(1, 1).is_none());
        assert!(inventory.pair_mut(0, 3).is_none());
    }

    #[test]
    fn test_rebuild() {
        let sword = sword();
        let mut inventory = Inventory::with_items([(sword.clone(), 1)], 2, true);

        inventory.rebuild(4);

        assert_eq!(inventory.capacity(), 4);
        assert!(inventory.is_empty());
        assert!(inventory.is_player());
        assert_eq!(inventory.free_slots(), 4);
    }

    #[test]
    fn test_from_config() {
        let mut catalog = ItemCatalog::new();
        let potion = catalog.register(ItemDefinition::new("potion", "Potion").with_max_stack(5));

        let config = InventoryConfig::default()
            .with_capacity(3)
            .with_item("potion", 3)
            .with_item("potion", 2);
        let inventory = Inventory::from_config(&config, &catalog).unwrap();

        assert_eq!(inventory.capacity(), 3);
        assert_eq!(quantities(&inventory), vec![3, 2, 0]);
        assert_eq!(inventory.find_item(&potion), Some(0));
        assert_eq!(inventory.find_empty_slot(), Some(2));

        let missing = InventoryConfig::default().with_item("elixir", 1);
        assert_eq!(
            Inventory::from_config(&missing, &catalog).unwrap_err(),
            InventoryError::UnknownItem("elixir".to_string())
        );
    }

    #[test]
    fn test_items_iterator() {
        let potion = potion(5);
        let mut inventory = Inventory::new(3, false);
        inventory.entry_mut(1).unwrap().set(Some(potion.clone()), 2).unwrap();

        let items: Vec<_> = inventory.items().map(|(i, item, q)| (i, item.clone(), q)).collect();
        assert_eq!(items, vec![(1, potion, 2)]);
    }
}
