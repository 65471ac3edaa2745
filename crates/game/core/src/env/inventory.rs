use crate::error::{ErrorSeverity, GameError};
use crate::item::{CarryItem, EquipItem, EquipSlot, ItemId, PotionItem, ScrollItem};

/// Per-category item counts; equipped items count as equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeCount {
    pub equip: u32,
    pub potion: u32,
    pub scroll: u32,
}

/// Write side of an actor's inventory, as used by lifecycle provisioning.
///
/// No ordering is assumed beyond "the item is present after it was added".
pub trait Inventory {
    fn add_to_bag(&mut self, item: CarryItem);

    fn add_to_wallet(&mut self, amount: f64);

    fn wallet_value(&self) -> f64;

    fn type_count(&self) -> TypeCount;
}

/// Read side of an inventory, used to build decision snapshots.
pub trait InventoryView {
    /// Worn items.
    fn equipped(&self) -> &[EquipItem];

    /// Carried but not worn equipment.
    fn equip_bag(&self) -> &[EquipItem];

    fn potion_bag(&self) -> &[PotionItem];

    fn scroll_bag(&self) -> &[ScrollItem];
}

/// An inventory operation referenced an item that is not where it was expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("{item} is not in the bag")]
    NotInBag { item: ItemId },

    #[error("{item} is not equipped")]
    NotEquipped { item: ItemId },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInBag { .. } => "INVENTORY_NOT_IN_BAG",
            Self::NotEquipped { .. } => "INVENTORY_NOT_EQUIPPED",
        }
    }
}

/// In-memory inventory with equip-slot bookkeeping.
///
/// Bag contents are kept in ascending [`ItemId`] order and worn items in
/// [`EquipSlot`] order, so views are stable between calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bag {
    equipped: Vec<EquipItem>,
    equip_bag: Vec<EquipItem>,
    potions: Vec<PotionItem>,
    scrolls: Vec<ScrollItem>,
    wallet: f64,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equipped_in(&self, slot: EquipSlot) -> Option<&EquipItem> {
        self.equipped.iter().find(|item| item.slot == slot)
    }

    /// Wears a bag item; whatever occupied its slot goes back to the bag.
    pub fn equip(&mut self, id: ItemId) -> Result<Option<ItemId>, InventoryError> {
        let index = self
            .equip_bag
            .binary_search_by_key(&id, |item| item.id)
            .map_err(|_| InventoryError::NotInBag { item: id })?;
        let item = self.equip_bag.remove(index);

        let replaced = match self.equipped.iter().position(|worn| worn.slot == item.slot) {
            Some(pos) => {
                let old = self.equipped.remove(pos);
                let old_id = old.id;
                insert_by_id(&mut self.equip_bag, old, |i| i.id);
                Some(old_id)
            }
            None => None,
        };

        let at = self
            .equipped
            .partition_point(|worn| worn.slot < item.slot);
        self.equipped.insert(at, item);
        Ok(replaced)
    }

    /// Moves a worn item back into the bag.
    pub fn unequip(&mut self, id: ItemId) -> Result<(), InventoryError> {
        let pos = self
            .equipped
            .iter()
            .position(|item| item.id == id)
            .ok_or(InventoryError::NotEquipped { item: id })?;
        let item = self.equipped.remove(pos);
        insert_by_id(&mut self.equip_bag, item, |i| i.id);
        Ok(())
    }

    /// Removes an unworn item from the bag (drink, read, recycle, drop).
    pub fn take(&mut self, id: ItemId) -> Result<CarryItem, InventoryError> {
        if let Ok(index) = self.equip_bag.binary_search_by_key(&id, |item| item.id) {
            return Ok(CarryItem::Equipment(self.equip_bag.remove(index)));
        }
        if let Ok(index) = self.potions.binary_search_by_key(&id, |item| item.id) {
            return Ok(CarryItem::Potion(self.potions.remove(index)));
        }
        if let Ok(index) = self.scrolls.binary_search_by_key(&id, |item| item.id) {
            return Ok(CarryItem::Scroll(self.scrolls.remove(index)));
        }
        Err(InventoryError::NotInBag { item: id })
    }

    pub fn is_empty(&self) -> bool {
        self.equipped.is_empty()
            && self.equip_bag.is_empty()
            && self.potions.is_empty()
            && self.scrolls.is_empty()
    }
}

impl Inventory for Bag {
    fn add_to_bag(&mut self, item: CarryItem) {
        match item {
            CarryItem::Equipment(item) => insert_by_id(&mut self.equip_bag, item, |i| i.id),
            CarryItem::Potion(item) => insert_by_id(&mut self.potions, item, |i| i.id),
            CarryItem::Scroll(item) => insert_by_id(&mut self.scrolls, item, |i| i.id),
        }
    }

    fn add_to_wallet(&mut self, amount: f64) {
        self.wallet += amount;
    }

    fn wallet_value(&self) -> f64 {
        self.wallet
    }

    fn type_count(&self) -> TypeCount {
        TypeCount {
            equip: (self.equipped.len() + self.equip_bag.len()) as u32,
            potion: self.potions.len() as u32,
            scroll: self.scrolls.len() as u32,
        }
    }
}

impl InventoryView for Bag {
    fn equipped(&self) -> &[EquipItem] {
        &self.equipped
    }

    fn equip_bag(&self) -> &[EquipItem] {
        &self.equip_bag
    }

    fn potion_bag(&self) -> &[PotionItem] {
        &self.potions
    }

    fn scroll_bag(&self) -> &[ScrollItem] {
        &self.scrolls
    }
}

fn insert_by_id<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> ItemId) {
    let id = key(&item);
    let at = items.partition_point(|existing| key(existing) < id);
    items.insert(at, item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bias::Faction;
    use crate::item::{PotionKind, ScrollKind};

    fn sword(id: u64, slot: EquipSlot) -> EquipItem {
        EquipItem::new(
            ItemId(id),
            format!("item {id}"),
            slot,
            Faction::Crimson,
            Faction::Crimson.base_bias(),
        )
    }

    #[test]
    fn bag_keeps_id_order() {
        let mut bag = Bag::new();
        bag.add_to_bag(sword(9, EquipSlot::Weapon).into());
        bag.add_to_bag(sword(3, EquipSlot::Ring).into());
        bag.add_to_bag(sword(5, EquipSlot::Helmet).into());

        let ids: Vec<u64> = bag.equip_bag().iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 5, 9]);
    }

    #[test]
    fn equip_swaps_same_slot() {
        let mut bag = Bag::new();
        bag.add_to_bag(sword(1, EquipSlot::Weapon).into());
        bag.add_to_bag(sword(2, EquipSlot::Weapon).into());

        assert_eq!(bag.equip(ItemId(1)), Ok(None));
        assert_eq!(bag.equip(ItemId(2)), Ok(Some(ItemId(1))));
        assert_eq!(bag.equipped_in(EquipSlot::Weapon).map(|i| i.id), Some(ItemId(2)));
        assert_eq!(bag.equip_bag().len(), 1);
        assert_eq!(bag.type_count().equip, 2);
    }

    #[test]
    fn unequip_and_take() {
        let mut bag = Bag::new();
        bag.add_to_bag(sword(1, EquipSlot::Armor).into());
        bag.add_to_bag(PotionItem::new(ItemId(7), PotionKind::MinorHeal).into());
        bag.add_to_bag(ScrollItem::new(ItemId(8), ScrollKind::FloorMap).into());

        bag.equip(ItemId(1)).unwrap();
        assert_eq!(
            bag.take(ItemId(1)),
            Err(InventoryError::NotInBag { item: ItemId(1) })
        );
        bag.unequip(ItemId(1)).unwrap();
        assert!(bag.equipped().is_empty());

        assert!(matches!(bag.take(ItemId(7)), Ok(CarryItem::Potion(_))));
        assert!(matches!(bag.take(ItemId(8)), Ok(CarryItem::Scroll(_))));
        assert!(matches!(bag.take(ItemId(1)), Ok(CarryItem::Equipment(_))));
        assert!(bag.is_empty());
    }

    #[test]
    fn wallet_accumulates() {
        let mut bag = Bag::new();
        bag.add_to_wallet(12.5);
        bag.add_to_wallet(7.5);
        assert_eq!(bag.wallet_value(), 20.0);
    }
}
