//! Items, stacks and the slot inventory carried by player entities.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest count a single slot holds.
pub const MAX_STACK_SIZE: u32 = 64;

/// Default number of slots in a player inventory.
pub const PLAYER_INVENTORY_SLOTS: usize = 36;

/// Namespaced item identifier, e.g. `orbital:steel_ingot`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// A number of identical items occupying one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: impl Into<ItemId>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Copy of this stack with a different count.
    pub fn with_count(&self, count: u32) -> Self {
        Self {
            item: self.item.clone(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("not enough matching items: {required} required, {available} available")]
    Insufficient { required: u32, available: u32 },
}

/// Fixed-capacity list of slots. Empty slots are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(PLAYER_INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            slots: vec![None; slots],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Non-empty stacks in slot order.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter().flatten().filter(|stack| !stack.is_empty())
    }

    /// Add items, topping up existing stacks first. Returns the count that did not fit.
    pub fn insert(&mut self, stack: ItemStack) -> u32 {
        let mut remaining = stack.count;

        for slot in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if slot.item == stack.item && slot.count < MAX_STACK_SIZE {
                let moved = remaining.min(MAX_STACK_SIZE - slot.count);
                slot.count += moved;
                remaining -= moved;
            }
        }

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.as_ref().map_or(true, ItemStack::is_empty) {
                let moved = remaining.min(MAX_STACK_SIZE);
                *slot = Some(stack.with_count(moved));
                remaining -= moved;
            }
        }

        remaining
    }

    /// Total count over every stack accepted by `matches`.
    pub fn count_matching(&self, matches: impl Fn(&ItemStack) -> bool) -> u32 {
        self.stacks().filter(|&stack| matches(stack)).map(|stack| stack.count).sum()
    }

    /// Remove exactly `count` items accepted by `matches`, draining slots in order.
    /// Nothing is removed when fewer than `count` are available.
    pub fn remove_matching(
        &mut self,
        matches: impl Fn(&ItemStack) -> bool,
        count: u32,
    ) -> Result<(), InventoryError> {
        let available = self.count_matching(&matches);
        if available < count {
            return Err(InventoryError::Insufficient {
                required: count,
                available,
            });
        }

        let mut remaining = count;
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot else { continue };
            if stack.is_empty() || !matches(stack) {
                continue;
            }
            let taken = remaining.min(stack.count);
            stack.count -= taken;
            remaining -= taken;
            if stack.is_empty() {
                *slot = None;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_steel(stack: &ItemStack) -> bool {
        stack.item.as_str() == "steel"
    }

    #[test]
    fn insert_splits_into_full_stacks() {
        let mut inv = Inventory::with_capacity(4);
        assert_eq!(inv.insert(ItemStack::new("steel", 100)), 0);
        let counts: Vec<u32> = inv.stacks().map(|s| s.count).collect();
        assert_eq!(counts, vec![64, 36]);
    }

    #[test]
    fn insert_reports_overflow() {
        let mut inv = Inventory::with_capacity(1);
        assert_eq!(inv.insert(ItemStack::new("steel", 70)), 6);
    }

    #[test]
    fn count_matching_aggregates_stacks() {
        let mut inv = Inventory::with_capacity(4);
        inv.insert(ItemStack::new("steel", 70));
        inv.insert(ItemStack::new("glass", 5));
        assert_eq!(inv.count_matching(is_steel), 70);
    }

    #[test]
    fn remove_matching_drains_across_slots() {
        let mut inv = Inventory::with_capacity(4);
        inv.insert(ItemStack::new("steel", 70));
        inv.remove_matching(is_steel, 66).unwrap();
        assert_eq!(inv.count_matching(is_steel), 4);
        assert_eq!(inv.stacks().count(), 1);
    }

    #[test]
    fn remove_matching_is_all_or_nothing() {
        let mut inv = Inventory::with_capacity(4);
        inv.insert(ItemStack::new("steel", 3));
        let err = inv.remove_matching(is_steel, 5).unwrap_err();
        assert_eq!(err, InventoryError::Insufficient { required: 5, available: 3 });
        assert_eq!(inv.count_matching(is_steel), 3);
    }
}
