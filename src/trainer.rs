use crate::errors::{EconomyError, GameResult};
use schema::{ItemDef, ItemId, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The player's own profile: a level/experience track separate from any
/// creature, a currency balance, the current zone, and the item inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub name: String,
    pub level: u32,
    pub exp: u32,
    /// Non-negative by construction; debits go through `spend`.
    pub coins: u32,
    pub location: ZoneId,
    /// Item counts by catalog id. A missing key means zero held.
    inventory: HashMap<ItemId, u32>,
}

impl Trainer {
    pub fn new(name: String, starting_zone: ZoneId) -> Self {
        Trainer {
            name,
            level: 1,
            exp: 0,
            coins: 0,
            location: starting_zone,
            inventory: HashMap::new(),
        }
    }

    // === Inventory ===

    pub fn item_count(&self, item_id: &str) -> u32 {
        self.inventory.get(item_id).copied().unwrap_or(0)
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.item_count(item_id) > 0
    }

    pub fn add_item(&mut self, item_id: ItemId) {
        *self.inventory.entry(item_id).or_insert(0) += 1;
    }

    /// Remove one instance of the item. Returns false if none are held.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        match self.inventory.get_mut(item_id) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.inventory.remove(item_id);
                true
            }
            None => false,
        }
    }

    /// Iterate held items as (id, count) pairs.
    pub fn inventory(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.inventory.iter().map(|(id, count)| (id, *count))
    }

    // === Economy ===

    pub fn earn(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn spend(&mut self, amount: u32) -> GameResult<()> {
        if amount > self.coins {
            return Err(EconomyError::InsufficientFunds {
                price: amount,
                balance: self.coins,
            }
            .into());
        }
        self.coins -= amount;
        Ok(())
    }

    /// Buy one instance of a catalog item: debit the price, credit the
    /// inventory.
    pub fn purchase(&mut self, item: &ItemDef) -> GameResult<()> {
        self.spend(item.price)?;
        self.add_item(item.id.clone());
        Ok(())
    }
}
