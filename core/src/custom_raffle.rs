//! Saved custom raffles: a named, ordered list of items.

use crate::{
    error::{RaffleError, RaffleResult},
    store::{self, SharedStore},
    types::RaffleId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomRaffleItem {
    /// `0` until saved.
    pub id: i64,
    pub description: String,
    /// False once the item was drawn while "remember raffled items" is on.
    pub included: bool,
}

impl CustomRaffleItem {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: 0,
            description: description.into(),
            included: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomRaffle {
    /// `0` until saved.
    pub id: RaffleId,
    pub description: String,
    pub items: Vec<CustomRaffleItem>,
}

impl CustomRaffle {
    pub fn new(description: impl Into<String>, items: &[&str]) -> Self {
        Self {
            id: 0,
            description: description.into(),
            items: items.iter().map(|d| CustomRaffleItem::new(*d)).collect(),
        }
    }

    pub fn included_items(&self) -> Vec<CustomRaffleItem> {
        self.items.iter().filter(|i| i.included).cloned().collect()
    }
}

pub trait CustomRaffleRepository: Send + Sync {
    fn all_custom_raffles(&self) -> RaffleResult<Vec<CustomRaffle>>;
    fn custom_raffle_by_id(&self, id: RaffleId) -> RaffleResult<CustomRaffle>;
    /// Insert or replace; returns the raffle id.
    fn save_custom_raffle(&self, raffle: &CustomRaffle) -> RaffleResult<RaffleId>;
    fn delete_custom_raffle(&self, id: RaffleId) -> RaffleResult<()>;
    fn set_item_included(&self, raffle_id: RaffleId, item_id: i64, included: bool) -> RaffleResult<()>;
    fn include_all_items(&self, raffle_id: RaffleId) -> RaffleResult<()>;
}

pub struct StoredCustomRaffles {
    store: SharedStore,
}

impl StoredCustomRaffles {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl CustomRaffleRepository for StoredCustomRaffles {
    fn all_custom_raffles(&self) -> RaffleResult<Vec<CustomRaffle>> {
        store::lock(&self.store)?.all_custom_raffles()
    }

    fn custom_raffle_by_id(&self, id: RaffleId) -> RaffleResult<CustomRaffle> {
        store::lock(&self.store)?
            .custom_raffle_by_id(id)?
            .ok_or_else(|| RaffleError::not_found(format!("custom raffle {id}")))
    }

    fn save_custom_raffle(&self, raffle: &CustomRaffle) -> RaffleResult<RaffleId> {
        if raffle.description.trim().is_empty() {
            return Err(RaffleError::validation("description", "must not be blank"));
        }
        let id = store::lock(&self.store)?.save_custom_raffle(raffle)?;
        log::debug!("custom_raffle: saved {id} with {} items", raffle.items.len());
        Ok(id)
    }

    fn delete_custom_raffle(&self, id: RaffleId) -> RaffleResult<()> {
        if store::lock(&self.store)?.delete_custom_raffle(id)? {
            Ok(())
        } else {
            Err(RaffleError::not_found(format!("custom raffle {id}")))
        }
    }

    fn set_item_included(&self, raffle_id: RaffleId, item_id: i64, included: bool) -> RaffleResult<()> {
        if store::lock(&self.store)?.set_item_included(raffle_id, item_id, included)? {
            Ok(())
        } else {
            Err(RaffleError::not_found(format!("item {item_id} of custom raffle {raffle_id}")))
        }
    }

    fn include_all_items(&self, raffle_id: RaffleId) -> RaffleResult<()> {
        store::lock(&self.store)?.include_all_items(raffle_id)
    }
}
