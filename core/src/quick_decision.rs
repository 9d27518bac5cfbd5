//! Quick decisions: saved option lists to pick one value from.

use crate::{
    assets::SeedAssets,
    error::{RaffleError, RaffleResult},
    store::{self, SharedStore},
    types::DecisionId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickDecision {
    pub id: DecisionId,
    pub locale: String,
    pub description: String,
    pub values: Vec<String>,
}

pub trait QuickDecisionRepository: Send + Sync {
    /// Stored decisions, or the seed list (persisted first) when storage is empty.
    fn all_quick_decisions(&self) -> RaffleResult<Vec<QuickDecision>>;
    fn add_quick_decisions(&self, items: &[QuickDecision]) -> RaffleResult<()>;
    fn delete_quick_decision(&self, id: &str) -> RaffleResult<()>;
}

pub struct StoredQuickDecisions {
    store: SharedStore,
    assets: Arc<dyn SeedAssets>,
}

impl StoredQuickDecisions {
    pub fn new(store: SharedStore, assets: Arc<dyn SeedAssets>) -> Self {
        Self { store, assets }
    }
}

impl QuickDecisionRepository for StoredQuickDecisions {
    fn all_quick_decisions(&self) -> RaffleResult<Vec<QuickDecision>> {
        let mut store = store::lock(&self.store)?;
        let stored = store.all_quick_decisions()?;
        if !stored.is_empty() {
            return Ok(stored);
        }

        let seed = self.assets.quick_decisions().map_err(|e| match e {
            RaffleError::AssetParse(_) => e,
            other => RaffleError::AssetParse(other.to_string()),
        })?;
        store.add_quick_decisions(&seed)?;
        log::info!("quick_decision: seeded {} decisions", seed.len());
        Ok(seed)
    }

    fn add_quick_decisions(&self, items: &[QuickDecision]) -> RaffleResult<()> {
        store::lock(&self.store)?.add_quick_decisions(items)
    }

    fn delete_quick_decision(&self, id: &str) -> RaffleResult<()> {
        if store::lock(&self.store)?.delete_quick_decision(id)? {
            Ok(())
        } else {
            Err(RaffleError::not_found(format!("quick decision {id}")))
        }
    }
}
