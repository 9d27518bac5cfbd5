//! Read-only assets shipped with the app.

use crate::{
    error::{RaffleError, RaffleResult},
    quick_decision::QuickDecision,
};
use std::path::PathBuf;

pub const QUICK_DECISIONS_ASSET: &str = "quick-decisions.json";

/// Source of the seed data used when local storage is empty.
pub trait SeedAssets: Send + Sync {
    fn quick_decisions(&self) -> RaffleResult<Vec<QuickDecision>>;
}

/// Assets compiled into the binary.
pub struct BundledAssets;

impl SeedAssets for BundledAssets {
    fn quick_decisions(&self) -> RaffleResult<Vec<QuickDecision>> {
        parse_quick_decisions(include_str!("../../data/quick-decisions.json"))
    }
}

/// Assets read from a data directory at runtime.
pub struct DataDirAssets {
    data_dir: PathBuf,
}

impl DataDirAssets {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl SeedAssets for DataDirAssets {
    fn quick_decisions(&self) -> RaffleResult<Vec<QuickDecision>> {
        let path = self.data_dir.join(QUICK_DECISIONS_ASSET);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            RaffleError::AssetParse(format!("cannot read {}: {e}", path.display()))
        })?;
        parse_quick_decisions(&content)
    }
}

/// Assets held in memory as raw JSON.
pub struct JsonAssets {
    quick_decisions: String,
}

impl JsonAssets {
    pub fn new(quick_decisions: impl Into<String>) -> Self {
        Self {
            quick_decisions: quick_decisions.into(),
        }
    }
}

impl SeedAssets for JsonAssets {
    fn quick_decisions(&self) -> RaffleResult<Vec<QuickDecision>> {
        parse_quick_decisions(&self.quick_decisions)
    }
}

/// `null` is treated the same as malformed JSON.
fn parse_quick_decisions(json: &str) -> RaffleResult<Vec<QuickDecision>> {
    let parsed: Option<Vec<QuickDecision>> = serde_json::from_str(json)
        .map_err(|e| RaffleError::AssetParse(format!("{QUICK_DECISIONS_ASSET}: {e}")))?;
    parsed.ok_or_else(|| RaffleError::AssetParse(format!("{QUICK_DECISIONS_ASSET} is null")))
}
