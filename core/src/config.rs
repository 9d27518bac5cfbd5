use crate::types::{AppLanguage, AppTheme, RaffleMode};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Upper bounds the lottery screen accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotteryBounds {
    pub max_available: u32,
    pub max_to_raffle: u32,
}

/// Values written into the preferences row the first time it is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultPreferences {
    pub app_theme: AppTheme,
    pub app_language: AppLanguage,
    pub lottery_quantity_available: u32,
    pub lottery_quantity_to_raffle: u32,
    pub preferred_raffle_mode: RaffleMode,
    pub roulette_music_enabled: bool,
    pub remember_raffled_items: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RafflerConfig {
    pub db_path: String,
    pub device_settings_path: String,
    /// Directory holding bundled assets such as `quick-decisions.json`.
    #[serde(default)]
    pub data_dir: String,
    /// Pin the draw RNG. Leave unset in normal use.
    #[serde(default)]
    pub seed: Option<u64>,
    pub lottery: LotteryBounds,
    pub defaults: DefaultPreferences,
}

impl RafflerConfig {
    /// Load from `{data_dir}/raffler.json`.
    /// In tests, use RafflerConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/raffler.json");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read {path}"))?;
        let mut config: RafflerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Cannot parse {path}"))?;
        if config.data_dir.is_empty() {
            config.data_dir = data_dir.to_string();
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let d = &self.defaults;
        anyhow::ensure!(
            self.lottery.max_to_raffle <= self.lottery.max_available,
            "lottery.max_to_raffle ({}) exceeds lottery.max_available ({})",
            self.lottery.max_to_raffle,
            self.lottery.max_available
        );
        anyhow::ensure!(
            d.lottery_quantity_to_raffle <= d.lottery_quantity_available,
            "default lottery quantity to raffle exceeds quantity available"
        );
        Ok(())
    }

    pub fn default_test() -> Self {
        Self {
            db_path: ":memory:".into(),
            device_settings_path: String::new(),
            data_dir: "../data".into(),
            seed: Some(42),
            lottery: LotteryBounds {
                max_available: 1_000,
                max_to_raffle: 100,
            },
            defaults: DefaultPreferences {
                app_theme: AppTheme::Classic,
                app_language: AppLanguage::English,
                lottery_quantity_available: 60,
                lottery_quantity_to_raffle: 6,
                preferred_raffle_mode: RaffleMode::None,
                roulette_music_enabled: true,
                remember_raffled_items: false,
            },
        }
    }
}
