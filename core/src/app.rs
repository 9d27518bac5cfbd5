//! Wires the store, repositories and RNG together for a running app.

use crate::{
    assets::{DataDirAssets, SeedAssets},
    config::RafflerConfig,
    custom_raffle::{CustomRaffleRepository, StoredCustomRaffles},
    device::{DeviceSettings, InMemoryDeviceSettings, JsonDeviceSettings},
    error::RaffleResult,
    preferences::{PreferencesRepository, StoredPreferences},
    presentation::{
        custom_raffle::CustomRaffleViewModel, lottery::LotteryViewModel,
        preferences::PreferencesViewModel, quick_decision::QuickDecisionViewModel, Dispatcher,
        Messages,
    },
    quick_decision::{QuickDecisionRepository, StoredQuickDecisions},
    rng::{DrawRng, SharedRng},
    store::{RafflerStore, SharedStore},
};
use std::sync::Arc;

pub struct Raffler {
    pub config: RafflerConfig,
    pub store: SharedStore,
    pub device: Arc<dyn DeviceSettings>,
    pub preferences: Arc<dyn PreferencesRepository>,
    pub quick_decisions: Arc<dyn QuickDecisionRepository>,
    pub custom_raffles: Arc<dyn CustomRaffleRepository>,
    pub rng: SharedRng,
    pub dispatcher: Dispatcher,
}

impl Raffler {
    /// Open storage per `config`, migrate it and make sure the
    /// preferences row exists.
    pub fn open(config: RafflerConfig) -> RaffleResult<Self> {
        let store = if config.db_path == ":memory:" {
            RafflerStore::in_memory()?
        } else {
            RafflerStore::open(&config.db_path)?
        };
        let device: Arc<dyn DeviceSettings> = if config.device_settings_path.is_empty() {
            Arc::new(InMemoryDeviceSettings::new(
                config.defaults.app_theme,
                config.defaults.app_language,
            ))
        } else {
            Arc::new(JsonDeviceSettings::open(&config.device_settings_path))
        };
        let assets: Arc<dyn SeedAssets> = Arc::new(DataDirAssets::new(&config.data_dir));
        Self::build(config, store, device, assets)
    }

    pub fn build(
        config: RafflerConfig,
        store: RafflerStore,
        device: Arc<dyn DeviceSettings>,
        assets: Arc<dyn SeedAssets>,
    ) -> RaffleResult<Self> {
        store.migrate()?;
        let store = store.shared();

        let preferences: Arc<dyn PreferencesRepository> =
            Arc::new(StoredPreferences::new(store.clone(), device.clone()));
        preferences.ensure_preferences(&config.defaults)?;

        let rng = DrawRng::from_optional_seed(config.seed).shared();
        log::info!("raffler: opened {}", config.db_path);

        Ok(Self {
            quick_decisions: Arc::new(StoredQuickDecisions::new(store.clone(), assets)),
            custom_raffles: Arc::new(StoredCustomRaffles::new(store.clone())),
            preferences,
            device,
            store,
            rng,
            dispatcher: Dispatcher::default(),
            config,
        })
    }

    pub fn messages(&self) -> Messages {
        Messages::for_language(self.device.language())
    }

    pub fn lottery(&self) -> LotteryViewModel {
        LotteryViewModel::new(
            self.preferences.clone(),
            self.config.lottery.clone(),
            self.config.defaults.clone(),
            self.rng.clone(),
            self.messages(),
            self.dispatcher,
        )
    }

    pub fn quick_decision(&self) -> QuickDecisionViewModel {
        QuickDecisionViewModel::new(
            self.quick_decisions.clone(),
            self.preferences.clone(),
            self.rng.clone(),
            self.device.language(),
            self.dispatcher,
        )
    }

    pub fn custom_raffle(&self) -> CustomRaffleViewModel {
        CustomRaffleViewModel::new(
            self.custom_raffles.clone(),
            self.preferences.clone(),
            self.rng.clone(),
            self.messages(),
            self.dispatcher,
        )
    }

    pub fn preferences_screen(&self) -> PreferencesViewModel {
        PreferencesViewModel::new(
            self.preferences.clone(),
            self.config.lottery.clone(),
            self.messages(),
            self.dispatcher,
        )
    }
}
