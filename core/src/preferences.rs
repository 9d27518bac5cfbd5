//! User preferences and one-time hint flags.
//!
//! The preferences row is a singleton. Every setter is a read-modify-write
//! that runs inside one store transaction, so a missing row fails the
//! update without writing anything.

use crate::{
    config::DefaultPreferences,
    device::DeviceSettings,
    error::RaffleResult,
    store::{self, SharedStore},
    types::{AppLanguage, AppTheme, Hint, RaffleMode},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

/// Primary key of the only preferences row.
pub const PREFERENCES_ID: i64 = 0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    pub id: i64,
    pub app_theme: AppTheme,
    pub app_language: AppLanguage,
    pub lottery_default_quantity_available: String,
    pub lottery_default_quantity_to_raffle: String,
    pub preferred_raffle_mode: RaffleMode,
    pub roulette_music_enabled: bool,
    pub remember_raffled_items: bool,
    pub hints_displayed: BTreeMap<String, bool>,
}

impl Preferences {
    pub fn from_defaults(defaults: &DefaultPreferences) -> Self {
        Self {
            id: PREFERENCES_ID,
            app_theme: defaults.app_theme,
            app_language: defaults.app_language,
            lottery_default_quantity_available: defaults.lottery_quantity_available.to_string(),
            lottery_default_quantity_to_raffle: defaults.lottery_quantity_to_raffle.to_string(),
            preferred_raffle_mode: defaults.preferred_raffle_mode,
            roulette_music_enabled: defaults.roulette_music_enabled,
            remember_raffled_items: defaults.remember_raffled_items,
            hints_displayed: BTreeMap::new(),
        }
    }

    pub fn hint_displayed(&self, key: &str) -> bool {
        self.hints_displayed.get(key).copied().unwrap_or(false)
    }
}

pub trait PreferencesRepository: Send + Sync {
    /// The stored row with the device theme/language merged in.
    /// Fails with `NotFound` if the row was never created.
    fn get_preferences(&self) -> RaffleResult<Preferences>;

    /// Create the row from `defaults` if it does not exist yet.
    fn ensure_preferences(&self, defaults: &DefaultPreferences) -> RaffleResult<Preferences>;

    fn set_app_theme(&self, theme: AppTheme) -> RaffleResult<()>;
    fn set_language(&self, language: AppLanguage) -> RaffleResult<()>;

    fn set_roulette_music_enabled(&self, enabled: bool) -> RaffleResult<()>;
    fn set_preferred_raffle_mode(&self, mode: RaffleMode) -> RaffleResult<()>;
    fn set_lottery_default(&self, available: u32, to_raffle: u32) -> RaffleResult<()>;
    fn remember_raffled_items(&self, remember: bool) -> RaffleResult<()>;
    fn reset_hints(&self) -> RaffleResult<()>;

    /// Mark the hint under `key` as displayed.
    fn dismiss_hint(&self, key: &str) -> RaffleResult<()>;

    /// False when there is no row or no entry for `key`.
    fn hint_displayed(&self, key: &str) -> bool;

    fn quick_decision_hint_displayed(&self) -> bool {
        self.hint_displayed(Hint::QuickDecision.key())
    }

    fn set_quick_decision_hint_dismissed(&self) -> RaffleResult<()> {
        self.dismiss_hint(Hint::QuickDecision.key())
    }

    fn add_new_quick_decision_hint_displayed(&self) -> bool {
        self.hint_displayed(Hint::AddNewQuickDecision.key())
    }

    fn set_add_new_quick_decision_hint_dismissed(&self) -> RaffleResult<()> {
        self.dismiss_hint(Hint::AddNewQuickDecision.key())
    }

    fn lottery_hint_displayed(&self) -> bool {
        self.hint_displayed(Hint::Lottery.key())
    }

    fn set_lottery_hint_dismissed(&self) -> RaffleResult<()> {
        self.dismiss_hint(Hint::Lottery.key())
    }

    fn raffle_details_hint_displayed(&self) -> bool {
        self.hint_displayed(Hint::RaffleDetails.key())
    }

    fn set_raffle_details_hint_dismissed(&self) -> RaffleResult<()> {
        self.dismiss_hint(Hint::RaffleDetails.key())
    }
}

/// Preferences backed by the SQLite row plus the device settings document.
pub struct StoredPreferences {
    store: SharedStore,
    device: Arc<dyn DeviceSettings>,
}

impl StoredPreferences {
    pub fn new(store: SharedStore, device: Arc<dyn DeviceSettings>) -> Self {
        Self { store, device }
    }

    fn update(&self, what: &str, mutate: impl FnOnce(&mut Preferences)) -> RaffleResult<()> {
        let result = store::lock(&self.store)?.update_preferences(mutate);
        match result {
            Ok(_) => {
                log::debug!("preferences: updated {what}");
                Ok(())
            }
            Err(e) => {
                log::warn!("preferences: update of {what} failed: {e}");
                Err(e)
            }
        }
    }

    fn merge_device(&self, mut prefs: Preferences) -> Preferences {
        prefs.app_theme = self.device.theme();
        prefs.app_language = self.device.language();
        prefs
    }
}

impl PreferencesRepository for StoredPreferences {
    fn get_preferences(&self) -> RaffleResult<Preferences> {
        let stored = store::lock(&self.store)?.preferences()?;
        stored
            .map(|p| self.merge_device(p))
            .ok_or_else(|| crate::error::RaffleError::not_found("preferences"))
    }

    fn ensure_preferences(&self, defaults: &DefaultPreferences) -> RaffleResult<Preferences> {
        {
            let store = store::lock(&self.store)?;
            if store.insert_preferences_if_absent(&Preferences::from_defaults(defaults))? {
                log::info!("preferences: created default row");
            }
        }
        self.get_preferences()
    }

    fn set_app_theme(&self, theme: AppTheme) -> RaffleResult<()> {
        self.device.set_theme(theme)
    }

    fn set_language(&self, language: AppLanguage) -> RaffleResult<()> {
        self.device.set_language(language)
    }

    fn set_roulette_music_enabled(&self, enabled: bool) -> RaffleResult<()> {
        self.update("roulette_music_enabled", |p| p.roulette_music_enabled = enabled)
    }

    fn set_preferred_raffle_mode(&self, mode: RaffleMode) -> RaffleResult<()> {
        self.update("preferred_raffle_mode", |p| p.preferred_raffle_mode = mode)
    }

    fn set_lottery_default(&self, available: u32, to_raffle: u32) -> RaffleResult<()> {
        self.update("lottery_default", |p| {
            p.lottery_default_quantity_available = available.to_string();
            p.lottery_default_quantity_to_raffle = to_raffle.to_string();
        })
    }

    fn remember_raffled_items(&self, remember: bool) -> RaffleResult<()> {
        self.update("remember_raffled_items", |p| p.remember_raffled_items = remember)
    }

    fn reset_hints(&self) -> RaffleResult<()> {
        self.update("hints_displayed", |p| p.hints_displayed.clear())
    }

    fn dismiss_hint(&self, key: &str) -> RaffleResult<()> {
        self.update(key, |p| {
            p.hints_displayed.insert(key.to_string(), true);
        })
    }

    fn hint_displayed(&self, key: &str) -> bool {
        match store::lock(&self.store).and_then(|s| s.preferences()) {
            Ok(Some(prefs)) => prefs.hint_displayed(key),
            Ok(None) => false,
            Err(e) => {
                log::warn!("preferences: could not read hint {key}: {e}");
                false
            }
        }
    }
}
