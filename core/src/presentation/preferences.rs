use super::{
    validation::{parse_quantity, to_raffle_bound},
    Dispatcher, Messages, Observable, ScreenPhase,
};
use crate::{
    config::LotteryBounds,
    error::RaffleResult,
    preferences::{Preferences, PreferencesRepository},
    types::{AppLanguage, AppTheme, RaffleMode},
};
use std::sync::Arc;

pub struct PreferencesViewModel {
    prefs: Arc<dyn PreferencesRepository>,
    bounds: LotteryBounds,
    messages: Messages,
    dispatcher: Dispatcher,

    pub preferences: Observable<Preferences>,
    pub quantity_available_error: Observable<String>,
    pub quantity_to_raffle_error: Observable<String>,
    pub error: Observable<String>,
    pub phase: Observable<ScreenPhase>,
}

impl PreferencesViewModel {
    pub fn new(
        prefs: Arc<dyn PreferencesRepository>,
        bounds: LotteryBounds,
        messages: Messages,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            prefs,
            bounds,
            messages,
            dispatcher,
            preferences: Observable::new(),
            quantity_available_error: Observable::new(),
            quantity_to_raffle_error: Observable::new(),
            error: Observable::new(),
            phase: Observable::new(),
        }
    }

    pub async fn load(&self) -> ScreenPhase {
        self.apply("load", |_| Ok(())).await
    }

    pub async fn set_app_theme(&self, theme: AppTheme) -> ScreenPhase {
        self.apply("app_theme", move |p| p.set_app_theme(theme)).await
    }

    pub async fn set_language(&self, language: AppLanguage) -> ScreenPhase {
        self.apply("language", move |p| p.set_language(language)).await
    }

    pub async fn set_roulette_music_enabled(&self, enabled: bool) -> ScreenPhase {
        self.apply("roulette_music_enabled", move |p| p.set_roulette_music_enabled(enabled))
            .await
    }

    pub async fn set_preferred_raffle_mode(&self, mode: RaffleMode) -> ScreenPhase {
        self.apply("preferred_raffle_mode", move |p| p.set_preferred_raffle_mode(mode))
            .await
    }

    pub async fn remember_raffled_items(&self, remember: bool) -> ScreenPhase {
        self.apply("remember_raffled_items", move |p| p.remember_raffled_items(remember))
            .await
    }

    pub async fn reset_hints(&self) -> ScreenPhase {
        self.apply("hints", |p| p.reset_hints()).await
    }

    /// Validated the same way as the lottery screen.
    pub async fn set_lottery_default(&self, quantity_available: &str, quantity_to_raffle: &str) -> ScreenPhase {
        self.phase.publish(ScreenPhase::Validating);
        let available = match parse_quantity(
            quantity_available,
            self.bounds.max_available,
            self.messages.invalid_quantity,
            self.messages.above_maximum,
        ) {
            Ok(n) => {
                self.quantity_available_error.publish(String::new());
                n
            }
            Err(message) => {
                self.quantity_available_error.publish(message.to_string());
                return self.finish(ScreenPhase::ValidationFailed);
            }
        };

        let (max, too_large) = to_raffle_bound(available, &self.bounds, &self.messages);
        let to_raffle = match parse_quantity(quantity_to_raffle, max, self.messages.invalid_quantity, too_large) {
            Ok(n) => {
                self.quantity_to_raffle_error.publish(String::new());
                n
            }
            Err(message) => {
                self.quantity_to_raffle_error.publish(message.to_string());
                return self.finish(ScreenPhase::ValidationFailed);
            }
        };

        self.apply("lottery_default", move |p| p.set_lottery_default(available, to_raffle))
            .await
    }

    /// Run `change` in the background, then republish the stored record.
    async fn apply<F>(&self, what: &'static str, change: F) -> ScreenPhase
    where
        F: FnOnce(&dyn PreferencesRepository) -> RaffleResult<()> + Send + 'static,
    {
        self.phase.publish(ScreenPhase::Dispatching);
        let prefs = Arc::clone(&self.prefs);
        let applied = self
            .dispatcher
            .in_background(move || {
                change(prefs.as_ref())?;
                prefs.get_preferences()
            })
            .await;

        match applied {
            Ok(prefs) => {
                self.preferences.publish(prefs);
                self.error.publish(String::new());
                self.finish(ScreenPhase::Succeeded)
            }
            Err(e) => {
                log::warn!("preferences: {what} failed: {e}");
                self.error.publish(self.messages.generic_error.to_string());
                self.finish(ScreenPhase::Failed)
            }
        }
    }

    fn finish(&self, phase: ScreenPhase) -> ScreenPhase {
        self.phase.publish(phase);
        phase
    }
}
