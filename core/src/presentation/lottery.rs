use super::{
    validation::{parse_quantity, to_raffle_bound},
    Dispatcher, Messages, Observable, ScreenPhase,
};
use crate::{
    config::{DefaultPreferences, LotteryBounds},
    draw,
    preferences::{Preferences, PreferencesRepository},
    rng::{self, SharedRng},
};
use std::sync::Arc;

pub struct LotteryViewModel {
    prefs: Arc<dyn PreferencesRepository>,
    bounds: LotteryBounds,
    defaults: DefaultPreferences,
    rng: SharedRng,
    messages: Messages,
    dispatcher: Dispatcher,

    pub default_quantity_available: Observable<String>,
    pub default_quantity_to_raffle: Observable<String>,
    pub show_hint: Observable<bool>,
    pub quantity_available_error: Observable<String>,
    pub quantity_to_raffle_error: Observable<String>,
    pub lottery_numbers: Observable<Vec<u32>>,
    pub error: Observable<String>,
    pub phase: Observable<ScreenPhase>,
}

impl LotteryViewModel {
    pub fn new(
        prefs: Arc<dyn PreferencesRepository>,
        bounds: LotteryBounds,
        defaults: DefaultPreferences,
        rng: SharedRng,
        messages: Messages,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            prefs,
            bounds,
            defaults,
            rng,
            messages,
            dispatcher,
            default_quantity_available: Observable::new(),
            default_quantity_to_raffle: Observable::new(),
            show_hint: Observable::new(),
            quantity_available_error: Observable::new(),
            quantity_to_raffle_error: Observable::new(),
            lottery_numbers: Observable::new(),
            error: Observable::new(),
            phase: Observable::new(),
        }
    }

    /// Publish the saved default quantities, and the hint if it was never shown.
    pub async fn load(&self) {
        let prefs = Arc::clone(&self.prefs);
        let loaded = self
            .dispatcher
            .in_background(move || {
                let hint_displayed = prefs.lottery_hint_displayed();
                prefs.get_preferences().map(|p| (Some(p), hint_displayed)).or_else(|e| {
                    if e.is_not_found() { Ok((None, hint_displayed)) } else { Err(e) }
                })
            })
            .await;

        match loaded {
            Ok((stored, hint_displayed)) => {
                self.error.publish(String::new());
                let prefs = stored.unwrap_or_else(|| Preferences::from_defaults(&self.defaults));
                self.default_quantity_available
                    .publish(prefs.lottery_default_quantity_available);
                self.default_quantity_to_raffle
                    .publish(prefs.lottery_default_quantity_to_raffle);
                if !hint_displayed {
                    self.show_hint.publish(true);
                }
            }
            Err(e) => {
                log::warn!("lottery: could not load preferences: {e}");
                self.error.publish(self.messages.generic_error.to_string());
            }
        }
    }

    /// Validate both quantities, then draw.
    ///
    /// The quantity to raffle is bounded by the quantity available, so it is
    /// only checked once the quantity available is valid.
    pub async fn get_lottery_numbers(&self, quantity_available: &str, quantity_to_raffle: &str) -> ScreenPhase {
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

        self.phase.publish(ScreenPhase::Dispatching);
        let rng = Arc::clone(&self.rng);
        let drawn = self
            .dispatcher
            .in_background(move || {
                let mut guard = rng::lock(&rng)?;
                draw::draw_lottery_numbers(available, to_raffle, &mut guard)
            })
            .await;

        match drawn {
            Ok(numbers) => {
                self.lottery_numbers.publish(numbers.into_iter().collect());
                self.succeed()
            }
            Err(e) => {
                log::warn!("lottery: draw of {to_raffle} out of {available} failed: {e}");
                self.error.publish(self.messages.generic_error.to_string());
                self.finish(ScreenPhase::Failed)
            }
        }
    }

    pub async fn dismiss_hint(&self) {
        let prefs = Arc::clone(&self.prefs);
        if let Err(e) = self
            .dispatcher
            .in_background(move || prefs.set_lottery_hint_dismissed())
            .await
        {
            log::warn!("lottery: could not dismiss hint: {e}");
            self.error.publish(self.messages.generic_error.to_string());
        }
    }

    /// A success clears every error published by an earlier attempt.
    fn succeed(&self) -> ScreenPhase {
        self.quantity_available_error.publish(String::new());
        self.quantity_to_raffle_error.publish(String::new());
        self.error.publish(String::new());
        self.finish(ScreenPhase::Succeeded)
    }

    fn finish(&self, phase: ScreenPhase) -> ScreenPhase {
        self.phase.publish(phase);
        phase
    }
}
