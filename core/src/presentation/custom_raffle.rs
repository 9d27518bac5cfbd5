use super::{validation::parse_quantity, Dispatcher, Messages, Observable, ScreenPhase};
use crate::{
    custom_raffle::{CustomRaffle, CustomRaffleItem, CustomRaffleRepository},
    draw,
    error::{RaffleError, RaffleResult},
    preferences::PreferencesRepository,
    rng::{self, SharedRng},
    types::RaffleId,
};
use std::sync::Arc;

pub struct CustomRaffleViewModel {
    repo: Arc<dyn CustomRaffleRepository>,
    prefs: Arc<dyn PreferencesRepository>,
    rng: SharedRng,
    messages: Messages,
    dispatcher: Dispatcher,

    pub custom_raffle: Observable<CustomRaffle>,
    pub show_hint: Observable<bool>,
    pub roulette_result: Observable<CustomRaffleItem>,
    pub winners: Observable<Vec<CustomRaffleItem>>,
    pub groups: Observable<Vec<Vec<CustomRaffleItem>>>,
    pub quantity_error: Observable<String>,
    pub error: Observable<String>,
    pub phase: Observable<ScreenPhase>,
}

impl CustomRaffleViewModel {
    pub fn new(
        repo: Arc<dyn CustomRaffleRepository>,
        prefs: Arc<dyn PreferencesRepository>,
        rng: SharedRng,
        messages: Messages,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            repo,
            prefs,
            rng,
            messages,
            dispatcher,
            custom_raffle: Observable::new(),
            show_hint: Observable::new(),
            roulette_result: Observable::new(),
            winners: Observable::new(),
            groups: Observable::new(),
            quantity_error: Observable::new(),
            error: Observable::new(),
            phase: Observable::new(),
        }
    }

    pub async fn load(&self, id: RaffleId) {
        let repo = Arc::clone(&self.repo);
        let prefs = Arc::clone(&self.prefs);
        let loaded = self
            .dispatcher
            .in_background(move || {
                let hint_displayed = prefs.raffle_details_hint_displayed();
                repo.custom_raffle_by_id(id).map(|r| (r, hint_displayed))
            })
            .await;

        match loaded {
            Ok((raffle, hint_displayed)) => {
                self.error.publish(String::new());
                self.custom_raffle.publish(raffle);
                if !hint_displayed {
                    self.show_hint.publish(true);
                }
            }
            Err(e) => {
                self.report(e);
            }
        }
    }

    /// Pick one included item. With "remember raffled items" on, the item
    /// is excluded from later draws until `reset_items`.
    pub async fn spin_roulette(&self, id: RaffleId) -> ScreenPhase {
        self.phase.publish(ScreenPhase::Dispatching);
        let (repo, prefs, rng) = self.handles();
        let spun = self
            .dispatcher
            .in_background(move || {
                let raffle = repo.custom_raffle_by_id(id)?;
                let candidates = raffle.included_items();
                let picked = draw::pick_random(&candidates, &mut *rng::lock(&rng)?)?.clone();
                if remembers(prefs.as_ref())? {
                    repo.set_item_included(id, picked.id, false)?;
                }
                Ok((picked, repo.custom_raffle_by_id(id)?))
            })
            .await;

        match spun {
            Ok((picked, raffle)) => {
                log::debug!("custom_raffle: roulette on {id} picked {}", picked.description);
                self.roulette_result.publish(picked);
                self.custom_raffle.publish(raffle);
                self.succeed()
            }
            Err(e) => self.report(e),
        }
    }

    pub async fn draw_winners(&self, id: RaffleId, quantity: &str) -> ScreenPhase {
        self.phase.publish(ScreenPhase::Validating);
        let Some(quantity) = self.validate_quantity(quantity) else {
            return self.finish(ScreenPhase::ValidationFailed);
        };

        self.phase.publish(ScreenPhase::Dispatching);
        let (repo, prefs, rng) = self.handles();
        let drawn = self
            .dispatcher
            .in_background(move || {
                let raffle = repo.custom_raffle_by_id(id)?;
                let candidates = raffle.included_items();
                let winners =
                    draw::draw_winners(&candidates, quantity as usize, &mut *rng::lock(&rng)?)?;
                if remembers(prefs.as_ref())? {
                    for winner in &winners {
                        repo.set_item_included(id, winner.id, false)?;
                    }
                }
                Ok((winners, repo.custom_raffle_by_id(id)?))
            })
            .await;

        match drawn {
            Ok((winners, raffle)) => {
                self.winners.publish(winners);
                self.custom_raffle.publish(raffle);
                self.succeed()
            }
            Err(e) => self.report(e),
        }
    }

    pub async fn split_into_groups(&self, id: RaffleId, groups: &str) -> ScreenPhase {
        self.phase.publish(ScreenPhase::Validating);
        let Some(groups) = self.validate_quantity(groups) else {
            return self.finish(ScreenPhase::ValidationFailed);
        };

        self.phase.publish(ScreenPhase::Dispatching);
        let (repo, _, rng) = self.handles();
        let split = self
            .dispatcher
            .in_background(move || {
                let raffle = repo.custom_raffle_by_id(id)?;
                draw::split_into_groups(&raffle.included_items(), groups as usize, &mut *rng::lock(&rng)?)
            })
            .await;

        match split {
            Ok(groups) => {
                self.groups.publish(groups);
                self.succeed()
            }
            Err(e) => self.report(e),
        }
    }

    /// Put every item of the raffle back into the draw.
    pub async fn reset_items(&self, id: RaffleId) -> ScreenPhase {
        let repo = Arc::clone(&self.repo);
        let reset = self
            .dispatcher
            .in_background(move || {
                repo.include_all_items(id)?;
                repo.custom_raffle_by_id(id)
            })
            .await;

        match reset {
            Ok(raffle) => {
                self.custom_raffle.publish(raffle);
                self.succeed()
            }
            Err(e) => self.report(e),
        }
    }

    pub async fn dismiss_hint(&self) {
        let prefs = Arc::clone(&self.prefs);
        if let Err(e) = self
            .dispatcher
            .in_background(move || prefs.set_raffle_details_hint_dismissed())
            .await
        {
            self.report(e);
        }
    }

    fn validate_quantity(&self, input: &str) -> Option<u32> {
        match parse_quantity(input, u32::MAX, self.messages.invalid_quantity, self.messages.above_maximum) {
            Ok(n) => {
                self.quantity_error.publish(String::new());
                Some(n)
            }
            Err(message) => {
                self.quantity_error.publish(message.to_string());
                None
            }
        }
    }

    fn handles(
        &self,
    ) -> (Arc<dyn CustomRaffleRepository>, Arc<dyn PreferencesRepository>, SharedRng) {
        (Arc::clone(&self.repo), Arc::clone(&self.prefs), Arc::clone(&self.rng))
    }

    /// Map a failure onto screen state.
    fn report(&self, e: RaffleError) -> ScreenPhase {
        log::warn!("custom_raffle: {e}");
        match e {
            RaffleError::EmptyInput => {
                self.error.publish(self.messages.no_items_left.to_string());
                self.finish(ScreenPhase::Failed)
            }
            RaffleError::Validation { .. } => {
                self.quantity_error.publish(self.messages.exceeds_items.to_string());
                self.finish(ScreenPhase::ValidationFailed)
            }
            _ => {
                self.error.publish(self.messages.generic_error.to_string());
                self.finish(ScreenPhase::Failed)
            }
        }
    }

    fn succeed(&self) -> ScreenPhase {
        self.quantity_error.publish(String::new());
        self.error.publish(String::new());
        self.finish(ScreenPhase::Succeeded)
    }

    fn finish(&self, phase: ScreenPhase) -> ScreenPhase {
        self.phase.publish(phase);
        phase
    }
}

/// A missing preferences row means the default: do not remember.
fn remembers(prefs: &dyn PreferencesRepository) -> RaffleResult<bool> {
    match prefs.get_preferences() {
        Ok(p) => Ok(p.remember_raffled_items),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}
