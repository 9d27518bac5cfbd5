use super::{Dispatcher, Messages, Observable, ScreenPhase};
use crate::{
    draw,
    error::RaffleError,
    preferences::PreferencesRepository,
    quick_decision::{QuickDecision, QuickDecisionRepository},
    rng::{self, SharedRng},
    types::AppLanguage,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The value picked for a quick decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickDecisionResult {
    pub description: String,
    pub value: String,
}

pub struct QuickDecisionViewModel {
    repo: Arc<dyn QuickDecisionRepository>,
    prefs: Arc<dyn PreferencesRepository>,
    rng: SharedRng,
    messages: Messages,
    language: AppLanguage,
    dispatcher: Dispatcher,

    pub quick_decisions: Observable<Vec<QuickDecision>>,
    pub show_hint: Observable<bool>,
    pub show_add_new_hint: Observable<bool>,
    pub result: Observable<QuickDecisionResult>,
    pub description_error: Observable<String>,
    pub values_error: Observable<String>,
    pub error: Observable<String>,
    pub phase: Observable<ScreenPhase>,
}

impl QuickDecisionViewModel {
    pub fn new(
        repo: Arc<dyn QuickDecisionRepository>,
        prefs: Arc<dyn PreferencesRepository>,
        rng: SharedRng,
        language: AppLanguage,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            repo,
            prefs,
            rng,
            messages: Messages::for_language(language),
            language,
            dispatcher,
            quick_decisions: Observable::new(),
            show_hint: Observable::new(),
            show_add_new_hint: Observable::new(),
            result: Observable::new(),
            description_error: Observable::new(),
            values_error: Observable::new(),
            error: Observable::new(),
            phase: Observable::new(),
        }
    }

    pub async fn load(&self) -> ScreenPhase {
        let repo = Arc::clone(&self.repo);
        let prefs = Arc::clone(&self.prefs);
        let loaded = self
            .dispatcher
            .in_background(move || {
                let hints = (
                    prefs.quick_decision_hint_displayed(),
                    prefs.add_new_quick_decision_hint_displayed(),
                );
                repo.all_quick_decisions().map(|items| (items, hints))
            })
            .await;

        match loaded {
            Ok((items, (hint_displayed, add_new_hint_displayed))) => {
                let locale = self.language.as_str();
                let visible = items
                    .into_iter()
                    .filter(|d| d.locale == locale || d.locale.is_empty())
                    .collect();
                self.quick_decisions.publish(visible);
                if !hint_displayed {
                    self.show_hint.publish(true);
                }
                if !add_new_hint_displayed {
                    self.show_add_new_hint.publish(true);
                }
                self.error.publish(String::new());
                self.finish(ScreenPhase::Succeeded)
            }
            Err(e) => {
                log::warn!("quick_decision: load failed: {e}");
                self.error.publish(self.messages.generic_error.to_string());
                self.finish(ScreenPhase::Failed)
            }
        }
    }

    /// Pick one value of the decision `id`.
    pub async fn decide(&self, id: &str) -> ScreenPhase {
        self.phase.publish(ScreenPhase::Dispatching);
        let known = self.quick_decisions.current().unwrap_or_default();
        let repo = Arc::clone(&self.repo);
        let rng = Arc::clone(&self.rng);
        let id = id.to_string();

        let picked = self
            .dispatcher
            .in_background(move || {
                let decision = match known.into_iter().find(|d| d.id == id) {
                    Some(d) => d,
                    None => repo
                        .all_quick_decisions()?
                        .into_iter()
                        .find(|d| d.id == id)
                        .ok_or_else(|| RaffleError::not_found(format!("quick decision {id}")))?,
                };
                let mut guard = rng::lock(&rng)?;
                let value = draw::pick_random(&decision.values, &mut guard)?.clone();
                Ok(QuickDecisionResult {
                    description: decision.description,
                    value,
                })
            })
            .await;

        match picked {
            Ok(result) => {
                log::debug!("quick_decision: {} -> {}", result.description, result.value);
                self.result.publish(result);
                self.error.publish(String::new());
                self.finish(ScreenPhase::Succeeded)
            }
            Err(e) => {
                log::warn!("quick_decision: decide failed: {e}");
                self.error.publish(self.messages.generic_error.to_string());
                self.finish(ScreenPhase::Failed)
            }
        }
    }

    /// Save a user-entered decision. Both fields are checked before returning.
    pub async fn add_quick_decision(&self, description: &str, values: &[&str]) -> ScreenPhase {
        self.phase.publish(ScreenPhase::Validating);

        let description = description.trim().to_string();
        let values: Vec<String> = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();

        let description_ok = !description.is_empty();
        self.description_error.publish(if description_ok {
            String::new()
        } else {
            self.messages.blank_description.to_string()
        });
        let values_ok = values.len() >= 2;
        self.values_error.publish(if values_ok {
            String::new()
        } else {
            self.messages.too_few_values.to_string()
        });
        if !(description_ok && values_ok) {
            return self.finish(ScreenPhase::ValidationFailed);
        }

        self.phase.publish(ScreenPhase::Dispatching);
        let repo = Arc::clone(&self.repo);
        let rng = Arc::clone(&self.rng);
        let locale = self.language.as_str().to_string();
        let saved = self
            .dispatcher
            .in_background(move || {
                let id = format!("user_{:016x}", rng::lock(&rng)?.next_u64());
                let decision = QuickDecision {
                    id,
                    locale,
                    description,
                    values,
                };
                repo.add_quick_decisions(std::slice::from_ref(&decision))
            })
            .await;

        match saved {
            // The reload publishes the list and its own phase.
            Ok(()) => self.load().await,
            Err(e) => {
                log::warn!("quick_decision: add failed: {e}");
                self.error.publish(self.messages.generic_error.to_string());
                self.finish(ScreenPhase::Failed)
            }
        }
    }

    pub async fn dismiss_hints(&self) {
        let prefs = Arc::clone(&self.prefs);
        if let Err(e) = self
            .dispatcher
            .in_background(move || {
                prefs.set_quick_decision_hint_dismissed()?;
                prefs.set_add_new_quick_decision_hint_dismissed()
            })
            .await
        {
            log::warn!("quick_decision: could not dismiss hints: {e}");
            self.error.publish(self.messages.generic_error.to_string());
        }
    }

    fn finish(&self, phase: ScreenPhase) -> ScreenPhase {
        self.phase.publish(phase);
        phase
    }
}
