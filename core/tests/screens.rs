//! Quick decision, custom raffle and preferences screens.

use raffler_core::{
    assets::JsonAssets,
    config::RafflerConfig,
    custom_raffle::{CustomRaffle, CustomRaffleRepository},
    device::InMemoryDeviceSettings,
    preferences::{PreferencesRepository, StoredPreferences},
    presentation::{
        custom_raffle::CustomRaffleViewModel, preferences::PreferencesViewModel,
        quick_decision::QuickDecisionViewModel, Dispatcher, Messages, ScreenPhase,
    },
    quick_decision::{QuickDecision, QuickDecisionRepository},
    store::{RafflerStore, SharedStore},
    types::{AppLanguage, AppTheme, RaffleId, RaffleMode},
    RaffleError, RaffleResult, Raffler,
};
use std::{collections::BTreeSet, sync::Arc};

// ── Test helpers ────────────────────────────────────────────────────────────

const SEED_JSON: &str = r#"[
    {"id": "yes_no", "locale": "en", "description": "Yes or no?", "values": ["Yes", "No"]},
    {"id": "sim_nao", "locale": "pt", "description": "Sim ou não?", "values": ["Sim", "Não"]}
]"#;

fn make_app() -> Raffler {
    let store = RafflerStore::in_memory().expect("in-memory store");
    Raffler::build(
        RafflerConfig::default_test(),
        store,
        Arc::new(InMemoryDeviceSettings::default()),
        Arc::new(JsonAssets::new(SEED_JSON)),
    )
    .expect("app")
}

fn save_raffle(app: &Raffler, items: &[&str]) -> RaffleId {
    app.custom_raffles
        .save_custom_raffle(&CustomRaffle::new("Team", items))
        .unwrap()
}

/// A migrated store whose mutex was poisoned by a panicking holder.
fn poisoned_store() -> SharedStore {
    let store = RafflerStore::in_memory().unwrap();
    store.migrate().unwrap();
    let store = store.shared();
    let held = store.clone();
    let _ = std::thread::spawn(move || {
        let _guard = held.lock().unwrap();
        panic!("poison");
    })
    .join();
    store
}

/// Accepts new decisions but can never list them.
struct UnlistableDecisions;

impl QuickDecisionRepository for UnlistableDecisions {
    fn all_quick_decisions(&self) -> RaffleResult<Vec<QuickDecision>> {
        Err(RaffleError::AssetParse("listing unavailable".into()))
    }

    fn add_quick_decisions(&self, _items: &[QuickDecision]) -> RaffleResult<()> {
        Ok(())
    }

    fn delete_quick_decision(&self, _id: &str) -> RaffleResult<()> {
        Ok(())
    }
}

fn messages() -> Messages {
    Messages::default()
}

// ── Quick decisions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn quick_decisions_load_for_the_device_language() {
    let app = make_app();
    let vm = app.quick_decision();

    vm.load().await;

    let ids: Vec<String> = vm.quick_decisions.current().unwrap().into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["yes_no"]);
    assert_eq!(vm.show_hint.current(), Some(true));
    assert_eq!(vm.show_add_new_hint.current(), Some(true));
}

#[tokio::test]
async fn decide_picks_one_of_the_values() {
    let app = make_app();
    let vm = app.quick_decision();
    vm.load().await;

    let phase = vm.decide("yes_no").await;

    assert_eq!(phase, ScreenPhase::Succeeded);
    let result = vm.result.current().unwrap();
    assert_eq!(result.description, "Yes or no?");
    assert!(["Yes", "No"].contains(&result.value.as_str()));
}

#[tokio::test]
async fn decide_on_unknown_id_fails() {
    let app = make_app();
    let vm = app.quick_decision();

    assert_eq!(vm.decide("nope").await, ScreenPhase::Failed);
    assert_eq!(vm.error.current().as_deref(), Some(messages().generic_error));
    assert!(!vm.result.has_value());
}

#[tokio::test]
async fn adding_a_decision_checks_every_field() {
    let app = make_app();
    let vm = app.quick_decision();

    let phase = vm.add_quick_decision(" ", &["only one"]).await;

    assert_eq!(phase, ScreenPhase::ValidationFailed);
    assert_eq!(vm.description_error.current().as_deref(), Some(messages().blank_description));
    assert_eq!(vm.values_error.current().as_deref(), Some(messages().too_few_values));

    let phase = vm.add_quick_decision("Where to?", &["Beach", " ", "Mountains"]).await;

    assert_eq!(phase, ScreenPhase::Succeeded);
    assert_eq!(vm.description_error.current().as_deref(), Some(""));
    assert_eq!(vm.values_error.current().as_deref(), Some(""));
    let added = vm
        .quick_decisions
        .current()
        .unwrap()
        .into_iter()
        .find(|d| d.description == "Where to?")
        .expect("new decision listed");
    assert_eq!(added.values, vec!["Beach", "Mountains"]);
}

#[tokio::test]
async fn a_successful_decision_clears_an_earlier_error() {
    let app = make_app();
    let vm = app.quick_decision();
    vm.load().await;

    assert_eq!(vm.decide("nope").await, ScreenPhase::Failed);
    assert_eq!(vm.error.current().as_deref(), Some(messages().generic_error));

    assert_eq!(vm.decide("yes_no").await, ScreenPhase::Succeeded);
    assert_eq!(vm.error.current().as_deref(), Some(""));
}

#[tokio::test]
async fn adding_a_decision_fails_when_the_list_cannot_be_reloaded() {
    let app = make_app();
    let vm = QuickDecisionViewModel::new(
        Arc::new(UnlistableDecisions),
        Arc::clone(&app.preferences),
        app.rng.clone(),
        AppLanguage::English,
        Dispatcher::Inline,
    );

    let phase = vm.add_quick_decision("Where to?", &["Beach", "Mountains"]).await;

    assert_eq!(phase, ScreenPhase::Failed);
    assert_eq!(vm.phase.current(), Some(ScreenPhase::Failed));
    assert_eq!(vm.error.current().as_deref(), Some(messages().generic_error));
}

#[tokio::test]
async fn dismissing_quick_decision_hints_hides_them() {
    let app = make_app();
    let vm = app.quick_decision();
    vm.dismiss_hints().await;

    let reloaded = app.quick_decision();
    reloaded.load().await;

    assert!(!reloaded.show_hint.has_value());
    assert!(!reloaded.show_add_new_hint.has_value());
}

// ── Custom raffles ──────────────────────────────────────────────────────────

#[tokio::test]
async fn roulette_without_memory_keeps_every_item() {
    let app = make_app();
    let id = save_raffle(&app, &["Ana", "Bo", "Cy"]);
    let vm = app.custom_raffle();

    for _ in 0..10 {
        assert_eq!(vm.spin_roulette(id).await, ScreenPhase::Succeeded);
    }

    assert_eq!(vm.custom_raffle.current().unwrap().included_items().len(), 3);
}

#[tokio::test]
async fn roulette_with_memory_never_repeats_until_reset() {
    let app = make_app();
    app.preferences.remember_raffled_items(true).unwrap();
    let id = save_raffle(&app, &["Ana", "Bo", "Cy"]);
    let vm = app.custom_raffle();

    let mut picked = BTreeSet::new();
    for _ in 0..3 {
        assert_eq!(vm.spin_roulette(id).await, ScreenPhase::Succeeded);
        picked.insert(vm.roulette_result.current().unwrap().description);
    }
    assert_eq!(picked.len(), 3, "each spin must pick a new item");

    assert_eq!(vm.spin_roulette(id).await, ScreenPhase::Failed);
    assert_eq!(vm.error.current().as_deref(), Some(messages().no_items_left));

    assert_eq!(vm.reset_items(id).await, ScreenPhase::Succeeded);
    assert_eq!(vm.custom_raffle.current().unwrap().included_items().len(), 3);
}

#[tokio::test]
async fn a_successful_spin_clears_an_earlier_error() {
    let app = make_app();
    let id = save_raffle(&app, &["Ana", "Bo", "Cy"]);
    let vm = app.custom_raffle();

    assert_eq!(vm.spin_roulette(42).await, ScreenPhase::Failed);
    assert_eq!(vm.error.current().as_deref(), Some(messages().generic_error));

    assert_eq!(vm.spin_roulette(id).await, ScreenPhase::Succeeded);
    assert_eq!(vm.error.current().as_deref(), Some(""));
}

#[tokio::test]
async fn a_successful_spin_clears_an_earlier_quantity_error() {
    let app = make_app();
    let id = save_raffle(&app, &["Ana", "Bo", "Cy"]);
    let vm = app.custom_raffle();

    assert_eq!(vm.draw_winners(id, "9").await, ScreenPhase::ValidationFailed);
    assert_eq!(vm.quantity_error.current().as_deref(), Some(messages().exceeds_items));

    assert_eq!(vm.spin_roulette(id).await, ScreenPhase::Succeeded);
    assert_eq!(vm.quantity_error.current().as_deref(), Some(""));
}

#[tokio::test]
async fn unreadable_preferences_stop_the_draw_instead_of_forgetting() {
    let app = make_app();
    let id = save_raffle(&app, &["Ana", "Bo", "Cy"]);
    let prefs = Arc::new(StoredPreferences::new(
        poisoned_store(),
        Arc::new(InMemoryDeviceSettings::default()),
    ));
    let vm = CustomRaffleViewModel::new(
        Arc::clone(&app.custom_raffles),
        prefs,
        app.rng.clone(),
        messages(),
        Dispatcher::Inline,
    );

    assert_eq!(vm.spin_roulette(id).await, ScreenPhase::Failed);
    assert_eq!(vm.error.current().as_deref(), Some(messages().generic_error));
    assert!(!vm.roulette_result.has_value());

    assert_eq!(vm.draw_winners(id, "2").await, ScreenPhase::Failed);
    assert!(!vm.winners.has_value());
}

#[tokio::test]
async fn remembering_without_a_preferences_row_falls_back_to_forgetting() {
    let app = make_app();
    let id = save_raffle(&app, &["Ana", "Bo", "Cy"]);
    let empty = RafflerStore::in_memory().unwrap();
    empty.migrate().unwrap();
    let prefs = Arc::new(StoredPreferences::new(
        empty.shared(),
        Arc::new(InMemoryDeviceSettings::default()),
    ));
    let vm = CustomRaffleViewModel::new(
        Arc::clone(&app.custom_raffles),
        prefs,
        app.rng.clone(),
        messages(),
        Dispatcher::Inline,
    );

    assert_eq!(vm.spin_roulette(id).await, ScreenPhase::Succeeded);
    assert_eq!(vm.custom_raffle.current().unwrap().included_items().len(), 3);
}

#[tokio::test]
async fn winners_are_validated_against_the_item_count() {
    let app = make_app();
    let id = save_raffle(&app, &["Ana", "Bo", "Cy"]);
    let vm = app.custom_raffle();

    assert_eq!(vm.draw_winners(id, "x").await, ScreenPhase::ValidationFailed);
    assert_eq!(vm.quantity_error.current().as_deref(), Some(messages().invalid_quantity));

    assert_eq!(vm.draw_winners(id, "4").await, ScreenPhase::ValidationFailed);
    assert_eq!(vm.quantity_error.current().as_deref(), Some(messages().exceeds_items));

    assert_eq!(vm.draw_winners(id, "2").await, ScreenPhase::Succeeded);
    assert_eq!(vm.winners.current().unwrap().len(), 2);
}

#[tokio::test]
async fn winners_are_excluded_when_remembering() {
    let app = make_app();
    app.preferences.remember_raffled_items(true).unwrap();
    let id = save_raffle(&app, &["Ana", "Bo", "Cy", "Di"]);
    let vm = app.custom_raffle();

    vm.draw_winners(id, "3").await;

    let raffle = app.custom_raffles.custom_raffle_by_id(id).unwrap();
    assert_eq!(raffle.included_items().len(), 1);
}

#[tokio::test]
async fn groups_split_every_included_item() {
    let app = make_app();
    let id = save_raffle(&app, &["a", "b", "c", "d", "e"]);
    let vm = app.custom_raffle();

    assert_eq!(vm.split_into_groups(id, "2").await, ScreenPhase::Succeeded);

    let groups = vm.groups.current().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), 5);
}

#[tokio::test]
async fn loading_a_missing_raffle_publishes_an_error() {
    let app = make_app();
    let vm = app.custom_raffle();

    vm.load(404).await;

    assert!(!vm.custom_raffle.has_value());
    assert_eq!(vm.error.current().as_deref(), Some(messages().generic_error));
}

#[tokio::test]
async fn raffle_details_hint_is_shown_once() {
    let app = make_app();
    let id = save_raffle(&app, &["a"]);
    let vm = app.custom_raffle();

    vm.load(id).await;
    assert_eq!(vm.show_hint.current(), Some(true));
    vm.dismiss_hint().await;

    let reloaded = app.custom_raffle();
    reloaded.load(id).await;
    assert!(!reloaded.show_hint.has_value());
}

// ── Preferences ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn preference_changes_are_republished() {
    let app = make_app();
    let vm = app.preferences_screen();

    vm.set_app_theme(AppTheme::Dark).await;
    vm.set_language(AppLanguage::Portuguese).await;
    vm.set_preferred_raffle_mode(RaffleMode::Grouping).await;
    let phase = vm.set_roulette_music_enabled(false).await;

    assert_eq!(phase, ScreenPhase::Succeeded);
    let prefs = vm.preferences.current().unwrap();
    assert_eq!(prefs.app_theme, AppTheme::Dark);
    assert_eq!(prefs.app_language, AppLanguage::Portuguese);
    assert_eq!(prefs.preferred_raffle_mode, RaffleMode::Grouping);
    assert!(!prefs.roulette_music_enabled);
}

#[tokio::test]
async fn lottery_default_is_validated_before_saving() {
    let app = make_app();
    let vm = app.preferences_screen();

    assert_eq!(vm.set_lottery_default("10", "11").await, ScreenPhase::ValidationFailed);
    assert_eq!(vm.quantity_to_raffle_error.current().as_deref(), Some(messages().exceeds_available));
    assert_eq!(app.preferences.get_preferences().unwrap().lottery_default_quantity_available, "60");

    assert_eq!(vm.set_lottery_default("25", "5").await, ScreenPhase::Succeeded);
    let prefs = vm.preferences.current().unwrap();
    assert_eq!(prefs.lottery_default_quantity_available, "25");
    assert_eq!(prefs.lottery_default_quantity_to_raffle, "5");
}

#[tokio::test]
async fn lottery_default_above_the_configured_maximum_uses_the_lottery_message() {
    let app = make_app();
    let prefs_vm = app.preferences_screen();
    let lottery_vm = app.lottery();

    assert_eq!(prefs_vm.set_lottery_default("500", "200").await, ScreenPhase::ValidationFailed);
    lottery_vm.get_lottery_numbers("500", "200").await;

    assert_eq!(prefs_vm.quantity_to_raffle_error.current().as_deref(), Some(messages().above_maximum));
    assert_eq!(
        prefs_vm.quantity_to_raffle_error.current(),
        lottery_vm.quantity_to_raffle_error.current()
    );
}

#[tokio::test]
async fn a_successful_change_clears_an_earlier_error() {
    let config = RafflerConfig::default_test();
    let store = RafflerStore::in_memory().unwrap();
    store.migrate().unwrap();
    let prefs = Arc::new(StoredPreferences::new(
        store.shared(),
        Arc::new(InMemoryDeviceSettings::default()),
    ));
    let vm = PreferencesViewModel::new(prefs.clone(), config.lottery.clone(), messages(), Dispatcher::Inline);

    assert_eq!(vm.set_roulette_music_enabled(false).await, ScreenPhase::Failed);
    assert_eq!(vm.error.current().as_deref(), Some(messages().generic_error));

    prefs.ensure_preferences(&config.defaults).unwrap();
    assert_eq!(vm.set_roulette_music_enabled(false).await, ScreenPhase::Succeeded);
    assert_eq!(vm.error.current().as_deref(), Some(""));
}

#[tokio::test]
async fn reset_hints_brings_hints_back() {
    let app = make_app();
    app.preferences.set_lottery_hint_dismissed().unwrap();
    let vm = app.preferences_screen();

    vm.reset_hints().await;

    assert!(!app.preferences.lottery_hint_displayed());
    assert!(vm.preferences.current().unwrap().hints_displayed.is_empty());
}

#[tokio::test]
async fn localised_messages_follow_the_device_language() {
    let app = make_app();
    app.preferences.set_language(AppLanguage::Spanish).unwrap();

    let vm = app.lottery();
    vm.get_lottery_numbers("", "1").await;

    assert_eq!(
        vm.quantity_available_error.current().as_deref(),
        Some(Messages::for_language(AppLanguage::Spanish).invalid_quantity)
    );
}
