use raffler_core::{
    custom_raffle::{CustomRaffle, CustomRaffleItem, CustomRaffleRepository, StoredCustomRaffles},
    store::{RafflerStore, SharedStore},
    RaffleError,
};

// ── Test helpers ────────────────────────────────────────────────────────────

fn make_store() -> SharedStore {
    let store = RafflerStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store.shared()
}

fn make_repo() -> StoredCustomRaffles {
    StoredCustomRaffles::new(make_store())
}

fn descriptions(raffle: &CustomRaffle) -> Vec<&str> {
    raffle.items.iter().map(|i| i.description.as_str()).collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn saved_raffle_reads_back_in_order() {
    let repo = make_repo();

    let id = repo
        .save_custom_raffle(&CustomRaffle::new("Lunch", &["Pizza", "Sushi", "Tacos"]))
        .unwrap();

    let raffle = repo.custom_raffle_by_id(id).unwrap();
    assert_eq!(raffle.id, id);
    assert_eq!(raffle.description, "Lunch");
    assert_eq!(descriptions(&raffle), vec!["Pizza", "Sushi", "Tacos"]);
    assert!(raffle.items.iter().all(|i| i.included && i.id != 0));
}

#[test]
fn saving_with_an_existing_id_replaces_description_and_items() {
    let repo = make_repo();
    let id = repo
        .save_custom_raffle(&CustomRaffle::new("Lunch", &["Pizza", "Sushi"]))
        .unwrap();

    let mut edited = repo.custom_raffle_by_id(id).unwrap();
    edited.description = "Dinner".into();
    edited.items.remove(0);
    edited.items.push(CustomRaffleItem::new("Ramen"));
    let same_id = repo.save_custom_raffle(&edited).unwrap();

    assert_eq!(same_id, id);
    let raffle = repo.custom_raffle_by_id(id).unwrap();
    assert_eq!(raffle.description, "Dinner");
    assert_eq!(descriptions(&raffle), vec!["Sushi", "Ramen"]);
    assert_eq!(repo.all_custom_raffles().unwrap().len(), 1);
}

#[test]
fn unknown_raffle_is_not_found() {
    let repo = make_repo();
    assert!(repo.custom_raffle_by_id(99).unwrap_err().is_not_found());
    assert!(repo.delete_custom_raffle(99).unwrap_err().is_not_found());
}

#[test]
fn blank_description_is_rejected() {
    let repo = make_repo();
    let err = repo.save_custom_raffle(&CustomRaffle::new("  ", &["a"])).unwrap_err();
    assert!(matches!(err, RaffleError::Validation { field: "description", .. }));
}

#[test]
fn all_custom_raffles_lists_every_raffle() {
    let repo = make_repo();
    repo.save_custom_raffle(&CustomRaffle::new("One", &["a"])).unwrap();
    repo.save_custom_raffle(&CustomRaffle::new("Two", &["b", "c"])).unwrap();

    let all = repo.all_custom_raffles().unwrap();

    let names: Vec<&str> = all.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(names, vec!["One", "Two"]);
    assert_eq!(all[1].items.len(), 2);
}

#[test]
fn deleting_a_raffle_removes_it() {
    let repo = make_repo();
    let id = repo.save_custom_raffle(&CustomRaffle::new("Gone", &["a", "b"])).unwrap();

    repo.delete_custom_raffle(id).unwrap();

    assert!(repo.custom_raffle_by_id(id).unwrap_err().is_not_found());
    assert!(repo.all_custom_raffles().unwrap().is_empty());
}

#[test]
fn excluded_items_drop_out_until_reset() {
    let repo = make_repo();
    let id = repo
        .save_custom_raffle(&CustomRaffle::new("Team", &["Ana", "Bo", "Cy"]))
        .unwrap();
    let bo = repo.custom_raffle_by_id(id).unwrap().items[1].id;

    repo.set_item_included(id, bo, false).unwrap();

    let raffle = repo.custom_raffle_by_id(id).unwrap();
    let included: Vec<String> = raffle.included_items().into_iter().map(|i| i.description).collect();
    assert_eq!(included, vec!["Ana", "Cy"]);

    repo.include_all_items(id).unwrap();
    assert_eq!(repo.custom_raffle_by_id(id).unwrap().included_items().len(), 3);
}

#[test]
fn excluding_an_item_of_another_raffle_is_not_found() {
    let repo = make_repo();
    let a = repo.save_custom_raffle(&CustomRaffle::new("A", &["x"])).unwrap();
    let b = repo.save_custom_raffle(&CustomRaffle::new("B", &["y"])).unwrap();
    let item_of_b = repo.custom_raffle_by_id(b).unwrap().items[0].id;

    assert!(repo.set_item_included(a, item_of_b, false).unwrap_err().is_not_found());
}
