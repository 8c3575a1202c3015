use grocery_core::{
    AppData, GroceryList, GrocerySession, HydrationSource, ListId, LoadOutcome,
    MemorySlotRepository, NewItem, PersistenceAdapter, RepoError, RepoResult, SlotRepository,
    SqliteSlotRepository, APP_DATA_SLOT_KEY,
};
use std::cell::Cell;
use std::rc::Rc;

/// Memory slots whose reads or writes can be switched to fail.
#[derive(Default)]
struct FlakySlotRepository {
    inner: MemorySlotRepository,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl FlakySlotRepository {
    fn storage_error() -> RepoError {
        RepoError::from(rusqlite::Error::InvalidQuery)
    }
}

impl SlotRepository for FlakySlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(Self::storage_error());
        }
        self.inner.read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(Self::storage_error());
        }
        self.inner.write_slot(key, value)
    }

    fn remove_slot(&self, key: &str) -> RepoResult<bool> {
        if self.fail_writes.get() {
            return Err(Self::storage_error());
        }
        self.inner.remove_slot(key)
    }
}

fn sample_data() -> AppData {
    let mut session = GrocerySession::open(MemorySlotRepository::new());
    session.on_create_list("Weekly");
    session.on_add_item(NewItem::new("Apples", "2 lbs", 1.99));
    let milk = session.on_add_item(NewItem::new("Milk", "1 gal", 3.49));
    session.on_toggle_bought(milk.id.as_deref().unwrap());
    session.store().data().clone()
}

#[test]
fn save_then_load_roundtrips() {
    let data = sample_data();
    let adapter = PersistenceAdapter::new(MemorySlotRepository::new());

    adapter.save(&data).unwrap();
    assert_eq!(adapter.load(), LoadOutcome::Loaded(data));
}

#[test]
fn item_missing_price_is_treated_as_no_data() {
    let adapter = PersistenceAdapter::new(MemorySlotRepository::new());
    let malformed = serde_json::json!({
        "lists": [{
            "id": "l1",
            "name": "Weekly",
            "items": [{ "id": "i1", "name": "Apples", "quantity": "2 lbs", "bought": false }]
        }],
        "currentListId": "l1"
    });
    adapter
        .repo()
        .write_slot(APP_DATA_SLOT_KEY, &malformed.to_string())
        .unwrap();

    let outcome = adapter.load();
    assert!(matches!(outcome, LoadOutcome::Corrupt(_)), "{outcome:?}");
    assert_eq!(outcome.into_data(), None);
    assert_eq!(adapter.repo().read_slot(APP_DATA_SLOT_KEY).unwrap(), None);
}

#[test]
fn wrong_field_types_are_rejected_wholesale() {
    let cases = [
        r#"{"lists": {}, "currentListId": null}"#,
        r#"{"lists": [{"id": 1, "name": "A", "items": []}]}"#,
        r#"{"lists": [{"id": "a", "name": "A", "items": [{"id": "i", "name": "x", "price": "1.00", "quantity": "1", "bought": false}]}]}"#,
        r#"{"lists": [{"id": "a", "name": "A", "items": [{"id": "i", "name": "x", "price": 1.0, "quantity": "1", "bought": "no"}]}]}"#,
        r#"[1, 2, 3]"#,
    ];
    for raw in cases {
        let adapter = PersistenceAdapter::new(MemorySlotRepository::new());
        adapter.repo().write_slot(APP_DATA_SLOT_KEY, raw).unwrap();
        assert!(
            matches!(adapter.load(), LoadOutcome::Corrupt(_)),
            "accepted malformed value: {raw}"
        );
    }
}

#[test]
fn stale_current_list_falls_back_to_first_list() {
    let data = AppData {
        lists: vec![
            GroceryList::new(ListId::from("a"), "A"),
            GroceryList::new(ListId::from("b"), "B"),
        ],
        current_list_id: Some(ListId::from("deleted")),
    };
    let adapter = PersistenceAdapter::new(MemorySlotRepository::new());
    adapter.save(&data).unwrap();

    let loaded = adapter.load().into_data().unwrap();
    assert_eq!(loaded.current_list_id, Some(ListId::from("a")));
}

#[test]
fn missing_current_list_id_field_is_accepted() {
    let adapter = PersistenceAdapter::new(MemorySlotRepository::new());
    adapter
        .repo()
        .write_slot(
            APP_DATA_SLOT_KEY,
            r#"{"lists": [{"id": "a", "name": "A", "items": []}]}"#,
        )
        .unwrap();

    let loaded = adapter.load().into_data().unwrap();
    assert_eq!(loaded.current_list_id, Some(ListId::from("a")));
}

#[test]
fn values_under_other_keys_are_ignored() {
    let repo = MemorySlotRepository::new();
    repo.write_slot("grocery_app_data_v0", r#"[{"id":"x"}]"#)
        .unwrap();

    let session = GrocerySession::open(repo);
    assert_eq!(session.source(), HydrationSource::SeededDefault);
}

#[test]
fn session_writes_through_after_each_change() {
    let repo = Rc::new(MemorySlotRepository::new());
    let mut session = GrocerySession::open(Rc::clone(&repo));

    let seeded = repo.read_slot(APP_DATA_SLOT_KEY).unwrap().unwrap();
    assert!(seeded.contains("My Grocery List"));

    session.on_create_list("Weekly");
    session.on_add_item(NewItem::new("Apples", "2 lbs", 1.99));

    let stored: AppData =
        serde_json::from_str(&repo.read_slot(APP_DATA_SLOT_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(&stored, session.store().data());
}

#[test]
fn corrupt_slot_is_replaced_by_default_list() {
    let repo = Rc::new(MemorySlotRepository::new());
    repo.write_slot(APP_DATA_SLOT_KEY, "garbage").unwrap();

    let session = GrocerySession::open(Rc::clone(&repo));
    assert_eq!(session.source(), HydrationSource::RecoveredFromCorrupt);
    assert_eq!(session.store().lists().len(), 1);

    let stored: AppData =
        serde_json::from_str(&repo.read_slot(APP_DATA_SLOT_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.lists.len(), 1);
}

#[test]
fn sqlite_slot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grocery.sqlite3");

    let list_id = {
        let mut session = GrocerySession::open(SqliteSlotRepository::open(&path).unwrap());
        let created = session.on_create_list("Weekly");
        session.submit_item_form("Apples", "2 lbs", "1.99");
        created.id.unwrap()
    };

    let session = GrocerySession::open(SqliteSlotRepository::open(&path).unwrap());
    assert_eq!(session.source(), HydrationSource::Restored);
    assert_eq!(session.store().lists().len(), 2);
    assert_eq!(
        session.store().current_list_id(),
        Some(&ListId::from(list_id.as_str()))
    );
    assert_eq!(session.total_label(), "$1.99");
}

#[test]
fn unreadable_slot_is_never_overwritten() {
    let repo = Rc::new(FlakySlotRepository::default());
    let stored = serde_json::json!({
        "lists": [{ "id": "keep", "name": "Precious", "items": [] }],
        "currentListId": "keep"
    })
    .to_string();
    repo.write_slot(APP_DATA_SLOT_KEY, &stored).unwrap();
    repo.fail_reads.set(true);

    let mut session = GrocerySession::open(Rc::clone(&repo));
    assert_eq!(session.source(), HydrationSource::StorageUnavailable);
    assert_eq!(session.store().lists().len(), 1);

    session.on_create_list("Weekly");
    session.submit_item_form("Apples", "2 lbs", "1.99");
    assert_eq!(session.store().lists().len(), 2);
    assert_eq!(session.total_label(), "$1.99");

    repo.fail_reads.set(false);
    assert_eq!(
        repo.read_slot(APP_DATA_SLOT_KEY).unwrap().as_deref(),
        Some(stored.as_str())
    );
}

#[test]
fn failed_writes_keep_memory_state_authoritative() {
    let repo = Rc::new(FlakySlotRepository::default());
    repo.fail_writes.set(true);

    let mut session = GrocerySession::open(Rc::clone(&repo));
    assert_eq!(session.source(), HydrationSource::SeededDefault);

    let created = session.on_create_list("Weekly");
    assert!(created.ok);
    let milk = session.submit_item_form("Milk", "1 gal", "3.49");
    assert!(milk.ok);
    assert!(session.on_toggle_bought(milk.id.as_deref().unwrap()).ok);

    assert_eq!(session.store().lists().len(), 2);
    assert!(session.store().current_items()[0].bought);
    assert_eq!(session.total_label(), "$3.49");
    assert_eq!(repo.inner.read_slot(APP_DATA_SLOT_KEY).unwrap(), None);
}
