use simplelist::store::{Store, TaskUpdate};
use simplelist::{DEFAULT_LIST_ID, Priority, Storage};
use std::fs;
use tempfile::TempDir;

#[test]
fn state_round_trips_through_a_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("simplelist_data_v1.json");

    let mut store = Store::new(Storage::new(&path));
    let groceries = store.create_list("Groceries").unwrap();
    let milk = store.create_task("Buy milk", &groceries).unwrap();
    store.create_task("Inbox task", DEFAULT_LIST_ID).unwrap();
    store.update_task(
        &milk,
        TaskUpdate {
            completed: Some(true),
            priority: Some(Some(Priority::High)),
            due_date: Some(Some(1_700_000_000_000)),
            ..Default::default()
        },
    );
    let doomed = store.create_task("never mind", DEFAULT_LIST_ID).unwrap();
    store.delete_task(&doomed);

    let lists_before: Vec<_> = store.lists().to_vec();
    let tasks_before: Vec<_> = store.tasks().to_vec();

    // A brand-new store against the same file sees the same state
    let reloaded = Store::new(Storage::new(&path));
    assert_eq!(reloaded.lists().len(), lists_before.len());
    assert_eq!(reloaded.tasks().len(), tasks_before.len());
    for (a, b) in lists_before.iter().zip(reloaded.lists()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.created_at, b.created_at);
    }
    for (a, b) in tasks_before.iter().zip(reloaded.tasks()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.completed, b.completed);
        assert_eq!(a.completed_at, b.completed_at);
        assert_eq!(a.priority, b.priority);
        assert_eq!(a.due_date, b.due_date);
        assert_eq!(a.list_id, b.list_id);
    }

    // The active list is session state, re-derived as the first list
    assert_eq!(reloaded.active_list_id(), reloaded.lists()[0].id);
}

#[test]
fn persisted_blob_uses_the_documented_json_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("simplelist_data_v1.json");

    let mut store = Store::new(Storage::new(&path));
    let id = store.create_task("shape check", DEFAULT_LIST_ID).unwrap();
    store.update_task(
        &id,
        TaskUpdate {
            completed: Some(true),
            ..Default::default()
        },
    );

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let lists = value["lists"].as_array().unwrap();
    assert_eq!(lists[0]["id"], DEFAULT_LIST_ID);
    assert!(lists[0]["createdAt"].is_i64());
    // Unset optional fields are omitted, not null
    assert!(lists[0].get("color").is_none());

    let tasks = value["tasks"].as_array().unwrap();
    assert_eq!(tasks[0]["listId"], DEFAULT_LIST_ID);
    assert_eq!(tasks[0]["completed"], true);
    assert!(tasks[0]["completedAt"].is_i64());
    assert!(tasks[0].get("priority").is_none());
}

#[test]
fn unreadable_blob_is_treated_as_first_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("simplelist_data_v1.json");
    fs::write(&path, "{ not json at all").unwrap();

    let store = Store::new(Storage::new(&path));

    assert_eq!(store.lists().len(), 1);
    assert_eq!(store.lists()[0].id, DEFAULT_LIST_ID);
    assert!(store.tasks().is_empty());
}

#[test]
fn missing_parent_directory_is_created_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deep").join("data.json");

    let mut store = Store::new(Storage::new(&path));
    store.create_task("hello", DEFAULT_LIST_ID).unwrap();

    assert!(path.exists());
}

#[test]
fn failed_saves_leave_the_store_usable() {
    let dir = TempDir::new().unwrap();
    // The parent "directory" is actually a file, so every save fails
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "in the way").unwrap();
    let path = blocker.join("data.json");

    let mut store = Store::new(Storage::new(&path));
    let id = store.create_task("still works", DEFAULT_LIST_ID).unwrap();

    // In-memory state is the source of truth; the write was dropped
    assert!(store.get_task(&id).is_some());
    assert!(!path.exists());
}
