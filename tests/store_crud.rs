use simplelist::store::{ListUpdate, Store, TaskUpdate};
use simplelist::{DEFAULT_LIST_ID, Priority, Storage};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> Store {
    Store::new(Storage::new(dir.path().join("simplelist_data_v1.json")))
}

#[test]
fn first_run_seeds_the_inbox_list() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.lists().len(), 1);
    let inbox = &store.lists()[0];
    assert_eq!(inbox.id, DEFAULT_LIST_ID);
    assert_eq!(inbox.title, "Inbox");
    assert!(store.tasks().is_empty());
    assert_eq!(store.active_list_id(), DEFAULT_LIST_ID);
}

#[test]
fn create_list_trims_and_becomes_active() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let id = store.create_list("  Groceries  ").unwrap();
    let list = store.get_list(&id).unwrap();
    assert_eq!(list.title, "Groceries");
    assert_eq!(store.active_list_id(), id);

    // Duplicate titles are allowed for lists
    let second = store.create_list("Groceries").unwrap();
    assert_ne!(id, second);
    assert_eq!(store.lists().len(), 3);
}

#[test]
fn blank_titles_are_silent_no_ops() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    assert!(store.create_list("   ").is_none());
    assert!(store.create_task("", DEFAULT_LIST_ID).is_none());
    assert_eq!(store.lists().len(), 1);
    assert!(store.tasks().is_empty());
}

#[test]
fn unknown_ids_are_silent_no_ops() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.create_task("real", DEFAULT_LIST_ID).unwrap();

    store.update_list(
        "missing",
        ListUpdate {
            title: Some("x".to_string()),
            ..Default::default()
        },
    );
    store.update_task(
        "missing",
        TaskUpdate {
            completed: Some(true),
            ..Default::default()
        },
    );
    store.delete_task("missing");
    store.delete_list("missing");

    assert_eq!(store.lists().len(), 1);
    assert_eq!(store.tasks().len(), 1);
    assert!(!store.tasks()[0].completed);
}

#[test]
fn update_list_merges_fields_and_refreshes_updated_at() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let id = store.create_list("Work").unwrap();
    let created_updated_at = store.get_list(&id).unwrap().updated_at;

    store.update_list(
        &id,
        ListUpdate {
            color: Some(Some("cyan".to_string())),
            ..Default::default()
        },
    );

    let list = store.get_list(&id).unwrap();
    assert_eq!(list.title, "Work");
    assert_eq!(list.color.as_deref(), Some("cyan"));
    assert!(list.updated_at >= created_updated_at);
}

#[test]
fn default_list_is_never_deleted() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.create_list("Other").unwrap();

    store.delete_list(DEFAULT_LIST_ID);

    assert!(store.get_list(DEFAULT_LIST_ID).is_some());
    assert_eq!(store.lists().len(), 2);
}

#[test]
fn delete_list_cascades_to_its_tasks() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let keep = store.create_task("keep me", DEFAULT_LIST_ID).unwrap();
    let doomed = store.create_list("Doomed").unwrap();
    store.create_task("one", &doomed).unwrap();
    store.create_task("two", &doomed).unwrap();
    store.create_task("three", &doomed).unwrap();
    let total_before = store.tasks().len();

    store.delete_list(&doomed);

    assert!(store.get_tasks_by_list(&doomed).is_empty());
    assert_eq!(store.tasks().len(), total_before - 3);
    assert!(store.get_task(&keep).is_some());
}

#[test]
fn deleting_the_active_list_moves_selection_to_first_remaining() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let doomed = store.create_list("Doomed").unwrap();
    assert_eq!(store.active_list_id(), doomed);

    store.delete_list(&doomed);

    // The Inbox is the first remaining list
    assert_eq!(store.active_list_id(), DEFAULT_LIST_ID);
}

#[test]
fn deleting_an_inactive_list_keeps_the_selection() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let doomed = store.create_list("Doomed").unwrap();
    let active = store.create_list("Active").unwrap();

    store.delete_list(&doomed);

    assert_eq!(store.active_list_id(), active);
}

#[test]
fn completion_toggle_owns_completed_at() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let id = store.create_task("toggle me", DEFAULT_LIST_ID).unwrap();

    store.update_task(
        &id,
        TaskUpdate {
            completed: Some(true),
            ..Default::default()
        },
    );
    let task = store.get_task(&id).unwrap();
    assert!(task.completed);
    assert!(task.completed_at.is_some());

    store.update_task(
        &id,
        TaskUpdate {
            completed: Some(false),
            ..Default::default()
        },
    );
    let task = store.get_task(&id).unwrap();
    assert!(!task.completed);
    assert!(task.completed_at.is_none());
}

#[test]
fn derived_completed_at_beats_caller_supplied_value_on_completion() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let id = store.create_task("strict", DEFAULT_LIST_ID).unwrap();

    let before = simplelist::utils::now_millis();
    store.update_task(
        &id,
        TaskUpdate {
            completed: Some(true),
            completed_at: Some(Some(12345)),
            ..Default::default()
        },
    );

    let stamped = store.get_task(&id).unwrap().completed_at.unwrap();
    assert!(stamped >= before, "the derived timestamp wins on the edge");

    // Off the edge, a caller-supplied value passes through
    store.update_task(
        &id,
        TaskUpdate {
            completed_at: Some(Some(777)),
            ..Default::default()
        },
    );
    assert_eq!(store.get_task(&id).unwrap().completed_at, Some(777));
}

#[test]
fn update_task_clears_optional_fields() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let id = store.create_task("full", DEFAULT_LIST_ID).unwrap();

    store.update_task(
        &id,
        TaskUpdate {
            description: Some(Some("details".to_string())),
            priority: Some(Some(Priority::High)),
            due_date: Some(Some(1_700_000_000_000)),
            ..Default::default()
        },
    );
    let task = store.get_task(&id).unwrap();
    assert_eq!(task.description.as_deref(), Some("details"));
    assert_eq!(task.priority, Some(Priority::High));

    store.update_task(
        &id,
        TaskUpdate {
            description: Some(None),
            priority: Some(None),
            due_date: Some(None),
            ..Default::default()
        },
    );
    let task = store.get_task(&id).unwrap();
    assert!(task.description.is_none());
    assert!(task.priority.is_none());
    assert!(task.due_date.is_none());
}

#[test]
fn get_tasks_by_list_keeps_insertion_order_and_ignores_completion() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let first = store.create_task("first", DEFAULT_LIST_ID).unwrap();
    let second = store.create_task("second", DEFAULT_LIST_ID).unwrap();
    store.create_list("Other").unwrap();
    let other_id = store.active_list_id().to_string();
    store.create_task("elsewhere", &other_id).unwrap();

    store.update_task(
        &first,
        TaskUpdate {
            completed: Some(true),
            ..Default::default()
        },
    );

    let tasks = store.get_tasks_by_list(DEFAULT_LIST_ID);
    let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, [first.as_str(), second.as_str()]);
}

#[test]
fn task_title_check_is_case_insensitive_and_per_list() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store.create_task("Buy Milk", DEFAULT_LIST_ID).unwrap();
    let other = store.create_list("Other").unwrap();

    assert!(store.task_title_exists(DEFAULT_LIST_ID, "buy milk"));
    assert!(store.task_title_exists(DEFAULT_LIST_ID, "  BUY MILK "));
    assert!(!store.task_title_exists(&other, "buy milk"));
}

#[test]
fn set_active_list_is_unconditional() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store.set_active_list("never-created");
    assert_eq!(store.active_list_id(), "never-created");
}

#[test]
fn orphaned_tasks_are_kept_but_invisible() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    // A task referencing a list that never existed (e.g. corrupted data)
    let id = store.create_task("ghost", "no-such-list").unwrap();

    for list in store.lists().to_vec() {
        assert!(
            store
                .get_tasks_by_list(&list.id)
                .iter()
                .all(|task| task.id != id)
        );
    }
    // No garbage collection pass: the task itself survives
    assert!(store.get_task(&id).is_some());
}
