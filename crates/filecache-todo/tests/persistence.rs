use std::fs;

use chrono::{DateTime, Utc};
use filecache_core::{
    DirStorage, FileCache, FileCacheError, LineSeparator, LoadReport, PersistOptions,
};
use filecache_todo::{Importance, TodoItem};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn todo(id: &str, text: &str) -> TodoItem {
    TodoItem::new(text)
        .with_id(id)
        .with_created_at(at(1_720_000_000))
}

fn sample_items() -> Vec<TodoItem> {
    let mut done = todo("3", "file taxes").with_importance(Importance::Low);
    done.set_done(true);
    vec![
        todo("1", "buy milk"),
        todo("2", "ship release")
            .with_importance(Importance::High)
            .with_deadline(at(1_720_500_000)),
        done,
    ]
}

fn sorted(mut items: Vec<TodoItem>) -> Vec<TodoItem> {
    items.sort_by(|a, b| a.id.cmp(&b.id));
    items
}

// ── Round trips ─────────────────────────────────────────────────────

#[test]
fn json_round_trip_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let items = sample_items();
    let cache = FileCache::with_storage(items.clone(), DirStorage::new(tmp.path()));
    cache.save("todos.json", &PersistOptions::json()).unwrap();
    assert!(tmp.path().join("todos.json").is_file());

    let mut fresh: FileCache<TodoItem, _> =
        FileCache::with_storage(Vec::new(), DirStorage::new(tmp.path()));
    let report = fresh.load("todos.json", &PersistOptions::json()).unwrap();
    assert_eq!(report, LoadReport { loaded: 3, dropped: 0 });
    assert_eq!(sorted(fresh.into_items()), sorted(items));
}

#[test]
fn csv_round_trip_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let items = sample_items();
    let cache = FileCache::with_storage(items.clone(), DirStorage::new(tmp.path()));
    let opts = PersistOptions::csv(";");
    cache.save("todos.csv", &opts).unwrap();

    let mut fresh: FileCache<TodoItem, _> =
        FileCache::with_storage(Vec::new(), DirStorage::new(tmp.path()));
    fresh.load("todos.csv", &opts).unwrap();
    assert_eq!(sorted(fresh.into_items()), sorted(items));
}

#[test]
fn csv_file_uses_legacy_line_token() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::with_storage(vec![todo("1", "buy milk")], DirStorage::new(tmp.path()));
    cache.save("todos.csv", &PersistOptions::csv(",")).unwrap();

    let text = fs::read_to_string(tmp.path().join("todos.csv")).unwrap();
    assert_eq!(
        text,
        "id,text,importance,deadline,done,created_at,modified_at/n1,buy milk,normal,,false,1720000000,"
    );
    assert!(!text.contains('\n'));
}

#[test]
fn csv_newline_separated_file() {
    let tmp = tempfile::tempdir().unwrap();
    let items = sample_items();
    let cache = FileCache::with_storage(items.clone(), DirStorage::new(tmp.path()));
    let opts = PersistOptions::csv(",").with_line_separator(LineSeparator::Newline);
    cache.save("todos.csv", &opts).unwrap();

    let text = fs::read_to_string(tmp.path().join("todos.csv")).unwrap();
    assert_eq!(text.lines().count(), 4);

    let mut fresh: FileCache<TodoItem, _> =
        FileCache::with_storage(Vec::new(), DirStorage::new(tmp.path()));
    fresh.load("todos.csv", &opts).unwrap();
    assert_eq!(fresh.items(), items.as_slice());
}

// ── Collection behaviour ────────────────────────────────────────────

#[test]
fn add_and_remove() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cache = FileCache::with_storage(vec![todo("1", "a")], DirStorage::new(tmp.path()));

    let err = cache.add(todo("1", "b")).unwrap_err();
    assert!(matches!(err, FileCacheError::DuplicateId { .. }));
    assert_eq!(cache.len(), 1);

    cache.add(todo("2", "b")).unwrap();
    let removed = cache.remove_item(&"1".to_string()).unwrap();
    assert_eq!(removed.text, "a");
    assert_eq!(cache.items(), &[todo("2", "b")]);
}

// ── Error paths and tolerance ───────────────────────────────────────

#[test]
fn missing_file_leaves_cache_alone() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cache = FileCache::with_storage(sample_items(), DirStorage::new(tmp.path()));
    let before = cache.items().to_vec();

    for opts in [PersistOptions::json(), PersistOptions::csv(",")] {
        let err = cache.load("absent", &opts).unwrap_err();
        assert!(matches!(err, FileCacheError::FileNotFound { .. }));
    }
    assert_eq!(cache.items(), before.as_slice());
}

#[test]
fn header_only_csv_loads_empty() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("todos.csv"),
        "id,text,importance,deadline,done,created_at,modified_at",
    )
    .unwrap();

    let mut cache = FileCache::with_storage(sample_items(), DirStorage::new(tmp.path()));
    cache.load("todos.csv", &PersistOptions::csv(",")).unwrap();
    assert!(cache.is_empty());
}

#[test]
fn malformed_json_element_dropped() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("todos.json"),
        r#"[
            {"id": "1", "text": "buy milk", "created_at": 1720000000},
            {"id": "2", "text": 42}
        ]"#,
    )
    .unwrap();

    let mut cache: FileCache<TodoItem, _> =
        FileCache::with_storage(Vec::new(), DirStorage::new(tmp.path()));
    let report = cache.load("todos.json", &PersistOptions::json()).unwrap();
    assert_eq!(report, LoadReport { loaded: 1, dropped: 1 });
    assert_eq!(cache.items(), &[todo("1", "buy milk")]);
}

#[test]
fn json_object_file_is_invalid() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("todos.json"), r#"{"items": []}"#).unwrap();

    let mut cache = FileCache::with_storage(sample_items(), DirStorage::new(tmp.path()));
    let err = cache.load("todos.json", &PersistOptions::json()).unwrap_err();
    assert!(matches!(err, FileCacheError::InvalidJson(_)));
    assert_eq!(cache.len(), 3);
}

#[test]
fn save_overwrites_previous_file() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cache = FileCache::with_storage(sample_items(), DirStorage::new(tmp.path()));
    cache.save("todos.json", &PersistOptions::json()).unwrap();

    cache.remove_item(&"2".to_string());
    cache.save("todos.json", &PersistOptions::json()).unwrap();

    let mut fresh: FileCache<TodoItem, _> =
        FileCache::with_storage(Vec::new(), DirStorage::new(tmp.path()));
    fresh.load("todos.json", &PersistOptions::json()).unwrap();
    assert_eq!(fresh.len(), 2);
    assert!(!fresh.contains(&"2".to_string()));
}
