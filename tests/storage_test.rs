//! Integration tests for the tasks table: idempotent creation, upsert
//! semantics, and nullable columns. These use Storage directly (no network).

use boardsync::storage::Storage;
use boardsync::task::Task;
use chrono::NaiveDate;
use tempfile::TempDir;

/// Helper: open a Storage on a fresh db file in a temp dir.
async fn make_storage(dir: &TempDir) -> Storage {
    Storage::new(&dir.path().join("tasks.db"))
        .await
        .expect("storage init failed")
}

fn sample_task(id: i64) -> Task {
    Task {
        id,
        name: format!("task {id}"),
        label: "backend".to_string(),
        priority_text: "High".to_string(),
        people: "Ada".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        project_status: "In progress".to_string(),
        effort: Some(5),
        relevant: true,
    }
}

#[tokio::test]
async fn test_upsert_inserts_new_rows() {
    let dir = TempDir::new().unwrap();
    let storage = make_storage(&dir).await;

    storage.upsert_task(&sample_task(100)).await.unwrap();
    storage.upsert_task(&sample_task(101)).await.unwrap();

    assert_eq!(storage.count_tasks().await.unwrap(), 2);
    let row = storage.get_task(100).await.unwrap().unwrap();
    assert_eq!(row.name, "task 100");
    assert_eq!(row.date.as_deref(), Some("2024-01-15"));
    assert!(row.relevant);
}

#[tokio::test]
async fn test_upsert_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let storage = make_storage(&dir).await;

    let task = sample_task(100);
    storage.upsert_task(&task).await.unwrap();
    let first = storage.list_tasks().await.unwrap();

    // Same remote data again — row count and contents must not change.
    storage.upsert_task(&task).await.unwrap();
    let second = storage.list_tasks().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn test_upsert_last_write_wins() {
    let dir = TempDir::new().unwrap();
    let storage = make_storage(&dir).await;

    storage.upsert_task(&sample_task(100)).await.unwrap();

    let mut changed = sample_task(100);
    changed.name = "renamed".to_string();
    changed.people = "Grace".to_string();
    changed.date = None;
    changed.effort = None;
    changed.relevant = false;
    storage.upsert_task(&changed).await.unwrap();

    assert_eq!(storage.count_tasks().await.unwrap(), 1);
    let row = storage.get_task(100).await.unwrap().unwrap();
    assert_eq!(row.name, "renamed");
    assert_eq!(row.people, "Grace");
    assert_eq!(row.date, None);
    assert_eq!(row.effort, None);
    assert!(!row.relevant);
}

#[tokio::test]
async fn test_nullable_and_empty_fields_round_trip() {
    let dir = TempDir::new().unwrap();
    let storage = make_storage(&dir).await;

    let mut task = sample_task(100);
    task.label = String::new();
    task.date = None;
    task.effort = None;
    storage.upsert_task(&task).await.unwrap();

    let row = storage.get_task(100).await.unwrap().unwrap();
    assert_eq!(row.label, "");
    assert_eq!(row.date, None);
    assert_eq!(row.effort, None);
}

#[tokio::test]
async fn test_table_creation_is_idempotent_across_opens() {
    let dir = TempDir::new().unwrap();

    let storage = make_storage(&dir).await;
    storage.upsert_task(&sample_task(100)).await.unwrap();
    storage.close().await;

    // Re-opening on the same file re-runs CREATE TABLE IF NOT EXISTS and
    // must not disturb existing rows.
    let storage2 = make_storage(&dir).await;
    assert_eq!(storage2.count_tasks().await.unwrap(), 1);
}
