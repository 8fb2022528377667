//! Tests for the JSON document capture tier.

use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;

#[fixture]
fn data_dir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn record(raw: &str, offset_secs: i64) -> CaptureRecord {
    let base = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("timestamp");
    CaptureRecord::new(
        EmailAddress::parse(raw).expect("email"),
        base + Duration::seconds(offset_secs),
    )
}

#[rstest]
#[tokio::test]
async fn connect_creates_directory_and_empty_document(data_dir: TempDir) {
    let nested = data_dir.path().join("nested").join("data");
    let repo = FileTierConnector::new(&nested)
        .connect()
        .await
        .expect("connect");

    assert_eq!(repo.count().await.expect("count"), 0);
    let raw = std::fs::read_to_string(nested.join(CAPTURE_FILE_NAME)).expect("document exists");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(parsed["records"], serde_json::json!([]));
}

#[rstest]
#[tokio::test]
async fn records_survive_reopening(data_dir: TempDir) {
    let first = FileCaptureRepository::open(data_dir.path()).expect("open");
    first.insert(&record("old@b.com", 0)).await.expect("insert");
    first.insert(&record("new@b.com", 60)).await.expect("insert");
    drop(first);

    let reopened = FileCaptureRepository::open(data_dir.path()).expect("reopen");
    let emails: Vec<String> = reopened
        .list_all()
        .await
        .expect("list")
        .iter()
        .map(|r| r.email().to_string())
        .collect();
    assert_eq!(emails, vec!["new@b.com", "old@b.com"]);
}

#[rstest]
#[tokio::test]
async fn document_uses_camel_case_last_updated(data_dir: TempDir) {
    let repo = FileCaptureRepository::open(data_dir.path()).expect("open");
    let stored = record("a@b.com", 5);
    repo.insert(&stored).await.expect("insert");

    let raw = std::fs::read_to_string(data_dir.path().join(CAPTURE_FILE_NAME)).expect("read");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(parsed["records"][0]["email"], "a@b.com");
    assert!(parsed["records"][0]["created_at"].is_string());
    assert_eq!(
        parsed["lastUpdated"],
        serde_json::to_value(stored.created_at()).expect("timestamp json")
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_insert_conflicts_and_leaves_document_unchanged(data_dir: TempDir) {
    let repo = FileCaptureRepository::open(data_dir.path()).expect("open");
    repo.insert(&record("a@b.com", 0)).await.expect("first");

    let err = repo
        .insert(&record("a@b.com", 1))
        .await
        .expect_err("duplicate");

    assert!(matches!(err, CaptureRepositoryError::Conflict { .. }));
    assert_eq!(repo.count().await.expect("count"), 1);
}

#[rstest]
#[tokio::test]
async fn corrupt_document_is_a_query_error(data_dir: TempDir) {
    std::fs::write(data_dir.path().join(CAPTURE_FILE_NAME), b"not json").expect("seed");
    let repo = FileCaptureRepository::open(data_dir.path()).expect("open");

    let err = repo.count().await.expect_err("corrupt");

    assert!(matches!(err, CaptureRepositoryError::Query { .. }));
}

#[rstest]
#[tokio::test]
async fn connect_fails_when_data_dir_is_a_file(data_dir: TempDir) {
    let blocker = data_dir.path().join("blocker");
    std::fs::write(&blocker, b"").expect("seed file");

    let err = FileTierConnector::new(&blocker)
        .connect()
        .await
        .err()
        .expect("connect must fail");

    assert!(err.is_connection());
}
