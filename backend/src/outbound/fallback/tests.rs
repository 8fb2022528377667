//! Tests for the storage tier fallback chain.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::MockCaptureRepository;
use crate::outbound::memory::{MemoryCaptureRepository, MemoryTierConnector};
use crate::outbound::persistence::diesel_error_mapping::map_diesel_error;

/// Connector returning a fixed outcome and counting attempts.
struct ScriptedConnector {
    tier: StorageTier,
    repository: Option<Arc<dyn CaptureRepository>>,
    attempts: AtomicUsize,
}

impl ScriptedConnector {
    fn reachable(tier: StorageTier, repository: Arc<dyn CaptureRepository>) -> Arc<Self> {
        Arc::new(Self {
            tier,
            repository: Some(repository),
            attempts: AtomicUsize::new(0),
        })
    }

    fn unreachable(tier: StorageTier) -> Arc<Self> {
        Arc::new(Self {
            tier,
            repository: None,
            attempts: AtomicUsize::new(0),
        })
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureTierConnector for ScriptedConnector {
    fn tier(&self) -> StorageTier {
        self.tier
    }

    async fn connect(&self) -> Result<Arc<dyn CaptureRepository>, CaptureRepositoryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.repository
            .clone()
            .ok_or_else(|| CaptureRepositoryError::connection("refused"))
    }
}

fn record(raw: &str) -> CaptureRecord {
    let at = Utc
        .with_ymd_and_hms(2024, 6, 1, 8, 30, 0)
        .single()
        .expect("timestamp");
    CaptureRecord::new(EmailAddress::parse(raw).expect("email"), at)
}

fn erase<C: CaptureTierConnector + 'static>(connector: &Arc<C>) -> Arc<dyn CaptureTierConnector> {
    connector.clone()
}

fn chain(connectors: Vec<Arc<dyn CaptureTierConnector>>) -> FallbackCaptureRepository {
    FallbackCaptureRepository::new(connectors)
}

#[rstest]
#[tokio::test]
async fn resolves_lazily_and_caches_the_first_reachable_tier() {
    let durable = ScriptedConnector::unreachable(StorageTier::Durable);
    let file_store = Arc::new(MemoryCaptureRepository::default());
    let file = ScriptedConnector::reachable(StorageTier::File, file_store.clone());
    let memory = ScriptedConnector::unreachable(StorageTier::Memory);
    let repo = chain(vec![erase(&durable), erase(&file), erase(&memory)]);

    assert_eq!(repo.active_tier().await, None);
    assert_eq!(durable.attempts(), 0, "resolution must wait for first use");

    repo.insert(&record("a@b.com")).await.expect("insert");
    assert_eq!(repo.count().await.expect("count"), 1);

    assert_eq!(repo.active_tier().await, Some(StorageTier::File));
    assert_eq!(durable.attempts(), 1);
    assert_eq!(file.attempts(), 1);
    assert_eq!(memory.attempts(), 0);
    assert_eq!(file_store.count().await.expect("count"), 1);
}

#[rstest]
#[tokio::test]
async fn connection_failure_demotes_and_retries_on_next_tier() {
    let mut failing = MockCaptureRepository::new();
    failing
        .expect_insert()
        .times(1)
        .returning(|_| Err(CaptureRepositoryError::connection("socket reset")));
    failing.expect_count().times(0);
    let durable = ScriptedConnector::reachable(StorageTier::Durable, Arc::new(failing));
    let memory_store = Arc::new(MemoryCaptureRepository::default());
    let memory = MemoryTierConnector::with_repository(memory_store.clone());
    let repo = chain(vec![erase(&durable), erase(&Arc::new(memory))]);

    repo.insert(&record("a@b.com"))
        .await
        .expect("retried on memory tier");

    assert_eq!(repo.active_tier().await, Some(StorageTier::Memory));
    assert_eq!(repo.count().await.expect("count"), 1);
    assert_eq!(memory_store.count().await.expect("count"), 1);
    assert_eq!(durable.attempts(), 1, "demoted tiers are never re-promoted");
}

#[rstest]
#[tokio::test]
async fn conflicts_pass_through_without_demotion() {
    let mut durable_repo = MockCaptureRepository::new();
    durable_repo
        .expect_insert()
        .times(1)
        .returning(|_| Err(CaptureRepositoryError::conflict("dup")));
    let durable = ScriptedConnector::reachable(StorageTier::Durable, Arc::new(durable_repo));
    let memory = ScriptedConnector::unreachable(StorageTier::Memory);
    let repo = chain(vec![erase(&durable), erase(&memory)]);

    let err = repo.insert(&record("a@b.com")).await.expect_err("conflict");

    assert!(matches!(err, CaptureRepositoryError::Conflict { .. }));
    assert_eq!(repo.active_tier().await, Some(StorageTier::Durable));
    assert_eq!(memory.attempts(), 0);
}

#[rstest]
#[tokio::test]
async fn exhausted_chain_reports_connection_error() {
    let durable = ScriptedConnector::unreachable(StorageTier::Durable);
    let file = ScriptedConnector::unreachable(StorageTier::File);
    let repo = chain(vec![erase(&durable), erase(&file)]);

    let err = repo.list_all().await.expect_err("no tier");
    assert!(err.is_connection());

    // Once exhausted the chain does not retry earlier tiers.
    let err = repo.count().await.expect_err("still no tier");
    assert!(err.is_connection());
    assert_eq!(durable.attempts(), 1);
}

#[rstest]
#[tokio::test]
async fn retry_failure_on_last_tier_surfaces_connection_error() {
    let mut first = MockCaptureRepository::new();
    first
        .expect_list_all()
        .returning(|| Err(CaptureRepositoryError::connection("down")));
    let mut second = MockCaptureRepository::new();
    second
        .expect_list_all()
        .times(1)
        .returning(|| Err(CaptureRepositoryError::connection("also down")));
    let repo = chain(vec![
        erase(&ScriptedConnector::reachable(StorageTier::Durable, Arc::new(first))),
        erase(&ScriptedConnector::reachable(StorageTier::File, Arc::new(second))),
    ]);

    let err = repo.list_all().await.expect_err("both tiers fail");

    assert!(err.is_connection());
    assert_eq!(repo.active_tier().await, None);
}

#[rstest]
#[tokio::test]
async fn durable_connection_dropped_mid_query_falls_back_to_file() {
    let mut durable_repo = MockCaptureRepository::new();
    durable_repo.expect_find_by_email().times(1).returning(|_| {
        Err(map_diesel_error(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UnableToSendCommand,
            Box::new("connection closed".to_owned()),
        )))
    });
    let durable = ScriptedConnector::reachable(StorageTier::Durable, Arc::new(durable_repo));
    let file_store = Arc::new(MemoryCaptureRepository::default());
    let file = ScriptedConnector::reachable(StorageTier::File, file_store);
    let repo = chain(vec![erase(&durable), erase(&file)]);

    let email = EmailAddress::parse("a@b.com").expect("email");
    let found = repo.find_by_email(&email).await.expect("retried on file tier");

    assert!(found.is_none());
    assert_eq!(repo.active_tier().await, Some(StorageTier::File));
}
