//! Storage tier fallback chain.
//!
//! [`FallbackCaptureRepository`] owns an ordered list of tier connectors and
//! presents them to the domain as one [`CaptureRepository`]. The first
//! operation resolves the most durable tier that connects; the choice is
//! cached until an operation fails with a connection error, at which point
//! the chain moves one tier down and retries that operation once. Tiers are
//! never re-promoted during the process lifetime.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::ports::{
    CaptureRepository, CaptureRepositoryError, CaptureTierConnector, StorageTier,
};
use crate::domain::{CaptureRecord, EmailAddress};

#[derive(Clone)]
struct ActiveTier {
    index: usize,
    tier: StorageTier,
    repository: Arc<dyn CaptureRepository>,
}

#[derive(Default)]
struct ChainState {
    next_index: usize,
    active: Option<ActiveTier>,
}

/// [`CaptureRepository`] that delegates to the best available tier.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use backend::domain::ports::{CaptureTierConnector, StorageTier};
/// use backend::outbound::fallback::FallbackCaptureRepository;
/// use backend::outbound::memory::MemoryTierConnector;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let chain = FallbackCaptureRepository::new(vec![
///     Arc::new(MemoryTierConnector::default()) as Arc<dyn CaptureTierConnector>,
/// ]);
/// assert_eq!(chain.resolve_tier().await.ok(), Some(StorageTier::Memory));
/// # });
/// ```
pub struct FallbackCaptureRepository {
    connectors: Vec<Arc<dyn CaptureTierConnector>>,
    state: Mutex<ChainState>,
}

impl FallbackCaptureRepository {
    /// Chain over `connectors`, most durable first.
    pub fn new(connectors: Vec<Arc<dyn CaptureTierConnector>>) -> Self {
        Self {
            connectors,
            state: Mutex::new(ChainState::default()),
        }
    }

    /// Tier currently serving requests, if one has been resolved.
    pub async fn active_tier(&self) -> Option<StorageTier> {
        self.state.lock().await.active.as_ref().map(|active| active.tier)
    }

    /// Resolve (if needed) and report the serving tier.
    pub async fn resolve_tier(&self) -> Result<StorageTier, CaptureRepositoryError> {
        self.resolve().await.map(|active| active.tier)
    }

    async fn resolve(&self) -> Result<ActiveTier, CaptureRepositoryError> {
        let mut state = self.state.lock().await;
        if let Some(active) = &state.active {
            return Ok(active.clone());
        }

        while let Some(connector) = self.connectors.get(state.next_index) {
            let index = state.next_index;
            let tier = connector.tier();
            match connector.connect().await {
                Ok(repository) => {
                    info!(tier = %tier, "capture storage tier selected");
                    let active = ActiveTier {
                        index,
                        tier,
                        repository,
                    };
                    state.active = Some(active.clone());
                    return Ok(active);
                }
                Err(err) => {
                    warn!(tier = %tier, error = %err, "capture storage tier unavailable");
                    state.next_index = index + 1;
                }
            }
        }

        Err(CaptureRepositoryError::connection(
            "every capture storage tier is unavailable",
        ))
    }

    async fn demote(&self, failed: &ActiveTier, error: &CaptureRepositoryError) {
        let mut state = self.state.lock().await;
        let still_active = state
            .active
            .as_ref()
            .is_some_and(|active| active.index == failed.index);
        if still_active {
            warn!(tier = %failed.tier, error = %error, "demoting capture storage tier");
            state.active = None;
            state.next_index = failed.index + 1;
        }
    }

    async fn run<T, F>(&self, op: F) -> Result<T, CaptureRepositoryError>
    where
        F: Fn(Arc<dyn CaptureRepository>) -> BoxFuture<'static, Result<T, CaptureRepositoryError>>,
    {
        let active = self.resolve().await?;
        match op(Arc::clone(&active.repository)).await {
            Err(err) if err.is_connection() => {
                self.demote(&active, &err).await;
                let next = self.resolve().await?;
                let retried = op(Arc::clone(&next.repository)).await;
                if let Err(retry_err) = &retried {
                    if retry_err.is_connection() {
                        self.demote(&next, retry_err).await;
                    }
                }
                retried
            }
            other => other,
        }
    }
}

#[async_trait]
impl CaptureRepository for FallbackCaptureRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CaptureRecord>, CaptureRepositoryError> {
        let email = email.clone();
        self.run(move |repository| {
            let email = email.clone();
            Box::pin(async move { repository.find_by_email(&email).await })
        })
        .await
    }

    async fn insert(&self, record: &CaptureRecord) -> Result<(), CaptureRepositoryError> {
        let record = record.clone();
        self.run(move |repository| {
            let record = record.clone();
            Box::pin(async move { repository.insert(&record).await })
        })
        .await
    }

    async fn count(&self) -> Result<u64, CaptureRepositoryError> {
        self.run(|repository| Box::pin(async move { repository.count().await }))
            .await
    }

    async fn list_all(&self) -> Result<Vec<CaptureRecord>, CaptureRepositoryError> {
        self.run(|repository| Box::pin(async move { repository.list_all().await }))
            .await
    }
}

#[cfg(test)]
mod tests;
