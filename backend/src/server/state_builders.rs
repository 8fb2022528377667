//! Builders wiring storage tiers and services into HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;

use backend::domain::ports::{CaptureTierConnector, CvRequestCommand, CvRequestQuery};
use backend::domain::{AdminLoginService, CvRequestService};
use backend::inbound::http::state::HttpState;
use backend::outbound::fallback::FallbackCaptureRepository;
use backend::outbound::file_store::FileTierConnector;
use backend::outbound::memory::MemoryTierConnector;
use backend::outbound::persistence::PostgresTierConnector;

use super::ServerConfig;

/// Ordered tier connectors: durable (when configured), file, memory.
pub(crate) fn build_tier_connectors(config: &ServerConfig) -> Vec<Arc<dyn CaptureTierConnector>> {
    let mut connectors: Vec<Arc<dyn CaptureTierConnector>> = Vec::with_capacity(3);
    if config.database_url.is_some() {
        connectors.push(Arc::new(PostgresTierConnector::new(
            config.database_url.clone(),
            config.db_connect_timeout,
        )));
    }
    connectors.push(Arc::new(FileTierConnector::new(config.data_dir.clone())));
    connectors.push(Arc::new(MemoryTierConnector::default()));
    connectors
}

/// Build the handler state shared by every worker.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let repository = Arc::new(FallbackCaptureRepository::new(build_tier_connectors(
        config,
    )));
    let service = Arc::new(CvRequestService::new(repository, Arc::new(DefaultClock)));
    let command: Arc<dyn CvRequestCommand> = service.clone();
    let query: Arc<dyn CvRequestQuery> = service;
    HttpState::new(
        command,
        query,
        Arc::new(AdminLoginService::new(config.admin.clone())),
    )
}
