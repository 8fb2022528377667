//! Portfolio backend library: CV request capture with tiered storage.
//!
//! Laid out hexagonally: [`domain`] holds values, services and ports,
//! [`inbound`] the HTTP adapter, and [`outbound`] the storage tiers.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
