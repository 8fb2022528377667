//! Outbound adapters implementing the capture repository port.
//!
//! - **persistence**: PostgreSQL tier using Diesel
//! - **file_store**: JSON document tier on local disk
//! - **memory**: process-lifetime tier
//! - **fallback**: chain selecting between the tiers at runtime
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules beyond uniqueness enforcement.

pub mod fallback;
pub mod file_store;
pub mod memory;
pub mod persistence;
