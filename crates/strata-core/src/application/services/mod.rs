//! Application services.

pub mod sync_service;

pub use sync_service::{GenerationReport, SyncOutcome, SyncService};
