//! Application layer: sync orchestration over the engine.
//!
//! This layer owns the side-effectful part of generation. It plans which
//! files an entity touches ([`plan`]), resolves their paths ([`layout`]),
//! and drives the read-merge-write pipeline ([`services`]) through the
//! [`ports::Filesystem`] port. The engine itself never sees a path.

pub mod error;
pub mod layout;
pub mod plan;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use layout::OutputLayout;
pub use plan::{GenerationPlan, SyncStep};
pub use services::{GenerationReport, SyncOutcome, SyncService};
