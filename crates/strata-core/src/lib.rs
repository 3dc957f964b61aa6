//! Strata Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain, engine, and application layers for the
//! Strata layered-source generator: a declarative, idempotent synchronizer
//! that materializes CRUD source files for configured entities and re-syncs
//! them without destroying hand-written edits.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (SyncService)                │
//! │   Plans and executes sync steps         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │         (Driven: Filesystem)            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    strata-adapters (Infrastructure)     │
//! │  (LocalFilesystem, MemoryFilesystem)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Engine + Domain (Pure Logic)       │
//! │  (EntityConfig, Blueprint, merge,       │
//! │   patch, emit - no I/O)                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use strata_core::{
//!     application::{OutputLayout, SyncService},
//!     domain::{EntityConfig, Features, Param},
//! };
//! # fn filesystem() -> Box<dyn strata_core::application::ports::Filesystem> { unimplemented!() }
//!
//! // 1. Describe the entity
//! let config = EntityConfig::new(
//!     "Widget",
//!     vec![Param::new("Color", "String").searchable()],
//!     Features::default(),
//! ).unwrap();
//!
//! // 2. Sync through an injected filesystem adapter
//! let service = SyncService::new(filesystem(), OutputLayout::new("./src"));
//! service.generate(&config).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export the source engine (syn-tree construction and merging)
pub mod engine;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationPlan, GenerationReport, OutputLayout, SyncService, ports::Filesystem,
    };
    pub use crate::domain::{
        ArtifactKind, Entity, EntityConfig, EntityKind, Features, Param,
    };
    pub use crate::engine::{Blueprint, DeclKey, DeclKind, GuardPatch};
    pub use crate::error::{StrataError, StrataResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
