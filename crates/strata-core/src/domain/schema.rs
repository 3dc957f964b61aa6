//! Declarative artifact schema.
//!
//! One table-driven description of every generated artifact kind, consumed
//! by the single generic blueprint builder. Adding an artifact means adding
//! a variant and its table entries here, not writing a new builder.

use serde::{Deserialize, Serialize};

use crate::domain::entity::{EntityKind, Features};

/// Every artifact the generator knows how to build and keep in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Item DTO struct with base fields plus parameters.
    ItemModel,
    /// List DTO struct (`items` + `total`).
    ListModel,
    /// Filter DTO struct plus constructor.
    FilterModel,
    /// Create DTO struct, constructor, and entity conversion.
    CreateModel,
    /// Update DTO struct, constructor, and `apply` method.
    UpdateModel,
    /// Service struct, constructor, five CRUD methods.
    Service,
    /// Service interface (trait) mirroring the CRUD signatures.
    ServiceApi,
    /// Repository struct, constructor, five CRUD methods.
    Repository,
    /// Repository interface (trait).
    RepositoryApi,
    /// Handler struct delegating to the service.
    Handler,
    /// Authorization interceptor (feature-gated).
    Interceptor,
    /// Per-entity module file (`mod.rs`): submodules and re-exports.
    EntityModule,
    /// Root wiring module (`modules.rs`): composition of all entities.
    Wiring,
    /// Event payloads and dispatcher (feature-gated).
    Events,
}

impl ArtifactKind {
    /// All artifact kinds, in generation order. Models come first so later
    /// layers can reference them.
    pub const ALL: [ArtifactKind; 14] = [
        ArtifactKind::ItemModel,
        ArtifactKind::ListModel,
        ArtifactKind::FilterModel,
        ArtifactKind::CreateModel,
        ArtifactKind::UpdateModel,
        ArtifactKind::Events,
        ArtifactKind::RepositoryApi,
        ArtifactKind::Repository,
        ArtifactKind::ServiceApi,
        ArtifactKind::Service,
        ArtifactKind::Interceptor,
        ArtifactKind::Handler,
        ArtifactKind::EntityModule,
        ArtifactKind::Wiring,
    ];

    /// File stem the artifact lives in. Several kinds share a file; the
    /// merge engine keeps repeated writes idempotent.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::ItemModel | Self::ListModel | Self::FilterModel | Self::CreateModel
            | Self::UpdateModel => "model",
            Self::Service | Self::ServiceApi => "service",
            Self::Repository | Self::RepositoryApi => "repository",
            Self::Handler => "handler",
            Self::Interceptor => "interceptor",
            Self::Events => "events",
            Self::EntityModule => "mod",
            Self::Wiring => "modules",
        }
    }

    /// Whether the artifact is generated under the current feature flags.
    pub fn enabled(self, features: &Features) -> bool {
        match self {
            Self::Interceptor => features.authorization,
            Self::Events => features.eventing,
            _ => true,
        }
    }

    /// Which CRUD variant feeds the builder for this artifact.
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::FilterModel => EntityKind::Filter,
            Self::CreateModel => EntityKind::Create,
            Self::UpdateModel => EntityKind::Update,
            _ => EntityKind::Main,
        }
    }
}

/// A fixed field in a generated struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: &'static str,
}

/// Base fields of the item model, in emission order. User parameters are
/// appended after these.
pub const MODEL_BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "id", ty: "i64" },
    FieldSpec { name: "updated_at", ty: "i64" },
    FieldSpec { name: "created_at", ty: "i64" },
];

/// Base fields of the filter model (searchable parameters follow, wrapped
/// in `Option`).
pub const FILTER_BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "page", ty: "i64" },
    FieldSpec { name: "page_size", ty: "i64" },
];

/// The five CRUD operations every layer carries, in declaration order.
pub const CRUD_METHODS: &[&str] = &["create", "get", "list", "update", "delete"];

/// Field names a parameter may not shadow: base fields of the generated
/// structs plus the fixed list/filter members.
pub const RESERVED_FIELDS: &[&str] = &[
    "id",
    "updated_at",
    "created_at",
    "items",
    "total",
    "page",
    "page_size",
    "query",
];
