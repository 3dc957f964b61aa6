//! Entity configuration model.
//!
//! One [`EntityConfig`] describes a domain entity (name, parameters, feature
//! flags) and yields the four CRUD variants ([`EntityKind`]) that the
//! blueprint builder consumes. Pure data: the only behavior here is derived
//! naming and validation. Validation leans on syn for the one check the
//! language owns (identifier legality); nothing here builds or parses trees.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::schema;

/// Which CRUD variant of an entity a blueprint is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// The stored entity itself (item DTO).
    Main,
    /// Input shape for creation.
    Create,
    /// Input shape for partial update (all parameters optional).
    Update,
    /// Query shape for listing (searchable parameters only).
    Filter,
}

/// A single entity parameter. Identity key is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name as configured (any casing; normalized on use).
    pub name: String,
    /// Rust type as written in configuration, e.g. `String` or `i64`.
    pub declared_type: String,
    /// Wrap the declared type in `Vec<..>`.
    #[serde(default)]
    pub is_slice: bool,
    /// Explicit wire tag; defaults to the snake_case field name.
    #[serde(default)]
    pub json_tag: Option<String>,
    /// Whether the parameter participates in the filter variant.
    #[serde(default)]
    pub searchable: bool,
}

impl Param {
    /// Create a plain, non-searchable scalar parameter.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_slice: false,
            json_tag: None,
            searchable: false,
        }
    }

    /// Mark the parameter as a slice (`Vec<T>`).
    pub fn slice(mut self) -> Self {
        self.is_slice = true;
        self
    }

    /// Override the wire tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.json_tag = Some(tag.into());
        self
    }

    /// Mark the parameter as searchable (included in the filter variant).
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Normalized field name used in generated declarations.
    pub fn field_name(&self) -> String {
        snake_case(&self.name)
    }

    /// Effective wire tag: explicit override or the field name.
    pub fn tag(&self) -> String {
        self.json_tag
            .clone()
            .unwrap_or_else(|| self.field_name())
    }
}

/// Feature flags toggling optional artifacts and fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Generate the interceptor layer and guard calls in the handler.
    #[serde(default)]
    pub authorization: bool,
    /// Generate the events artifact and event dispatch in the service.
    #[serde(default)]
    pub eventing: bool,
    /// Add a free-text `query` field to the filter and a repository `search`.
    #[serde(default)]
    pub search: bool,
}

/// One CRUD variant of a configured entity, as handed to the blueprint
/// builder. Constructed by [`EntityConfig::entity`]; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub params: Vec<Param>,
}

impl Entity {
    /// PascalCase base name shared by all variants, e.g. `Widget`.
    pub fn base_name(&self) -> String {
        pascal_case(&self.name)
    }

    /// Type name of this variant: `Widget`, `CreateWidget`, `UpdateWidget`,
    /// `WidgetFilter`.
    pub fn type_name(&self) -> String {
        let base = self.base_name();
        match self.kind {
            EntityKind::Main => base,
            EntityKind::Create => format!("Create{base}"),
            EntityKind::Update => format!("Update{base}"),
            EntityKind::Filter => format!("{base}Filter"),
        }
    }

    /// Type name of the list DTO, e.g. `WidgetList`.
    pub fn list_name(&self) -> String {
        format!("{}List", self.base_name())
    }

    /// snake_case name used for module paths and file names.
    pub fn snake_name(&self) -> String {
        snake_case(&self.name)
    }
}

/// Declarative description of one entity, supplied by the (out of scope)
/// configuration-loading collaborator. Validated on construction; the four
/// CRUD variants are derived views over the same parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub name: String,
    pub params: Vec<Param>,
    #[serde(default)]
    pub features: Features,
}

impl EntityConfig {
    /// Build and validate a configuration.
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        features: Features,
    ) -> Result<Self, DomainError> {
        let config = Self {
            name: name.into(),
            params,
            features,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-check the invariants (useful after deserialization).
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidEntityName {
                name: self.name.clone(),
                reason: "name must not be empty".into(),
            });
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ' ')
        {
            return Err(DomainError::InvalidEntityName {
                name: self.name.clone(),
                reason: "name must be alphanumeric (separators: '_', '-', ' ')".into(),
            });
        }
        // The derived names must be legal identifiers in the generated
        // source; a digit-leading name passes the charset check above but
        // not this one.
        if !is_valid_ident(&self.base_name()) || !is_valid_ident(&self.snake_name()) {
            return Err(DomainError::InvalidEntityName {
                name: self.name.clone(),
                reason: "derived type name is not a valid Rust identifier".into(),
            });
        }

        let mut seen: Vec<String> = Vec::new();
        for param in &self.params {
            let field = param.field_name();
            if field.is_empty() {
                return Err(DomainError::InvalidEntityName {
                    name: param.name.clone(),
                    reason: "parameter name must not be empty".into(),
                });
            }
            if !is_valid_ident(&field) {
                return Err(DomainError::InvalidEntityName {
                    name: param.name.clone(),
                    reason: "derived field name is not a valid Rust identifier (keywords included)"
                        .into(),
                });
            }
            if schema::RESERVED_FIELDS.contains(&field.as_str()) {
                return Err(DomainError::ReservedParamName {
                    entity: self.name.clone(),
                    param: field,
                });
            }
            if seen.contains(&field) {
                return Err(DomainError::DuplicateParam {
                    entity: self.name.clone(),
                    param: field,
                });
            }
            seen.push(field);
        }
        Ok(())
    }

    /// PascalCase base type name, e.g. `Widget`.
    pub fn base_name(&self) -> String {
        pascal_case(&self.name)
    }

    /// snake_case module name, e.g. `widget`.
    pub fn snake_name(&self) -> String {
        snake_case(&self.name)
    }

    /// Derive one CRUD variant. Filter keeps searchable parameters only;
    /// the other variants carry the full list.
    pub fn entity(&self, kind: EntityKind) -> Entity {
        let params = match kind {
            EntityKind::Filter => self
                .params
                .iter()
                .filter(|p| p.searchable)
                .cloned()
                .collect(),
            _ => self.params.clone(),
        };
        Entity {
            name: self.name.clone(),
            kind,
            params,
        }
    }

    /// All four variants, Main first.
    pub fn variants(&self) -> [Entity; 4] {
        [
            self.entity(EntityKind::Main),
            self.entity(EntityKind::Create),
            self.entity(EntityKind::Update),
            self.entity(EntityKind::Filter),
        ]
    }
}

/// Whether a derived name can be spliced into generated source as-is.
/// Rejects keywords (`type`, `fn`, ...) and digit-leading names.
fn is_valid_ident(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
}

// ── name conversion ───────────────────────────────────────────────────────────

/// Split an identifier into lowercase words at `_`, `-`, spaces, and
/// camelCase boundaries.
fn words(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for c in input.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else if c.is_ascii_uppercase() {
            if !current.is_empty() && !current.ends_with(|p: char| p.is_ascii_uppercase()) {
                out.push(std::mem::take(&mut current));
            }
            current.push(c.to_ascii_lowercase());
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// `widget color` / `widgetColor` / `widget-color` -> `WidgetColor`.
pub(crate) fn pascal_case(input: &str) -> String {
    words(input)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `WidgetColor` / `widget-color` -> `widget_color`.
pub(crate) fn snake_case(input: &str) -> String {
    words(input).join("_")
}
