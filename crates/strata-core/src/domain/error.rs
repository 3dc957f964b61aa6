// ============================================================================
// domain/error.rs - ENTITY CONFIGURATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for caller display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid entity name '{name}': {reason}")]
    InvalidEntityName { name: String, reason: String },

    #[error("duplicate parameter '{param}' on entity '{entity}'")]
    DuplicateParam { entity: String, param: String },

    #[error("parameter '{param}' on entity '{entity}' shadows a generated base field")]
    ReservedParamName { entity: String, param: String },

    #[error("parameter '{param}' has unparsable type '{ty}': {reason}")]
    InvalidParamType {
        param: String,
        ty: String,
        reason: String,
    },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("artifact '{artifact}' requires the '{feature}' feature on entity '{entity}'")]
    FeatureDisabled {
        entity: String,
        artifact: String,
        feature: &'static str,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidEntityName { reason, .. } => vec![
                "Entity and parameter names become Rust identifiers".into(),
                format!("Details: {reason}"),
            ],
            Self::DuplicateParam { param, .. } => vec![
                format!("Parameter '{param}' appears more than once"),
                "Parameter identity is name-based; rename one of them".into(),
            ],
            Self::ReservedParamName { param, .. } => vec![
                format!(
                    "'{param}' is generated automatically (id, created_at, updated_at, ...)"
                ),
                "Pick a different parameter name".into(),
            ],
            Self::InvalidParamType { ty, .. } => vec![
                format!("'{ty}' is not a valid Rust type"),
                "Use a plain type path such as 'String', 'i64' or 'Vec<u8>'".into(),
            ],
            Self::FeatureDisabled { feature, .. } => vec![
                format!("Enable the '{feature}' feature flag on the entity"),
                "Or drop the artifact from the generation plan".into(),
            ],
        }
    }

    /// Error category for caller display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidEntityName { .. }
            | Self::DuplicateParam { .. }
            | Self::ReservedParamName { .. }
            | Self::InvalidParamType { .. } => ErrorCategory::Validation,
            Self::FeatureDisabled { .. } => ErrorCategory::Compatibility,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
