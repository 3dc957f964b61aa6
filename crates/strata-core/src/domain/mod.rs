// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Strata.
//!
//! This module contains pure configuration logic with no I/O. The source
//! engine (tree manipulation) lives in `crate::engine`; everything here is
//! what the engine is *told* to build.
//!
//! - **No I/O**: no filesystem, no source trees (syn appears only for
//!   identifier-legality checks in validation)
//! - **Immutable entities**: all domain objects are Clone + PartialEq
//! - **Derived naming**: casing and type names are computed, never stored

pub mod entity;
pub mod error;
pub mod schema;

// Re-exports for convenience
pub use entity::{Entity, EntityConfig, EntityKind, Features, Param};
pub use error::{DomainError, ErrorCategory};
pub use schema::{
    ArtifactKind, FieldSpec, CRUD_METHODS, FILTER_BASE_FIELDS, MODEL_BASE_FIELDS, RESERVED_FIELDS,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_config() -> EntityConfig {
        EntityConfig::new(
            "Widget",
            vec![
                Param::new("Color", "String").searchable(),
                Param::new("Weight", "i64"),
            ],
            Features::default(),
        )
        .unwrap()
    }

    // ========================================================================
    // Naming Tests
    // ========================================================================

    #[test]
    fn variant_type_names() {
        let config = widget_config();
        assert_eq!(config.entity(EntityKind::Main).type_name(), "Widget");
        assert_eq!(config.entity(EntityKind::Create).type_name(), "CreateWidget");
        assert_eq!(config.entity(EntityKind::Update).type_name(), "UpdateWidget");
        assert_eq!(config.entity(EntityKind::Filter).type_name(), "WidgetFilter");
        assert_eq!(config.entity(EntityKind::Main).list_name(), "WidgetList");
    }

    #[test]
    fn name_conversion_handles_mixed_input() {
        for input in ["order item", "order-item", "orderItem", "OrderItem"] {
            let config =
                EntityConfig::new(input, vec![], Features::default()).unwrap();
            assert_eq!(config.base_name(), "OrderItem", "input: {input}");
            assert_eq!(config.snake_name(), "order_item", "input: {input}");
        }
    }

    #[test]
    fn param_field_name_and_tag() {
        let plain = Param::new("DisplayColor", "String");
        assert_eq!(plain.field_name(), "display_color");
        assert_eq!(plain.tag(), "display_color");

        let tagged = Param::new("DisplayColor", "String").with_tag("displayColor");
        assert_eq!(tagged.tag(), "displayColor");
    }

    // ========================================================================
    // Variant Derivation Tests
    // ========================================================================

    #[test]
    fn filter_variant_keeps_searchable_params_only() {
        let config = widget_config();
        let filter = config.entity(EntityKind::Filter);
        assert_eq!(filter.params.len(), 1);
        assert_eq!(filter.params[0].field_name(), "color");

        let update = config.entity(EntityKind::Update);
        assert_eq!(update.params.len(), 2);
    }

    #[test]
    fn variants_share_base_name() {
        let config = widget_config();
        for entity in config.variants() {
            assert_eq!(entity.base_name(), "Widget");
        }
    }

    // ========================================================================
    // Validation Tests
    // ========================================================================

    #[test]
    fn rejects_empty_name() {
        let err = EntityConfig::new("  ", vec![], Features::default()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidEntityName { .. }));
    }

    #[test]
    fn rejects_duplicate_params() {
        let err = EntityConfig::new(
            "Widget",
            vec![Param::new("color", "String"), Param::new("Color", "String")],
            Features::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateParam { .. }));
    }

    #[test]
    fn rejects_keyword_param_names() {
        // `type` passes every charset check but cannot become a field name
        let err = EntityConfig::new(
            "Widget",
            vec![Param::new("type", "String")],
            Features::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidEntityName { .. }));
    }

    #[test]
    fn rejects_digit_leading_names() {
        let entity = EntityConfig::new("9lives", vec![], Features::default());
        assert!(matches!(
            entity.unwrap_err(),
            DomainError::InvalidEntityName { .. }
        ));

        let param = EntityConfig::new(
            "Widget",
            vec![Param::new("2fa", "String")],
            Features::default(),
        );
        assert!(matches!(
            param.unwrap_err(),
            DomainError::InvalidEntityName { .. }
        ));
    }

    #[test]
    fn rejects_reserved_param_names() {
        let err = EntityConfig::new(
            "Widget",
            vec![Param::new("CreatedAt", "i64")],
            Features::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::ReservedParamName { .. }));
    }

    #[test]
    fn validation_errors_carry_suggestions() {
        let err = EntityConfig::new("", vec![], Features::default()).unwrap_err();
        assert!(!err.suggestions().is_empty());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    // ========================================================================
    // Schema Tests
    // ========================================================================

    #[test]
    fn model_base_fields_in_fixed_order() {
        let names: Vec<_> = MODEL_BASE_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, ["id", "updated_at", "created_at"]);
    }

    #[test]
    fn feature_gated_artifacts() {
        let off = Features::default();
        assert!(!ArtifactKind::Interceptor.enabled(&off));
        assert!(!ArtifactKind::Events.enabled(&off));
        assert!(ArtifactKind::Service.enabled(&off));

        let on = Features {
            authorization: true,
            eventing: true,
            search: false,
        };
        assert!(ArtifactKind::Interceptor.enabled(&on));
        assert!(ArtifactKind::Events.enabled(&on));
    }

    #[test]
    fn artifact_file_stems() {
        assert_eq!(ArtifactKind::ItemModel.file_stem(), "model");
        assert_eq!(ArtifactKind::UpdateModel.file_stem(), "model");
        assert_eq!(ArtifactKind::ServiceApi.file_stem(), "service");
        assert_eq!(ArtifactKind::EntityModule.file_stem(), "mod");
        assert_eq!(ArtifactKind::Wiring.file_stem(), "modules");
    }

    #[test]
    fn artifact_entity_kinds() {
        assert_eq!(ArtifactKind::FilterModel.entity_kind(), EntityKind::Filter);
        assert_eq!(ArtifactKind::CreateModel.entity_kind(), EntityKind::Create);
        assert_eq!(ArtifactKind::UpdateModel.entity_kind(), EntityKind::Update);
        assert_eq!(ArtifactKind::Service.entity_kind(), EntityKind::Main);
    }

    // ========================================================================
    // Serialization Tests
    // ========================================================================

    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{
            "name": "Widget",
            "params": [
                { "name": "Color", "declared_type": "String", "searchable": true },
                { "name": "Tags", "declared_type": "String", "is_slice": true }
            ],
            "features": { "authorization": true }
        }"#;
        let config: EntityConfig = serde_json::from_str(json).unwrap();
        config.validate().unwrap();
        assert_eq!(config.base_name(), "Widget");
        assert!(config.features.authorization);
        assert!(!config.features.eventing);
        assert!(config.params[1].is_slice);
    }
}
