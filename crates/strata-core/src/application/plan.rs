//! Generation planning.
//!
//! A plan expands one entity configuration into the ordered list of sync
//! steps a run executes: one step per declaration unit per artifact file.
//! Each step is an independent read-modify-write of its target file; the
//! merge engine's idempotency is what makes re-reading the just-written
//! result safe.

use std::path::PathBuf;

use crate::application::error::ApplicationError;
use crate::application::layout::OutputLayout;
use crate::domain::entity::EntityConfig;
use crate::domain::schema::ArtifactKind;
use crate::engine::blueprint::Blueprint;
use crate::engine::patch::GuardPatch;
use crate::error::{StrataError, StrataResult};

/// One self-contained read-merge-write pass over a single file.
#[derive(Debug, Clone)]
pub struct SyncStep {
    pub path: PathBuf,
    pub blueprint: Blueprint,
    /// Statement patches applied after the declaration merge (update-method
    /// conditional blocks); empty for most steps.
    pub patches: Vec<GuardPatch>,
}

/// The full ordered step list for one entity.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    pub steps: Vec<SyncStep>,
}

impl GenerationPlan {
    /// Plan every enabled artifact of the configuration, in schema order.
    pub fn for_config(config: &EntityConfig, layout: &OutputLayout) -> StrataResult<Self> {
        config.validate().map_err(StrataError::Domain)?;
        let mut steps = Vec::new();
        for kind in ArtifactKind::ALL {
            if !kind.enabled(&config.features) {
                continue;
            }
            steps.extend(Self::artifact_steps(config, layout, kind)?);
        }
        if steps.is_empty() {
            return Err(ApplicationError::EmptyPlan {
                entity: config.name.clone(),
            }
            .into());
        }
        Ok(Self { steps })
    }

    /// Plan a single artifact (the per-artifact sync entry point).
    pub fn for_artifact(
        config: &EntityConfig,
        layout: &OutputLayout,
        kind: ArtifactKind,
    ) -> StrataResult<Self> {
        config.validate().map_err(StrataError::Domain)?;
        Ok(Self {
            steps: Self::artifact_steps(config, layout, kind)?,
        })
    }

    fn artifact_steps(
        config: &EntityConfig,
        layout: &OutputLayout,
        kind: ArtifactKind,
    ) -> StrataResult<Vec<SyncStep>> {
        let path = layout.artifact_path(&config.snake_name(), kind);
        let units = Blueprint::units(config, kind).map_err(StrataError::Domain)?;
        let mut steps: Vec<SyncStep> = units
            .into_iter()
            .map(|blueprint| SyncStep {
                path: path.clone(),
                blueprint,
                patches: Vec::new(),
            })
            .collect();
        // The statement patcher runs once per artifact, after the update
        // method's declaration unit has landed.
        if kind == ArtifactKind::UpdateModel {
            if let Some(last) = steps.last_mut() {
                last.patches = Blueprint::update_guards(config);
            }
        }
        Ok(steps)
    }
}
