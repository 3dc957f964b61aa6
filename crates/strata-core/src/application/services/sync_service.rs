//! Sync orchestration service.
//!
//! Executes generation plans: for each sync step, read the target file
//! through the filesystem port, merge the step's blueprint into the parsed
//! tree (or a fresh skeleton when the file is absent), apply statement
//! patches, render, and write the result back. Every step re-reads the file
//! it targets, so consecutive steps over the same file compose without
//! shared in-memory state.
//!
//! Rewrites normalize formatting and drop plain `//` comments in synced
//! files (doc comments survive; see [`crate::engine::emit`]).

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::application::error::ApplicationError;
use crate::application::layout::OutputLayout;
use crate::application::plan::{GenerationPlan, SyncStep};
use crate::application::ports::Filesystem;
use crate::domain::entity::EntityConfig;
use crate::domain::schema::ArtifactKind;
use crate::engine::{emit, merge, patch};
use crate::error::StrataResult;

/// Result of one sync step: the file it targeted and whether its content
/// changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub path: PathBuf,
    pub changed: bool,
}

/// Summary of a full generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<SyncOutcome>,
}

impl GenerationReport {
    /// Distinct files the run visited.
    pub fn files_touched(&self) -> usize {
        let paths: std::collections::BTreeSet<_> =
            self.outcomes.iter().map(|o| o.path.as_path()).collect();
        paths.len()
    }

    /// Distinct files whose content changed.
    pub fn files_changed(&self) -> usize {
        let paths: std::collections::BTreeSet<_> = self
            .outcomes
            .iter()
            .filter(|o| o.changed)
            .map(|o| o.path.as_path())
            .collect();
        paths.len()
    }

    /// True when the run rewrote nothing (a stable rerun).
    pub fn is_noop(&self) -> bool {
        self.outcomes.iter().all(|o| !o.changed)
    }
}

/// Orchestrates declaration-level synchronization of generated source files.
pub struct SyncService {
    filesystem: Box<dyn Filesystem>,
    layout: OutputLayout,
}

impl SyncService {
    pub fn new(filesystem: Box<dyn Filesystem>, layout: OutputLayout) -> Self {
        Self { filesystem, layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Generate or re-sync every enabled artifact of an entity.
    #[instrument(skip_all, fields(entity = %config.name))]
    pub fn generate(&self, config: &EntityConfig) -> StrataResult<GenerationReport> {
        info!("Syncing entity artifacts");
        let plan = GenerationPlan::for_config(config, &self.layout)?;
        let report = self.execute(plan)?;
        info!(
            files = report.files_touched(),
            changed = report.files_changed(),
            "Sync completed"
        );
        Ok(report)
    }

    /// Generate or re-sync a single artifact of an entity.
    #[instrument(skip_all, fields(entity = %config.name, artifact = ?kind))]
    pub fn sync_artifact(
        &self,
        config: &EntityConfig,
        kind: ArtifactKind,
    ) -> StrataResult<GenerationReport> {
        let plan = GenerationPlan::for_artifact(config, &self.layout, kind)?;
        self.execute(plan)
    }

    fn execute(&self, plan: GenerationPlan) -> StrataResult<GenerationReport> {
        let mut outcomes = Vec::with_capacity(plan.steps.len());
        for step in &plan.steps {
            outcomes.push(self.sync_step(step)?);
        }
        Ok(GenerationReport { outcomes })
    }

    /// One read-merge-patch-render-write pass. An existing file that does
    /// not parse aborts the step; overwriting it would destroy edits we
    /// cannot see.
    fn sync_step(&self, step: &SyncStep) -> StrataResult<SyncOutcome> {
        let existing = self.filesystem.read_to_string(&step.path)?;
        let mut tree = match existing.as_deref() {
            None => emit::skeleton(),
            Some(text) => emit::parse_source(text).map_err(|err| {
                ApplicationError::UnparsableSource {
                    path: step.path.clone(),
                    reason: err.to_string(),
                }
            })?,
        };

        merge::merge_blueprint(&mut tree, step.blueprint.clone());
        for guard in &step.patches {
            patch::apply_guard(&mut tree, guard);
        }

        let rendered = emit::render(&tree);
        let changed = existing.as_deref() != Some(rendered.as_str());
        if changed {
            if let Some(parent) = step.path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&step.path, &rendered)?;
        }
        debug!(path = %step.path.display(), changed, "Sync step finished");
        Ok(SyncOutcome {
            path: step.path.clone(),
            changed,
        })
    }
}
