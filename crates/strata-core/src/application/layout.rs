//! Output layout configuration.
//!
//! The output root is explicit state threaded through the service
//! constructor. There is no process-wide destination path; two services
//! with different layouts can run in the same process.

use std::path::{Path, PathBuf};

use crate::domain::schema::ArtifactKind;

/// Where generated files live, and how artifact kinds map to paths.
///
/// One path per architectural layer per entity:
/// `<root>/<entity>/{model,repository,service,handler,interceptor,events}.rs`,
/// the per-entity module file `<root>/<entity>/mod.rs`, and the shared
/// wiring module `<root>/modules.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target file for one artifact of one entity (snake_case module name).
    pub fn artifact_path(&self, module: &str, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::Wiring => self.root.join("modules.rs"),
            _ => self
                .root
                .join(module)
                .join(format!("{}.rs", kind.file_stem())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_are_layered_per_entity() {
        let layout = OutputLayout::new("/out/src");
        assert_eq!(
            layout.artifact_path("widget", ArtifactKind::ItemModel),
            PathBuf::from("/out/src/widget/model.rs")
        );
        assert_eq!(
            layout.artifact_path("widget", ArtifactKind::UpdateModel),
            PathBuf::from("/out/src/widget/model.rs"),
            "model variants share one file"
        );
        assert_eq!(
            layout.artifact_path("widget", ArtifactKind::EntityModule),
            PathBuf::from("/out/src/widget/mod.rs")
        );
    }

    #[test]
    fn wiring_lives_at_the_root() {
        let layout = OutputLayout::new("/out/src");
        assert_eq!(
            layout.artifact_path("widget", ArtifactKind::Wiring),
            PathBuf::from("/out/src/modules.rs")
        );
    }
}
