//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use strata_core::application::ports::Filesystem;

/// In-memory filesystem for testing.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Seed a file, creating parent directories (testing helper).
    pub fn seed_file(&self, path: &Path, content: &str) {
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> strata_core::error::StrataResult<Option<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| strata_core::application::ApplicationError::AdapterLockError)?;

        Ok(inner.files.get(path).cloned())
    }

    fn write_file(&self, path: &Path, content: &str) -> strata_core::error::StrataResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| strata_core::application::ApplicationError::AdapterLockError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(strata_core::application::ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> strata_core::error::StrataResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| strata_core::application::ApplicationError::AdapterLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/src/widget/model.rs"), "x").is_err());

        fs.create_dir_all(Path::new("/src/widget")).unwrap();
        assert!(fs.write_file(Path::new("/src/widget/model.rs"), "x").is_ok());
    }

    #[test]
    fn absent_file_reads_as_none() {
        let fs = MemoryFilesystem::new();
        assert_eq!(fs.read_to_string(Path::new("/src/nope.rs")).unwrap(), None);
    }

    #[test]
    fn seed_file_creates_parents() {
        let fs = MemoryFilesystem::new();
        fs.seed_file(Path::new("/src/widget/model.rs"), "pub struct Widget;");
        assert!(fs.exists(Path::new("/src/widget")));
        assert_eq!(
            fs.read_file(Path::new("/src/widget/model.rs")).as_deref(),
            Some("pub struct Widget;")
        );
    }
}
