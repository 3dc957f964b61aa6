//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `strata-adapters` crate provides implementations.

use std::path::Path;

use crate::error::StrataResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `read_to_string` distinguishes "file absent" (`Ok(None)`) from read
///   failures (`Err`); the sync pipeline needs the difference to pick the
///   skeleton fallback only for absent files.
/// - Each sync call's visible effect is "file replaced with new complete
///   content"; there is no partial write surface.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a file's full content, or `None` when the path does not exist.
    fn read_to_string(&self, path: &Path) -> StrataResult<Option<String>>;

    /// Replace a file's content wholesale.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
