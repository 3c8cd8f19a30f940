//! File system operations (read, directory, classification).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

/// What a path is on disk, looked at without following a final symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Symlink,
    Directory,
    /// Regular files, sockets, devices, and paths that vanished.
    Other,
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context("Failed to create directory")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn try_exists_impl(&self, path: &Path) -> Result<bool> {
        path.try_exists()
            .with_context(|| format!("Failed to check {}", path.display()))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_dir_impl(&self, path: &Path) -> Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .with_context(|| format!("Failed to read directory {}", path.display()))?
            .map(|entry| {
                entry
                    .map(|e| e.path())
                    .context("Failed to read directory entry")
            })
            .collect()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn entry_kind_impl(&self, path: &Path) -> EntryKind {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => EntryKind::Symlink,
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            _ => EntryKind::Other,
        }
    }
}
