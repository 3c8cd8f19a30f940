//! Runtime abstraction for filesystem operations.
//!
//! Every filesystem call the reconciler makes goes through the [`Runtime`]
//! trait so the install and cleanup logic can be exercised against
//! `MockRuntime` as well as the real filesystem.
//!
//! # Structure
//!
//! - `path` - Path utility functions (normalize, relative display paths)
//! - `env` - Process environment (current directory)
//! - `fs` - File system operations (read, directory, classification)
//! - `symlink` - Symlink operations (create, resolve, remove)

mod env;
mod fs;
pub mod path;
mod symlink;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use fs::EntryKind;
pub use path::{is_contained, normalize_path, relative_display_path};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn current_dir(&self) -> Result<PathBuf>;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    /// Like `exists`, following symlinks the way the OS does, but an error
    /// (permission denied, link loop) is returned instead of read as `false`.
    fn try_exists(&self, path: &Path) -> Result<bool>;
    fn is_dir(&self, path: &Path) -> bool;
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Classify a path without following a final symlink.
    fn entry_kind(&self, path: &Path) -> EntryKind;

    // Symlinks
    fn symlink(&self, original: &Path, link: &Path) -> Result<()>;
    /// Resolve a symlink to an absolute path (without recursively resolving symlinks).
    /// If the link target is relative, it is resolved relative to the link's parent directory.
    fn resolve_link(&self, path: &Path) -> Result<PathBuf>;

    fn is_symlink(&self, path: &Path) -> bool;
    fn remove_symlink(&self, path: &Path) -> Result<()>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn try_exists(&self, path: &Path) -> Result<bool> {
        self.try_exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn entry_kind(&self, path: &Path) -> EntryKind {
        self.entry_kind_impl(path)
    }

    fn symlink(&self, original: &Path, link: &Path) -> Result<()> {
        self.symlink_impl(original, link)
    }

    fn resolve_link(&self, path: &Path) -> Result<PathBuf> {
        self.resolve_link_impl(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.is_symlink_impl(path)
    }

    fn remove_symlink(&self, path: &Path) -> Result<()> {
        self.remove_symlink_impl(path)
    }
}
