use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use crate::runtime::{Runtime, normalize_path};

/// Resolve the root project directory, defaulting to the current directory.
#[tracing::instrument(skip(runtime))]
pub fn resolve_root<R: Runtime>(runtime: &R, root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(path) => absolute(runtime, &path)?,
        None => runtime.current_dir()?,
    };
    info!("Using project root: {}", root.display());
    Ok(root)
}

/// Make a command-line path absolute against the current directory.
pub fn absolute<R: Runtime>(runtime: &R, path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize_path(path))
    } else {
        Ok(normalize_path(&runtime.current_dir()?.join(path)))
    }
}
