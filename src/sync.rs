//! Creating and repairing one asset symlink per validated entry.

use log::debug;
use std::path::Path;

use crate::error::AssetError;
use crate::report::{Level, Reporter};
use crate::runtime::Runtime;
use crate::validate::ValidatedEntry;

/// What happened to a single link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// No link existed; one was created.
    Created,
    /// A stale link was removed and created again.
    Replaced,
    /// The existing link was kept as is.
    Unchanged,
}

pub struct LinkSynchronizer<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> LinkSynchronizer<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    /// Make `entry.target_path` a symlink to `entry.source_path`.
    ///
    /// A failure is reported and returned; it never affects other entries.
    #[tracing::instrument(skip(self, reporter))]
    pub fn apply(
        &self,
        entry: &ValidatedEntry,
        reporter: &dyn Reporter,
    ) -> Result<LinkOutcome, AssetError> {
        let result = self.link(entry, reporter);
        if let Err(err) = &result {
            if let Some(reason) = err.reason() {
                debug!("{}: {}", err, reason);
            }
            reporter.report(err.level(), &err.to_string());
        }
        result
    }

    fn link(
        &self,
        entry: &ValidatedEntry,
        reporter: &dyn Reporter,
    ) -> Result<LinkOutcome, AssetError> {
        let target = entry.target_path.as_path();

        if let Some(dir) = target.parent() {
            self.ensure_dir(entry, dir)?;
        }

        reporter.report(
            Level::Custom,
            &format!(
                "Installing asset {}/{}",
                entry.package_name,
                entry.source_dir.display()
            ),
        );

        let mut outcome = LinkOutcome::Created;
        if self.runtime.is_symlink(target) {
            // A link only counts as current when it resolves to its own
            // path; anything else is replaced.
            match self.runtime.resolve_link(target) {
                Ok(resolved) if resolved == target => {
                    debug!("{:?} already resolves to itself, keeping it", target);
                    return Ok(LinkOutcome::Unchanged);
                }
                Ok(resolved) => {
                    debug!("{:?} points to {:?}, replacing", target, resolved);
                }
                Err(e) => {
                    debug!("{:?} is unreadable ({:#}), replacing", target, e);
                }
            }

            self.runtime
                .remove_symlink(target)
                .map_err(|e| AssetError::ReplaceLink {
                    package: entry.package_name.clone(),
                    target_path: target.to_path_buf(),
                    reason: format!("{:#}", e),
                })?;
            outcome = LinkOutcome::Replaced;
        }

        // An existing file or directory at the target makes this fail.
        self.runtime
            .symlink(&entry.source_path, target)
            .map_err(|e| AssetError::CreateLink {
                package: entry.package_name.clone(),
                source_path: entry.source_path.clone(),
                target_path: target.to_path_buf(),
                reason: format!("{:#}", e),
            })?;

        debug!("Linked {:?} -> {:?}", target, entry.source_path);
        Ok(outcome)
    }

    fn ensure_dir(&self, entry: &ValidatedEntry, dir: &Path) -> Result<(), AssetError> {
        if self.runtime.is_dir(dir) {
            return Ok(());
        }
        debug!("Creating target directory {:?}", dir);
        self.runtime
            .create_dir_all(dir)
            .map_err(|e| AssetError::CreateDirectory {
                package: entry.package_name.clone(),
                dir: dir.to_path_buf(),
                reason: format!("{:#}", e),
            })
    }
}
