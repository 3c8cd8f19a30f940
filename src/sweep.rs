//! Removing dangling asset links from the namespace directories.

use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::error::AssetError;
use crate::namespace::NamespaceConfig;
use crate::report::{Level, Reporter};
use crate::runtime::{EntryKind, Runtime};

#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Links that were removed, in walk order.
    pub removed: Vec<PathBuf>,
    pub errors: Vec<AssetError>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct Sweeper<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> Sweeper<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    /// Walk every existing namespace directory under `root` and remove each
    /// symlink whose target no longer exists. Nothing else is touched.
    #[tracing::instrument(skip(self, namespaces, reporter))]
    pub fn cleanup(
        &self,
        namespaces: &NamespaceConfig,
        root: &Path,
        reporter: &dyn Reporter,
    ) -> CleanupReport {
        reporter.report(Level::Info, "Cleanup asset directories");

        let mut report = CleanupReport::default();
        for namespace in namespaces.iter() {
            let dir = root.join(&namespace.target_dir);
            if !self.runtime.is_dir(&dir) {
                debug!("Namespace {} has no directory at {:?}", namespace.name, dir);
                continue;
            }
            self.walk(&dir, reporter, &mut report);
        }
        report
    }

    fn walk(&self, dir: &Path, reporter: &dyn Reporter, report: &mut CleanupReport) {
        let mut children = match self.runtime.read_dir(dir) {
            Ok(children) => children,
            Err(e) => {
                self.fail(
                    AssetError::SweepRead {
                        path: dir.to_path_buf(),
                        reason: format!("{:#}", e),
                    },
                    reporter,
                    report,
                );
                return;
            }
        };
        children.sort();

        for path in children {
            match self.runtime.entry_kind(&path) {
                EntryKind::Symlink => self.sweep_link(&path, reporter, report),
                EntryKind::Directory => self.walk(&path, reporter, report),
                EntryKind::Other => trace!("Skipping {:?}", path),
            }
        }
    }

    fn sweep_link(&self, link: &Path, reporter: &dyn Reporter, report: &mut CleanupReport) {
        // Followed by the OS, so `..` in the link is taken after any
        // symlinked parent directories.
        match self.runtime.try_exists(link) {
            Ok(true) => {
                trace!("{:?} resolves", link);
                return;
            }
            Ok(false) => {}
            Err(e) => {
                debug!("Cannot resolve link {:?}: {:#}", link, e);
                return;
            }
        }

        reporter.report(
            Level::Custom,
            &format!("Removing unresolved path {}", link.display()),
        );
        match self.runtime.remove_symlink(link) {
            Ok(()) => report.removed.push(link.to_path_buf()),
            Err(e) => self.fail(
                AssetError::SweepRemove {
                    path: link.to_path_buf(),
                    reason: format!("{:#}", e),
                },
                reporter,
                report,
            ),
        }
    }

    fn fail(&self, err: AssetError, reporter: &dyn Reporter, report: &mut CleanupReport) {
        if let Some(reason) = err.reason() {
            debug!("{}: {}", err, reason);
        }
        reporter.report(err.level(), &err.to_string());
        report.errors.push(err);
    }
}
