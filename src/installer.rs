//! Entry points: link a package's assets, or sweep dangling links.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::declaration::PackageAssetDeclaration;
use crate::error::AssetError;
use crate::manifest::{MANIFEST_FILE, Manifest};
use crate::namespace::NamespaceConfig;
use crate::package::PackageOperation;
use crate::report::Reporter;
use crate::runtime::Runtime;
use crate::sweep::{CleanupReport, Sweeper};
use crate::sync::{LinkOutcome, LinkSynchronizer};
use crate::validate::{ValidatedEntry, validate};

/// Everything fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root project directory; namespace target directories are relative to it.
    pub root: PathBuf,
    pub namespaces: NamespaceConfig,
}

impl Settings {
    pub fn new(root: impl Into<PathBuf>, namespaces: NamespaceConfig) -> Self {
        Self {
            root: root.into(),
            namespaces,
        }
    }

    /// Read the namespace mapping from the root project's manifest.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, root: &Path) -> Result<Self> {
        let manifest = Manifest::load_from_dir(runtime, root).with_context(|| {
            format!("Failed to load root {} in {}", MANIFEST_FILE, root.display())
        })?;
        let namespaces = NamespaceConfig::from_spec(manifest.target())?;
        debug!(
            "Loaded {} namespace(s) from {:?}",
            namespaces.iter().count(),
            root
        );
        Ok(Self::new(root, namespaces))
    }
}

/// Result of one `install` call.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub package: Option<String>,
    pub linked: Vec<(ValidatedEntry, LinkOutcome)>,
    pub failures: Vec<AssetError>,
}

impl InstallReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Link every asset the operation's package declares.
///
/// Never fails: every problem is reported and collected in the returned
/// report, and the remaining entries are still processed.
#[tracing::instrument(skip(runtime, settings, reporter))]
pub fn install<R: Runtime>(
    runtime: &R,
    settings: &Settings,
    operation: &PackageOperation,
    reporter: &dyn Reporter,
) -> InstallReport {
    let mut report = InstallReport::default();

    let package = match operation.package() {
        Ok(package) => package,
        Err(err) => {
            reporter.report(err.level(), &err.to_string());
            report.failures.push(err);
            return report;
        }
    };
    report.package = Some(package.name.clone());

    let declaration = match PackageAssetDeclaration::resolve(package) {
        Ok(declaration) => declaration,
        Err(err) => {
            reporter.report(err.level(), &err.to_string());
            report.failures.push(err);
            return report;
        }
    };
    if declaration.is_empty() {
        debug!("{} declares no assets", package.name);
        return report;
    }

    let validation = validate(
        runtime,
        &declaration,
        &settings.namespaces,
        &settings.root,
        reporter,
    );
    report.failures.extend(validation.rejected);

    let synchronizer = LinkSynchronizer::new(runtime);
    for entry in validation.entries {
        match synchronizer.apply(&entry, reporter) {
            Ok(outcome) => report.linked.push((entry, outcome)),
            Err(err) => report.failures.push(err),
        }
    }

    report
}

/// Remove dangling links from every configured namespace directory.
#[tracing::instrument(skip(runtime, settings, reporter))]
pub fn cleanup<R: Runtime>(
    runtime: &R,
    settings: &Settings,
    reporter: &dyn Reporter,
) -> CleanupReport {
    Sweeper::new(runtime).cleanup(&settings.namespaces, &settings.root, reporter)
}
