//! Filtering declared entries down to the ones that can be linked.

use log::debug;
use std::path::{Path, PathBuf};

use crate::declaration::PackageAssetDeclaration;
use crate::error::AssetError;
use crate::namespace::NamespaceConfig;
use crate::report::Reporter;
use crate::runtime::{Runtime, is_contained};

/// An entry whose namespace is known and whose source directory exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    pub package_name: String,
    pub namespace: String,
    /// As declared, relative to the package install path.
    pub source_dir: PathBuf,
    /// `install_path/source_dir`
    pub source_path: PathBuf,
    /// `root/target_dir(namespace)/package_name`
    pub target_path: PathBuf,
}

#[derive(Debug, Default)]
pub struct Validation {
    pub entries: Vec<ValidatedEntry>,
    pub rejected: Vec<AssetError>,
}

/// Check every declared entry, in order. Each rejected entry is reported
/// as a warning and skipped; the others are still checked.
///
/// Source directories, target directories and package names must be
/// relative and free of `..`, so every link stays under `root` and every
/// source under the package's install path.
#[tracing::instrument(skip(runtime, namespaces, reporter))]
pub fn validate<R: Runtime>(
    runtime: &R,
    declaration: &PackageAssetDeclaration,
    namespaces: &NamespaceConfig,
    root: &Path,
    reporter: &dyn Reporter,
) -> Validation {
    let mut validation = Validation::default();

    for (namespace, source_dir) in &declaration.entries {
        match check_entry(
            runtime,
            declaration,
            namespaces,
            root,
            namespace,
            source_dir,
        ) {
            Ok(entry) => {
                debug!(
                    "Validated {:?} -> {:?}",
                    entry.source_path, entry.target_path
                );
                validation.entries.push(entry);
            }
            Err(err) => {
                reporter.report(err.level(), &err.to_string());
                validation.rejected.push(err);
            }
        }
    }

    validation
}

fn check_entry<R: Runtime>(
    runtime: &R,
    declaration: &PackageAssetDeclaration,
    namespaces: &NamespaceConfig,
    root: &Path,
    namespace: &str,
    source_dir: &Path,
) -> Result<ValidatedEntry, AssetError> {
    let target_dir = namespaces
        .resolve(namespace)
        .ok_or_else(|| AssetError::UnknownNamespace {
            package: declaration.package_name.clone(),
            namespace: namespace.to_string(),
        })?;

    let package_dir = Path::new(&declaration.package_name);
    for path in [source_dir, target_dir, package_dir] {
        if !is_contained(path) {
            return Err(AssetError::UnsafePath {
                package: declaration.package_name.clone(),
                path: path.to_path_buf(),
            });
        }
    }

    let source_path = declaration.install_path.join(source_dir);
    if !runtime.is_dir(&source_path) {
        return Err(AssetError::MissingSource {
            package: declaration.package_name.clone(),
            source_dir: source_dir.to_path_buf(),
        });
    }

    Ok(ValidatedEntry {
        package_name: declaration.package_name.clone(),
        namespace: namespace.to_string(),
        source_dir: source_dir.to_path_buf(),
        source_path,
        target_path: root.join(target_dir).join(package_dir),
    })
}
