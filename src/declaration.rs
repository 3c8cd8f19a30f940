//! Per-package asset declarations.

use std::path::PathBuf;

use crate::error::AssetError;
use crate::package::Package;

/// What a single package asks to have linked. Built per package event and
/// discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageAssetDeclaration {
    pub package_name: String,
    pub install_path: PathBuf,
    /// `(namespace, source_dir)` pairs in declared order. `source_dir` is
    /// relative to `install_path`.
    pub entries: Vec<(String, PathBuf)>,
}

impl PackageAssetDeclaration {
    /// Normalize a package's `source` declaration. No filesystem access.
    ///
    /// A package without a declaration yields no entries.
    pub fn resolve(package: &Package) -> Result<Self, AssetError> {
        let entries = match &package.source {
            Some(spec) => spec
                .entries()
                .map_err(|reason| AssetError::InvalidDeclaration {
                    package: package.name.clone(),
                    reason,
                })?,
            None => Vec::new(),
        };

        Ok(Self {
            package_name: package.name.clone(),
            install_path: package.install_path.clone(),
            entries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
