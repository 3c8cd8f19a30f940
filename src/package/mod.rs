//! Packages and the operations a host reports for them.

mod discovery;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::AssetError;
use crate::manifest::{Manifest, PathSpec};
use crate::runtime::Runtime;

pub use discovery::find_all_packages;

/// A resolved dependency package and where it is installed.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub install_path: PathBuf,
    pub source: Option<PathSpec>,
}

impl Package {
    pub fn new(name: impl Into<String>, install_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            install_path: install_path.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: PathSpec) -> Self {
        self.source = Some(source);
        self
    }

    /// Load a package from the manifest in its install directory.
    ///
    /// `name` overrides the manifest's own name; one of them must be present.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, install_path: &Path, name: Option<&str>) -> Result<Self> {
        let manifest = Manifest::load_from_dir(runtime, install_path)?;
        let name = name
            .map(str::to_string)
            .or(manifest.name.clone())
            .with_context(|| {
                format!(
                    "Package at {} has no name; pass --name",
                    install_path.display()
                )
            })?;

        Ok(Self {
            name,
            install_path: install_path.to_path_buf(),
            source: manifest.source().cloned(),
        })
    }
}

/// A package event delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PackageOperation {
    /// A package was installed for the first time.
    Install(Package),
    /// A package was updated; only the new state matters.
    Update { target: Package },
    /// A package was removed. Removal is handled by cleanup, not install.
    Uninstall(Package),
}

impl PackageOperation {
    pub fn kind(&self) -> &'static str {
        match self {
            PackageOperation::Install(_) => "install",
            PackageOperation::Update { .. } => "update",
            PackageOperation::Uninstall(_) => "uninstall",
        }
    }

    /// The package whose assets should be linked.
    pub fn package(&self) -> Result<&Package, AssetError> {
        match self {
            PackageOperation::Install(package) => Ok(package),
            PackageOperation::Update { target } => Ok(target),
            PackageOperation::Uninstall(_) => {
                Err(AssetError::UnsupportedOperation { kind: self.kind() })
            }
        }
    }
}
