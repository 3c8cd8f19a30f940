//! Manifest files carrying asset link declarations.
//!
//! Both the root project and every package carry an `assetlink.json`:
//!
//! ```json
//! {
//!   "name": "vendor/foo",
//!   "asset-links": {
//!     "target": { "js": "public/js" },
//!     "source": { "js": "dist" }
//!   }
//! }
//! ```
//!
//! The root reads `target`, packages read `source`. Either field may be a
//! single path instead of a mapping, in which case it belongs to the
//! [`DEFAULT_NAMESPACE`].

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// File name of a manifest inside a project or package directory.
pub const MANIFEST_FILE: &str = "assetlink.json";

/// Namespace used when a path is given without a mapping.
pub const DEFAULT_NAMESPACE: &str = "assets";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "asset-links", default)]
    pub assets: Option<AssetSection>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AssetSection {
    #[serde(default)]
    pub target: Option<PathSpec>,
    #[serde(default)]
    pub source: Option<PathSpec>,
}

/// A single path or a namespace → path mapping, in declared order.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PathSpec {
    Single(PathBuf),
    Mapping(Map<String, Value>),
}

impl PathSpec {
    /// Normalize into `(namespace, path)` pairs, keeping declared order.
    ///
    /// Fails on mapping values that are not strings.
    pub fn entries(&self) -> std::result::Result<Vec<(String, PathBuf)>, String> {
        match self {
            PathSpec::Single(path) => Ok(vec![(DEFAULT_NAMESPACE.to_string(), path.clone())]),
            PathSpec::Mapping(map) => map
                .iter()
                .map(|(namespace, value)| match value {
                    Value::String(path) => Ok((namespace.clone(), PathBuf::from(path))),
                    other => Err(format!(
                        "path for namespace '{}' must be a string, got {}",
                        namespace, other
                    )),
                })
                .collect(),
        }
    }
}

impl Manifest {
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let manifest: Manifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))?;
        Ok(manifest)
    }

    /// Load the manifest found in `dir`.
    pub fn load_from_dir<R: Runtime>(runtime: &R, dir: &Path) -> Result<Self> {
        Self::load(runtime, &dir.join(MANIFEST_FILE))
    }

    pub fn target(&self) -> Option<&PathSpec> {
        self.assets.as_ref().and_then(|a| a.target.as_ref())
    }

    pub fn source(&self) -> Option<&PathSpec> {
        self.assets.as_ref().and_then(|a| a.source.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_path_spec_single_uses_default_namespace() {
        let spec: PathSpec = serde_json::from_str(r#""public/assets""#).unwrap();
        assert_eq!(
            spec.entries().unwrap(),
            vec![("assets".to_string(), PathBuf::from("public/assets"))]
        );
    }

    #[test]
    fn test_path_spec_mapping_keeps_declared_order() {
        let spec: PathSpec =
            serde_json::from_str(r#"{"js": "public/js", "css": "public/css", "img": "public/img"}"#)
                .unwrap();
        let namespaces: Vec<_> = spec
            .entries()
            .unwrap()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(namespaces, vec!["js", "css", "img"]);
    }

    #[test]
    fn test_path_spec_mapping_rejects_non_string() {
        let spec: PathSpec = serde_json::from_str(r#"{"js": 42}"#).unwrap();
        let err = spec.entries().unwrap_err();
        assert!(err.contains("'js'"));
        assert!(err.contains("42"));
    }

    #[test]
    fn test_path_spec_empty_mapping() {
        let spec: PathSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.entries().unwrap().is_empty());
    }

    #[test]
    fn test_manifest_without_asset_section() {
        let manifest: Manifest = serde_json::from_str(r#"{"name": "vendor/foo"}"#).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("vendor/foo"));
        assert!(manifest.target().is_none());
        assert!(manifest.source().is_none());
    }

    #[test]
    fn test_manifest_load() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/srv/app/vendor/foo/assetlink.json");

        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| {
                Ok(r#"{"name": "vendor/foo", "asset-links": {"source": {"js": "dist"}}}"#
                    .to_string())
            });

        let manifest = Manifest::load(&runtime, &path).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("vendor/foo"));
        assert_eq!(
            manifest.source().unwrap().entries().unwrap(),
            vec![("js".to_string(), PathBuf::from("dist"))]
        );
    }

    #[test]
    fn test_manifest_load_invalid_json() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("{ not json".to_string()));

        let result = Manifest::load_from_dir(&runtime, Path::new("/srv/app"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse manifest /srv/app/assetlink.json")
        );
    }
}
