//! The root project's namespace → target directory mapping.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

use crate::manifest::PathSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceEntry {
    pub name: String,
    /// Relative to the root project directory.
    pub target_dir: PathBuf,
}

/// Loaded once per run. An empty config is legal and rejects every entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamespaceConfig {
    entries: Vec<NamespaceEntry>,
}

impl NamespaceConfig {
    /// Build from the root manifest's `target` value.
    pub fn from_spec(spec: Option<&PathSpec>) -> Result<Self> {
        let pairs = match spec {
            Some(spec) => spec
                .entries()
                .map_err(|reason| {
                    anyhow!("Invalid asset target in root manifest: {}", reason)
                })?,
            None => Vec::new(),
        };
        Ok(Self::from_pairs(pairs))
    }

    /// Build from `(namespace, target_dir)` pairs. A repeated namespace
    /// replaces the earlier directory but keeps its position.
    pub fn from_pairs<I, S, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<PathBuf>,
    {
        let mut entries: Vec<NamespaceEntry> = Vec::new();
        for (name, target_dir) in pairs {
            let name = name.into();
            let target_dir = target_dir.into();
            match entries.iter_mut().find(|e| e.name == name) {
                Some(existing) => existing.target_dir = target_dir,
                None => entries.push(NamespaceEntry { name, target_dir }),
            }
        }
        Self { entries }
    }

    pub fn resolve(&self, namespace: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| e.name == namespace)
            .map(|e| e.target_dir.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamespaceEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
