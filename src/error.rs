//! Error kinds produced while reconciling asset links.
//!
//! None of these abort a run. Each one is reported, recorded in the
//! returned report, and the affected entry (or package, or link) is skipped.

use std::path::PathBuf;

use crate::report::Level;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("{package}: namespace not defined in root package '{namespace}'")]
    UnknownNamespace { package: String, namespace: String },

    #[error("{package}: asset directory does not exist '{}'", .source_dir.display())]
    MissingSource { package: String, source_dir: PathBuf },

    /// An absolute path or `..` would place a link or its source outside
    /// the directory it belongs to.
    #[error("{package}: asset path leaves its base directory '{}'", .path.display())]
    UnsafePath { package: String, path: PathBuf },

    #[error("{package}: unable to create target directory '{}'", .dir.display())]
    CreateDirectory {
        package: String,
        dir: PathBuf,
        reason: String,
    },

    #[error("{package}: unable to remove existing link '{}'", .target_path.display())]
    ReplaceLink {
        package: String,
        target_path: PathBuf,
        reason: String,
    },

    #[error(
        "{package}: unable to create link to asset '{}' -> '{}'",
        .source_path.display(),
        .target_path.display()
    )]
    CreateLink {
        package: String,
        source_path: PathBuf,
        target_path: PathBuf,
        reason: String,
    },

    #[error("Unsupported package operation: {kind}")]
    UnsupportedOperation { kind: &'static str },

    #[error("{package}: invalid asset declaration: {reason}")]
    InvalidDeclaration { package: String, reason: String },

    #[error("Unable to remove unresolved path '{}'", .path.display())]
    SweepRemove { path: PathBuf, reason: String },

    #[error("Unable to read asset directory '{}'", .path.display())]
    SweepRead { path: PathBuf, reason: String },

    #[error("Unable to read package directory '{}'", .path.display())]
    DiscoveryRead { path: PathBuf, reason: String },
}

impl AssetError {
    /// Severity this error is reported at.
    pub fn level(&self) -> Level {
        match self {
            AssetError::UnknownNamespace { .. }
            | AssetError::MissingSource { .. }
            | AssetError::UnsafePath { .. } => Level::Warning,
            _ => Level::Error,
        }
    }

    /// Underlying OS-level cause, when there is one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            AssetError::CreateDirectory { reason, .. }
            | AssetError::ReplaceLink { reason, .. }
            | AssetError::CreateLink { reason, .. }
            | AssetError::SweepRemove { reason, .. }
            | AssetError::SweepRead { reason, .. }
            | AssetError::DiscoveryRead { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_namespace_message() {
        let err = AssetError::UnknownNamespace {
            package: "vendor/foo".into(),
            namespace: "css".into(),
        };
        assert_eq!(
            err.to_string(),
            "vendor/foo: namespace not defined in root package 'css'"
        );
        assert_eq!(err.level(), Level::Warning);
        assert_eq!(err.reason(), None);
    }

    #[test]
    fn test_missing_source_message() {
        let err = AssetError::MissingSource {
            package: "vendor/foo".into(),
            source_dir: PathBuf::from("dist"),
        };
        assert_eq!(
            err.to_string(),
            "vendor/foo: asset directory does not exist 'dist'"
        );
        assert_eq!(err.level(), Level::Warning);
    }

    #[test]
    fn test_unsafe_path_message() {
        let err = AssetError::UnsafePath {
            package: "vendor/foo".into(),
            path: PathBuf::from("../../etc"),
        };
        assert_eq!(
            err.to_string(),
            "vendor/foo: asset path leaves its base directory '../../etc'"
        );
        assert_eq!(err.level(), Level::Warning);
        assert_eq!(err.reason(), None);
    }

    #[test]
    fn test_create_link_message() {
        let err = AssetError::CreateLink {
            package: "vendor/foo".into(),
            source_path: PathBuf::from("/srv/app/vendor/foo/dist"),
            target_path: PathBuf::from("/srv/app/public/js/vendor/foo"),
            reason: "File exists (os error 17)".into(),
        };
        assert_eq!(
            err.to_string(),
            "vendor/foo: unable to create link to asset '/srv/app/vendor/foo/dist' -> '/srv/app/public/js/vendor/foo'"
        );
        assert_eq!(err.level(), Level::Error);
        assert_eq!(err.reason(), Some("File exists (os error 17)"));
    }

    #[test]
    fn test_unsupported_operation_message() {
        let err = AssetError::UnsupportedOperation { kind: "uninstall" };
        assert_eq!(err.to_string(), "Unsupported package operation: uninstall");
        assert_eq!(err.level(), Level::Error);
    }
}
