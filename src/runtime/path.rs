//! Path utility functions for normalization and display.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
/// This does not access the filesystem and does not follow symlinks.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // If we can't pop (e.g., at root), keep the `..`
                if !result.pop() {
                    result.push(component);
                }
            }
            _ => {
                result.push(component);
            }
        }
    }
    result
}

/// Whether joining `path` onto a base directory stays below that base.
///
/// Only plain names and `.` qualify; absolute paths, prefixes and `..` do not.
pub fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Express `path` relative to `base` for display.
///
/// For example, with base `/srv/app` the link `/srv/app/public/js/vendor/foo`
/// displays as `public/js/vendor/foo`. Falls back to `path` unchanged when no
/// relative form exists.
pub fn relative_display_path(base: &Path, path: &Path) -> PathBuf {
    match pathdiff::diff_paths(path, base) {
        Some(relative) if !relative.is_absolute() && !relative.as_os_str().is_empty() => relative,
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_simple() {
        assert_eq!(
            normalize_path(Path::new("/srv/app/public")),
            PathBuf::from("/srv/app/public")
        );
    }

    #[test]
    fn test_normalize_path_with_dot() {
        assert_eq!(
            normalize_path(Path::new("/srv/./app/./public")),
            PathBuf::from("/srv/app/public")
        );
    }

    #[test]
    fn test_normalize_path_with_parent_dir() {
        assert_eq!(
            normalize_path(Path::new("/srv/app/public/js/vendor/../../../vendor/foo/dist")),
            PathBuf::from("/srv/app/vendor/foo/dist")
        );
    }

    #[test]
    fn test_normalize_path_parent_at_root() {
        #[cfg(unix)]
        assert_eq!(
            normalize_path(Path::new("/srv/../../../etc")),
            PathBuf::from("/etc")
        );
    }

    #[test]
    fn test_normalize_path_relative() {
        assert_eq!(
            normalize_path(Path::new("vendor/foo/../bar")),
            PathBuf::from("vendor/bar")
        );
    }

    #[test]
    fn test_normalize_path_only_dots() {
        assert_eq!(normalize_path(Path::new("./././.")), PathBuf::from(""));
    }

    #[test]
    fn test_is_contained() {
        assert!(is_contained(Path::new("dist")));
        assert!(is_contained(Path::new("./dist/js")));
        assert!(is_contained(Path::new("vendor/foo")));

        assert!(!is_contained(Path::new("")));
        assert!(!is_contained(Path::new("/tmp/x")));
        assert!(!is_contained(Path::new("../outside")));
        assert!(!is_contained(Path::new("vendor/../../etc")));
    }

    #[test]
    fn test_relative_display_path_under_base() {
        assert_eq!(
            relative_display_path(
                Path::new("/srv/app"),
                Path::new("/srv/app/public/js/vendor/foo")
            ),
            PathBuf::from("public/js/vendor/foo")
        );
    }

    #[test]
    fn test_relative_display_path_outside_base() {
        assert_eq!(
            relative_display_path(Path::new("/srv/app"), Path::new("/opt/vendor/foo")),
            PathBuf::from("../../opt/vendor/foo")
        );
    }

    #[test]
    fn test_relative_display_path_same_path() {
        assert_eq!(
            relative_display_path(Path::new("/srv/app"), Path::new("/srv/app")),
            PathBuf::from("/srv/app")
        );
    }

    #[test]
    fn test_relative_display_path_relative_path_against_absolute_base() {
        // pathdiff cannot relate a relative path to an absolute base
        assert_eq!(
            relative_display_path(Path::new("/srv/app"), Path::new("public/js")),
            PathBuf::from("public/js")
        );
    }
}
