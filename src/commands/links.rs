use anyhow::Result;
use log::debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{
    installer::Settings,
    runtime::{EntryKind, Runtime, relative_display_path},
};

use super::paths::resolve_root;

/// Link status for display
#[derive(Debug, PartialEq)]
enum LinkStatus {
    /// Link target exists
    Ok(PathBuf),
    /// Link target is gone; cleanup would remove it
    Broken(PathBuf),
    /// Link cannot be read
    Unreadable,
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStatus::Ok(_) => write!(f, ""),
            LinkStatus::Broken(_) => write!(f, " [broken]"),
            LinkStatus::Unreadable => write!(f, " [unreadable]"),
        }
    }
}

fn check_link_status<R: Runtime>(runtime: &R, link: &Path) -> LinkStatus {
    // The target is only for display; whether it is broken is up to the OS.
    let target = match runtime.resolve_link(link) {
        Ok(target) => target,
        Err(e) => {
            debug!("Cannot read link {:?}: {:#}", link, e);
            return LinkStatus::Unreadable;
        }
    };
    match runtime.try_exists(link) {
        Ok(true) => LinkStatus::Ok(target),
        Ok(false) => LinkStatus::Broken(target),
        Err(e) => {
            debug!("Cannot resolve link {:?}: {:#}", link, e);
            LinkStatus::Unreadable
        }
    }
}

/// Every symlink below `dir`, sorted. Symlinked directories are not entered.
fn collect_links<R: Runtime>(runtime: &R, dir: &Path, links: &mut Vec<PathBuf>) -> Result<()> {
    let mut children = runtime.read_dir(dir)?;
    children.sort();
    for path in children {
        match runtime.entry_kind(&path) {
            EntryKind::Symlink => links.push(path),
            EntryKind::Directory => collect_links(runtime, &path, links)?,
            EntryKind::Other => {}
        }
    }
    Ok(())
}

/// Render the asset links of every namespace, one section per namespace.
pub(crate) fn format_links<R: Runtime>(runtime: &R, settings: &Settings) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let root = &settings.root;

    for namespace in settings.namespaces.iter() {
        let dir = root.join(&namespace.target_dir);
        if !runtime.is_dir(&dir) {
            continue;
        }

        let mut links = Vec::new();
        collect_links(runtime, &dir, &mut links)?;
        if links.is_empty() {
            continue;
        }

        lines.push(format!(
            "{} ({}):",
            namespace.name,
            namespace.target_dir.display()
        ));
        for link in links {
            let status = check_link_status(runtime, &link);
            let target = match &status {
                LinkStatus::Ok(target) | LinkStatus::Broken(target) => {
                    relative_display_path(root, target).display().to_string()
                }
                LinkStatus::Unreadable => "?".to_string(),
            };
            lines.push(format!(
                "  {} -> {}{}",
                relative_display_path(root, &link).display(),
                target,
                status
            ));
        }
    }

    Ok(lines)
}

/// List asset links under every configured namespace directory
#[tracing::instrument(skip(runtime, root))]
pub fn links<R: Runtime>(runtime: R, root: Option<PathBuf>) -> Result<()> {
    let root = resolve_root(&runtime, root)?;
    let settings = Settings::load(&runtime, &root)?;

    let lines = format_links(&runtime, &settings)?;
    let mut out = io::stdout().lock();
    if lines.is_empty() {
        let _ = writeln!(out, "No asset links found.");
        return Ok(());
    }
    for line in lines {
        // Stop quietly once the reader has gone away
        if writeln!(out, "{}", line).is_err() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceConfig;
    use crate::runtime::MockRuntime;
    use crate::test_utils::test_root;
    use mockall::predicate::eq;

    fn settings() -> Settings {
        Settings::new(
            test_root(),
            NamespaceConfig::from_pairs([("js", "public/js"), ("css", "public/css")]),
        )
    }

    #[test]
    fn test_format_links() {
        let mut runtime = MockRuntime::new();
        let root = test_root();
        let vendor = root.join("public/js/vendor");

        runtime
            .expect_is_dir()
            .with(eq(root.join("public/js")))
            .returning(|_| true);
        runtime
            .expect_is_dir()
            .with(eq(root.join("public/css")))
            .returning(|_| false);

        runtime
            .expect_read_dir()
            .with(eq(root.join("public/js")))
            .returning(|p| Ok(vec![p.join("vendor")]));
        runtime
            .expect_read_dir()
            .with(eq(vendor.clone()))
            .returning(|p| {
                Ok(vec![p.join("foo"), p.join("bar"), p.join("notes.txt")])
            });

        let subdir = vendor.clone();
        runtime.expect_entry_kind().returning(move |p| {
            if p == subdir {
                EntryKind::Directory
            } else if p.ends_with("notes.txt") {
                EntryKind::Other
            } else {
                EntryKind::Symlink
            }
        });

        // public/js/vendor/<name> -> /srv/app/vendor/<name>/dist
        runtime.expect_resolve_link().returning(|p| {
            let name = p.file_name().unwrap();
            Ok(PathBuf::from("/srv/app/vendor").join(name).join("dist"))
        });
        runtime
            .expect_try_exists()
            .returning(|p| Ok(p.ends_with("foo")));

        let lines = format_links(&runtime, &settings()).unwrap();
        assert_eq!(
            lines,
            vec![
                "js (public/js):",
                "  public/js/vendor/bar -> vendor/bar/dist [broken]",
                "  public/js/vendor/foo -> vendor/foo/dist",
            ]
        );
    }

    #[test]
    fn test_format_links_nothing_linked() {
        let mut runtime = MockRuntime::new();
        runtime.expect_is_dir().returning(|_| false);

        let lines = format_links(&runtime, &settings()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_check_link_status_asks_the_os() {
        let mut runtime = MockRuntime::new();
        let link = PathBuf::from("/srv/app/public/js/lib");

        // Lexically this points at a missing path, but the OS can reach it
        runtime
            .expect_resolve_link()
            .returning(|_| Ok(PathBuf::from("/srv/app/shared")));
        runtime
            .expect_try_exists()
            .with(eq(link.clone()))
            .returning(|_| Ok(true));

        let status = check_link_status(&runtime, &link);
        assert_eq!(status, LinkStatus::Ok(PathBuf::from("/srv/app/shared")));
        assert_eq!(status.to_string(), "");
    }

    #[test]
    fn test_check_link_status_unreadable() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_resolve_link()
            .returning(|_| Err(anyhow::anyhow!("Invalid argument")));

        let status = check_link_status(&runtime, Path::new("/srv/app/public/js/x"));
        assert_eq!(status, LinkStatus::Unreadable);
        assert_eq!(status.to_string(), " [unreadable]");
    }
}
