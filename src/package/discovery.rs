use log::debug;
use std::path::{Path, PathBuf};

use crate::error::AssetError;
use crate::manifest::MANIFEST_FILE;
use crate::report::Reporter;
use crate::runtime::Runtime;

/// Find all package directories under a vendor directory by scanning for manifests.
///
/// Directory structure: `<vendor>/<owner>/<name>/assetlink.json`. Results are sorted.
/// A directory that cannot be listed is reported and skipped.
#[tracing::instrument(skip(runtime, vendor_dir, reporter))]
pub fn find_all_packages<R: Runtime>(
    runtime: &R,
    vendor_dir: &Path,
    reporter: &dyn Reporter,
) -> Vec<PathBuf> {
    let mut packages = Vec::new();

    if !runtime.exists(vendor_dir) {
        debug!("No vendor directory at {:?}", vendor_dir);
        return packages;
    }

    for owner_path in list_dir(runtime, vendor_dir, reporter) {
        if runtime.is_dir(&owner_path) {
            for package_path in list_dir(runtime, &owner_path, reporter) {
                if runtime.is_dir(&package_path)
                    && runtime.exists(&package_path.join(MANIFEST_FILE))
                {
                    packages.push(package_path);
                }
            }
        }
    }

    packages.sort();
    packages
}

fn list_dir<R: Runtime>(runtime: &R, dir: &Path, reporter: &dyn Reporter) -> Vec<PathBuf> {
    runtime.read_dir(dir).unwrap_or_else(|e| {
        let err = AssetError::DiscoveryRead {
            path: dir.to_path_buf(),
            reason: format!("{:#}", e),
        };
        debug!("{}: {:#}", err, e);
        reporter.report(err.level(), &err.to_string());
        Vec::new()
    })
}
