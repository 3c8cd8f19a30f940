use anyhow::{Result, bail};
use log::debug;
use std::path::{Path, PathBuf};

use crate::{
    installer::{self, InstallReport, Settings},
    package::{Package, PackageOperation, find_all_packages},
    report::{Level, Reporter},
    runtime::Runtime,
};

mod links;
mod paths;

pub use links::links;

use paths::{absolute, resolve_root};

/// Link the assets of freshly installed packages
#[tracing::instrument(skip(runtime, root, reporter))]
pub fn install<R: Runtime>(
    runtime: R,
    root: Option<PathBuf>,
    package_dirs: &[PathBuf],
    name: Option<&str>,
    reporter: &dyn Reporter,
) -> Result<()> {
    if name.is_some() && package_dirs.len() > 1 {
        bail!("--name can only be used with a single package directory");
    }

    let root = resolve_root(&runtime, root)?;
    let settings = Settings::load(&runtime, &root)?;

    for dir in package_dirs {
        if let Some(package) = load_package(&runtime, dir, name, reporter)? {
            run(
                &runtime,
                &settings,
                &PackageOperation::Install(package),
                reporter,
            );
        }
    }
    Ok(())
}

/// Re-link the assets of an updated package
#[tracing::instrument(skip(runtime, root, reporter))]
pub fn update<R: Runtime>(
    runtime: R,
    root: Option<PathBuf>,
    package_dir: &Path,
    name: Option<&str>,
    reporter: &dyn Reporter,
) -> Result<()> {
    let root = resolve_root(&runtime, root)?;
    let settings = Settings::load(&runtime, &root)?;

    if let Some(target) = load_package(&runtime, package_dir, name, reporter)? {
        run(
            &runtime,
            &settings,
            &PackageOperation::Update { target },
            reporter,
        );
    }
    Ok(())
}

/// Remove dangling links from every namespace directory
#[tracing::instrument(skip(runtime, root, reporter))]
pub fn cleanup<R: Runtime>(
    runtime: R,
    root: Option<PathBuf>,
    reporter: &dyn Reporter,
) -> Result<()> {
    let root = resolve_root(&runtime, root)?;
    let settings = Settings::load(&runtime, &root)?;

    let report = installer::cleanup(&runtime, &settings, reporter);
    debug!(
        "Cleanup removed {} link(s), {} error(s)",
        report.removed.len(),
        report.errors.len()
    );
    Ok(())
}

/// Link every package found in the vendor directory, then clean up
#[tracing::instrument(skip(runtime, root, reporter))]
pub fn sync<R: Runtime>(
    runtime: R,
    root: Option<PathBuf>,
    vendor_dir: &Path,
    reporter: &dyn Reporter,
) -> Result<()> {
    let root = resolve_root(&runtime, root)?;
    let settings = Settings::load(&runtime, &root)?;

    let vendor_dir = root.join(vendor_dir);
    let package_dirs = find_all_packages(&runtime, &vendor_dir, reporter);
    debug!(
        "Found {} package(s) in {:?}",
        package_dirs.len(),
        vendor_dir
    );

    for dir in &package_dirs {
        if let Some(package) = load_package(&runtime, dir, None, reporter)? {
            run(
                &runtime,
                &settings,
                &PackageOperation::Install(package),
                reporter,
            );
        }
    }

    installer::cleanup(&runtime, &settings, reporter);
    Ok(())
}

/// Load a package, reporting (not returning) a broken manifest so the
/// remaining packages are still processed.
fn load_package<R: Runtime>(
    runtime: &R,
    dir: &Path,
    name: Option<&str>,
    reporter: &dyn Reporter,
) -> Result<Option<Package>> {
    let dir = absolute(runtime, dir)?;
    match Package::load(runtime, &dir, name) {
        Ok(package) => Ok(Some(package)),
        Err(e) => {
            reporter.report(Level::Error, &format!("{:#}", e));
            Ok(None)
        }
    }
}

fn run<R: Runtime>(
    runtime: &R,
    settings: &Settings,
    operation: &PackageOperation,
    reporter: &dyn Reporter,
) -> InstallReport {
    let report = installer::install(runtime, settings, operation, reporter);
    debug!(
        "{} {:?}: {} linked, {} failed",
        operation.kind(),
        report.package,
        report.linked.len(),
        report.failures.len()
    );
    report
}
