pub mod commands;
pub mod declaration;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod namespace;
pub mod package;
pub mod report;
pub mod runtime;
pub mod sweep;
pub mod sync;
pub mod validate;

pub use error::AssetError;
pub use installer::{InstallReport, Settings, cleanup, install};
pub use package::{Package, PackageOperation};
pub use report::{Level, Reporter};
