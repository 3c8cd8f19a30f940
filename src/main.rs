use anyhow::Result;
use assetlink::commands;
use assetlink::report::ConsoleReporter;
use clap::Parser;
use std::path::PathBuf;

/// assetlink - expose dependency assets through symlinks
///
/// Packages declare asset directories in their assetlink.json; the root
/// project maps each namespace to a target directory. assetlink links
/// `<target>/<package>` to the package's asset directory and removes links
/// whose package is gone.
///
/// Examples:
///   assetlink install vendor/acme/widgets   # Link one package's assets
///   assetlink sync                          # Link every vendored package, then clean up
#[derive(Parser, Debug)]
#[command(author, version = env!("ASSETLINK_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Root project directory (defaults to the current directory; also via ASSETLINK_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "ASSETLINK_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub root: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Link the assets of newly installed packages
    Install(InstallArgs),

    /// Re-link the assets of an updated package
    Update(UpdateArgs),

    /// Remove asset links whose target no longer exists
    Cleanup,

    /// Link every package in the vendor directory, then clean up
    Sync(SyncArgs),

    /// List asset links and flag broken ones
    Links,
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Package install directories, each holding an assetlink.json
    #[arg(value_name = "PACKAGE_DIR", required = true)]
    pub package_dirs: Vec<PathBuf>,

    /// Package name, overriding the manifest (single package only)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Install directory of the updated package
    #[arg(value_name = "PACKAGE_DIR")]
    pub package_dir: PathBuf,

    /// Package name, overriding the manifest
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SyncArgs {
    /// Directory holding <vendor>/<package> install directories, relative to the root
    #[arg(long, value_name = "DIR", default_value = "vendor")]
    pub vendor_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = assetlink::runtime::RealRuntime;
    let reporter = ConsoleReporter::new(cli.quiet);

    match cli.command {
        Commands::Install(args) => commands::install(
            runtime,
            cli.root,
            &args.package_dirs,
            args.name.as_deref(),
            &reporter,
        )?,
        Commands::Update(args) => commands::update(
            runtime,
            cli.root,
            &args.package_dir,
            args.name.as_deref(),
            &reporter,
        )?,
        Commands::Cleanup => commands::cleanup(runtime, cli.root, &reporter)?,
        Commands::Sync(args) => commands::sync(runtime, cli.root, &args.vendor_dir, &reporter)?,
        Commands::Links => commands::links(runtime, cli.root)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_install_parsing() {
        let cli = Cli::try_parse_from(["assetlink", "install", "vendor/acme/widgets"]).unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.package_dirs, vec![PathBuf::from("vendor/acme/widgets")]);
                assert_eq!(args.name, None);
            }
            _ => panic!("Expected Install command"),
        }
        assert_eq!(cli.root, None);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_install_requires_package_dir() {
        assert!(Cli::try_parse_from(["assetlink", "install"]).is_err());
    }

    #[test]
    fn test_cli_update_with_name() {
        let cli = Cli::try_parse_from([
            "assetlink",
            "update",
            "vendor/acme/widgets",
            "--name",
            "acme/widgets",
        ])
        .unwrap();
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.package_dir, PathBuf::from("vendor/acme/widgets"));
                assert_eq!(args.name.as_deref(), Some("acme/widgets"));
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_cli_global_root_parsing() {
        let cli = Cli::try_parse_from(["assetlink", "--root", "/tmp", "-q", "cleanup"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp")));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Cleanup));
    }

    #[test]
    fn test_cli_sync_default_vendor_dir() {
        let cli = Cli::try_parse_from(["assetlink", "sync"]).unwrap();
        match cli.command {
            Commands::Sync(args) => assert_eq!(args.vendor_dir, PathBuf::from("vendor")),
            _ => panic!("Expected Sync command"),
        }
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["assetlink"]).is_err());
    }
}
