mod hash;
mod install;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

use output::{Output, Verbosity};

#[derive(Parser, Debug)]
#[command(name = "comet")]
#[command(version, about = "Component installer and site password generator")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Do not output any message
    #[arg(short = 'q', long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install components and their dependencies
    Install(install::InstallArgs),

    /// Print the password for a site
    Hash(hash::HashArgs),
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::new()
        .filter_level(verbosity.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run() -> Result<i32> {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    init_logging(verbosity);

    match args.command {
        Commands::Install(install_args) => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to create async runtime: {}", e))?;
            let output = Output::new(verbosity);
            rt.block_on(install::execute(install_args, &output))
        }
        Commands::Hash(hash_args) => hash::execute(hash_args),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_install() {
        let args = Args::try_parse_from([
            "comet", "-vv", "install", "component/emitter@1.1.0", "component/tip", "-d", "lib", "--force", "--dedupe",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        match args.command {
            Commands::Install(install) => {
                assert_eq!(install.packages, vec!["component/emitter@1.1.0", "component/tip"]);
                assert_eq!(install.dir.as_deref(), Some(std::path::Path::new("lib")));
                assert!(install.force);
                assert!(install.dedupe);
                assert!(install.default_branch.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_install_requires_packages() {
        assert!(Args::try_parse_from(["comet", "install"]).is_err());
    }

    #[test]
    fn test_parse_hash() {
        let args = Args::try_parse_from(["comet", "-q", "hash", "google.com", "--secret", "pw"]).unwrap();
        assert!(args.quiet);
        match args.command {
            Commands::Hash(hash) => {
                assert_eq!(hash.site, "google.com");
                assert_eq!(hash.secret.as_deref(), Some("pw"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
