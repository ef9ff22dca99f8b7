//! Install command - install components and their dependencies.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use comet_pm::{
    config::Config,
    event_channel,
    package::WILDCARD_VERSION,
    EventReceiver, HttpClient, InstallOutcome, Installer,
};

use crate::output::Output;

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Packages to install (owner/repo or owner/repo@version)
    #[arg(value_name = "PACKAGES", required = true)]
    pub packages: Vec<String>,

    /// Directory to install components into
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Reinstall packages that are already present
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Install each owner/repo@version only once per run
    #[arg(long)]
    pub dedupe: bool,

    /// Branch used for packages without a version or with "*"
    #[arg(long, value_name = "BRANCH")]
    pub default_branch: Option<String>,

    /// Working directory (where comet.json is read from)
    #[arg(long, default_value = ".")]
    pub working_dir: PathBuf,
}

/// Split `owner/repo@version`; a missing version is the wildcard.
pub fn parse_spec(spec: &str) -> (&str, &str) {
    match spec.rsplit_once('@') {
        Some((name, version)) if !version.is_empty() => (name, version),
        Some((name, _)) => (name, WILDCARD_VERSION),
        None => (spec, WILDCARD_VERSION),
    }
}

pub async fn execute(args: InstallArgs, output: &Output) -> Result<i32> {
    let working_dir = args
        .working_dir
        .canonicalize()
        .context("Failed to resolve working directory")?;

    let mut config = Config::build(Some(&working_dir), true)?;
    if let Some(dir) = args.dir {
        config.install_dir = dir;
        config.set_from_command("install-dir");
    }
    if args.force {
        config.force = true;
        config.set_from_command("force");
    }
    if args.dedupe {
        config.dedupe = true;
        config.set_from_command("dedupe");
    }
    if let Some(branch) = args.default_branch {
        config.default_branch = branch;
        config.set_from_command("default-branch");
    }

    for key in ["install-dir", "default-branch", "force", "dedupe"] {
        if let Some(source) = config.get_source(key) {
            output.verbose(&format!("{} set from {}", key, source.as_str()));
        }
    }

    let client = HttpClient::with_config(config.http_client_config()).context("Failed to create HTTP client")?;
    output.verbose(&format!("user-agent {}", client.user_agent()));

    let (events, receiver) = event_channel();
    let installer = Installer::new(Arc::new(client), config.install_config()).with_events(events);

    let packages = args
        .packages
        .iter()
        .map(|spec| {
            let (name, version) = parse_spec(spec);
            installer
                .package(name, version)
                .with_context(|| format!("Invalid package '{}'", spec))
        })
        .collect::<Result<Vec<_>>>()?;

    let labels: Vec<String> = packages.iter().map(|p| p.to_string()).collect();
    output.info(&format!(
        "Installing {} package(s) into {}",
        packages.len(),
        installer.config().dest_dir.display()
    ));

    let install = async move {
        let results = installer.install_all(packages).await;
        // Closes the event channel so the printer finishes.
        drop(installer);
        results
    };
    let (results, ()) = tokio::join!(install, print_events(receiver, output));

    let mut installed = 0;
    let mut present = 0;
    let mut first_error = None;
    for (label, result) in labels.iter().zip(results) {
        match result {
            Ok(InstallOutcome::Installed) => installed += 1,
            Ok(InstallOutcome::AlreadyExists) | Ok(InstallOutcome::Deduplicated) => present += 1,
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some((label, e));
                }
            }
        }
    }

    if let Some((label, e)) = first_error {
        return Err(e).with_context(|| format!("Failed to install {}", label));
    }

    if present > 0 {
        output.success(&format!("Installed {} package(s), {} already present", installed, present));
    } else {
        output.success(&format!("Installed {} package(s)", installed));
    }

    Ok(0)
}

async fn print_events(mut receiver: EventReceiver, output: &Output) {
    while let Some(event) = receiver.recv().await {
        output.event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Verbosity;
    use tempfile::TempDir;

    #[test]
    fn test_parse_spec() {
        assert_eq!(parse_spec("component/emitter"), ("component/emitter", "*"));
        assert_eq!(parse_spec("component/emitter@1.1.0"), ("component/emitter", "1.1.0"));
        assert_eq!(parse_spec("component/emitter@"), ("component/emitter", "*"));
        assert_eq!(parse_spec("component/emitter@*"), ("component/emitter", "*"));
    }

    #[tokio::test]
    async fn test_invalid_package_fails_before_install() {
        let temp = TempDir::new().unwrap();
        let args = InstallArgs {
            packages: vec!["lodash".to_string()],
            dir: None,
            force: false,
            dedupe: false,
            default_branch: None,
            working_dir: temp.path().to_path_buf(),
        };

        let err = execute(args, &Output::new(Verbosity::Quiet)).await.unwrap_err();
        assert!(err.to_string().contains("lodash"));
        assert!(!temp.path().join("components").exists());
    }
}
