//! Hash command - derive the password for a site.

use anyhow::{bail, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Site URL or domain (e.g. "https://accounts.google.com" or "google.com")
    #[arg(value_name = "SITE")]
    pub site: String,

    /// Secret to derive the password from
    #[arg(long, env = "COMET_SECRET", hide_env_values = true)]
    pub secret: Option<String>,
}

pub fn execute(args: HashArgs) -> Result<i32> {
    let secret = args.secret.unwrap_or_default();

    match comet_hash::hash(&args.site, &secret) {
        Some(password) => {
            println!("{}", password);
            Ok(0)
        }
        None if secret.is_empty() => bail!("No secret given (use --secret or COMET_SECRET)"),
        None => bail!("'{}' does not contain a usable domain", args.site),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prints_password() {
        let args = HashArgs {
            site: "google.com".to_string(),
            secret: Some("P@$$W0RD".to_string()),
        };
        assert_eq!(execute(args).unwrap(), 0);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let args = HashArgs {
            site: "google.com".to_string(),
            secret: None,
        };
        let err = execute(args).unwrap_err();
        assert!(err.to_string().contains("No secret"));
    }

    #[test]
    fn test_missing_domain_is_an_error() {
        let args = HashArgs {
            site: "".to_string(),
            secret: Some("secret".to_string()),
        };
        assert!(execute(args).is_err());
    }
}
