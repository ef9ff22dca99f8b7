//! Output formatting for CLI.

use comet_pm::InstallEvent;
use console::{style, Term};
use std::io::Write;

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    VeryVerbose,
    Debug,
}

impl Verbosity {
    /// Verbosity selected by `-q` and the number of `-v` flags
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, 2) => Verbosity::VeryVerbose,
            _ => Verbosity::Debug,
        }
    }

    /// Log filter matching this verbosity
    pub fn log_level(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Error,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Verbose => log::LevelFilter::Info,
            Verbosity::VeryVerbose => log::LevelFilter::Debug,
            Verbosity::Debug => log::LevelFilter::Trace,
        }
    }
}

/// Output handler for CLI
pub struct Output {
    term: Term,
    verbosity: Verbosity,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            term: Term::stderr(),
            verbosity,
        }
    }

    fn should_output(&self, min_verbosity: Verbosity) -> bool {
        self.verbosity >= min_verbosity
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.term, "{}", style(message).cyan());
        }
    }

    /// Write a success message
    pub fn success(&self, message: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.term, "{}", style(message).green());
        }
    }

    /// Write a verbose message
    pub fn verbose(&self, message: &str) {
        if self.should_output(Verbosity::Verbose) {
            let _ = writeln!(&self.term, "{}", style(message).dim());
        }
    }

    /// Write one line for an install lifecycle event
    pub fn event(&self, event: &InstallEvent) {
        let min_verbosity = match event {
            InstallEvent::FileDiscovered { .. } | InstallEvent::Deduplicated { .. } => Verbosity::Verbose,
            _ => Verbosity::Normal,
        };
        if !self.should_output(min_verbosity) {
            return;
        }

        let label = format!("{:>8}", event.label());
        let label = match event {
            InstallEvent::Installed { .. } => style(label).green().bold(),
            InstallEvent::Failed { .. } => style(label).red().bold(),
            InstallEvent::AlreadyExists { .. } => style(label).yellow(),
            _ => style(label).cyan(),
        };

        let _ = writeln!(&self.term, "{} : {}", label, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 2), Verbosity::VeryVerbose);
        assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Verbosity::Quiet.log_level(), log::LevelFilter::Error);
        assert_eq!(Verbosity::default().log_level(), log::LevelFilter::Warn);
        assert_eq!(Verbosity::Debug.log_level(), log::LevelFilter::Trace);
    }
}
