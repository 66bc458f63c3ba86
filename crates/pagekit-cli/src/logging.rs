//! Log subscriber setup

use crate::commands::LogFormat;
use crate::error::{CliError, CliResult};
use tracing_subscriber::EnvFilter;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and errors
    #[default]
    Normal,
    /// Info and up
    Verbose,
    /// Debug and up
    Debug,
    /// Everything
    Trace,
}

impl Verbosity {
    /// Map `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Default filter directive for this level
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug | Self::Trace)
    }
}

/// Build the filter: `RUST_LOG` wins, otherwise the verbosity level.
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Install the global subscriber, writing to stderr.
pub fn init(verbosity: Verbosity, format: LogFormat) -> CliResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Text => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| CliError::logging(e.to_string()))
}
