//! pagekit CLI library
//!
//! Inspect runner configurations and selector specs from the shell.

#![warn(missing_docs)]

mod commands;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{
    Cli, Commands, ConfigAction, ConfigArgs, ConfigFormat, LogFormat, SelectorArgs, UrlArgs,
};
pub use error::{CliError, CliResult};
pub use logging::Verbosity;
