//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pagekit: inspect runner configs and selector specs for page-object suites
#[derive(Parser, Debug)]
#[command(name = "pagekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or validate a runner configuration
    Config(ConfigArgs),

    /// Resolve a named selector from a selector-spec file
    Selector(SelectorArgs),

    /// Print the URL a page would open
    Url(UrlArgs),
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config action
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration (defaults when no file is given)
    Show {
        /// Runner config file (YAML)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,
    },

    /// Check a configuration file and exit non-zero if it is invalid
    Validate {
        /// Runner config file (YAML)
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Arguments for the selector command
#[derive(Parser, Debug)]
pub struct SelectorArgs {
    /// Selector spec file (YAML with `base` and `selectors`)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Selector name to resolve
    #[arg(short, long)]
    pub name: String,

    /// Resolve without the base selector
    #[arg(long)]
    pub no_base: bool,
}

/// Arguments for the url command
#[derive(Parser, Debug)]
pub struct UrlArgs {
    /// Page base URL
    #[arg(short, long)]
    pub base: String,

    /// Query fragment to append, e.g. `tab=2`
    #[arg(short, long, default_value = "")]
    pub append: String,
}

/// Output format for `config show`
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML
    #[default]
    Yaml,
    /// JSON
    Json,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable compact lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}
