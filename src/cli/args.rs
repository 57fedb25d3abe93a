//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `build`: Load locales, scan sources for translation keys, emit the virtual module
//! - `resolve`: Resolve one key through the runtime resolver
//! - `serve`: Answer bundler hooks over stdio
//! - `init`: Write a default `.i18nrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(cmd)) => cmd.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Serve(cmd)) => cmd.common.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root containing the locales directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Locales directory relative to the root (overrides config file)
    #[arg(long)]
    pub locales_dir: Option<String>,

    /// Default locale (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Translation function name (overrides config file)
    #[arg(long)]
    pub function_name: Option<String>,

    /// Fail when a used key exists in no locale (overrides config file)
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the synthesized virtual module to this file
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Dot-separated key, e.g. `app.title`
    pub key: String,

    /// Locale to switch to before resolving (default: the default locale)
    #[arg(long)]
    pub locale: Option<String>,

    /// Interpolation parameter; can be repeated: --param name=World
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to create the config file in
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load locales, extract translation keys from sources and emit the virtual module
    Build(BuildCommand),
    /// Resolve a translation key the way the runtime does
    Resolve(ResolveCommand),
    /// Serve bundler hooks as line-delimited JSON over stdin/stdout
    Serve(ServeCommand),
    /// Initialize a new .i18nrc.json configuration file
    Init(InitCommand),
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got \"{}\"", raw)),
    }
}
