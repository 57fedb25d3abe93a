use std::fs;

use anyhow::{Context, Ok, Result};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::{
    cli::args::InitCommand,
    config::{CONFIG_FILE_NAME, default_config_json},
};

/// Write a config file with every option at its default.
///
/// An existing file is never overwritten.
pub fn init(cmd: InitCommand) -> Result<CommandResult> {
    let path = cmd.root.join(CONFIG_FILE_NAME);

    let error = if path.exists() {
        Some(format!("{} already exists", CONFIG_FILE_NAME))
    } else {
        fs::write(&path, default_config_json()?)
            .with_context(|| format!("Failed to write {:?}", path))?;
        None
    };

    Ok(CommandResult::new(CommandSummary::Init(InitSummary {
        path,
        error,
    })))
}
