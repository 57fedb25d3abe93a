//! Dispatch for the one-shot commands.
//!
//! `serve` is long-running and handled by the binary before reaching here.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, build::build, init::init, resolve::resolve},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Build(cmd)) => build(cmd),
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        Some(Command::Serve(_)) => {
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
