use std::path::PathBuf;

use anyhow::{Context, Ok, Result};

use crate::{
    cli::args::CommonArgs,
    config::{I18nPluginOptions, ResolvedOptions, load_config, resolve_options},
};

/// Everything a command needs before touching locales or sources.
#[derive(Debug)]
pub struct CommandContext {
    /// Absolute project root.
    pub root: PathBuf,
    pub options: ResolvedOptions,
    /// True if a config file was found.
    pub from_file: bool,
}

/// Resolve options from the nearest config file, then apply CLI overrides.
pub fn load_context(common: &CommonArgs) -> Result<CommandContext> {
    let root = common
        .root
        .canonicalize()
        .with_context(|| format!("Project root not found: {:?}", common.root))?;

    let config = load_config(&root)?;
    let options = resolve_options(apply_overrides(config.options, common));

    Ok(CommandContext {
        root,
        options,
        from_file: config.from_file,
    })
}

fn apply_overrides(mut options: I18nPluginOptions, common: &CommonArgs) -> I18nPluginOptions {
    if let Some(dir) = &common.locales_dir {
        options.locales_dir = Some(dir.clone());
    }
    if let Some(locale) = &common.default_locale {
        options.default_locale = Some(locale.clone());
    }
    if let Some(name) = &common.function_name {
        options.function_name = Some(name.clone());
    }
    if common.strict {
        options.strict_mode = Some(true);
    }
    options
}
