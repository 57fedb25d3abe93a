use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::{
    BuildSummary, CommandResult, CommandSummary, MissingKey,
    helper::{CommandContext, load_context},
};
use crate::{
    cli::args::BuildCommand,
    core::{I18nPlugin, file_scanner::scan_sources, virtual_module::VIRTUAL_MODULE_ID},
    error::I18nError,
};

/// Run the plugin hooks over a project the way a bundler build would.
///
/// Sources are read in parallel and transformed in sorted order. The virtual
/// module is only written when no error was found.
pub fn build(cmd: BuildCommand) -> Result<CommandResult> {
    let CommandContext {
        root,
        options,
        from_file,
    } = load_context(&cmd.common)?;
    let strict = options.strict_mode;

    let mut plugin = I18nPlugin::with_options(options);
    plugin.config_resolved(&root)?;

    let scan = scan_sources(&root, plugin.filter());
    tracing::debug!(
        files = scan.files.len(),
        skipped = scan.skipped_count,
        "Scanned sources"
    );

    let sources: Vec<_> = scan
        .files
        .par_iter()
        .map(|path| {
            let code = fs::read_to_string(path)
                .with_context(|| format!("Failed to read source file: {:?}", path));
            (path.to_string_lossy().into_owned(), code)
        })
        .collect();

    let mut missing = Vec::new();
    let mut files_with_keys = 0;

    for (id, code) in sources {
        match plugin.transform(&code?, &id) {
            Ok(Some(output)) => {
                files_with_keys += 1;
                missing.extend(
                    output
                        .keys
                        .into_iter()
                        .filter(|key| !plugin.store().has_translation(key))
                        .map(|key| MissingKey {
                            key,
                            source_id: id.clone(),
                        }),
                );
            }
            Ok(None) => {}
            Err(I18nError::MissingTranslationKey(e)) => {
                files_with_keys += 1;
                missing.push(MissingKey {
                    key: e.key,
                    source_id: e.source_id,
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    let mut out = None;
    if !(strict && !missing.is_empty())
        && let Some(path) = cmd.out
    {
        let module = plugin
            .resolve_id(VIRTUAL_MODULE_ID)
            .and_then(|id| plugin.load(id))
            .context("Virtual module did not load")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(&path, module).with_context(|| format!("Failed to write {:?}", path))?;
        out = Some(path);
    }

    Ok(CommandResult::new(CommandSummary::Build(BuildSummary {
        locales: plugin.store().locale_codes().map(String::from).collect(),
        source_files: scan.files.len(),
        files_with_keys,
        key_count: plugin.store().source_keys().len(),
        missing,
        strict,
        from_file,
        out,
    })))
}
