use anyhow::{Ok, Result};

use super::{
    CommandResult, CommandSummary, ResolveSummary,
    helper::{CommandContext, load_context},
};
use crate::{
    cli::args::ResolveCommand,
    core::locale_store,
    runtime::{I18n, Params},
};

/// Load locales and resolve one key through the runtime resolver.
pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let CommandContext { root, options, .. } = load_context(&cmd.common)?;
    let loaded = locale_store::load(&root, &options)?;

    let i18n = I18n::initialize(options.default_locale, loaded.index);
    if let Some(locale) = &cmd.locale {
        i18n.set_active_locale(locale);
        if i18n.active_locale() != *locale {
            tracing::warn!(
                "Unknown locale '{}', staying on '{}'",
                locale,
                i18n.active_locale()
            );
        }
    }

    let params = (!cmd.params.is_empty()).then(|| cmd.params.into_iter().collect::<Params>());
    let value = i18n.resolve(&cmd.key, params.as_ref());

    let locale = i18n.active_locale();
    let fell_back = i18n
        .messages()
        .get(&locale)
        .and_then(|tree| tree.get(&cmd.key))
        .is_none();

    Ok(CommandResult::new(CommandSummary::Resolve(ResolveSummary {
        key: cmd.key,
        locale,
        value,
        fell_back,
    })))
}
