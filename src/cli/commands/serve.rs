use anyhow::Result;

use super::helper::{CommandContext, load_context};
use crate::{bridge::run_server, cli::args::ServeCommand, core::I18nPlugin};

/// Load the project once, then hand stdin/stdout to the bridge.
///
/// A later `configResolved` request from the host replaces this context.
pub fn serve(cmd: &ServeCommand) -> Result<()> {
    let CommandContext { root, options, .. } = load_context(&cmd.common)?;

    let mut plugin = I18nPlugin::with_options(options);
    plugin.config_resolved(&root)?;

    tracing::info!(root = %root.display(), "Serving bundler hooks on stdio");
    run_server(plugin)
}
