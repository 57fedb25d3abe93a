use std::path::Path;

use crate::{
    config::ResolvedOptions,
    core::{
        locale_store::{LocaleStore, locales_path},
        virtual_module::RESOLVED_VIRTUAL_MODULE_ID,
    },
    error::LocaleLoadError,
};

/// The host's module graph, as far as hot reload needs it.
pub trait ModuleGraph {
    /// Mark a cached module stale. Returns false if the graph never held it.
    fn invalidate_module(&mut self, id: &str) -> bool;
}

/// Whether `file` lives under the resolved locales directory.
pub fn is_locale_file(file: &Path, root: &Path, options: &ResolvedOptions) -> bool {
    file.starts_with(locales_path(root, options))
}

/// React to a changed file.
///
/// Files outside the locales directory are ignored (`Ok(None)`). Otherwise the
/// store is fully reloaded and only then is the virtual module invalidated, so
/// the next load of it sees the new locales. Returns the invalidated ids, which
/// is empty when the virtual module has not been loaded yet.
///
/// Keys recorded from source scanning are left alone.
pub fn handle_hot_update<G: ModuleGraph + ?Sized>(
    file: &Path,
    store: &mut LocaleStore,
    root: &Path,
    options: &ResolvedOptions,
    graph: &mut G,
) -> Result<Option<Vec<String>>, LocaleLoadError> {
    if !is_locale_file(file, root, options) {
        return Ok(None);
    }

    tracing::info!(file = %file.display(), "Locale file changed, reloading locales");
    store.reload(root, options)?;

    let mut invalidated = Vec::new();
    if graph.invalidate_module(RESOLVED_VIRTUAL_MODULE_ID) {
        invalidated.push(RESOLVED_VIRTUAL_MODULE_ID.to_string());
    }
    Ok(Some(invalidated))
}
