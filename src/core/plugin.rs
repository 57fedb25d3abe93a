use std::path::{Path, PathBuf};

use regex::Regex;

use crate::{
    config::{I18nPluginOptions, ResolvedOptions, resolve_options},
    core::{
        hot_reload::{self, ModuleGraph},
        locale_store::LocaleStore,
        source_filter::SourceFilter,
        transform::{TransformOutput, call_site_pattern, transform_with},
        virtual_module::{RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID, synthesize},
    },
    error::I18nError,
};

/// Per-root build state, recreated on every `config_resolved`.
#[derive(Debug)]
struct BuildContext {
    root: PathBuf,
    store: LocaleStore,
}

/// The bundler hook contract.
///
/// Hooks are expected one at a time, in host order; nothing here locks.
#[derive(Debug)]
pub struct I18nPlugin {
    options: ResolvedOptions,
    filter: SourceFilter,
    call_site: Regex,
    context: BuildContext,
}

impl I18nPlugin {
    pub fn new(user_options: I18nPluginOptions) -> Self {
        Self::with_options(resolve_options(user_options))
    }

    pub fn with_options(options: ResolvedOptions) -> Self {
        tracing::debug!(?options, "Resolved plugin options");
        let root = std::env::current_dir().unwrap_or_default();
        Self {
            filter: SourceFilter::new(&options),
            call_site: call_site_pattern(&options.function_name),
            options,
            context: BuildContext {
                root,
                store: LocaleStore::new(),
            },
        }
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn root(&self) -> &Path {
        &self.context.root
    }

    pub fn store(&self) -> &LocaleStore {
        &self.context.store
    }

    /// Host config is final: start a fresh context for `root` and load locales.
    pub fn config_resolved(&mut self, root: impl Into<PathBuf>) -> Result<(), I18nError> {
        let mut context = BuildContext {
            root: root.into(),
            store: LocaleStore::new(),
        };
        context.store.reload(&context.root, &self.options)?;
        tracing::info!(
            root = %context.root.display(),
            locales = context.store.index().len(),
            "Locales loaded"
        );
        self.context = context;
        Ok(())
    }

    pub fn resolve_id(&self, id: &str) -> Option<&'static str> {
        (id == VIRTUAL_MODULE_ID).then_some(RESOLVED_VIRTUAL_MODULE_ID)
    }

    pub fn load(&self, id: &str) -> Option<String> {
        (id == RESOLVED_VIRTUAL_MODULE_ID)
            .then(|| synthesize(self.context.store.index(), &self.options.default_locale))
    }

    pub fn filter(&self) -> &SourceFilter {
        &self.filter
    }

    pub fn should_transform(&self, id: &str) -> bool {
        self.filter.matches(id)
    }

    pub fn transform(&mut self, code: &str, id: &str) -> Result<Option<TransformOutput>, I18nError> {
        if !self.should_transform(id) {
            return Ok(None);
        }
        Ok(transform_with(
            code,
            id,
            &mut self.context.store,
            &self.options,
            &self.call_site,
        )?)
    }

    pub fn handle_hot_update<G: ModuleGraph + ?Sized>(
        &mut self,
        file: &Path,
        graph: &mut G,
    ) -> Result<Option<Vec<String>>, I18nError> {
        Ok(hot_reload::handle_hot_update(
            file,
            &mut self.context.store,
            &self.context.root,
            &self.options,
            graph,
        )?)
    }
}
