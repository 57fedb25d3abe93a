//! Build-time locale pipeline.
//!
//! Data flows leaf-first through these modules:
//!
//! 1. `locale_store`: load `locales/*.json` into a [`LocaleIndex`] and key set
//! 2. `virtual_module`: serialize the index into the `virtual:i18n` module
//! 3. `transform`: scan source for translation calls, recording (and in strict
//!    mode validating) their keys; `source_filter` decides which files qualify
//! 4. `hot_reload`: reload locales on change and invalidate the virtual module
//!
//! `plugin` ties these together behind the bundler hook contract, and
//! `file_scanner` walks a project for the files a build would transform.
//!
//! ## Module Structure
//!
//! - `messages`: Message tree type, validation and lookup
//! - `locale_store`: Locale loading and the key index
//! - `virtual_module`: Virtual module specifier and synthesis
//! - `source_filter`: Include/exclude glob matching
//! - `source_map`: Identity source maps
//! - `transform`: Call-site scanning and key extraction
//! - `hot_reload`: Locale-change invalidation
//! - `plugin`: Hook facade
//! - `file_scanner`: Project walk for eligible sources

pub mod file_scanner;
pub mod hot_reload;
pub mod locale_store;
pub mod messages;
pub mod plugin;
pub mod source_filter;
pub mod source_map;
pub mod transform;
pub mod virtual_module;

pub use hot_reload::ModuleGraph;
pub use locale_store::{LocaleStore, TranslationKeySet};
pub use messages::{LocaleIndex, MessageTree};
pub use plugin::I18nPlugin;
pub use transform::TransformOutput;
