//! i18n-bundler - build-time locale pipeline for JavaScript bundlers
//!
//! Loads `locales/*.json` message trees, exposes them to application code as
//! the `virtual:i18n` module, extracts translation keys from `t('...')` calls
//! (failing the build on unknown keys in strict mode), reloads on locale
//! changes, and resolves keys at runtime with `{name}` interpolation.
//!
//! ## Module Structure
//!
//! - `bridge`: Line-delimited JSON bridge for JavaScript hosts
//! - `cli`: Command-line interface layer
//! - `config`: Plugin options and configuration file loading
//! - `core`: Locale loading, virtual module, key extraction, hot reload
//! - `error`: Error types surfaced to the host
//! - `runtime`: Key resolution, interpolation and locale switching

pub mod bridge;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod runtime;
