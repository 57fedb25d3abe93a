use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::core::messages::JsonKind;

/// A locale file could not be turned into a message tree.
///
/// Always fatal for the build or reload that triggered it.
#[derive(Error, Debug)]
pub enum LocaleLoadError {
    #[error("Failed to list locales directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read locale \"{locale}\" from {}: {source}", .path.display())]
    Read {
        locale: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse locale \"{locale}\" in {}: {source}", .path.display())]
    Parse {
        locale: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Invalid value in locale \"{locale}\" ({}) at {}: expected a string or object, found {found}",
        .path.display(),
        describe_key_path(.key_path)
    )]
    Shape {
        locale: String,
        path: PathBuf,
        key_path: String,
        found: JsonKind,
    },
}

impl LocaleLoadError {
    /// The locale file (or directory) at fault.
    pub fn path(&self) -> &Path {
        match self {
            LocaleLoadError::ReadDir { path, .. }
            | LocaleLoadError::Read { path, .. }
            | LocaleLoadError::Parse { path, .. }
            | LocaleLoadError::Shape { path, .. } => path,
        }
    }
}

fn describe_key_path(key_path: &str) -> &str {
    if key_path.is_empty() { "<root>" } else { key_path }
}

/// Strict mode found a key that no loaded locale defines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing translation key \"{key}\" in {source_id}")]
pub struct MissingTranslationKeyError {
    pub key: String,
    pub source_id: String,
}

/// Any failure a plugin hook can report to the host.
#[derive(Error, Debug)]
pub enum I18nError {
    #[error(transparent)]
    LocaleLoad(#[from] LocaleLoadError),
    #[error(transparent)]
    MissingTranslationKey(#[from] MissingTranslationKeyError),
}

impl I18nError {
    /// Stable name of the error kind, as reported over the bridge.
    pub fn kind(&self) -> &'static str {
        match self {
            I18nError::LocaleLoad(_) => "LocaleLoadError",
            I18nError::MissingTranslationKey(_) => "MissingTranslationKeyError",
        }
    }
}
