//! Locale loading and the build-time key index.
//!
//! The store is the only owner of the [`LocaleIndex`] during a build. It is
//! rebuilt wholesale on every reload so a deleted locale file can never leave
//! keys behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexSet;

use crate::{
    config::ResolvedOptions,
    core::messages::{LocaleIndex, MessageTree},
    error::LocaleLoadError,
};

/// Dot-separated key paths, in first-seen order.
pub type TranslationKeySet = IndexSet<String>;

pub const LOCALE_FILE_EXTENSION: &str = ".json";

/// Result of reading a locales directory from scratch.
#[derive(Debug, Default)]
pub struct LoadedLocales {
    pub index: LocaleIndex,
    /// Leaf paths of every allowed locale.
    pub keys: TranslationKeySet,
}

/// Resolve `root/localesDir`.
pub fn locales_path(root: &Path, options: &ResolvedOptions) -> PathBuf {
    root.join(&options.locales_dir)
}

/// Extracts the locale code from a locale file name.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
/// - "notes.txt" -> None
pub fn locale_code(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(LOCALE_FILE_EXTENSION)
        .filter(|stem| !stem.is_empty())
}

/// Load every `*.json` file directly under `root/localesDir`.
///
/// Files are visited in file-name order, which fixes the order of the index.
/// A missing directory yields an empty result.
pub fn load(root: &Path, options: &ResolvedOptions) -> Result<LoadedLocales, LocaleLoadError> {
    let dir = locales_path(root, options);
    let mut loaded = LoadedLocales::default();

    if !dir.exists() {
        tracing::debug!(dir = %dir.display(), "Locales directory not found, nothing to load");
        return Ok(loaded);
    }

    for (locale, path) in list_locale_files(&dir)? {
        let tree = parse_locale_file(&path, &locale)?;
        if options.is_locale_allowed(&locale) {
            collect_keys(&tree, &mut loaded.keys);
        }
        loaded.index.insert(locale, tree);
    }

    tracing::debug!(
        dir = %dir.display(),
        locales = loaded.index.len(),
        keys = loaded.keys.len(),
        "Loaded locales"
    );
    Ok(loaded)
}

fn list_locale_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, LocaleLoadError> {
    let read_dir_error = |source| LocaleLoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if let Some(locale) = file_name.to_str().and_then(locale_code) {
            files.push((locale.to_string(), path));
        }
    }
    files.sort();
    Ok(files)
}

/// Read and validate one locale file.
pub fn parse_locale_file(path: &Path, locale: &str) -> Result<MessageTree, LocaleLoadError> {
    let content = fs::read_to_string(path).map_err(|source| LocaleLoadError::Read {
        locale: locale.to_string(),
        path: path.to_path_buf(),
        source,
    })?;

    let json: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| LocaleLoadError::Parse {
            locale: locale.to_string(),
            path: path.to_path_buf(),
            source,
        })?;

    MessageTree::from_json(json).map_err(|violation| LocaleLoadError::Shape {
        locale: locale.to_string(),
        path: path.to_path_buf(),
        key_path: violation.key_path,
        found: violation.found,
    })
}

/// Add every leaf path of `tree` to `keys`, depth-first.
pub fn collect_keys(tree: &MessageTree, keys: &mut TranslationKeySet) {
    tree.walk_leaves(&mut String::new(), &mut |key, _| {
        keys.insert(key.to_string());
    });
}

/// Build-time owner of the locale index and the translation key set.
///
/// Keys come from two places: leaves of the allowed locales (replaced on every
/// reload) and literals seen by the source transformer (kept across locale
/// reloads for the whole session).
#[derive(Debug, Default)]
pub struct LocaleStore {
    index: LocaleIndex,
    locale_keys: TranslationKeySet,
    source_keys: TranslationKeySet,
}

impl LocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index and locale-derived keys from disk.
    ///
    /// The previous state is replaced only after the whole directory loaded,
    /// so a failed reload leaves the store as it was.
    pub fn reload(&mut self, root: &Path, options: &ResolvedOptions) -> Result<(), LocaleLoadError> {
        let LoadedLocales { index, keys } = load(root, options)?;
        self.index = index;
        self.locale_keys = keys;
        Ok(())
    }

    pub fn index(&self) -> &LocaleIndex {
        &self.index
    }

    /// Locale codes in load order.
    pub fn locale_codes(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Keys declared by the allowed locales.
    pub fn locale_keys(&self) -> &TranslationKeySet {
        &self.locale_keys
    }

    /// Keys observed in source code.
    pub fn source_keys(&self) -> &TranslationKeySet {
        &self.source_keys
    }

    /// Record a key literal seen in source. Returns true if it was new.
    pub fn record_source_key(&mut self, key: &str) -> bool {
        if self.source_keys.contains(key) {
            return false;
        }
        self.source_keys.insert(key.to_string())
    }

    /// The full key set: locale keys first, then source-only keys.
    pub fn translation_keys(&self) -> TranslationKeySet {
        self.locale_keys
            .iter()
            .chain(self.source_keys.iter())
            .cloned()
            .collect()
    }

    /// Whether `key` resolves to a string in at least one loaded locale.
    pub fn has_translation(&self, key: &str) -> bool {
        self.index.values().any(|tree| tree.get(key).is_some())
    }
}
