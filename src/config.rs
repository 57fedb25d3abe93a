use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

pub const CONFIG_FILE_NAME: &str = ".i18nrc.json";

pub const DEFAULT_LOCALES_DIR: &str = "locales";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_FUNCTION_NAME: &str = "t";
/// One glob per extension: the matcher has no brace expansion.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.js", "**/*.ts", "**/*.jsx", "**/*.tsx", "**/*.vue"];
pub const DEFAULT_EXCLUDE: &[&str] = &["node_modules/**"];

/// A glob list that may be written as a single pattern or as an array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            PatternList::One(pattern) => vec![pattern],
            PatternList::Many(patterns) => patterns,
        }
    }
}

impl From<&str> for PatternList {
    fn from(pattern: &str) -> Self {
        PatternList::One(pattern.to_string())
    }
}

impl From<Vec<&str>> for PatternList {
    fn from(patterns: Vec<&str>) -> Self {
        PatternList::Many(patterns.into_iter().map(String::from).collect())
    }
}

/// User-facing plugin configuration. Every field is optional.
///
/// Fields with a value of the wrong JSON type are treated as absent, so a
/// config file never fails on shape, only on syntax.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nPluginOptions {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub locales_dir: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub include: Option<PatternList>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub exclude: Option<PatternList>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub strict_mode: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub generate_types: Option<bool>,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    std::result::Result::Ok(serde_json::from_value(value).ok())
}

/// Fully-defaulted configuration snapshot.
///
/// Never mutated after creation; a config change produces a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    pub locales_dir: String,
    pub default_locale: String,
    /// Allow-list of locale codes contributing to the key set. Empty means all.
    pub locales: Vec<String>,
    pub function_name: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub strict_mode: bool,
    /// Carried for declaration generators; nothing in this crate reads it.
    pub generate_types: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        resolve_options(I18nPluginOptions::default())
    }
}

impl ResolvedOptions {
    /// Whether `locale` contributes to the canonical key set.
    pub fn is_locale_allowed(&self, locale: &str) -> bool {
        self.locales.is_empty() || self.locales.iter().any(|l| l == locale)
    }
}

/// Merge user options over the defaults.
pub fn resolve_options(options: I18nPluginOptions) -> ResolvedOptions {
    ResolvedOptions {
        locales_dir: options
            .locales_dir
            .unwrap_or_else(|| DEFAULT_LOCALES_DIR.to_string()),
        default_locale: options
            .default_locale
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        locales: options.locales.unwrap_or_default(),
        // Blank names count as unset.
        function_name: options
            .function_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FUNCTION_NAME.to_string()),
        include: options
            .include
            .map(PatternList::into_vec)
            .unwrap_or_else(|| to_strings(DEFAULT_INCLUDE)),
        exclude: options
            .exclude
            .map(PatternList::into_vec)
            .unwrap_or_else(|| to_strings(DEFAULT_EXCLUDE)),
        strict_mode: options.strict_mode.unwrap_or(false),
        generate_types: options.generate_types.unwrap_or(true),
    }
}

fn to_strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

/// The config file written by `init`: every option spelled out with its default.
pub fn default_config_json() -> Result<String> {
    let defaults = ResolvedOptions::default();
    let options = I18nPluginOptions {
        locales_dir: Some(defaults.locales_dir),
        default_locale: Some(defaults.default_locale),
        locales: Some(defaults.locales),
        function_name: Some(defaults.function_name),
        include: Some(PatternList::Many(defaults.include)),
        exclude: Some(PatternList::Many(defaults.exclude)),
        strict_mode: Some(defaults.strict_mode),
        generate_types: Some(defaults.generate_types),
    };
    serde_json::to_string_pretty(&options).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub options: I18nPluginOptions,
    /// True if options were read from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let options: I18nPluginOptions = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            tracing::debug!(path = %path.display(), "Loaded config file");
            Ok(ConfigLoadResult {
                options,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            options: I18nPluginOptions::default(),
            from_file: false,
        }),
    }
}
