//! Key extraction from application source.
//!
//! The scan is regex-based, not a parser. Recognized call sites are
//! `<fn>(` followed by a single-, double- or backtick-quoted literal. Known
//! gaps: a literal containing any quote character (escaped or not), a
//! template literal with `${...}`, string concatenation and computed keys are
//! all invisible to the matcher, and a call inside a comment still counts.

use indexmap::IndexSet;
use regex::Regex;

use crate::{
    config::ResolvedOptions,
    core::{locale_store::LocaleStore, source_map::SourceMap},
    error::MissingTranslationKeyError,
};

/// Result handed back to the host for a file with at least one call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Always identical to the input: the transform only observes.
    pub code: String,
    pub map: SourceMap,
    /// Keys found in this file, deduplicated, in first-seen order.
    pub keys: Vec<String>,
}

/// Build the call-site matcher for a translation function name.
///
/// Names starting with a word character get a `\b` boundary; names such as
/// `$t` must instead not follow another identifier character.
pub fn call_site_pattern(function_name: &str) -> Regex {
    let starts_with_word = function_name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    let boundary = if starts_with_word { r"\b" } else { r"(?:^|[^\w$])" };
    let pattern = format!(
        r#"{}{}\s*\(\s*(['"`])([^'"`]+)['"`]"#,
        boundary,
        regex::escape(function_name)
    );
    Regex::new(&pattern).expect("escaped function name always forms a valid pattern")
}

/// Every literal key in `code`, in source order, duplicates included.
///
/// Backtick literals with a `${...}` substitution are computed keys and skipped.
pub fn extract_keys<'a>(code: &'a str, pattern: &Regex) -> Vec<&'a str> {
    pattern
        .captures_iter(code)
        .filter_map(|caps| {
            let quote = caps.get(1)?.as_str();
            let key = caps.get(2)?.as_str();
            (quote != "`" || !key.contains("${")).then_some(key)
        })
        .collect()
}

/// Scan one module, recording its keys in the store.
///
/// Returns `Ok(None)` when the module has no call site. In strict mode the
/// first key that no loaded locale resolves aborts the scan; keys before it
/// have already been recorded.
pub fn transform(
    code: &str,
    id: &str,
    store: &mut LocaleStore,
    options: &ResolvedOptions,
) -> Result<Option<TransformOutput>, MissingTranslationKeyError> {
    transform_with(code, id, store, options, &call_site_pattern(&options.function_name))
}

/// [`transform`] with a precompiled call-site pattern.
pub fn transform_with(
    code: &str,
    id: &str,
    store: &mut LocaleStore,
    options: &ResolvedOptions,
    pattern: &Regex,
) -> Result<Option<TransformOutput>, MissingTranslationKeyError> {
    let mut keys: IndexSet<&str> = IndexSet::new();

    for key in extract_keys(code, pattern) {
        store.record_source_key(key);

        if options.strict_mode && !store.has_translation(key) {
            return Err(MissingTranslationKeyError {
                key: key.to_string(),
                source_id: id.to_string(),
            });
        }

        keys.insert(key);
    }

    if keys.is_empty() {
        return Ok(None);
    }

    tracing::debug!(id, keys = keys.len(), "Extracted translation keys");

    Ok(Some(TransformOutput {
        code: code.to_string(),
        map: SourceMap::identity(code, id),
        keys: keys.into_iter().map(String::from).collect(),
    }))
}
