use crate::core::messages::LocaleIndex;

/// Specifier application code imports.
pub const VIRTUAL_MODULE_ID: &str = "virtual:i18n";

/// Id the specifier resolves to. The NUL prefix keeps other plugins away from it.
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:i18n";

/// Render the virtual module body for the current locale state.
///
/// Exports `locales` (code → tree), `defaultLocale` and `availableLocales` (index
/// order). The output depends only on the inputs, so unchanged locale data
/// always produces byte-identical source.
pub fn synthesize(index: &LocaleIndex, default_locale: &str) -> String {
    let codes: Vec<&str> = index.keys().map(String::as_str).collect();

    format!(
        "\nexport const locales = {};\nexport const defaultLocale = {};\nexport const availableLocales = {};\n",
        to_js_literal(index),
        to_js_literal(&default_locale),
        to_js_literal(&codes),
    )
}

// JSON is a subset of JS expressions, except for U+2028/U+2029 in strings on
// older engines; escape them so the module parses everywhere.
fn to_js_literal<T: serde::Serialize + ?Sized>(value: &T) -> String {
    // Serializing maps with string keys and strings cannot fail.
    serde_json::to_string(value)
        .unwrap_or_default()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
