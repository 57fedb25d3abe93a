//! Runtime key resolution with interpolation and locale switching.
//!
//! Each [`I18n`] is an independent state value; several can live in one
//! process. The handle is cheap to clone and clones share state. It is built on
//! `Rc` and therefore not `Send`: listeners run synchronously on the thread
//! that switches the locale.

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
    sync::LazyLock,
};

use regex::{Captures, Regex};

use crate::core::messages::LocaleIndex;

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// A value substituted into a `{name}` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// Number to text the way JavaScript's `String(n)` does it: plain decimal
/// inside `[1e-6, 1e21)`, exponent form (`1e+21`, `1e-7`) outside, `-0` as `0`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let exponential = format!("{:e}", n);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(f64::from(value))
    }
}

/// Named interpolation parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(HashMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Replace each `{name}` with its parameter. Unknown names stay as written.
pub fn interpolate(template: &str, params: &Params) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

type Listener = Rc<dyn Fn(&str)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

struct State {
    locale: RefCell<String>,
    messages: LocaleIndex,
    listeners: Rc<RefCell<Listeners>>,
}

/// Runtime translation state: active locale, messages and change listeners.
#[derive(Clone)]
pub struct I18n {
    state: Rc<State>,
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("locale", &self.state.locale.borrow())
            .field("locales", &self.state.messages.keys().collect::<Vec<_>>())
            .field("listeners", &self.state.listeners.borrow().entries.len())
            .finish()
    }
}

impl I18n {
    /// Start with `default_locale` active over `messages`.
    ///
    /// The default locale is taken as given even if `messages` lacks it; every
    /// lookup then falls back to the key until a known locale is selected.
    pub fn initialize(default_locale: impl Into<String>, messages: LocaleIndex) -> Self {
        Self {
            state: Rc::new(State {
                locale: RefCell::new(default_locale.into()),
                messages,
                listeners: Rc::new(RefCell::new(Listeners::default())),
            }),
        }
    }

    /// Build from the `locales` payload of the virtual module (`{"en": {...}}`).
    pub fn from_module_data(
        default_locale: impl Into<String>,
        locales_json: &str,
    ) -> Result<Self, serde_json::Error> {
        let messages: LocaleIndex = serde_json::from_str(locales_json)?;
        Ok(Self::initialize(default_locale, messages))
    }

    /// Resolve `key` in the active locale.
    ///
    /// A missing segment or a key that ends on a subtree yields `key` itself.
    pub fn resolve(&self, key: &str, params: Option<&Params>) -> String {
        let locale = self.state.locale.borrow();
        let Some(template) = self
            .state
            .messages
            .get(locale.as_str())
            .and_then(|tree| tree.get(key))
        else {
            return key.to_string();
        };

        match params {
            Some(params) => interpolate(template, params),
            None => template.to_string(),
        }
    }

    pub fn active_locale(&self) -> String {
        self.state.locale.borrow().clone()
    }

    /// Switch locale and notify listeners in registration order.
    ///
    /// Unknown codes are ignored. Listeners run synchronously; one that calls
    /// `set_active_locale` again re-enters this method before the remaining
    /// listeners of the outer call have run.
    pub fn set_active_locale(&self, code: &str) {
        if !self.state.messages.contains_key(code) {
            tracing::debug!(code, "Ignoring switch to unknown locale");
            return;
        }

        *self.state.locale.borrow_mut() = code.to_string();

        // Snapshot so listeners may (un)subscribe while being notified.
        let listeners: Vec<Listener> = self
            .state
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(code);
        }
    }

    /// Locale codes in the order they were loaded.
    pub fn list_locales(&self) -> Vec<String> {
        self.state.messages.keys().cloned().collect()
    }

    pub fn messages(&self) -> &LocaleIndex {
        &self.state.messages
    }

    /// Register a locale-change listener.
    pub fn on_locale_change<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&str) + 'static,
    {
        let mut listeners = self.state.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(callback)));

        Unsubscribe {
            listeners: Rc::downgrade(&self.state.listeners),
            id,
        }
    }
}

/// Disposer returned by [`I18n::on_locale_change`].
///
/// Dropping it keeps the listener registered; call [`Unsubscribe::dispose`].
#[must_use = "the listener stays registered until `dispose` is called"]
#[derive(Debug)]
pub struct Unsubscribe {
    listeners: Weak<RefCell<Listeners>>,
    id: u64,
}

impl Unsubscribe {
    /// Remove exactly the registration that produced this disposer.
    pub fn dispose(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}
