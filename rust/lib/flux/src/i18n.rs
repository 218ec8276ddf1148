//! Synchronous, locale-aware string lookup routed through the topic trie.
//!
//! Keys are paths, optionally followed by a query string carrying
//! arguments: `scrap/notice/created?count=3`. Translators are registered
//! per pattern, so a module can own a whole subtree (`scrap/#`).
//!
//! ```ignore
//! let i18n = I18nStore::new("en");
//! i18n.handle("scrap/#", Arc::new(ScrapStrings::new()));
//! i18n.get("scrap/notice/empty");          // "No products to scrap"
//! i18n.set_locale("cs");
//! i18n.get("scrap/notice/created?count=2"); // "Vytvořeno a potvrzeno 2 ..."
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use crate::trie::Trie;

/// Arguments parsed from the `?k=v&k2=v2` part of a key.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Parse `k=v&k2=v2` (no leading `?`). Pairs without `=` are dropped.
    pub fn parse(query: &str) -> Self {
        Self(
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Produces the text for a key in a locale.
pub trait I18nHandler: Send + Sync + 'static {
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String;
}

impl<F> I18nHandler for F
where
    F: Fn(&str, &QueryParams, &str) -> String + Send + Sync + 'static,
{
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String {
        self(path, query, locale)
    }
}

/// Translator registry plus the active locale.
pub struct I18nStore {
    handlers: Trie<Arc<dyn I18nHandler>>,
    locale: RwLock<String>,
}

impl I18nStore {
    pub fn new(locale: &str) -> Self {
        Self {
            handlers: Trie::new(),
            locale: RwLock::new(locale.to_string()),
        }
    }

    pub fn handle(&self, pattern: &str, handler: Arc<dyn I18nHandler>) {
        self.handlers.insert(pattern, handler);
    }

    /// Translate `key` in the active locale.
    ///
    /// The first matching translator wins; with none, the bare path is
    /// returned so a missing string is visible rather than blank.
    pub fn get(&self, key: &str) -> String {
        let (path, query) = key.split_once('?').unwrap_or((key, ""));
        let params = QueryParams::parse(query);
        let locale = self.locale();
        match self.handlers.match_topic(path).first() {
            Some(handler) => handler.translate(path, &params, &locale),
            None => path.to_string(),
        }
    }

    pub fn set_locale(&self, locale: &str) {
        *self.locale.write().unwrap_or_else(PoisonError::into_inner) = locale.to_string();
    }

    pub fn locale(&self) -> String {
        self.locale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
