//! Core types used throughout the crate.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

/// Key → template mapping of a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTranslations {
    /// Flattened translation keys (e.g., "common.hello" -> "Hello").
    pub translation: IndexMap<String, String>,
}

impl LocaleTranslations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw template registered for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.translation.get(key).map(String::as_str)
    }

    /// Inserts a template, replacing any previous template for the same key.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) -> Option<String> {
        self.translation.insert(key.into(), template.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.translation.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translation.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LocaleTranslations
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { translation: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Language code → translations.
///
/// Languages keep their insertion order; the locale resolver falls back to the
/// first language when nothing else matches.
///
/// # Examples
/// ```
/// use i18n_translator::types::TranslationTable;
///
/// let table = TranslationTable::new()
///     .with_language("en", [("hello", "Hello {{name}}")])
///     .with_language("fr", [("hello", "Bonjour {{name}}")]);
///
/// assert_eq!(table.template("fr", "hello"), Some("Bonjour {{name}}"));
/// assert_eq!(table.first_language(), Some("en"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    languages: IndexMap<String, LocaleTranslations>,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Self::insert_language`].
    #[must_use]
    pub fn with_language<I, K, V>(mut self, language: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.insert_language(language, entries.into_iter().collect());
        self
    }

    /// Registers (or replaces) the translations of a language.
    pub fn insert_language(&mut self, language: impl Into<String>, translations: LocaleTranslations) {
        self.languages.insert(language.into(), translations);
    }

    /// Merges keys into a language, creating it at the end of the table if needed.
    ///
    /// Returns the keys that replaced an existing template.
    pub fn extend_language<I>(&mut self, language: impl Into<String>, entries: I) -> Vec<String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let translations = self.languages.entry(language.into()).or_default();
        entries
            .into_iter()
            .filter_map(|(key, template)| {
                translations.translation.insert(key.clone(), template).map(|_| key)
            })
            .collect()
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<&LocaleTranslations> {
        self.languages.get(language)
    }

    /// Returns the table's own copy of `language` if it is registered.
    #[must_use]
    pub fn find_language(&self, language: &str) -> Option<&str> {
        self.languages.get_key_value(language).map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// First language in insertion order.
    #[must_use]
    pub fn first_language(&self) -> Option<&str> {
        self.languages.first().map(|(key, _)| key.as_str())
    }

    /// Languages in insertion order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Looks up `table[language][key]`.
    #[must_use]
    pub fn template(&self, language: &str, key: &str) -> Option<&str> {
        self.languages.get(language).and_then(|translations| translations.get(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Immutable configuration snapshot held by a translator.
///
/// Never mutated in place: reconfiguration builds a new value and swaps it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Active language. `None` until a table is supplied.
    pub language: Option<String>,
    pub default_language: Option<String>,
    pub translations: Option<Arc<TranslationTable>>,
}

impl Configuration {
    /// Layers a partial update over this configuration.
    #[must_use]
    pub fn merged(&self, update: ConfigurationUpdate) -> Self {
        let ConfigurationUpdate { language, default_language, translations } = update;
        Self {
            language: non_empty(language).or_else(|| self.language.clone()),
            default_language: non_empty(default_language)
                .or_else(|| self.default_language.clone()),
            translations: translations.or_else(|| self.translations.clone()),
        }
    }

    /// Read-only view exposed to callers.
    #[must_use]
    pub fn view(&self) -> ConfigurationView {
        ConfigurationView {
            language: self.language.clone(),
            default_language: self.default_language.clone(),
        }
    }
}

/// Partial configuration supplied to `configure`.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationUpdate {
    pub language: Option<String>,
    pub default_language: Option<String>,
    pub translations: Option<Arc<TranslationTable>>,
}

impl ConfigurationUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn default_language(mut self, default_language: impl Into<String>) -> Self {
        self.default_language = Some(default_language.into());
        self
    }

    #[must_use]
    pub fn translations(mut self, translations: impl Into<Arc<TranslationTable>>) -> Self {
        self.translations = Some(translations.into());
        self
    }
}

/// Snapshot returned by `configuration()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationView {
    pub language: Option<String>,
    pub default_language: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn table() -> TranslationTable {
        TranslationTable::new()
            .with_language("en", [("hello", "Hello"), ("bye", "Bye")])
            .with_language("fr", [("hello", "Bonjour")])
    }

    #[rstest]
    fn table_keeps_insertion_order() {
        let table = TranslationTable::new()
            .with_language("zh", [("a", "1")])
            .with_language("de", [("a", "2")])
            .with_language("ar", [("a", "3")]);

        assert_eq!(table.languages().collect::<Vec<_>>(), vec!["zh", "de", "ar"]);
        assert_that!(table.first_language(), some(eq("zh")));
    }

    #[rstest]
    #[case::hit("en", "bye", Some("Bye"))]
    #[case::missing_key("fr", "bye", None)]
    #[case::missing_language("de", "hello", None)]
    fn template_lookup(#[case] language: &str, #[case] key: &str, #[case] expected: Option<&str>) {
        assert_eq!(table().template(language, key), expected);
    }

    #[rstest]
    fn extend_language_reports_replaced_keys() {
        let mut table = table();

        let replaced = table.extend_language(
            "fr",
            [("hello".to_string(), "Salut".to_string()), ("bye".to_string(), "Au revoir".to_string())],
        );

        assert_that!(replaced, elements_are![eq("hello")]);
        assert_that!(table.template("fr", "hello"), some(eq("Salut")));
        assert_that!(table.template("fr", "bye"), some(eq("Au revoir")));
    }

    #[rstest]
    fn deserializes_nested_translation_shape() {
        let json = r#"{
            "en": { "translation": { "hello": "Hello" } },
            "ja": { "translation": { "hello": "こんにちは" } }
        }"#;

        let table: TranslationTable = serde_json::from_str(json).unwrap();

        assert_that!(table.len(), eq(2));
        assert_that!(table.first_language(), some(eq("en")));
        assert_that!(table.template("ja", "hello"), some(eq("こんにちは")));
    }

    #[rstest]
    fn merged_keeps_previous_fields() {
        let base = Configuration {
            language: Some("en".to_string()),
            default_language: Some("fr".to_string()),
            translations: Some(Arc::new(table())),
        };

        let merged = base.merged(ConfigurationUpdate::new().language("fr"));

        assert_that!(merged.language, some(eq("fr")));
        assert_that!(merged.default_language, some(eq("fr")));
        assert!(Arc::ptr_eq(merged.translations.as_ref().unwrap(), base.translations.as_ref().unwrap()));
    }

    #[rstest]
    fn merged_treats_empty_strings_as_absent() {
        let base = Configuration { language: Some("en".to_string()), ..Configuration::default() };

        let merged = base.merged(ConfigurationUpdate::new().language("").default_language(""));

        assert_that!(merged.language, some(eq("en")));
        assert_that!(merged.default_language, none());
    }
}
