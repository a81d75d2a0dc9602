//! Template lookup and missing-translation fallback.

use indexmap::IndexMap;

use crate::config::MissingKeyPolicy;
use crate::diagnostics::DiagnosticKind;
use crate::types::Configuration;

/// What to translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationSource<'a> {
    /// Key looked up in the configured table.
    Key(&'a str),
    /// Inline language → template mapping, bypassing the table.
    Content(&'a IndexMap<String, String>),
}

impl<'a> From<&'a str> for TranslationSource<'a> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl<'a> From<&'a String> for TranslationSource<'a> {
    fn from(key: &'a String) -> Self {
        Self::Key(key)
    }
}

impl<'a> From<&'a IndexMap<String, String>> for TranslationSource<'a> {
    fn from(content: &'a IndexMap<String, String>) -> Self {
        Self::Content(content)
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found {
        template: &'a str,
        /// Language the template was found in.
        language: &'a str,
    },
    /// Nothing matched; `fallback` is the best-effort template to use instead.
    Missing { fallback: &'a str, kind: DiagnosticKind },
}

impl<'a> Lookup<'a> {
    /// Template to substitute, whether found or not.
    #[must_use]
    pub const fn template(&self) -> &'a str {
        match self {
            Self::Found { template, .. } => template,
            Self::Missing { fallback, .. } => fallback,
        }
    }
}

/// Finds the raw template for `source` in a configuration snapshot.
///
/// Keys try the active language, then (with [`MissingKeyPolicy::DefaultLanguage`])
/// the default language, and finally fall back to the key itself.
/// Inline content always tries the active language, then the default language,
/// then its first entry.
#[must_use]
pub fn lookup<'a>(
    configuration: &'a Configuration,
    source: TranslationSource<'a>,
    policy: MissingKeyPolicy,
) -> Lookup<'a> {
    let active = configuration.language.as_deref();
    let default = configuration.default_language.as_deref();

    match source {
        TranslationSource::Key(key) => {
            let find = |language: Option<&'a str>| {
                let table = configuration.translations.as_deref()?;
                let language = language?;
                table.template(language, key).map(|template| Lookup::Found { template, language })
            };

            let found = match policy {
                MissingKeyPolicy::Key => find(active),
                MissingKeyPolicy::DefaultLanguage => find(active).or_else(|| find(default)),
            };

            found.unwrap_or_else(|| Lookup::Missing {
                fallback: key,
                kind: DiagnosticKind::MissingTranslationKey {
                    key: key.to_string(),
                    language: active.map(str::to_string),
                },
            })
        }
        TranslationSource::Content(content) => {
            let find = |language: Option<&'a str>| {
                let (language, template) = content.get_key_value(language?)?;
                Some(Lookup::Found { template, language })
            };

            find(active).or_else(|| find(default)).unwrap_or_else(|| Lookup::Missing {
                fallback: content.first().map_or("", |(_, template)| template.as_str()),
                kind: DiagnosticKind::MissingTranslationContent {
                    language: active.map(str::to_string),
                    available: content.keys().cloned().collect(),
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::types::TranslationTable;

    #[fixture]
    fn configuration() -> Configuration {
        let table = TranslationTable::new()
            .with_language("en", [("hello", "Hello"), ("only_en", "English only")])
            .with_language("fr", [("hello", "Bonjour")]);
        Configuration {
            language: Some("fr".to_string()),
            default_language: Some("en".to_string()),
            translations: Some(Arc::new(table)),
        }
    }

    fn content(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries.iter().map(|(l, t)| ((*l).to_string(), (*t).to_string())).collect()
    }

    #[rstest]
    #[case::key_policy(MissingKeyPolicy::Key)]
    #[case::default_language_policy(MissingKeyPolicy::DefaultLanguage)]
    fn key_found_in_active_language(configuration: Configuration, #[case] policy: MissingKeyPolicy) {
        let result = lookup(&configuration, TranslationSource::Key("hello"), policy);

        assert_that!(result, eq(&Lookup::Found { template: "Bonjour", language: "fr" }));
    }

    #[rstest]
    fn key_policy_falls_back_to_key(configuration: Configuration) {
        let result = lookup(&configuration, "only_en".into(), MissingKeyPolicy::Key);

        assert_that!(
            result,
            eq(&Lookup::Missing {
                fallback: "only_en",
                kind: DiagnosticKind::MissingTranslationKey {
                    key: "only_en".to_string(),
                    language: Some("fr".to_string()),
                },
            })
        );
    }

    #[rstest]
    fn default_language_policy_retries_default(configuration: Configuration) {
        let result = lookup(&configuration, "only_en".into(), MissingKeyPolicy::DefaultLanguage);

        assert_that!(result, eq(&Lookup::Found { template: "English only", language: "en" }));
    }

    #[rstest]
    fn default_language_policy_ends_with_key(configuration: Configuration) {
        let result = lookup(&configuration, "nowhere".into(), MissingKeyPolicy::DefaultLanguage);

        assert_that!(result.template(), eq("nowhere"));
        assert!(matches!(result, Lookup::Missing { .. }));
    }

    #[rstest]
    fn key_without_table_is_missing() {
        let configuration = Configuration::default();

        let result = lookup(&configuration, "hello".into(), MissingKeyPolicy::Key);

        assert_that!(
            result,
            eq(&Lookup::Missing {
                fallback: "hello",
                kind: DiagnosticKind::MissingTranslationKey { key: "hello".to_string(), language: None },
            })
        );
    }

    #[rstest]
    #[case::active(&[("en", "Hi"), ("fr", "Salut")], "Salut")]
    #[case::default(&[("de", "Hallo"), ("en", "Hi")], "Hi")]
    fn content_found(configuration: Configuration, #[case] entries: &[(&str, &str)], #[case] expected: &str) {
        let content = content(entries);

        let result = lookup(&configuration, (&content).into(), MissingKeyPolicy::Key);

        assert!(matches!(result, Lookup::Found { .. }));
        assert_that!(result.template(), eq(expected));
    }

    #[rstest]
    fn content_missing_uses_first_entry(configuration: Configuration) {
        let content = content(&[("de", "Hallo"), ("it", "Ciao")]);

        let result = lookup(&configuration, TranslationSource::Content(&content), MissingKeyPolicy::Key);

        assert_that!(
            result,
            eq(&Lookup::Missing {
                fallback: "Hallo",
                kind: DiagnosticKind::MissingTranslationContent {
                    language: Some("fr".to_string()),
                    available: vec!["de".to_string(), "it".to_string()],
                },
            })
        );
    }

    #[rstest]
    fn empty_content_falls_back_to_empty_string(configuration: Configuration) {
        let content = IndexMap::new();

        let result = lookup(&configuration, TranslationSource::Content(&content), MissingKeyPolicy::Key);

        assert_that!(result.template(), eq(""));
    }
}
