//! Locale negotiation.
//!
//! Picks the active language from an explicit request, the host's locale
//! preferences and the languages present in a [`TranslationTable`].
//!
//! # Resolution order
//! 1. explicit (non-empty) language, returned verbatim
//! 2. no table → unresolved
//! 3. host primary locale (`en-US`)
//! 4. its primary subtag (`en`)
//! 5. host preferred locales in order, each as exact tag then primary subtag
//! 6. default language if registered, else the first language of the table

use crate::types::TranslationTable;

/// Read-only view of the host environment's locale preferences.
pub trait LocaleSource: Send + Sync {
    /// Most preferred locale (e.g., `en-US`).
    fn primary_locale(&self) -> Option<String>;

    /// Preferred locales, most preferred first.
    fn preferred_locales(&self) -> Vec<String>;
}

/// Locale preferences of the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocales;

impl LocaleSource for SystemLocales {
    fn primary_locale(&self) -> Option<String> {
        sys_locale::get_locale().and_then(|tag| normalize_tag(&tag))
    }

    fn preferred_locales(&self) -> Vec<String> {
        sys_locale::get_locales().filter_map(|tag| normalize_tag(&tag)).collect()
    }
}

/// Fixed list of locale preferences; the first entry is the primary locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedLocales {
    locales: Vec<String>,
}

impl FixedLocales {
    #[must_use]
    pub fn new<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { locales: locales.into_iter().map(Into::into).collect() }
    }
}

impl LocaleSource for FixedLocales {
    fn primary_locale(&self) -> Option<String> {
        self.locales.first().cloned()
    }

    fn preferred_locales(&self) -> Vec<String> {
        self.locales.clone()
    }
}

/// Normalizes an OS locale string into a BCP 47 style tag.
///
/// `de_DE.UTF-8@euro` → `de-DE`. Returns `None` for `C` / `POSIX` and empty input.
#[must_use]
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if tag.is_empty() || tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
        return None;
    }
    Some(tag.replace('_', "-"))
}

/// Language subtag of a tag (`en-US` → `en`, `zh_Hant` → `zh`).
#[must_use]
pub fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Resolves the active language.
///
/// The host is only queried when no explicit language is given.
/// Host locales fall back to their primary subtag, the part before the first
/// `-` or `_`, so `fil-PH` matches `fil`, not `fi`.
#[must_use]
pub fn resolve_language(
    requested: Option<&str>,
    default_language: Option<&str>,
    translations: Option<&TranslationTable>,
    host: &dyn LocaleSource,
) -> Option<String> {
    if let Some(requested) = requested.filter(|r| !r.is_empty()) {
        return Some(requested.to_string());
    }

    let Some(table) = translations else {
        tracing::debug!("No translations configured; language left unresolved");
        return None;
    };

    let resolved = negotiate(table, default_language, host);
    if resolved.is_none() {
        tracing::debug!("Translation table is empty; language left unresolved");
    }
    resolved.map(str::to_string)
}

fn negotiate<'t>(
    table: &'t TranslationTable,
    default_language: Option<&str>,
    host: &dyn LocaleSource,
) -> Option<&'t str> {
    let find = move |tag: &str| {
        table.find_language(tag).or_else(|| table.find_language(primary_subtag(tag)))
    };

    if let Some(primary) = host.primary_locale()
        && let Some(language) = find(&primary)
    {
        tracing::debug!(%primary, language, "Resolved language from host primary locale");
        return Some(language);
    }

    if let Some(language) = host.preferred_locales().iter().find_map(|tag| find(tag)) {
        tracing::debug!(language, "Resolved language from host preferred locales");
        return Some(language);
    }

    let fallback = default_language
        .and_then(|default| table.find_language(default))
        .or_else(|| table.first_language());
    if let Some(language) = fallback {
        tracing::debug!(language, "Resolved language from fallback");
    }
    fallback
}
