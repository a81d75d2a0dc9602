//! Translator handle
//!
//! 現在の設定スナップショットを保持し、翻訳・再設定を提供します。
//! 設定は `Arc<Configuration>` 単位で丸ごと差し替えられるため、
//! 読み手が更新途中の状態を観測することはありません。

use std::fmt;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use indexmap::IndexMap;

use crate::config::{
    MissingKeyPolicy,
    Severity,
    TranslatorSettings,
};
use crate::diagnostics::{
    Diagnostic,
    DiagnosticSink,
    TracingSink,
};
use crate::locale::{
    LocaleSource,
    SystemLocales,
    resolve_language,
};
use crate::lookup::{
    Lookup,
    TranslationSource,
    lookup,
};
use crate::template::{
    Substitutions,
    Translation,
    substitute,
};
use crate::types::{
    Configuration,
    ConfigurationUpdate,
    ConfigurationView,
    TranslationTable,
};

/// 差し替え対象の状態
#[derive(Debug)]
struct State {
    /// 現在の設定
    configuration: Arc<Configuration>,
    /// 設定が実際に変化した回数
    revision: u64,
}

/// Translates keys and inline content against the current configuration.
pub struct Translator {
    /// 現在の設定と revision
    state: RwLock<State>,
    /// キーが見つからない場合の挙動
    policy: MissingKeyPolicy,
    /// 診断の重大度
    severity: Severity,
    /// 診断の送信先
    sink: Arc<dyn DiagnosticSink>,
    /// ホストのロケール設定
    locale_source: Arc<dyn LocaleSource>,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("configuration", &self.snapshot())
            .field("revision", &self.revision())
            .field("policy", &self.policy)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// Creates a translator using the OS locale preferences and logging diagnostics.
    #[must_use]
    pub fn new(update: ConfigurationUpdate) -> Self {
        TranslatorBuilder::from_update(update).build()
    }

    #[must_use]
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::default()
    }

    /// Merges `update` over the current configuration and resolves the language again.
    ///
    /// Returns `false` (and changes nothing) when the result equals the
    /// current configuration.
    pub fn configure(&self, update: ConfigurationUpdate) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let next = self.resolve(state.configuration.merged(update));
        if next == *state.configuration {
            tracing::debug!("Configuration unchanged; skipping update");
            return false;
        }

        tracing::debug!(
            language = ?next.language,
            default_language = ?next.default_language,
            "Configuration updated"
        );
        state.configuration = Arc::new(next);
        state.revision += 1;
        true
    }

    /// Looks up `source` and expands its placeholders.
    ///
    /// Never fails: a miss is reported to the diagnostic sink and a
    /// best-effort template is used instead.
    pub fn translate<'a, F: Clone>(
        &self,
        source: impl Into<TranslationSource<'a>>,
        substitutions: Option<&Substitutions<F>>,
    ) -> Translation<F> {
        let configuration = self.snapshot();
        let found = lookup(&configuration, source.into(), self.policy);
        let template = found.template();

        if let Lookup::Missing { kind, .. } = found {
            self.sink.emit(Diagnostic { severity: self.severity, kind });
        }

        substitute(template, substitutions)
    }

    pub fn translate_key<F: Clone>(&self, key: &str, substitutions: Option<&Substitutions<F>>) -> Translation<F> {
        self.translate(TranslationSource::Key(key), substitutions)
    }

    pub fn translate_content<F: Clone>(
        &self,
        content: &IndexMap<String, String>,
        substitutions: Option<&Substitutions<F>>,
    ) -> Translation<F> {
        self.translate(TranslationSource::Content(content), substitutions)
    }

    /// Template for `source` without placeholder expansion.
    pub fn text<'a>(&self, source: impl Into<TranslationSource<'a>>) -> String {
        self.translate::<()>(source, None).into_text().unwrap_or_default()
    }

    #[must_use]
    pub fn configuration(&self) -> ConfigurationView {
        self.snapshot().view()
    }

    /// Current configuration snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Configuration> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner).configuration)
    }

    /// Number of configuration changes since construction.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.read().unwrap_or_else(PoisonError::into_inner).revision
    }

    #[must_use]
    pub const fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.policy
    }

    /// 言語を解決した設定を返す
    fn resolve(&self, merged: Configuration) -> Configuration {
        let language = resolve_language(
            merged.language.as_deref(),
            merged.default_language.as_deref(),
            merged.translations.as_deref(),
            self.locale_source.as_ref(),
        );
        Configuration { language, ..merged }
    }
}

/// Builder for [`Translator`].
pub struct TranslatorBuilder {
    /// 初期設定
    update: ConfigurationUpdate,
    /// キーが見つからない場合の挙動
    policy: MissingKeyPolicy,
    /// 診断の重大度
    severity: Severity,
    /// 診断の送信先
    sink: Arc<dyn DiagnosticSink>,
    /// ホストのロケール設定
    locale_source: Arc<dyn LocaleSource>,
}

impl Default for TranslatorBuilder {
    fn default() -> Self {
        Self::from_update(ConfigurationUpdate::default())
    }
}

impl fmt::Debug for TranslatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorBuilder")
            .field("update", &self.update)
            .field("policy", &self.policy)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

impl TranslatorBuilder {
    /// 初期設定からビルダーを作成する
    fn from_update(update: ConfigurationUpdate) -> Self {
        Self {
            update,
            policy: MissingKeyPolicy::default(),
            severity: Severity::default(),
            sink: Arc::new(TracingSink),
            locale_source: Arc::new(SystemLocales),
        }
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.update = self.update.language(language);
        self
    }

    #[must_use]
    pub fn default_language(mut self, default_language: impl Into<String>) -> Self {
        self.update = self.update.default_language(default_language);
        self
    }

    #[must_use]
    pub fn translations(mut self, translations: impl Into<Arc<TranslationTable>>) -> Self {
        self.update = self.update.translations(translations);
        self
    }

    #[must_use]
    pub fn missing_key_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn diagnostic_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    #[must_use]
    pub fn locale_source(mut self, locale_source: impl LocaleSource + 'static) -> Self {
        self.locale_source = Arc::new(locale_source);
        self
    }

    /// Applies languages and missing-key handling from project settings.
    #[must_use]
    pub fn settings(mut self, settings: &TranslatorSettings) -> Self {
        if let Some(language) = &settings.language {
            self = self.language(language.clone());
        }
        if let Some(default_language) = &settings.default_language {
            self = self.default_language(default_language.clone());
        }
        self.policy = settings.missing_key.policy;
        self.severity = settings.missing_key.severity;
        self
    }

    #[must_use]
    pub fn build(self) -> Translator {
        let Self { update, policy, severity, sink, locale_source } = self;
        let translator = Translator {
            state: RwLock::new(State { configuration: Arc::default(), revision: 0 }),
            policy,
            severity,
            sink,
            locale_source,
        };

        let initial = translator.resolve(Configuration::default().merged(update));
        tracing::debug!(language = ?initial.language, "Translator initialized");
        translator.state.write().unwrap_or_else(PoisonError::into_inner).configuration = Arc::new(initial);
        translator
    }
}
