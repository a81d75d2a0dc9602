//! Scoped translator provider.
//!
//! [`provide`] makes a translator available to code that has no handle to it.
//! Scopes are per thread and nest; the innermost one wins.

use std::cell::RefCell;
use std::sync::Arc;

use crate::error::TranslatorError;
use crate::lookup::TranslationSource;
use crate::template::{
    Substitutions,
    Translation,
};
use crate::translator::Translator;
use crate::types::{
    ConfigurationUpdate,
    ConfigurationView,
};

thread_local! {
    /// 現在のスレッドで有効な translator のスタック
    static PROVIDERS: RefCell<Vec<Arc<Translator>>> = const { RefCell::new(Vec::new()) };
}

/// スコープ終了時 (パニック時を含む) にスタックから取り除く
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        PROVIDERS.with_borrow_mut(|providers| {
            providers.pop();
        });
    }
}

/// Runs `f` with `translator` as the current translator of this thread.
pub fn provide<R>(translator: Arc<Translator>, f: impl FnOnce() -> R) -> R {
    PROVIDERS.with_borrow_mut(|providers| providers.push(translator));
    let _guard = ScopeGuard;
    f()
}

/// Innermost translator in scope.
pub fn current() -> Result<Arc<Translator>, TranslatorError> {
    innermost("current")
}

/// [`Translator::translate`] on the translator in scope.
pub fn translate<'a, F: Clone>(
    source: impl Into<TranslationSource<'a>>,
    substitutions: Option<&Substitutions<F>>,
) -> Result<Translation<F>, TranslatorError> {
    Ok(innermost("translate")?.translate(source, substitutions))
}

/// [`Translator::configure`] on the translator in scope.
pub fn configure(update: ConfigurationUpdate) -> Result<bool, TranslatorError> {
    Ok(innermost("configure")?.configure(update))
}

/// [`Translator::configuration`] on the translator in scope.
pub fn configuration() -> Result<ConfigurationView, TranslatorError> {
    Ok(innermost("configuration")?.configuration())
}

/// スタックの先頭を返す
fn innermost(accessor: &'static str) -> Result<Arc<Translator>, TranslatorError> {
    PROVIDERS
        .with_borrow(|providers| providers.last().cloned())
        .ok_or(TranslatorError::UnconfiguredContext { accessor })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::panic;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::diagnostics::DiagnosticCollector;
    use crate::test_utils::create_translator;

    fn translator(language: &str) -> Arc<Translator> {
        create_translator(language, &DiagnosticCollector::new())
    }

    #[rstest]
    #[case::current(current().map(|_| ()))]
    #[case::translate(translate::<()>("hello", None).map(|_| ()))]
    #[case::configure(configure(ConfigurationUpdate::new()).map(|_| ()))]
    #[case::configuration(configuration().map(|_| ()))]
    fn accessors_fail_outside_scope(#[case] result: std::result::Result<(), TranslatorError>) {
        assert!(matches!(result, Err(TranslatorError::UnconfiguredContext { .. })));
    }

    #[rstest]
    fn error_names_accessor() {
        let error = configuration().unwrap_err();

        assert_that!(error.to_string(), eq("configuration must be used within a translation provider scope"));
    }

    #[rstest]
    fn translate_within_scope() {
        let substitutions = Substitutions::<()>::new().text("name", "Ada");

        let result = provide(translator("en"), || translate("hello", Some(&substitutions)));

        assert_that!(result.unwrap().as_text(), some(eq("Hello Ada")));
    }

    #[rstest]
    fn nested_scope_shadows_outer() {
        let languages = provide(translator("en"), || {
            let inner = provide(translator("ja"), || configuration().unwrap().language);
            let outer = configuration().unwrap().language;
            (inner, outer)
        });

        assert_eq!(languages, (Some("ja".to_string()), Some("en".to_string())));
        assert!(current().is_err());
    }

    #[rstest]
    fn configure_within_scope_updates_provided_translator() {
        let translator = translator("en");

        let changed = provide(Arc::clone(&translator), || configure(ConfigurationUpdate::new().language("ja")));

        assert_that!(changed, ok(eq(&true)));
        assert_that!(translator.configuration().language, some(eq("ja")));
    }

    #[rstest]
    fn missing_key_in_scope_reports_diagnostic() {
        let collector = DiagnosticCollector::new();

        let result = provide(create_translator("ja", &collector), || translate::<()>("bye", None));

        assert_that!(result.unwrap().as_text(), some(eq("bye")));
        assert_that!(collector.len(), eq(1));
    }

    #[rstest]
    fn scope_is_popped_on_panic() {
        let outcome = panic::catch_unwind(|| provide::<()>(translator("en"), || panic!("boom")));

        assert!(outcome.is_err());
        assert!(current().is_err());
    }
}
