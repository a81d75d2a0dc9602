//! プロジェクトディレクトリから翻訳するまでの結合テスト

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use googletest::prelude::*;
use i18n_translator::config::{
    MissingKeyPolicy,
    SettingsManager,
};
use i18n_translator::indexer::load_translation_table;
use i18n_translator::{
    ConfigurationUpdate,
    Diagnostic,
    DiagnosticCollector,
    DiagnosticKind,
    FixedLocales,
    Segment,
    Substitutions,
    TranslationTable,
    Translator,
    context,
};
use rstest::*;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[fixture]
fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        ".i18n-translator.json",
        r#"{ "defaultLanguage": "en", "missingKey": { "policy": "defaultLanguage" } }"#,
    );
    write(
        root,
        "locales/en.json",
        r#"{ "greeting": "Hello {{name}}!", "terms": "Read the {{link}}", "footer": { "copyright": "All rights reserved" } }"#,
    );
    write(root, "locales/fr.json", r#"{ "greeting": "Bonjour {{name}} !", "terms": "Lisez les {{link}}" }"#);
    temp_dir
}

fn translator_for(root: &Path, preferred: &[&str], collector: &DiagnosticCollector) -> Translator {
    let mut settings_manager = SettingsManager::new();
    settings_manager.load_settings(Some(root)).unwrap();
    let settings = settings_manager.get_settings();
    let table = load_translation_table(root, settings).unwrap();

    Translator::builder()
        .settings(settings)
        .translations(table)
        .locale_source(FixedLocales::new(preferred.iter().copied()))
        .diagnostic_sink(collector.clone())
        .build()
}

#[rstest]
fn translates_in_host_language(project: TempDir) {
    let collector = DiagnosticCollector::new();
    let translator = translator_for(project.path(), &["de-DE", "fr-FR"], &collector);

    let greeting = translator.translate("greeting", Some(&Substitutions::<()>::new().text("name", "Ada")));

    assert_that!(translator.configuration().language, some(eq("fr")));
    assert_that!(greeting.as_text(), some(eq("Bonjour Ada !")));
    assert!(collector.is_empty());
}

#[rstest]
fn falls_back_to_default_language_from_settings(project: TempDir) {
    let collector = DiagnosticCollector::new();
    let translator = translator_for(project.path(), &["fr"], &collector);

    assert_that!(translator.missing_key_policy(), eq(MissingKeyPolicy::DefaultLanguage));
    assert_that!(translator.text("footer.copyright"), eq("All rights reserved"));
    assert!(collector.is_empty());
}

#[rstest]
fn missing_key_reports_once(project: TempDir) {
    let collector = DiagnosticCollector::new();
    let translator = translator_for(project.path(), &["fr"], &collector);

    let text = translator.text("nav.home");

    assert_that!(text, eq("nav.home"));
    assert_that!(
        collector.diagnostics(),
        elements_are![field!(
            Diagnostic.kind,
            eq(&DiagnosticKind::MissingTranslationKey {
                key: "nav.home".to_string(),
                language: Some("fr".to_string()),
            })
        )]
    );
}

#[rstest]
fn fragments_keep_their_position(project: TempDir) {
    #[derive(Debug, Clone, PartialEq)]
    struct Link(&'static str);

    let collector = DiagnosticCollector::new();
    let translator = translator_for(project.path(), &["en-US"], &collector);
    let substitutions = Substitutions::new().fragment("link", Link("/terms"));

    let terms = translator.translate("terms", Some(&substitutions));

    let keys: Vec<usize> = terms.segments().iter().map(|segment| segment.key).collect();
    let segments: Vec<&Segment<Link>> = terms.segments().iter().map(|segment| &segment.segment).collect();
    assert_eq!(keys, vec![0, 1]);
    assert_eq!(segments, vec![&Segment::Text("Read the ".to_string()), &Segment::Fragment(Link("/terms"))]);
}

#[rstest]
fn reconfiguration_is_visible_through_context(project: TempDir) {
    let collector = DiagnosticCollector::new();
    let translator = Arc::new(translator_for(project.path(), &["en"], &collector));

    let (before, changed, after, unchanged) = context::provide(Arc::clone(&translator), || {
        let before = context::translate::<()>("greeting", None).unwrap().into_text();
        let changed = context::configure(ConfigurationUpdate::new().language("fr")).unwrap();
        let after = context::translate::<()>("greeting", None).unwrap().into_text();
        let unchanged = context::configure(ConfigurationUpdate::new().language("fr")).unwrap();
        (before, changed, after, unchanged)
    });

    assert_that!(before, some(eq("Hello {{name}}!")));
    assert!(changed);
    assert_that!(after, some(eq("Bonjour {{name}} !")));
    assert!(!unchanged);
    assert_that!(translator.revision(), eq(1));
    assert!(context::current().is_err());
}

#[rstest]
fn inline_table_from_json() {
    let table = TranslationTable::from_json_str(
        r#"{ "es": { "translation": { "saludo": { "hola": "Hola {{name}}" } } } }"#,
        ".",
    )
    .unwrap();
    let translator = Translator::builder()
        .default_language("xx")
        .translations(table)
        .locale_source(FixedLocales::new(["de"]))
        .diagnostic_sink(DiagnosticCollector::new())
        .build();

    let text = translator.translate("saludo.hola", Some(&Substitutions::<()>::new().text("name", "Ana")));

    assert_that!(translator.configuration().language, some(eq("es")));
    assert_that!(text.as_text(), some(eq("Hola Ana")));
}
