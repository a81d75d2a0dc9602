//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::sync::Arc;

use crate::diagnostics::DiagnosticCollector;
use crate::locale::FixedLocales;
use crate::translator::Translator;
use crate::types::TranslationTable;

/// テスト用の翻訳テーブルを作成する
///
/// `en` と `ja` の2言語で、`hello` キーは `{{name}}` プレースホルダーを持ちます。
pub(crate) fn sample_table() -> TranslationTable {
    TranslationTable::new()
        .with_language("en", [("hello", "Hello {{name}}"), ("bye", "Bye")])
        .with_language("ja", [("hello", "こんにちは {{name}}")])
}

/// テスト用の Translator を作成する
///
/// # Arguments
/// * `language` - 明示的に指定する言語
/// * `collector` - 診断の送信先
///
/// # Returns
/// ホストのロケール設定を持たない Translator
pub(crate) fn create_translator(language: &str, collector: &DiagnosticCollector) -> Arc<Translator> {
    Arc::new(
        Translator::builder()
            .language(language)
            .default_language("en")
            .translations(sample_table())
            .locale_source(FixedLocales::default())
            .diagnostic_sink(collector.clone())
            .build(),
    )
}
