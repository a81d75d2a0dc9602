//! i18n-translator
//!
//! キー付き翻訳テーブルのための実行時ロケール解決と `{{placeholder}}` 置換
//!
//! ```
//! use i18n_translator::{
//!     Substitutions,
//!     Translator,
//!     types::TranslationTable,
//! };
//!
//! let table = TranslationTable::new()
//!     .with_language("en", [("hello", "Hello {{name}}!")])
//!     .with_language("fr", [("hello", "Bonjour {{name}} !")]);
//! let translator = Translator::builder().language("fr").translations(table).build();
//!
//! let greeting = translator.translate("hello", Some(&Substitutions::<()>::new().text("name", "Ada")));
//! assert_eq!(greeting.as_text(), Some("Bonjour Ada !"));
//! ```

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod indexer;
pub mod input;
pub mod locale;
pub mod lookup;
pub mod template;
pub mod translator;
pub mod types;

mod test_utils;

pub use diagnostics::{
    Diagnostic,
    DiagnosticCollector,
    DiagnosticKind,
    DiagnosticSink,
    TracingSink,
};
pub use error::TranslatorError;
pub use locale::{
    FixedLocales,
    LocaleSource,
    SystemLocales,
    resolve_language,
};
pub use lookup::TranslationSource;
pub use template::{
    Segment,
    Substitution,
    Substitutions,
    Translation,
    substitute,
};
pub use translator::{
    Translator,
    TranslatorBuilder,
};
pub use types::{
    Configuration,
    ConfigurationUpdate,
    ConfigurationView,
    TranslationTable,
};
