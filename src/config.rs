//! Settings for translators built from a project directory.
/// Settings manager
mod manager;
/// Translation file pattern matcher
mod matcher;
/// Settings types and validation
mod types;

pub use manager::SettingsManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    CONFIG_FILE_NAME,
    ConfigError,
    MissingKeyConfig,
    MissingKeyPolicy,
    Severity,
    TranslationFilesConfig,
    TranslatorSettings,
    ValidationError,
};
