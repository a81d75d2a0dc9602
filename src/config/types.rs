use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Name of the settings file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = ".i18n-translator.json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFiles.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What a translator returns when a key has no template in the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingKeyPolicy {
    /// Use the key itself as the template.
    #[default]
    Key,
    /// Retry in the default language, then use the key itself.
    DefaultLanguage,
}

/// Severity of emitted diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    #[default]
    Warning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MissingKeyConfig {
    pub policy: MissingKeyPolicy,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/{locales,messages}/**/*.json".to_string()],
            exclude_patterns: vec!["**/node_modules/**".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorSettings {
    /// Explicit language. When unset, the language is negotiated from the
    /// host locale preferences.
    pub language: Option<String>,
    /// Used for the last negotiation fallback and by
    /// [`MissingKeyPolicy::DefaultLanguage`].
    pub default_language: Option<String>,

    /// Separator used to flatten nested translation files.
    pub key_separator: String,

    pub missing_key: MissingKeyConfig,
    pub translation_files: TranslationFilesConfig,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            language: None,
            default_language: None,
            key_separator: ".".to_string(),
            missing_key: MissingKeyConfig::default(),
            translation_files: TranslationFilesConfig::default(),
        }
    }
}

impl TranslatorSettings {
    /// # Errors
    /// - Empty separator or language
    /// - Missing or invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        for (field, value) in
            [("language", &self.language), ("defaultLanguage", &self.default_language)]
        {
            if let Some(language) = value
                && language.trim().is_empty()
            {
                errors.push(ValidationError::new(
                    field,
                    "The language cannot be empty. Please specify a language tag (e.g., \"en\"), or remove this field",
                ));
            }
        }

        if self.translation_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/{locales,messages}/**/*.json\"]",
            ));
        }

        for (index, pattern) in self.translation_files.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translationFiles.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.translation_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translationFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
