//! Translation files
//!
//! JSON の翻訳ファイルを読み込み、ネストしたキーをフラットにします。

use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::types::TranslationTable;

/// Primary language subtags recognised in file paths (ISO 639-1 plus a few ISO 639-3 codes)
static LANGUAGE_CODES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "af", "am", "ar", "as", "az", "be", "bg", "bn", "bo", "br", "bs", "ca", "cs", "cy", "da", "de", "dz", "el",
        "en", "eo", "es", "et", "eu", "fa", "fi", "fo", "fr", "fy", "ga", "gd", "gl", "gu", "ha", "he", "hi", "hr",
        "ht", "hu", "hy", "id", "ig", "is", "it", "ja", "jv", "ka", "kk", "km", "kn", "ko", "ku", "ky", "la", "lb",
        "lo", "lt", "lv", "mg", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my", "nb", "ne", "nl", "nn", "no", "oc",
        "or", "pa", "pl", "ps", "pt", "qu", "rm", "ro", "ru", "rw", "sa", "sd", "si", "sk", "sl", "sm", "so", "sq",
        "sr", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tr", "tt", "ug", "uk", "ur", "uz", "vi",
        "wo", "xh", "yi", "yo", "zh", "zu", "ast", "ckb", "fil", "haw", "yue",
    ]
    .into_iter()
    .collect()
});

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read translation file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse translation file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// JSON is valid but not shaped like a translation table.
    #[error("Invalid translation table: {0}")]
    InvalidShape(String),
}

/// Flattens nested JSON into separator-joined keys.
///
/// Arrays are indexed as `items[0]`; non-string scalars are stringified.
///
/// # Examples
/// ```
/// use i18n_translator::input::translation::flatten_json;
/// use serde_json::json;
///
/// let json = json!({ "common": { "hello": "Hello" }, "items": ["a", "b"] });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("common.hello").map(String::as_str), Some("Hello"));
/// assert_eq!(flattened.get("items[1]").map(String::as_str), Some("b"));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, separator: &str, prefix: Option<&str>) -> IndexMap<String, String> {
    let mut result = IndexMap::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

/// 再帰的にフラット化する
fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut IndexMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key = prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}

impl TranslationTable {
    /// Builds a table from `{ "<lang>": { "translation": { ... } } }`.
    ///
    /// Nested `translation` objects are flattened with `separator`.
    pub fn from_json(json: &Value, separator: &str) -> Result<Self, LoadError> {
        let Value::Object(languages) = json else {
            return Err(LoadError::InvalidShape("expected an object of languages".to_string()));
        };

        let mut table = Self::new();
        for (language, entry) in languages {
            let translation = entry
                .get("translation")
                .filter(|translation| translation.is_object())
                .ok_or_else(|| {
                    LoadError::InvalidShape(format!("\"{language}.translation\" must be an object"))
                })?;
            table.insert_language(language.clone(), flatten_json(translation, separator, None).into_iter().collect());
        }
        Ok(table)
    }

    /// [`Self::from_json`] on JSON text.
    pub fn from_json_str(text: &str, separator: &str) -> Result<Self, LoadError> {
        let json: Value = serde_json::from_str(text)
            .map_err(|source| LoadError::Parse { path: PathBuf::from("<inline>"), source })?;
        Self::from_json(&json, separator)
    }
}

/// Normalize language code (lowercase and replace - with _)
fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// Whether `part` is a language tag with a known primary subtag (`en`, `pt_BR`, `zh-Hant-TW`).
fn is_language_tag(part: &str) -> bool {
    let normalized = normalize_language_code(part);
    let mut subtags = normalized.split('_');
    let primary = subtags.next().unwrap_or_default();
    if !LANGUAGE_CODES.contains(primary) || !part.starts_with(primary) {
        return false;
    }

    subtags.all(|subtag| match subtag.len() {
        2 | 4 => subtag.bytes().all(|b| b.is_ascii_alphabetic()),
        3 => subtag.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    })
}

/// Detects the language of a translation file from its path.
///
/// Splits the path by `/` and `.` and returns the last part whose primary
/// subtag is a known language code. The remaining subtags must be shaped like
/// a script (`Hant`) or region (`US`, `419`).
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `messages/ja-JP.json` → `ja-JP`
/// - `translations/en_US/common.json` → `en_US`
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> Option<String> {
    let path_str = file_path.to_string_lossy();
    path_str
        .split(['/', '\\', '.'])
        .rev()
        .find(|part| is_language_tag(part))
        .map(str::to_string)
}

/// Reads and flattens the keys of a translation file.
pub fn read_translation_keys(file_path: &Path, separator: &str) -> Result<IndexMap<String, String>, LoadError> {
    let content = std::fs::read_to_string(file_path)
        .map_err(|source| LoadError::Io { path: file_path.to_path_buf(), source })?;

    let json: Value = serde_json::from_str(&content)
        .map_err(|source| LoadError::Parse { path: file_path.to_path_buf(), source })?;

    Ok(flatten_json(&json, separator, None))
}
