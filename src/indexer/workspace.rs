//! Workspace traversal

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::{
    FileMatcher,
    TranslatorSettings,
};
use crate::indexer::types::IndexerError;
use crate::input::translation::{
    detect_language_from_path,
    read_translation_keys,
};
use crate::types::TranslationTable;

/// 翻訳ファイルを検索する
///
/// `.gitignore` を尊重し、結果はパス順にソートされます。
///
/// # Errors
/// - ルートがディレクトリでない場合
/// - パターンが不正な場合
pub fn find_translation_files(root: &Path, settings: &TranslatorSettings) -> Result<Vec<PathBuf>, IndexerError> {
    if !root.is_dir() {
        return Err(IndexerError::InvalidPath(root.to_path_buf()));
    }
    let matcher = FileMatcher::new(root.to_path_buf(), settings)?;

    let mut found_files = Vec::new();
    // ignore クレートでファイルを走査
    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_translation_file(entry.path()) {
            found_files.push(entry.into_path());
        }
    }

    found_files.sort();
    Ok(found_files)
}

/// 翻訳ファイルを読み込み、言語ごとにマージしたテーブルを返す
///
/// 後から読み込んだファイルのキーが優先されます。
/// 読み込めないファイルは警告を出してスキップします。
///
/// # Errors
/// - ルートがディレクトリでない場合
/// - パターンが不正な場合
pub fn load_translation_table(root: &Path, settings: &TranslatorSettings) -> Result<TranslationTable, IndexerError> {
    tracing::debug!(root = %root.display(), "Loading translation files");

    let mut table = TranslationTable::new();
    for path in find_translation_files(root, settings)? {
        let relative_path = path.strip_prefix(root).unwrap_or(path.as_path());
        let Some(language) = detect_language_from_path(relative_path) else {
            tracing::warn!(path = %path.display(), "Could not detect language; skipping");
            continue;
        };

        let keys = match read_translation_keys(&path, &settings.key_separator) {
            Ok(keys) => keys,
            Err(err) => {
                tracing::warn!("{err}; skipping");
                continue;
            }
        };

        let overridden = table.extend_language(language.as_str(), keys);
        if !overridden.is_empty() {
            tracing::debug!(path = %path.display(), %language, ?overridden, "Overrode existing keys");
        }
    }

    tracing::debug!(languages = table.len(), "Translation table loaded");
    Ok(table)
}
