//! 設定管理を行うモジュール

use std::path::Path;

use super::{
    CONFIG_FILE_NAME,
    ConfigError,
    TranslatorSettings,
};

/// プロジェクトの設定を保持する
#[derive(Default, Debug, Clone)]
pub struct SettingsManager {
    /// 現在の設定
    current_settings: TranslatorSettings,
}

impl SettingsManager {
    /// デフォルト設定で作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: TranslatorSettings::default() }
    }

    /// プロジェクトの `.i18n-translator.json` を読み込む
    ///
    /// `root` が `None` またはファイルが無い場合はデフォルト設定になります。
    /// 失敗した場合、現在の設定は変更されません。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, root: Option<&Path>) -> Result<(), ConfigError> {
        let settings = match root {
            Some(root) => read_settings_file(root)?.unwrap_or_default(),
            None => TranslatorSettings::default(),
        };
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(?settings, "Settings loaded");
        self.current_settings = settings;
        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &TranslatorSettings {
        &self.current_settings
    }
}

/// `root` 直下の設定ファイルを読む。ファイルが無ければ `Ok(None)`
fn read_settings_file(root: &Path) -> Result<Option<TranslatorSettings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        tracing::debug!(path = %config_path.display(), "No settings file");
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "Reading settings file");
    let content = std::fs::read_to_string(&config_path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
