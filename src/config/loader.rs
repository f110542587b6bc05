//! 設定ファイルの読み込み関数
//!
//! 設定ファイルは辞書と同じく JSONC として読む（コメントと末尾カンマを許可）。

use std::path::Path;

use jsonc_parser::ParseOptions;

use super::{
    ConfigError,
    SiteSettings,
};

/// サイトルートに置く設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".site-i18n.json";

/// サイトルートから設定を読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_site(site_root: &Path) -> Result<Option<SiteSettings>, ConfigError> {
    let config_path = site_root.join(CONFIG_FILE_NAME);

    if !config_path.is_file() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);
    let content = std::fs::read_to_string(&config_path)?;
    parse_settings(&content).map(Some)
}

/// JSONC テキストを設定に変換する
///
/// コメントだけ・空のファイルはデフォルト設定として扱う。
/// バリデーションは行わない（[`SiteSettings::validate`] を呼ぶこと）。
pub fn parse_settings(text: &str) -> Result<SiteSettings, ConfigError> {
    let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| ConfigError::SyntaxError(e.to_string()))?;

    let Some(value) = value else {
        tracing::debug!("Configuration file is empty, using defaults");
        return Ok(SiteSettings::default());
    };

    Ok(serde_json::from_value(value)?)
}
