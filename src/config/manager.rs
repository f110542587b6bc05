//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SiteSettings,
    loader,
};
use crate::dictionary::{
    DictionaryError,
    TranslationDictionary,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: SiteSettings,

    /// サイトのルートパス
    site_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: SiteSettings::default(), site_root: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `site_root` - サイトのルートパス
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, site_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for site: {:?}", site_root);

        let settings = if let Some(root) = &site_root {
            loader::load_from_site(root)?.map_or_else(SiteSettings::default, |s| {
                tracing::debug!("Loaded site settings: {:?}", s);
                s
            })
        } else {
            SiteSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.site_root = site_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &SiteSettings {
        &self.current_settings
    }

    /// 設定に従って辞書を読み込む
    ///
    /// `dictionaryPath` が未設定なら組み込み辞書を使う。相対パスはサイトルート基準。
    pub fn load_dictionary(&self) -> Result<TranslationDictionary, DictionaryError> {
        let Some(path) = &self.current_settings.dictionary_path else {
            return TranslationDictionary::embedded();
        };

        let path = Path::new(path);
        match &self.site_root {
            Some(root) if path.is_relative() => TranslationDictionary::load_file(&root.join(path)),
            _ => TranslationDictionary::load_file(path),
        }
    }
}
