//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::io;
use std::rc::Rc;
use std::sync::{
    Arc,
    Mutex,
};

use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{
    SiteSettings,
    ToggleSettings,
};
use crate::coordinator::TranslationCoordinator;
use crate::dictionary::TranslationDictionary;
use crate::page::{
    NodeId,
    VirtualPage,
};
use crate::resolver::DEFAULT_MARKER_ATTRIBUTE;
use crate::storage::MemoryStorage;

/// テスト用の小さな辞書を作成する
///
/// `nav.home` と `nav.contact` を両言語で持つ
pub(crate) fn sample_dictionary() -> Rc<TranslationDictionary> {
    let dictionary = TranslationDictionary::from_value(json!({
        "ar": { "nav": { "home": "الرئيسية", "contact": "تواصل" } },
        "en": { "nav": { "home": "Home", "contact": "Contact" } }
    }))
    .unwrap_or_default();
    Rc::new(dictionary)
}

/// ヘッダーとマーク付き要素を持つテスト用ページ
pub(crate) struct SitePage {
    pub page: Rc<VirtualPage>,
    pub home: NodeId,
    pub contact: NodeId,
}

/// ヘッダーコンテナと `nav.home` / `nav.contact` の要素を持つページを作成する
pub(crate) fn site_page() -> SitePage {
    let page = VirtualPage::new();
    page.add_container(&ToggleSettings::default().container_selector);
    let home = page.add_marked(DEFAULT_MARKER_ATTRIBUTE, "nav.home", "");
    let contact = page.add_marked(DEFAULT_MARKER_ATTRIBUTE, "nav.contact", "");
    SitePage { page: Rc::new(page), home, contact }
}

/// デフォルト設定でコーディネーターを作成する（未初期化）
pub(crate) fn coordinator(
    storage: &MemoryStorage,
    page: &Rc<VirtualPage>,
) -> TranslationCoordinator<MemoryStorage, VirtualPage> {
    TranslationCoordinator::from_settings(
        &SiteSettings::default(),
        storage.clone(),
        Rc::clone(page),
        sample_dictionary(),
    )
}

/// ログ出力を溜めるバッファ
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().map_err(|_| io::Error::other("log buffer poisoned"))?.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// `f` の実行中に出力されたログを取得する
///
/// # Returns
/// `f` の戻り値と、ANSI エスケープなしで整形されたログ
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    let logs = buffer.0.lock().map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
    (result, logs.unwrap_or_default())
}
