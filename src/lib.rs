//! site-i18n
//!
//! 静的サイト向けのアラビア語 (RTL) / 英語 (LTR) 切り替えレイヤー
//!
//! [`TranslationCoordinator`] drives three components over one page:
//! [`PreferenceStore`] remembers the chosen language, [`TranslationResolver`]
//! rewrites marked elements and the document direction, and
//! [`LanguageToggle`] renders the switch button. The DOM and the storage are
//! reached through [`page::Page`] and [`storage::KeyValueStorage`]; the
//! browser implementations live in `web` (wasm32 only).

pub mod audit;
pub mod config;
pub mod coordinator;
pub mod dictionary;
pub mod page;
pub mod resolver;
pub mod storage;
pub mod toggle;
pub mod types;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod test_utils;

pub use coordinator::TranslationCoordinator;
pub use dictionary::TranslationDictionary;
pub use resolver::TranslationResolver;
pub use storage::PreferenceStore;
pub use toggle::LanguageToggle;
pub use types::LanguageCode;
