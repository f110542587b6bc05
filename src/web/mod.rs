//! Browser entry point.

/// Console output for tracing
mod console;
/// DOM page backend
mod dom;
/// localStorage backend
mod storage;

use std::fmt;
use std::rc::Rc;

pub use console::ConsoleMakeWriter;
pub use dom::DomPage;
pub use storage::LocalStorage;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::prelude::*;

use crate::config::{
    ConfigError,
    SiteSettings,
    parse_settings,
};
use crate::coordinator::TranslationCoordinator;
use crate::dictionary::TranslationDictionary;

/// Handle returned to the page bootstrap. Keep it alive for the lifetime of
/// the page; dropping it detaches the toggle from the coordinator.
#[wasm_bindgen]
#[derive(Debug)]
pub struct SiteTranslations {
    /// Page state owned for the lifetime of the handle
    coordinator: TranslationCoordinator<LocalStorage, DomPage>,
}

#[wasm_bindgen]
impl SiteTranslations {
    /// Builds every component and applies the initial language.
    ///
    /// `settings` is the text of `.site-i18n.json`; `dictionary` is
    /// JSON-with-comments text replacing the built-in dictionary.
    pub fn boot(
        settings: Option<String>,
        dictionary: Option<String>,
    ) -> Result<SiteTranslations, JsValue> {
        init_logging();

        let settings = match settings {
            Some(text) => parse_settings(&text).map_err(to_js)?,
            None => SiteSettings::default(),
        };
        settings.validate().map_err(|errors| to_js(ConfigError::ValidationErrors(errors)))?;

        let dictionary = match dictionary {
            Some(text) => TranslationDictionary::from_jsonc(&text),
            None => TranslationDictionary::embedded(),
        }
        .map_err(to_js)?;

        let page = DomPage::new().map_err(to_js)?;
        let coordinator = TranslationCoordinator::from_settings(
            &settings,
            LocalStorage::new(),
            Rc::new(page),
            Rc::new(dictionary),
        );
        coordinator.initialize();

        Ok(Self { coordinator })
    }

    /// Returns false if `code` is not a supported language.
    #[wasm_bindgen(js_name = switchLanguage)]
    pub fn switch_language(&self, code: &str) -> bool {
        self.coordinator.switch_language(code)
    }

    #[wasm_bindgen(js_name = currentLanguage)]
    pub fn current_language(&self) -> String {
        self.coordinator.current_language().to_string()
    }
}

/// Installs the console subscriber once; later calls are ignored.
fn init_logging() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("site_i18n=warn"))
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Error message for the JS caller.
fn to_js(error: impl fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
