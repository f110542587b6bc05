//! `window.localStorage` backend.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::storage::{
    KeyValueStorage,
    StorageError,
};

/// Browser local storage. Reading it may throw (private mode, sandboxed
/// iframes); in that case every operation reports [`StorageError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    /// `None` when the browser refused access
    storage: Option<Storage>,
}

impl LocalStorage {
    #[must_use]
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::debug!("localStorage is not exposed by this browser context");
        }
        Self { storage }
    }

    /// The storage, or [`StorageError::Unavailable`].
    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".to_string()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(backend_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|error| {
            if error_name(&error).as_deref() == Some("QuotaExceededError") {
                StorageError::QuotaExceeded { key: key.to_string() }
            } else {
                backend_error(error)
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(backend_error)
    }
}

/// `name` property of a thrown DOMException.
fn error_name(error: &JsValue) -> Option<String> {
    Reflect::get(error, &JsValue::from_str("name")).ok()?.as_string()
}

/// Wraps any other storage failure.
fn backend_error(error: JsValue) -> StorageError {
    StorageError::Backend(error_name(&error).unwrap_or_else(|| format!("{error:?}")))
}
