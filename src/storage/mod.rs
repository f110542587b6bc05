//! Language preference persistence.
/// Key-value storage backends
mod backend;
/// Preference store on top of a backend
mod preference;

pub use backend::{
    KeyValueStorage,
    MemoryStorage,
    StorageError,
};
pub use preference::{
    DEFAULT_STORAGE_KEY,
    PreferenceStore,
};
