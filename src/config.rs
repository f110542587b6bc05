//! Site configuration.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Page file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    parse_settings,
};
pub use manager::ConfigManager;
pub use matcher::{
    MatcherError,
    PageMatcher,
};
pub use types::{
    ConfigError,
    SiteSettings,
    ToggleSettings,
    ValidationError,
};
