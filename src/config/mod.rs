//! TOML configuration.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CacheConfig, CacheMode, Config, FixturesConfig, ProfileConfig};
