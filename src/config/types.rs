use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::{FileProfileCache, MemoryProfileCache, NoopProfileCache};
use crate::source::ProfileCache;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

/// Which profile to show and how the screen starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// User whose profile is fetched. When unset the CLI uses the fixture's user.
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Segment index selected when the screen opens (default: 0, Products).
    #[serde(default)]
    pub initial_segment: usize,
}

/// Where the last good profile snapshot is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    None,
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub mode: CacheMode,
    /// Snapshot file for `mode = "file"` (default: platform cache dir).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CacheConfig {
    /// Builds the cache this configuration describes.
    pub fn build(&self) -> Arc<dyn ProfileCache> {
        match self.mode {
            CacheMode::None => Arc::new(NoopProfileCache),
            CacheMode::Memory => Arc::new(MemoryProfileCache::new()),
            CacheMode::File => {
                let path = self
                    .path
                    .clone()
                    .unwrap_or_else(FileProfileCache::default_path);
                Arc::new(FileProfileCache::new(path))
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixturesConfig {
    /// JSON fixture served as profile and listing data.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
