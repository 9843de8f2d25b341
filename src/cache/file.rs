//! JSON file-backed profile cache.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::UserProfile;
use crate::source::ProfileCache;

/// Errors that can occur reading or writing the cache file.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache file '{path}' is not a valid snapshot: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persists the last good profile snapshot to a JSON file.
///
/// [`ProfileCache`] calls never fail: read errors are logged and treated as
/// a cache miss, write errors are logged and dropped.
#[derive(Debug, Clone)]
pub struct FileProfileCache {
    path: PathBuf,
}

impl FileProfileCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<cache dir>/profile-projector/profile.json`, falling back to the
    /// current directory when the platform has no cache dir.
    pub fn default_path() -> PathBuf {
        let cache_dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        cache_dir.join("profile-projector").join("profile.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. `Ok(None)` when no file exists yet.
    pub fn load(&self) -> Result<Option<UserProfile>, CacheError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| CacheError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        let profile = serde_json::from_str(&content).map_err(|e| CacheError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(profile))
    }

    /// Writes the snapshot, creating parent directories as needed.
    pub fn save(&self, profile: &UserProfile) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let content = serde_json::to_string_pretty(profile).map_err(|e| CacheError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, content).map_err(|e| CacheError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl ProfileCache for FileProfileCache {
    fn get(&self) -> Option<UserProfile> {
        match self.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable profile cache");
                None
            }
        }
    }

    fn store(&self, profile: &UserProfile) {
        if let Err(e) = self.save(profile) {
            tracing::warn!(error = %e, "Failed to persist profile cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;
    use tempfile::TempDir;

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId(1),
            name: "Ali".to_string(),
            image: String::new(),
            user_name: "zaghloul".to_string(),
            following_count: 5,
            followers_count: 10,
            country_name: "Egypt".to_string(),
            city_name: "Cairo".to_string(),
        }
    }

    #[test]
    fn missing_file_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = FileProfileCache::new(dir.path().join("profile.json"));
        assert!(cache.load().unwrap().is_none());
        assert!(cache.get().is_none());
    }

    #[test]
    fn stored_snapshot_is_returned() {
        let dir = TempDir::new().unwrap();
        let cache = FileProfileCache::new(dir.path().join("nested").join("profile.json"));
        cache.store(&profile());
        assert_eq!(cache.get(), Some(profile()));
    }

    #[test]
    fn corrupt_file_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "not json").unwrap();
        let cache = FileProfileCache::new(path);
        assert!(matches!(cache.load(), Err(CacheError::Json { .. })));
        assert!(cache.get().is_none());
    }

    #[test]
    fn default_path_ends_with_expected() {
        assert!(FileProfileCache::default_path().ends_with("profile-projector/profile.json"));
    }
}
