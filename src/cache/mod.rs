//! Profile snapshot caches.
//!
//! - [`NoopProfileCache`]: never holds anything
//! - [`MemoryProfileCache`]: keeps the last snapshot for the process lifetime
//! - [`FileProfileCache`]: persists the last snapshot as JSON

mod file;

use parking_lot::RwLock;

use crate::model::UserProfile;
use crate::source::ProfileCache;

pub use file::{CacheError, FileProfileCache};

/// Cache that never holds a snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProfileCache;

impl ProfileCache for NoopProfileCache {
    fn get(&self) -> Option<UserProfile> {
        None
    }
}

/// In-process cache of the last stored snapshot.
#[derive(Debug, Default)]
pub struct MemoryProfileCache {
    snapshot: RwLock<Option<UserProfile>>,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-seeded with `profile`.
    pub fn with_snapshot(profile: UserProfile) -> Self {
        Self {
            snapshot: RwLock::new(Some(profile)),
        }
    }

    pub fn clear(&self) {
        *self.snapshot.write() = None;
    }
}

impl ProfileCache for MemoryProfileCache {
    fn get(&self) -> Option<UserProfile> {
        self.snapshot.read().clone()
    }

    fn store(&self, profile: &UserProfile) {
        *self.snapshot.write() = Some(profile.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            id: UserId(1),
            name: name.to_string(),
            image: String::new(),
            user_name: "zaghloul".to_string(),
            following_count: 5,
            followers_count: 10,
            country_name: "Egypt".to_string(),
            city_name: "Cairo".to_string(),
        }
    }

    #[test]
    fn noop_cache_ignores_store() {
        let cache = NoopProfileCache;
        cache.store(&profile("Ali"));
        assert!(cache.get().is_none());
    }

    #[test]
    fn memory_cache_keeps_latest_snapshot() {
        let cache = MemoryProfileCache::new();
        assert!(cache.get().is_none());
        cache.store(&profile("Ali"));
        cache.store(&profile("Omar"));
        assert_eq!(cache.get().map(|p| p.name), Some("Omar".to_string()));
    }

    #[test]
    fn memory_cache_clear() {
        let cache = MemoryProfileCache::with_snapshot(profile("Ali"));
        cache.clear();
        assert!(cache.get().is_none());
    }
}
