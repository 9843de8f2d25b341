//! Collaborators the profile screen talks to.

use async_trait::async_trait;

use super::error::SourceError;
use crate::model::{AdvertisementList, ListingItem, ProfileTabSegment, TagList, UserId, UserProfile};

/// Remote source of user profiles.
#[async_trait]
pub trait ProfileDataSource: Send + Sync {
    async fn fetch_user(&self, id: UserId) -> Result<UserProfile, SourceError>;
}

/// Remote source of the listings shown under the profile header.
///
/// Each call is independent; callers may issue them concurrently.
#[async_trait]
pub trait ProductDataSource: Send + Sync {
    /// Listing rows for `segment`: products for `Products`, user rows for
    /// `Followers` / `Following`.
    async fn fetch_products(
        &self,
        segment: ProfileTabSegment,
    ) -> Result<Vec<ListingItem>, SourceError>;

    async fn fetch_ads(&self) -> Result<AdvertisementList, SourceError>;

    async fn fetch_tags(&self) -> Result<TagList, SourceError>;
}

/// Last-known-good profile snapshot.
///
/// Implementations may block on I/O: the profile screen calls both methods
/// through `tokio::task::spawn_blocking`.
pub trait ProfileCache: Send + Sync {
    fn get(&self) -> Option<UserProfile>;

    /// Records a freshly fetched snapshot. Default implementation does nothing.
    fn store(&self, _profile: &UserProfile) {}
}

/// Navigation requests raised by the profile screen.
pub trait Navigator: Send + Sync {
    fn open_language_selector(&self);
}
