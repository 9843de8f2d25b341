//! Data sources backed by a JSON fixture document.
//!
//! Used by the CLI and tests in place of a network client:
//!
//! ```json
//! {
//!   "user": { "id": 1, "name": "Ali", "user_name": "zaghloul",
//!             "following_count": 5, "followers_count": 10 },
//!   "products": [ { "id": 1, "name": "MacBook", "price": 1200, "currency": "USD" } ],
//!   "advertisements": [],
//!   "tags": [ { "id": 1, "name": "laptops" } ],
//!   "followers": [],
//!   "following": [],
//!   "failing": ["tags"],
//!   "latency_ms": 20
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::SourceError;
use super::traits::{ProductDataSource, ProfileDataSource};
use crate::model::{
    Advertisement, AdvertisementList, ListingItem, ProfileTabSegment, Product, Tag, TagList,
    UserId, UserProfile, UserSummary,
};

/// Errors that can occur when loading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Data-source operation that a fixture can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureOperation {
    User,
    Products,
    Ads,
    Tags,
    Followers,
    Following,
}

/// Contents of a fixture document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub advertisements: Vec<Advertisement>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub followers: Vec<UserSummary>,
    #[serde(default)]
    pub following: Vec<UserSummary>,
    /// Operations that answer with `SourceError::Unavailable`.
    #[serde(default)]
    pub failing: HashSet<FixtureOperation>,
    /// Artificial delay applied to every call.
    #[serde(default)]
    pub latency_ms: u64,
}

/// Serves profile and listing data from a [`Fixture`].
#[derive(Debug, Clone)]
pub struct FixtureSource {
    fixture: Fixture,
}

impl FixtureSource {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }

    pub fn load_from(path: &Path) -> Result<Self, FixtureError> {
        let content = fs::read_to_string(path).map_err(|e| FixtureError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content).map_err(|e| FixtureError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let fixture: Fixture = serde_json::from_str(content)?;
        Ok(Self::new(fixture))
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    async fn respond(&self, operation: FixtureOperation) -> Result<(), SourceError> {
        if self.fixture.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.fixture.latency_ms)).await;
        }
        if self.fixture.failing.contains(&operation) {
            tracing::debug!(?operation, "Fixture answering with failure");
            return Err(SourceError::unavailable(format!(
                "fixture marks {:?} as failing",
                operation
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileDataSource for FixtureSource {
    async fn fetch_user(&self, id: UserId) -> Result<UserProfile, SourceError> {
        self.respond(FixtureOperation::User).await?;
        self.fixture
            .user
            .as_ref()
            .filter(|user| user.id == id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                resource: format!("user {}", id),
            })
    }
}

#[async_trait]
impl ProductDataSource for FixtureSource {
    async fn fetch_products(
        &self,
        segment: ProfileTabSegment,
    ) -> Result<Vec<ListingItem>, SourceError> {
        let items = match segment {
            ProfileTabSegment::Products => {
                self.respond(FixtureOperation::Products).await?;
                self.fixture
                    .products
                    .iter()
                    .cloned()
                    .map(ListingItem::Product)
                    .collect()
            }
            ProfileTabSegment::Followers => {
                self.respond(FixtureOperation::Followers).await?;
                self.fixture
                    .followers
                    .iter()
                    .cloned()
                    .map(ListingItem::User)
                    .collect()
            }
            ProfileTabSegment::Following => {
                self.respond(FixtureOperation::Following).await?;
                self.fixture
                    .following
                    .iter()
                    .cloned()
                    .map(ListingItem::User)
                    .collect()
            }
            // Ads and tags have their own endpoints.
            ProfileTabSegment::AdsAndTags => {
                return Err(SourceError::NotFound {
                    resource: format!("products for {}", segment),
                })
            }
        };
        Ok(items)
    }

    async fn fetch_ads(&self) -> Result<AdvertisementList, SourceError> {
        self.respond(FixtureOperation::Ads).await?;
        Ok(AdvertisementList {
            advertisements: self.fixture.advertisements.clone(),
        })
    }

    async fn fetch_tags(&self) -> Result<TagList, SourceError> {
        self.respond(FixtureOperation::Tags).await?;
        Ok(TagList {
            tags: self.fixture.tags.clone(),
        })
    }
}
