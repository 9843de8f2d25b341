//! Shared test doubles for the profile screen.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use profile_projector::model::{
    AdvertisementList, ListingItem, ProfileTabSegment, Product, TagList, UserId, UserProfile,
};
use profile_projector::observable::Updates;
use profile_projector::source::{
    Navigator, ProductDataSource, ProfileCache, ProfileDataSource, SourceError,
};
use profile_projector::{ProfileDependencies, ProfileStateProjector};

/// How long a test waits for an async delivery before failing.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_millis(500);

pub fn user_model_mock() -> UserProfile {
    UserProfile {
        id: UserId(0),
        name: "Ali".to_string(),
        image: String::new(),
        user_name: "zaghloul".to_string(),
        following_count: 5,
        followers_count: 10,
        country_name: "Egypt".to_string(),
        city_name: "Cairo".to_string(),
    }
}

pub fn product(id: u64, name: &str) -> ListingItem {
    ListingItem::Product(Product {
        id,
        name: name.to_string(),
        image: String::new(),
        price: 1200.0,
        currency: "USD".to_string(),
        offer: 0.0,
        end_date: 0,
    })
}

pub fn offline() -> SourceError {
    SourceError::unavailable("offline")
}

/// Scripted profile and product API. Every result defaults to a failure.
pub struct MockProductApi {
    pub user_result: Mutex<Result<UserProfile, SourceError>>,
    pub products_result: Mutex<Result<Vec<ListingItem>, SourceError>>,
    pub ads_result: Mutex<Result<AdvertisementList, SourceError>>,
    pub tags_result: Mutex<Result<TagList, SourceError>>,
    /// Delay before every answer.
    pub latency: Mutex<Duration>,
    pub user_calls: AtomicUsize,
    pub product_calls: Mutex<Vec<ProfileTabSegment>>,
    pub ads_calls: AtomicUsize,
    pub tags_calls: AtomicUsize,
}

impl Default for MockProductApi {
    fn default() -> Self {
        Self {
            user_result: Mutex::new(Err(SourceError::unavailable("not scripted"))),
            products_result: Mutex::new(Err(SourceError::unavailable("not scripted"))),
            ads_result: Mutex::new(Err(SourceError::unavailable("not scripted"))),
            tags_result: Mutex::new(Err(SourceError::unavailable("not scripted"))),
            latency: Mutex::new(Duration::ZERO),
            user_calls: AtomicUsize::new(0),
            product_calls: Mutex::new(Vec::new()),
            ads_calls: AtomicUsize::new(0),
            tags_calls: AtomicUsize::new(0),
        }
    }
}

impl MockProductApi {
    /// Empty ads and tags, so only products decide a Products cycle.
    pub fn with_empty_companions() -> Self {
        let api = Self::default();
        *api.ads_result.lock() = Ok(AdvertisementList::default());
        *api.tags_result.lock() = Ok(TagList::default());
        api
    }

    async fn delay(&self) {
        let latency = *self.latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ProfileDataSource for MockProductApi {
    async fn fetch_user(&self, _id: UserId) -> Result<UserProfile, SourceError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.user_result.lock().clone()
    }
}

#[async_trait]
impl ProductDataSource for MockProductApi {
    async fn fetch_products(
        &self,
        segment: ProfileTabSegment,
    ) -> Result<Vec<ListingItem>, SourceError> {
        self.product_calls.lock().push(segment);
        self.delay().await;
        self.products_result.lock().clone()
    }

    async fn fetch_ads(&self) -> Result<AdvertisementList, SourceError> {
        self.ads_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.ads_result.lock().clone()
    }

    async fn fetch_tags(&self) -> Result<TagList, SourceError> {
        self.tags_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.tags_result.lock().clone()
    }
}

/// Cache that always answers with [`user_model_mock`] and ignores stores.
pub struct DummyProfileCache;

impl ProfileCache for DummyProfileCache {
    fn get(&self) -> Option<UserProfile> {
        Some(user_model_mock())
    }
}

#[derive(Default)]
pub struct MockNavigator {
    pub did_open_language: AtomicBool,
    pub calls: AtomicUsize,
}

impl Navigator for MockNavigator {
    fn open_language_selector(&self) {
        self.did_open_language.store(true, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub projector: ProfileStateProjector,
    pub api: Arc<MockProductApi>,
    pub navigator: Arc<MockNavigator>,
}

pub fn harness_with_cache(api: MockProductApi, cache: Arc<dyn ProfileCache>) -> Harness {
    let api = Arc::new(api);
    let navigator = Arc::new(MockNavigator::default());
    let deps = ProfileDependencies {
        profiles: api.clone(),
        products: api.clone(),
        cache,
        navigator: navigator.clone(),
    };
    Harness {
        projector: ProfileStateProjector::new(UserId(0), ProfileTabSegment::Products, deps),
        api,
        navigator,
    }
}

/// Projector over `api` with the dummy cache.
pub fn harness(api: MockProductApi) -> Harness {
    harness_with_cache(api, Arc::new(DummyProfileCache))
}

/// Next delivered value, failing the test after [`DELIVERY_TIMEOUT`].
pub async fn next_value<T>(updates: &mut Updates<T>) -> T {
    tokio::time::timeout(DELIVERY_TIMEOUT, updates.next())
        .await
        .expect("timed out waiting for a published value")
        .expect("channel closed")
}
