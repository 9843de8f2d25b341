//! Listing items and the sections they are grouped into.

use serde::{Deserialize, Serialize};

use super::profile::UserSummary;

/// A product offered by the profile's owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
    pub currency: String,
    /// Discount in percent (0 means no offer).
    #[serde(default)]
    pub offer: f64,
    /// Unix timestamp (seconds) when the listing ends. 0 means open-ended.
    #[serde(default)]
    pub end_date: i64,
}

impl Product {
    /// Price after applying `offer`, clamped to the 0..=100 percent range.
    pub fn discounted_price(&self) -> f64 {
        let offer = self.offer.clamp(0.0, 100.0);
        self.price * (100.0 - offer) / 100.0
    }

    pub fn is_expired_at(&self, now_unix: i64) -> bool {
        self.end_date > 0 && self.end_date <= now_unix
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdvertisementList {
    pub advertisements: Vec<Advertisement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagList {
    pub tags: Vec<Tag>,
}

/// One row of a listing section, discriminated by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingItem {
    Product(Product),
    Advertisement(Advertisement),
    Tag(Tag),
    User(UserSummary),
}

impl ListingItem {
    /// Text the search filter matches against.
    ///
    /// Advertisements carry no name and are never filtered out.
    pub fn search_key(&self) -> Option<&str> {
        match self {
            ListingItem::Product(product) => Some(&product.name),
            ListingItem::Tag(tag) => Some(&tag.name),
            ListingItem::User(user) => Some(&user.name),
            ListingItem::Advertisement(_) => None,
        }
    }

    pub fn as_product(&self) -> Option<&Product> {
        match self {
            ListingItem::Product(product) => Some(product),
            _ => None,
        }
    }

    /// Case-insensitive substring match. `needle` must already be lowercase.
    fn matches_lowercase(&self, needle: &str) -> bool {
        match self.search_key() {
            Some(key) => key.to_lowercase().contains(needle),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Products,
    Advertisements,
    Tags,
    Followers,
    Following,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Products => "Products",
            SectionKind::Advertisements => "Advertisements",
            SectionKind::Tags => "Tags",
            SectionKind::Followers => "Followers",
            SectionKind::Following => "Following",
        }
    }
}

/// A named group of listing items, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSection {
    pub title: String,
    pub kind: SectionKind,
    pub items: Vec<ListingItem>,
}

impl ListingSection {
    pub fn new(kind: SectionKind, items: Vec<ListingItem>) -> Self {
        Self {
            title: kind.title().to_string(),
            kind,
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of this section keeping only items whose name contains `query`.
    ///
    /// Blank queries keep every item.
    pub fn filtered(&self, query: &str) -> ListingSection {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        ListingSection {
            title: self.title.clone(),
            kind: self.kind,
            items: self
                .items
                .iter()
                .filter(|item| item.matches_lowercase(&needle))
                .cloned()
                .collect(),
        }
    }
}
