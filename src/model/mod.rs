//! Data model of the profile screen.

mod listing;
mod profile;
mod segment;

pub use listing::{
    Advertisement, AdvertisementList, ListingItem, ListingSection, Product, SectionKind, Tag,
    TagList,
};
pub use profile::{UserId, UserProfile, UserSummary};
pub use segment::ProfileTabSegment;
