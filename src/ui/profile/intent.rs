use crate::model::{ListingSection, ProfileTabSegment, UserProfile};
use crate::ui::mvi::Intent;

/// Output channels an intent can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelGroup {
    /// username, display name, counts, location
    Profile,
    Sections,
    Segment,
}

#[derive(Debug, Clone)]
pub enum ProfileIntent {
    /// Profile fetch succeeded.
    UserLoaded(UserProfile),
    /// Profile fetch failed; the cached snapshot replaces the current one.
    UserRestored(UserProfile),
    SegmentSelected(ProfileTabSegment),
    /// Listing fetch for `segment` succeeded. Ignored if `segment` is no
    /// longer selected.
    ListingsLoaded {
        segment: ProfileTabSegment,
        sections: Vec<ListingSection>,
    },
    SearchChanged(String),
}

impl Intent for ProfileIntent {}

impl ProfileIntent {
    pub fn channels(&self) -> ChannelGroup {
        match self {
            ProfileIntent::UserLoaded(_) | ProfileIntent::UserRestored(_) => ChannelGroup::Profile,
            ProfileIntent::SegmentSelected(_) => ChannelGroup::Segment,
            ProfileIntent::ListingsLoaded { .. } | ProfileIntent::SearchChanged(_) => {
                ChannelGroup::Sections
            }
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ProfileIntent::UserLoaded(_) => "user_loaded",
            ProfileIntent::UserRestored(_) => "user_restored",
            ProfileIntent::SegmentSelected(_) => "segment_selected",
            ProfileIntent::ListingsLoaded { .. } => "listings_loaded",
            ProfileIntent::SearchChanged(_) => "search_changed",
        }
    }
}
