//! Values published to the profile screen, derived from [`ProfileState`].

use serde::Serialize;

use crate::model::{ListingSection, ProfileTabSegment};
use crate::ui::profile::state::{ProfileOrigin, ProfileState};

/// Projection of the state onto the screen's display fields.
///
/// Every field is a pure function of the state; nothing here is mutated
/// on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    /// `"@" + user_name`, empty before the first profile arrives.
    pub username: String,
    pub display_name: String,
    pub follower_count: String,
    pub following_count: String,
    pub location: String,
    pub from_cache: bool,
    pub selected_segment: ProfileTabSegment,
    /// Sections after the search filter.
    pub sections: Vec<ListingSection>,
}

impl ProfileView {
    pub fn project(state: &ProfileState) -> Self {
        let (username, display_name, follower_count, following_count, location) =
            match &state.user {
                Some(user) => (
                    user.handle(),
                    user.name.clone(),
                    user.followers_count.to_string(),
                    user.following_count.to_string(),
                    user.location(),
                ),
                None => Default::default(),
            };

        Self {
            username,
            display_name,
            follower_count,
            following_count,
            location,
            from_cache: state.origin == ProfileOrigin::Cached,
            selected_segment: state.segment,
            sections: state.filtered_sections(),
        }
    }
}
