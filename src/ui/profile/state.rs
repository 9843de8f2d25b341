use crate::model::{ListingSection, ProfileTabSegment, UserProfile};
use crate::ui::mvi::UiState;

/// Where the current profile snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileOrigin {
    /// Nothing loaded yet.
    #[default]
    Empty,
    Fetched,
    /// The fetch failed and the cached snapshot was substituted.
    Cached,
}

/// Everything the profile screen knows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    pub user: Option<UserProfile>,
    pub origin: ProfileOrigin,
    pub segment: ProfileTabSegment,
    /// Last fetched sections, before the search filter is applied.
    pub sections: Vec<ListingSection>,
    pub search_text: String,
}

impl UiState for ProfileState {}

impl ProfileState {
    pub fn new(segment: ProfileTabSegment) -> Self {
        Self {
            segment,
            ..Self::default()
        }
    }

    /// Sections with the current search text applied.
    pub fn filtered_sections(&self) -> Vec<ListingSection> {
        self.sections
            .iter()
            .map(|section| section.filtered(&self.search_text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListingItem, SectionKind, Tag};

    #[test]
    fn new_starts_empty_on_given_segment() {
        let state = ProfileState::new(ProfileTabSegment::Followers);
        assert_eq!(state.segment, ProfileTabSegment::Followers);
        assert!(state.user.is_none());
        assert_eq!(state.origin, ProfileOrigin::Empty);
        assert!(state.sections.is_empty());
    }

    #[test]
    fn filtered_sections_keep_section_order() {
        let state = ProfileState {
            sections: vec![
                ListingSection::new(
                    SectionKind::Tags,
                    vec![ListingItem::Tag(Tag {
                        id: 1,
                        name: "laptops".to_string(),
                    })],
                ),
                ListingSection::new(SectionKind::Products, Vec::new()),
            ],
            search_text: "phone".to_string(),
            ..ProfileState::default()
        };
        let filtered = state.filtered_sections();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].kind, SectionKind::Tags);
        assert!(filtered[0].is_empty());
    }
}
