use serde::{Deserialize, Serialize};

/// Tab selected in the profile's segmented control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTabSegment {
    #[default]
    Products,
    AdsAndTags,
    Followers,
    Following,
}

impl ProfileTabSegment {
    /// Segments in control order; the position is the segment index.
    pub const ALL: [ProfileTabSegment; 4] = [
        ProfileTabSegment::Products,
        ProfileTabSegment::AdsAndTags,
        ProfileTabSegment::Followers,
        ProfileTabSegment::Following,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            ProfileTabSegment::Products => 0,
            ProfileTabSegment::AdsAndTags => 1,
            ProfileTabSegment::Followers => 2,
            ProfileTabSegment::Following => 3,
        }
    }
}

impl std::fmt::Display for ProfileTabSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProfileTabSegment::Products => "products",
            ProfileTabSegment::AdsAndTags => "ads_and_tags",
            ProfileTabSegment::Followers => "followers",
            ProfileTabSegment::Following => "following",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_mapping_is_fixed() {
        assert_eq!(ProfileTabSegment::from_index(0), Some(ProfileTabSegment::Products));
        assert_eq!(ProfileTabSegment::from_index(1), Some(ProfileTabSegment::AdsAndTags));
        assert_eq!(ProfileTabSegment::from_index(2), Some(ProfileTabSegment::Followers));
        assert_eq!(ProfileTabSegment::from_index(3), Some(ProfileTabSegment::Following));
        assert_eq!(ProfileTabSegment::from_index(4), None);
    }

    #[test]
    fn index_round_trips() {
        for segment in ProfileTabSegment::ALL {
            assert_eq!(ProfileTabSegment::from_index(segment.index()), Some(segment));
        }
    }

    #[test]
    fn products_is_default() {
        assert_eq!(ProfileTabSegment::default(), ProfileTabSegment::Products);
    }
}
