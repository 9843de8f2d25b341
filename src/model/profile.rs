use serde::{Deserialize, Serialize};

/// Identity of a marketplace user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a user's profile as returned by the profile data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    /// Display name (e.g., "Ali").
    pub name: String,
    /// Avatar reference. Empty when the user has none.
    #[serde(default)]
    pub image: String,
    /// Handle without the leading "@".
    pub user_name: String,
    pub following_count: u64,
    pub followers_count: u64,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub city_name: String,
}

impl UserProfile {
    /// Handle as shown on screen: `"@" + user_name`.
    pub fn handle(&self) -> String {
        format!("@{}", self.user_name)
    }

    /// "City, Country", skipping whichever part is blank.
    pub fn location(&self) -> String {
        [self.city_name.trim(), self.country_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Compact user row shown in the Followers / Following lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub user_name: String,
    #[serde(default)]
    pub image: String,
}
