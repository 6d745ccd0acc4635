use chrono::NaiveDate;

/// A fighter profile, keyed by profile-page URL.
///
/// Resolved once per unique URL for the lifetime of a run and shared
/// through the fighter cache. A profile whose name could not be parsed is
/// still handed to callers but never admitted into the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    /// Profile-page URL; the stable cache key.
    pub link: String,
    pub name: Option<String>,
    pub height_in: Option<u32>,
    pub reach_in: Option<u32>,
    pub dob: Option<NaiveDate>,
}

impl Fighter {
    /// An unresolved profile: identity only, every attribute unknown.
    pub fn unresolved(link: &str) -> Self {
        Self {
            link: link.to_string(),
            name: None,
            height_in: None,
            reach_in: None,
            dob: None,
        }
    }
}
