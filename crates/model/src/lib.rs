//! Core domain model for the Bite List restaurant directory.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `Restaurant`: A directory entry, as persisted
//! - `RestaurantFields`: A record body without its id (add/update payload)
//! - `NormalizedLocation`: The inferred `City, State` pair for a location string
//! - Rating helpers for the star-glyph representation

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cuisine;

/// The glyph a rating is made of. A rating of `k` is `k` repeated glyphs.
pub const RATING_GLYPH: char = '⭐';

/// Highest rating a restaurant can carry.
pub const MAX_RATING: u8 = 5;

/// Ids above this value belong to user-added records; the rest are seed data.
pub const USER_ID_THRESHOLD: u64 = 1000;

/// A restaurant entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Record id (seed records are small, user records are creation timestamps)
    pub id: u64,

    /// Display name
    pub name: String,

    /// Cuisine label, possibly several comma-separated `Name Emoji` pairs
    #[serde(default)]
    pub cuisine: String,

    /// Must-try dishes (free text)
    #[serde(default)]
    pub must_try: String,

    /// Free-form location text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Absolute URL overriding the generated map link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Rating as repeated star glyphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

impl Restaurant {
    /// Create a minimal record for testing.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cuisine: String::new(),
            must_try: String::new(),
            location: None,
            link: None,
            rating: None,
        }
    }

    /// Build a record from an id and a field set.
    pub fn from_fields(id: u64, fields: RestaurantFields) -> Self {
        Self {
            id,
            name: fields.name,
            cuisine: fields.cuisine,
            must_try: fields.must_try,
            location: fields.location,
            link: fields.link,
            rating: fields.rating,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    pub fn with_rating(mut self, stars: u8) -> Self {
        self.rating = rating_stars(stars);
        self
    }

    /// Whether this record was added by a user (as opposed to seed data).
    pub fn is_user_record(&self) -> bool {
        self.id > USER_ID_THRESHOLD
    }

    /// Numeric rating (0 when absent).
    pub fn rating_count(&self) -> u8 {
        rating_count(self.rating.as_deref())
    }

    /// The location text, treating blank strings as absent.
    pub fn location_text(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// The explicit link, treating blank strings as absent.
    pub fn explicit_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// Record body without an id; the payload of add and update operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantFields {
    pub name: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub must_try: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

impl From<Restaurant> for RestaurantFields {
    fn from(r: Restaurant) -> Self {
        Self {
            name: r.name,
            cuisine: r.cuisine,
            must_try: r.must_try,
            location: r.location,
            link: r.link,
            rating: r.rating,
        }
    }
}

/// Count the star glyphs in a rating string (0 when absent).
pub fn rating_count(rating: Option<&str>) -> u8 {
    rating
        .map(|r| r.chars().filter(|c| *c == RATING_GLYPH).count())
        .map(|n| n.min(MAX_RATING as usize) as u8)
        .unwrap_or(0)
}

/// Render a numeric rating as star glyphs. Zero renders as no rating.
pub fn rating_stars(stars: u8) -> Option<String> {
    let stars = stars.min(MAX_RATING);
    if stars == 0 {
        return None;
    }
    Some(std::iter::repeat(RATING_GLYPH).take(stars as usize).collect())
}

/// An inferred `City, State` pair. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedLocation {
    pub city: String,
    pub state: String,
}

impl NormalizedLocation {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }

    /// A location that only names a state.
    pub fn state_only(state: impl Into<String>) -> Self {
        Self::new(String::new(), state)
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_empty() && self.state.is_empty()
    }

    pub fn has_city(&self) -> bool {
        !self.city.is_empty()
    }

    pub fn has_state(&self) -> bool {
        !self.state.is_empty()
    }

    /// `City, State`, `State`, `City`, or an empty string.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NormalizedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.has_city(), self.has_state()) {
            (true, true) => write!(f, "{}, {}", self.city, self.state),
            (true, false) => f.write_str(&self.city),
            (false, true) => f.write_str(&self.state),
            (false, false) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rating_count() {
        for k in 0..=5u8 {
            let stars = "⭐".repeat(k as usize);
            assert_eq!(rating_count(Some(&stars)), k);
        }
        assert_eq!(rating_count(None), 0);
        assert_eq!(rating_count(Some("great")), 0);
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating_stars(3).as_deref(), Some("⭐⭐⭐"));
        assert_eq!(rating_stars(0), None);
        assert_eq!(rating_stars(9).as_deref(), Some("⭐⭐⭐⭐⭐"));
    }

    #[test]
    fn test_record_serialization() {
        let record = Restaurant::new(1_700_000_000_000, "Elmina")
            .with_cuisine("Ghanaian 🍲")
            .with_rating(3);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"mustTry\""));
        assert!(!json.contains("\"link\""));

        let parsed: Restaurant = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.is_user_record());
    }

    #[test]
    fn test_record_tolerates_missing_optional_fields() {
        let parsed: Restaurant =
            serde_json::from_str(r#"{"id": 7, "name": "Jodhpur"}"#).unwrap();
        assert_eq!(parsed.cuisine, "");
        assert_eq!(parsed.location, None);
        assert!(!parsed.is_user_record());
    }

    #[test]
    fn test_location_display() {
        assert_eq!(NormalizedLocation::new("Reston", "Virginia").display(), "Reston, Virginia");
        assert_eq!(NormalizedLocation::state_only("Maryland").display(), "Maryland");
        assert_eq!(NormalizedLocation::new("Elmina", "").display(), "Elmina");
        assert_eq!(NormalizedLocation::default().display(), "");
    }

    #[test]
    fn test_blank_link_is_absent() {
        let mut record = Restaurant::new(1, "Toosso");
        record.link = Some("   ".into());
        assert_eq!(record.explicit_link(), None);
    }
}
