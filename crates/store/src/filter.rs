//! Listing filters and sort orders.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bitelist_location::Normalizer;
use bitelist_model::cuisine::cuisine_names;
use bitelist_model::{NormalizedLocation, Restaurant};
use thiserror::Error;

/// Conjunction of listing filters. Blank fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free text over name, cuisine, must-try and the inferred location
    pub search: String,
    /// Exact cuisine name (case-insensitive)
    pub cuisine: String,
    /// Minimum star count
    pub min_rating: u8,
    /// Substring of the inferred city, state, or `City, State`
    pub location: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    pub fn with_min_rating(mut self, min_rating: u8) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.cuisine.trim().is_empty()
            && self.min_rating == 0
            && self.location.trim().is_empty()
    }

    /// Whether `restaurant` passes every filter.
    pub fn matches(&self, restaurant: &Restaurant, normalizer: &Normalizer) -> bool {
        let location = restaurant
            .location_text()
            .map(|l| normalizer.normalize(l))
            .unwrap_or_default();
        let display = location.display().to_lowercase();
        let names: Vec<String> = cuisine_names(&restaurant.cuisine)
            .into_iter()
            .map(|n| n.to_lowercase())
            .collect();
        let joined = names.join(", ");

        self.matches_search(restaurant, &joined, &display)
            && self.matches_cuisine(&names, &joined)
            && restaurant.rating_count() >= self.min_rating
            && self.matches_location(&location, &display)
    }

    fn matches_search(&self, restaurant: &Restaurant, cuisine: &str, display: &str) -> bool {
        let term = self.search.to_lowercase();
        if term.is_empty() {
            return true;
        }
        restaurant.name.to_lowercase().contains(&term)
            || cuisine.contains(&term)
            || restaurant.must_try.to_lowercase().contains(&term)
            || display.contains(&term)
    }

    fn matches_cuisine(&self, names: &[String], joined: &str) -> bool {
        let wanted = self.cuisine.trim().to_lowercase();
        wanted.is_empty() || joined == wanted || names.iter().any(|n| *n == wanted)
    }

    fn matches_location(&self, location: &NormalizedLocation, display: &str) -> bool {
        let term = self.location.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        location.city.to_lowercase().contains(&term)
            || location.state.to_lowercase().contains(&term)
            || display.contains(&term)
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    RatingDesc,
    RatingAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::RatingDesc,
        SortOrder::RatingAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::RatingDesc => "rating-desc",
            Self::RatingAsc => "rating-asc",
        }
    }

    pub fn compare(self, a: &Restaurant, b: &Restaurant) -> Ordering {
        match self {
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::RatingDesc => b.rating_count().cmp(&a.rating_count()),
            Self::RatingAsc => a.rating_count().cmp(&b.rating_count()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort order {0:?} (expected name-asc, name-desc, rating-desc or rating-asc)")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseSortOrderError(s.to_string()))
    }
}

/// Case-insensitive name order; on a case-only tie lowercase sorts first.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Filter then sort. The sort is stable, so equal keys keep list order.
pub fn select<'a>(
    records: &'a [Restaurant],
    criteria: &FilterCriteria,
    order: SortOrder,
    normalizer: &Normalizer,
) -> Vec<&'a Restaurant> {
    let mut selected: Vec<&Restaurant> = records
        .iter()
        .filter(|r| criteria.matches(r, normalizer))
        .collect();
    selected.sort_by(|a, b| order.compare(a, b));
    selected
}
