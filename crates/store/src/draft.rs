//! Add/edit form payloads.

use bitelist_location::Normalizer;
use bitelist_model::cuisine::{cuisine_display_name, cuisine_label};
use bitelist_model::{rating_stars, Restaurant, RestaurantFields, MAX_RATING};
use bitelist_query::{GoogleMaps, MapProvider};

use crate::StoreError;

/// Names of required fields that are blank, in form order.
pub fn missing_fields(name: &str, cuisine: &str, must_try: &str) -> Vec<&'static str> {
    [("Name", name), ("Cuisine", cuisine), ("Must Try", must_try)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
}

/// What the user typed into the add/edit form.
///
/// `cuisine` is the bare name (no emoji); city and state are separate
/// fields that get folded into the record's location text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantDraft {
    pub name: String,
    pub cuisine: String,
    pub must_try: String,
    pub city: String,
    pub state: String,
    pub link: String,
    /// Star count, 0 for unrated
    pub rating: u8,
}

impl RestaurantDraft {
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        must_try: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cuisine: cuisine.into(),
            must_try: must_try.into(),
            ..Self::default()
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating.min(MAX_RATING);
        self
    }

    /// Prefill the form from an existing record.
    pub fn from_restaurant(restaurant: &Restaurant, normalizer: &Normalizer) -> Self {
        let location = restaurant
            .location_text()
            .map(|l| normalizer.normalize(l))
            .unwrap_or_default();

        Self {
            name: restaurant.name.clone(),
            cuisine: cuisine_display_name(&restaurant.cuisine),
            must_try: restaurant.must_try.clone(),
            city: location.city,
            state: location.state,
            link: restaurant.link.clone().unwrap_or_default(),
            rating: restaurant.rating_count(),
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let missing = missing_fields(&self.name, &self.cuisine, &self.must_try);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::MissingFields(missing))
        }
    }

    /// Validate and build the stored field set.
    pub fn into_fields(self) -> Result<RestaurantFields, StoreError> {
        self.validate()?;

        let name = self.name.trim();
        let city = self.city.trim();
        let state = self.state.trim();

        let location = match (city.is_empty(), state.is_empty()) {
            (false, false) => Some(format!("{}, {}", city, state)),
            (true, false) => Some(state.to_string()),
            _ => None,
        };

        let link = match self.link.trim() {
            "" => {
                let query: Vec<&str> = [name, city, state]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect();
                GoogleMaps.search_url(&query.join(", "))
            }
            link => link.to_string(),
        };

        Ok(RestaurantFields {
            name: name.to_string(),
            cuisine: cuisine_label(&self.cuisine),
            must_try: self.must_try.trim().to_string(),
            location,
            link: Some(link),
            rating: rating_stars(self.rating),
        })
    }
}
