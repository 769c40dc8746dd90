//! The restaurant list: seed records plus user additions.
//!
//! User records (ids above [`USER_ID_THRESHOLD`]) are persisted as a JSON
//! array under one storage key after every change. Seed records are always
//! loaded from the built-in list; changes to them last for the session only.

pub mod draft;
pub mod filter;
pub mod seed;

use std::time::{SystemTime, UNIX_EPOCH};

use bitelist_backend::{BackendError, StorageBackend};
use bitelist_location::Normalizer;
use bitelist_model::cuisine::{unique_cuisines, CuisineEntry};
use bitelist_model::{Restaurant, RestaurantFields, USER_ID_THRESHOLD};
use thiserror::Error;

pub use draft::{missing_fields, RestaurantDraft};
pub use filter::{select, FilterCriteria, ParseSortOrderError, SortOrder};
pub use seed::seed_restaurants;

/// Storage key holding the user records.
pub const DEFAULT_STORAGE_KEY: &str = "userRestaurants";

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Please fill in all required fields ({})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Cannot delete the last restaurant. At least one restaurant must remain.")]
    LastRecord,

    #[error("No restaurant with id {0}")]
    NotFound(u64),

    #[error("Storage error: {0}")]
    Backend(#[from] BackendError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of a confirmed-or-not deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Restaurant),
    Cancelled,
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend key for the user records
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// In-memory restaurant list backed by a key-value store.
#[derive(Debug)]
pub struct RestaurantStore<B: StorageBackend> {
    backend: B,
    config: StoreConfig,
    records: Vec<Restaurant>,
}

impl<B: StorageBackend> RestaurantStore<B> {
    /// Seed records followed by whatever user records the backend holds.
    ///
    /// Unparseable saved data is logged and ignored; backend failures are
    /// returned.
    pub fn load(backend: B, config: StoreConfig) -> Result<Self, StoreError> {
        let mut records = seed_restaurants();

        if let Some(saved) = backend.get(&config.storage_key)? {
            match serde_json::from_str::<Vec<Restaurant>>(&saved) {
                Ok(user) => {
                    let total = user.len();
                    let before = records.len();
                    records.extend(user.into_iter().filter(Restaurant::is_user_record));
                    let dropped = total - (records.len() - before);
                    if dropped > 0 {
                        tracing::warn!(dropped, "Ignoring saved records with seed-range ids");
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        key = %config.storage_key,
                        backend = backend.name(),
                        error = %e,
                        "Saved restaurants are malformed, using seed data"
                    );
                }
            }
        }

        tracing::debug!(records = records.len(), backend = backend.name(), "Loaded restaurants");
        Ok(Self {
            backend,
            config,
            records,
        })
    }

    pub fn records(&self) -> &[Restaurant] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Restaurant> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Distinct cuisines across all records, for the filter list.
    pub fn cuisines(&self) -> Vec<CuisineEntry> {
        unique_cuisines(self.records.iter().map(|r| r.cuisine.as_str()))
    }

    /// Filtered and sorted view.
    pub fn select(
        &self,
        criteria: &FilterCriteria,
        order: SortOrder,
        normalizer: &Normalizer,
    ) -> Vec<&Restaurant> {
        select(&self.records, criteria, order, normalizer)
    }

    /// Append a new user record and persist. Returns its id.
    pub fn add(&mut self, fields: RestaurantFields) -> Result<u64, StoreError> {
        validate_fields(&fields)?;

        let id = self.next_id(now_millis());
        self.records.push(Restaurant::from_fields(id, fields));
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        tracing::info!(id, "Added restaurant");
        Ok(id)
    }

    /// Replace the fields of an existing record and persist.
    pub fn update(&mut self, id: u64, fields: RestaurantFields) -> Result<&Restaurant, StoreError> {
        validate_fields(&fields)?;

        let index = self.index_of(id)?;
        let previous =
            std::mem::replace(&mut self.records[index], Restaurant::from_fields(id, fields));
        if let Err(e) = self.persist() {
            self.records[index] = previous;
            return Err(e);
        }

        tracing::info!(id, "Updated restaurant");
        Ok(&self.records[index])
    }

    /// Remove a record once `confirm` agrees.
    ///
    /// Like `add` and `update`, a failed write leaves the list unchanged.
    ///
    /// The last remaining record can never be removed.
    pub fn delete(
        &mut self,
        id: u64,
        confirm: impl FnOnce(&Restaurant) -> bool,
    ) -> Result<DeleteOutcome, StoreError> {
        let index = self.index_of(id)?;
        if self.records.len() <= 1 {
            return Err(StoreError::LastRecord);
        }
        if !confirm(&self.records[index]) {
            tracing::debug!(id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let removed = self.records.remove(index);
        if let Err(e) = self.persist() {
            self.records.insert(index, removed);
            return Err(e);
        }

        tracing::info!(id, "Deleted restaurant");
        Ok(DeleteOutcome::Deleted(removed))
    }

    fn index_of(&self, id: u64) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Creation timestamp, bumped past every existing id and the seed range.
    fn next_id(&self, now: u64) -> u64 {
        let floor = self
            .records
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .max(USER_ID_THRESHOLD)
            + 1;
        now.max(floor)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let user: Vec<&Restaurant> = self.records.iter().filter(|r| r.is_user_record()).collect();
        let key = &self.config.storage_key;

        if user.is_empty() {
            self.backend.remove(key)?;
        } else {
            let json = serde_json::to_string(&user)?;
            self.backend.set(key, &json)?;
        }

        tracing::debug!(user_records = user.len(), backend = self.backend.name(), "Persisted restaurants");
        Ok(())
    }
}

fn validate_fields(fields: &RestaurantFields) -> Result<(), StoreError> {
    let missing = missing_fields(&fields.name, &fields.cuisine, &fields.must_try);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StoreError::MissingFields(missing))
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
