//! Restaurant context
//!
//! The active restaurant is an explicit, observable value rather than a
//! process-wide global. Views subscribe to a [`RestaurantContext`] and
//! re-resolve their identifier every time it changes.
//!
//! Resolution order:
//!
//! 1. the context value, if set
//! 2. the persisted fallback from an [`IdentifierStore`]
//! 3. none: views render their empty state and issue no request

mod store;

pub use store::{FileStore, IdentifierStore, MemoryStore, StoreError, StoreResult, STORE_KEY};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Identifier of a restaurant, always trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RestaurantId(String);

impl RestaurantId {
    /// Build an identifier; blank input yields `None`
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RestaurantId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RestaurantId::new(&value).ok_or_else(|| "restaurant id must not be blank".to_string())
    }
}

impl From<RestaurantId> for String {
    fn from(id: RestaurantId) -> Self {
        id.0
    }
}

/// Shared, observable "current restaurant"
///
/// Cloning is cheap; all clones observe the same value.
#[derive(Clone)]
pub struct RestaurantContext {
    tx: Arc<watch::Sender<Option<RestaurantId>>>,
}

impl RestaurantContext {
    pub fn new(initial: Option<RestaurantId>) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the active restaurant. Subscribers are only woken when the
    /// value actually changes.
    pub fn set(&self, id: Option<RestaurantId>) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == id {
                false
            } else {
                *current = id.clone();
                true
            }
        });

        if changed {
            match &id {
                Some(id) => tracing::info!(restaurant_id = %id, "active restaurant changed"),
                None => tracing::info!("active restaurant cleared"),
            }
        }
    }

    pub fn current(&self) -> Option<RestaurantId> {
        self.tx.borrow().clone()
    }

    /// Receiver that is notified on every change
    pub fn subscribe(&self) -> watch::Receiver<Option<RestaurantId>> {
        self.tx.subscribe()
    }
}

impl Default for RestaurantContext {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Resolve the effective identifier
///
/// A store that fails to load is treated as empty; the failure is logged.
pub fn resolve_identifier(
    explicit: Option<&RestaurantId>,
    store: &dyn IdentifierStore,
) -> Option<RestaurantId> {
    if let Some(id) = explicit {
        return Some(id.clone());
    }

    match store.load() {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Failed to read persisted restaurant id: {}", e);
            None
        }
    }
}

/// [`resolve_identifier`] for async callers
///
/// The store is only consulted when there is no explicit identifier, and
/// then on the blocking pool since a store may touch the filesystem.
pub async fn resolve_identifier_async(
    explicit: Option<RestaurantId>,
    store: Arc<dyn IdentifierStore>,
) -> Option<RestaurantId> {
    if explicit.is_some() {
        return explicit;
    }

    match tokio::task::spawn_blocking(move || resolve_identifier(None, store.as_ref())).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Persisted restaurant id lookup failed: {}", e);
            None
        }
    }
}
