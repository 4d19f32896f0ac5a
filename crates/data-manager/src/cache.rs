//! Per-polygon statistics cache
//!
//! The cache belongs to the polygon, not to the widget: every holder of the
//! same polygon sees every write. Entries are never evicted or invalidated.

use ndi_gauge_shared::IndexId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Get/set capability over a polygon's index statistics
///
/// Writes go through `&self`; implementations provide their own interior
/// mutability so the cache can be shared by reference.
pub trait StatsCache {
    fn get(&self, index: &IndexId) -> Option<f64>;

    fn set(&self, index: &IndexId, value: f64);

    fn contains(&self, index: &IndexId) -> bool {
        self.get(index).is_some()
    }
}

/// Thread-safe shared statistics map
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct StatsStore {
    inner: Arc<RwLock<HashMap<IndexId, f64>>>,
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (IndexId, f64)>,
    {
        Self {
            inner: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn snapshot(&self) -> HashMap<IndexId, f64> {
        self.inner.read().clone()
    }
}

impl StatsCache for StatsStore {
    fn get(&self, index: &IndexId) -> Option<f64> {
        self.inner.read().get(index).copied()
    }

    fn set(&self, index: &IndexId, value: f64) {
        self.inner.write().insert(index.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let store = StatsStore::new();
        let other_holder = store.clone();

        store.set(&IndexId::ndvi(), 0.4);

        assert_eq!(other_holder.get(&IndexId::ndvi()), Some(0.4));
        assert_eq!(other_holder.len(), 1);
    }

    #[test]
    fn test_zero_is_a_cached_value() {
        let store = StatsStore::with_entries([(IndexId::ndwi(), 0.0)]);

        assert!(store.contains(&IndexId::ndwi()));
        assert!(!store.contains(&IndexId::ndvi()));
    }

    #[test]
    fn test_overwrite_keeps_latest() {
        let store = StatsStore::new();
        store.set(&IndexId::ndvi(), 0.1);
        store.set(&IndexId::ndvi(), -0.3);

        assert_eq!(store.snapshot()[&IndexId::ndvi()], -0.3);
    }
}
