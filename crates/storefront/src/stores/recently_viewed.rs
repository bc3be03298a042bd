//! Recently-viewed product history.

use std::sync::RwLock;

use tracing::warn;

use sadok_core::{KeyValueStore, ProductId};

use crate::backend::types::Product;

/// Maximum number of products kept in the history.
pub const MAX_RECENTLY_VIEWED: usize = 10;

/// How many history entries a product page shows.
const DISPLAY_LIMIT: usize = 4;

/// Persistence key for the history.
const STORAGE_KEY: &str = "recentlyViewed";

/// Client-resident view history, most recent first.
///
/// Viewing a product moves its snapshot to the front (deduplicated by ID)
/// and trims the list to [`MAX_RECENTLY_VIEWED`]; every mutation is
/// serialized through the key-value port, like the compare list.
pub struct RecentlyViewedStore<S> {
    storage: S,
    items: RwLock<Vec<Product>>,
}

impl<S: KeyValueStore> RecentlyViewedStore<S> {
    /// Create the store, restoring the persisted history. A missing or
    /// unparsable value degrades to an empty history.
    pub fn new(storage: S) -> Self {
        let items = match storage.load::<Vec<Product>>(STORAGE_KEY) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to load view history, starting empty");
                Vec::new()
            }
        };

        Self {
            storage,
            items: RwLock::new(items),
        }
    }

    /// Record a product view: move-to-front, deduplicated, trimmed.
    pub fn record_view(&self, product: &Product) {
        {
            let mut items = self
                .items
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            items.retain(|item| item.id != product.id);
            items.insert(0, product.clone());
            items.truncate(MAX_RECENTLY_VIEWED);
        }

        let items = self
            .items
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        if let Err(e) = self.storage.save(STORAGE_KEY, &items) {
            warn!(error = %e, "Failed to persist view history");
        }
    }

    /// The history to show on a product page: up to four entries, excluding
    /// the product currently on screen.
    pub fn recent(&self, exclude: Option<&ProductId>) -> Vec<Product> {
        self.items
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|item| exclude.is_none_or(|id| item.id != *id))
            .take(DISPLAY_LIMIT)
            .cloned()
            .collect()
    }

    /// Full history, most recent first.
    pub fn items(&self) -> Vec<Product> {
        self.items
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sadok_core::MemoryStore;

    fn test_product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            article: format!("ART-{id}"),
            price: Decimal::from(100),
            old_price: None,
            discount: 0,
            image: String::new(),
            category: "Хвойні".to_owned(),
            badges: vec![],
            description: String::new(),
            stock: 10,
            created_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_repeat_view_moves_to_front() {
        let store = RecentlyViewedStore::new(MemoryStore::new());

        store.record_view(&test_product("p1"));
        store.record_view(&test_product("p2"));
        store.record_view(&test_product("p1"));

        let items = store.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "p1");
        assert_eq!(items[1].id.as_str(), "p2");
    }

    #[test]
    fn test_history_is_capped() {
        let store = RecentlyViewedStore::new(MemoryStore::new());

        for i in 0..15 {
            store.record_view(&test_product(&format!("p{i}")));
        }

        let items = store.items();
        assert_eq!(items.len(), MAX_RECENTLY_VIEWED);
        assert_eq!(items[0].id.as_str(), "p14");
    }

    #[test]
    fn test_recent_excludes_current_product() {
        let store = RecentlyViewedStore::new(MemoryStore::new());

        for i in 1..=6 {
            store.record_view(&test_product(&format!("p{i}")));
        }

        let current = ProductId::new("p6");
        let shown = store.recent(Some(&current));

        assert_eq!(shown.len(), 4);
        assert!(shown.iter().all(|item| item.id != current));
        assert_eq!(shown[0].id.as_str(), "p5");
    }

    #[test]
    fn test_history_survives_reload() {
        let storage = std::sync::Arc::new(MemoryStore::new());

        {
            let store = RecentlyViewedStore::new(storage.clone());
            store.record_view(&test_product("p1"));
        }

        let reloaded = RecentlyViewedStore::new(storage);
        assert_eq!(reloaded.items().len(), 1);
    }
}
