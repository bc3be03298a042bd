//! Product comparison store.

use std::sync::{Arc, RwLock};

use tracing::warn;

use sadok_core::{KeyValueStore, ProductId};

use crate::backend::types::Product;
use crate::notify::Notifier;

/// Maximum number of products that can be compared at once.
pub const MAX_COMPARE_ITEMS: usize = 4;

/// Persistence key for the compare list.
const STORAGE_KEY: &str = "compareItems";

/// Client-resident comparison list.
///
/// Holds full product snapshots (not just IDs) so the compare page works
/// without re-fetching, and survives restarts by serializing the whole list
/// through the key-value port on every mutation. No backend calls are made.
pub struct CompareStore<S> {
    storage: S,
    notifier: Arc<dyn Notifier>,
    items: RwLock<Vec<Product>>,
}

impl<S: KeyValueStore> CompareStore<S> {
    /// Create the store, restoring the persisted list.
    ///
    /// A missing, unreadable, or unparsable persisted value degrades to an
    /// empty list.
    pub fn new(storage: S, notifier: Arc<dyn Notifier>) -> Self {
        let items = match storage.load::<Vec<Product>>(STORAGE_KEY) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to load persisted compare list, starting empty");
                Vec::new()
            }
        };

        Self {
            storage,
            notifier,
            items: RwLock::new(items),
        }
    }

    /// Add a product snapshot to the comparison.
    ///
    /// Rejects duplicates (info notice) and additions beyond
    /// [`MAX_COMPARE_ITEMS`] (warning notice). A product whose category
    /// differs from the first item's draws a non-blocking warning but is
    /// still added.
    pub fn add_to_compare(&self, product: &Product) {
        {
            let mut items = self.write_items();

            if items.iter().any(|item| item.id == product.id) {
                self.notifier.info("Товар вже в списку порівняння");
                return;
            }

            if items.len() >= MAX_COMPARE_ITEMS {
                self.notifier
                    .warning("Можна порівнювати максимум 4 товари");
                return;
            }

            if let Some(first) = items.first()
                && first.category != product.category
            {
                self.notifier
                    .warning("Бажано порівнювати товари однієї категорії");
            }

            items.push(product.clone());
        }

        self.persist();
        self.notifier.success("Додано до порівняння");
    }

    /// Remove a product from the comparison.
    pub fn remove_from_compare(&self, product_id: &ProductId) {
        {
            let mut items = self.write_items();
            items.retain(|item| item.id != *product_id);
        }

        self.persist();
        self.notifier.success("Видалено з порівняння");
    }

    /// Empty the comparison list.
    pub fn clear_compare(&self) {
        {
            let mut items = self.write_items();
            items.clear();
        }

        self.persist();
        self.notifier.success("Список порівняння очищено");
    }

    /// True when the product is in the comparison.
    pub fn is_in_compare(&self, product_id: &ProductId) -> bool {
        self.read_items().iter().any(|item| item.id == *product_id)
    }

    /// Snapshot of the compared products.
    pub fn items(&self) -> Vec<Product> {
        self.read_items().clone()
    }

    /// Number of compared products.
    pub fn compare_count(&self) -> usize {
        self.read_items().len()
    }

    /// Serialize the full list to storage. Best-effort: a failed write is
    /// logged, the in-memory state stays authoritative for this session.
    fn persist(&self) {
        let items = self.read_items().clone();
        if let Err(e) = self.storage.save(STORAGE_KEY, &items) {
            warn!(error = %e, "Failed to persist compare list");
        }
    }

    fn read_items(&self) -> std::sync::RwLockReadGuard<'_, Vec<Product>> {
        self.items
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_items(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Product>> {
        self.items
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sadok_core::MemoryStore;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.notices.lock().unwrap().push(format!("success:{message}"));
        }
        fn error(&self, message: &str) {
            self.notices.lock().unwrap().push(format!("error:{message}"));
        }
        fn warning(&self, message: &str) {
            self.notices.lock().unwrap().push(format!("warning:{message}"));
        }
        fn info(&self, message: &str) {
            self.notices.lock().unwrap().push(format!("info:{message}"));
        }
    }

    fn test_product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            article: format!("ART-{id}"),
            price: Decimal::from(100),
            old_price: None,
            discount: 0,
            image: String::new(),
            category: category.to_owned(),
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
    fn test_duplicate_add_keeps_one_entry() {
        let notifier = Arc::new(RecordingNotifier::default());
        let store = CompareStore::new(MemoryStore::new(), notifier.clone());
        let product = test_product("p1", "Хвойні");

        store.add_to_compare(&product);
        store.add_to_compare(&product);

        assert_eq!(store.compare_count(), 1);
        let notices = notifier.notices.lock().unwrap();
        assert!(notices.iter().any(|n| n.starts_with("info:")));
    }

    #[test]
    fn test_fifth_add_is_rejected() {
        let notifier = Arc::new(RecordingNotifier::default());
        let store = CompareStore::new(MemoryStore::new(), notifier.clone());

        for i in 1..=4 {
            store.add_to_compare(&test_product(&format!("p{i}"), "Хвойні"));
        }
        assert_eq!(store.compare_count(), 4);

        store.add_to_compare(&test_product("p5", "Хвойні"));

        assert_eq!(store.compare_count(), 4);
        assert!(!store.is_in_compare(&ProductId::new("p5")));
        let notices = notifier.notices.lock().unwrap();
        assert!(notices.iter().any(|n| n == "warning:Можна порівнювати максимум 4 товари"));
    }

    #[test]
    fn test_category_mismatch_warns_but_adds() {
        let notifier = Arc::new(RecordingNotifier::default());
        let store = CompareStore::new(MemoryStore::new(), notifier.clone());

        store.add_to_compare(&test_product("p1", "Хвойні"));
        store.add_to_compare(&test_product("p2", "Бонсай"));

        assert_eq!(store.compare_count(), 2);
        let notices = notifier.notices.lock().unwrap();
        assert!(notices.iter().any(|n| n == "warning:Бажано порівнювати товари однієї категорії"));
    }

    #[test]
    fn test_state_survives_reload() {
        let storage = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::default());

        {
            let store = CompareStore::new(storage.clone(), notifier.clone());
            store.add_to_compare(&test_product("p1", "Хвойні"));
            store.add_to_compare(&test_product("p2", "Хвойні"));
        }

        let reloaded = CompareStore::new(storage, notifier);
        assert_eq!(reloaded.compare_count(), 2);
        assert!(reloaded.is_in_compare(&ProductId::new("p1")));
    }

    #[test]
    fn test_corrupt_persisted_state_degrades_to_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.save(STORAGE_KEY, &"not a product list").unwrap();

        let store = CompareStore::new(storage, Arc::new(RecordingNotifier::default()));
        assert_eq!(store.compare_count(), 0);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = CompareStore::new(MemoryStore::new(), Arc::new(RecordingNotifier::default()));

        store.add_to_compare(&test_product("p1", "Хвойні"));
        store.add_to_compare(&test_product("p2", "Хвойні"));

        store.remove_from_compare(&ProductId::new("p1"));
        assert!(!store.is_in_compare(&ProductId::new("p1")));
        assert_eq!(store.compare_count(), 1);

        store.clear_compare();
        assert_eq!(store.compare_count(), 0);
    }
}
