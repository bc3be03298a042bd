//! Wishlist store.

use std::future::Future;
use std::sync::{Arc, RwLock};

use tracing::warn;

use sadok_core::{ProductId, UserId, WishlistItemId};

use crate::backend::ApiError;
use crate::backend::types::WishlistItem;
use crate::notify::Notifier;

/// Backend operations the wishlist store depends on.
pub trait WishlistApi: Send + Sync {
    /// Load the wishlist records for a user.
    fn fetch(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<Vec<WishlistItem>, ApiError>> + Send;

    /// Create a membership record.
    fn add(
        &self,
        product_id: &ProductId,
        user: &UserId,
    ) -> impl Future<Output = Result<WishlistItem, ApiError>> + Send;

    /// Delete a membership record by its own ID.
    fn remove(
        &self,
        item_id: &WishlistItemId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Client-side wishlist state.
///
/// Mirrors the cart store's read-through-refresh pattern. Membership lookups
/// ([`is_in_wishlist`](Self::is_in_wishlist),
/// [`get_wishlist_item`](Self::get_wishlist_item)) are pure reads over the
/// cached list, so a UI can render heart-icon state synchronously.
pub struct WishlistStore<B> {
    api: B,
    notifier: Arc<dyn Notifier>,
    user: UserId,
    items: RwLock<Vec<WishlistItem>>,
}

impl<B: WishlistApi> WishlistStore<B> {
    /// Create a wishlist store for the guest user.
    pub fn new(api: B, notifier: Arc<dyn Notifier>) -> Self {
        Self::for_user(api, notifier, UserId::guest())
    }

    /// Create a wishlist store for a specific user.
    pub fn for_user(api: B, notifier: Arc<dyn Notifier>, user: UserId) -> Self {
        Self {
            api,
            notifier,
            user,
            items: RwLock::new(Vec::new()),
        }
    }

    /// Load the authoritative record list. A failed fetch keeps the current
    /// list.
    pub async fn fetch_wishlist(&self) {
        match self.api.fetch(&self.user).await {
            Ok(items) => {
                let mut guard = self
                    .items
                    .write()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                *guard = items;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch wishlist");
            }
        }
    }

    /// True when a membership record for the product is cached.
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.read_items()
            .iter()
            .any(|item| item.product_id == *product_id)
    }

    /// The cached membership record for a product, when present.
    pub fn get_wishlist_item(&self, product_id: &ProductId) -> Option<WishlistItem> {
        self.read_items()
            .iter()
            .find(|item| item.product_id == *product_id)
            .cloned()
    }

    /// Add a product, then re-fetch.
    pub async fn add_to_wishlist(&self, product_id: &ProductId) {
        match self.api.add(product_id, &self.user).await {
            Ok(_) => {
                self.fetch_wishlist().await;
                self.notifier.success("Додано до списку бажань");
            }
            Err(e) => {
                warn!(error = %e, product_id = %product_id, "Failed to add to wishlist");
                self.notifier.error("Помилка додавання до списку бажань");
            }
        }
    }

    /// Remove a product: the membership record is looked up by product ID in
    /// the cached list first, then deleted by its own ID, then the list is
    /// re-fetched. A product without a cached record is a no-op.
    pub async fn remove_from_wishlist(&self, product_id: &ProductId) {
        let Some(item) = self.get_wishlist_item(product_id) else {
            return;
        };

        match self.api.remove(&item.id).await {
            Ok(()) => {
                self.fetch_wishlist().await;
                self.notifier.success("Видалено зі списку бажань");
            }
            Err(e) => {
                warn!(error = %e, product_id = %product_id, "Failed to remove from wishlist");
                self.notifier.error("Помилка видалення зі списку бажань");
            }
        }
    }

    /// Toggle membership: removes when present, adds when absent.
    pub async fn toggle_wishlist(&self, product_id: &ProductId) {
        if self.is_in_wishlist(product_id) {
            self.remove_from_wishlist(product_id).await;
        } else {
            self.add_to_wishlist(product_id).await;
        }
    }

    /// Snapshot of the cached record list.
    pub fn items(&self) -> Vec<WishlistItem> {
        self.read_items().clone()
    }

    /// Number of wishlisted products.
    pub fn wishlist_count(&self) -> usize {
        self.read_items().len()
    }

    fn read_items(&self) -> std::sync::RwLockReadGuard<'_, Vec<WishlistItem>> {
        self.items
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    struct NullNotifier;

    impl Notifier for NullNotifier {
        fn success(&self, _: &str) {}
        fn error(&self, _: &str) {}
        fn warning(&self, _: &str) {}
        fn info(&self, _: &str) {}
    }

    #[derive(Default)]
    struct FakeWishlist {
        items: Mutex<HashMap<String, WishlistItem>>,
        requests: AtomicUsize,
    }

    impl WishlistApi for &FakeWishlist {
        async fn fetch(&self, _user: &UserId) -> Result<Vec<WishlistItem>, ApiError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(self.items.lock().unwrap().values().cloned().collect())
        }

        async fn add(
            &self,
            product_id: &ProductId,
            user: &UserId,
        ) -> Result<WishlistItem, ApiError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            let item = WishlistItem {
                id: WishlistItemId::new(format!("w-{product_id}")),
                product_id: product_id.clone(),
                user_id: user.clone(),
                created_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            };
            self.items
                .lock()
                .unwrap()
                .insert(item.id.to_string(), item.clone());
            Ok(item)
        }

        async fn remove(&self, item_id: &WishlistItemId) -> Result<(), ApiError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.items.lock().unwrap().remove(item_id.as_str());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_toggle_roundtrip() {
        let fake = FakeWishlist::default();
        let wishlist = WishlistStore::new(&fake, Arc::new(NullNotifier));
        let product_id = ProductId::new("p1");

        assert!(!wishlist.is_in_wishlist(&product_id));

        wishlist.toggle_wishlist(&product_id).await;
        assert!(wishlist.is_in_wishlist(&product_id));
        assert_eq!(wishlist.wishlist_count(), 1);

        wishlist.toggle_wishlist(&product_id).await;
        assert!(!wishlist.is_in_wishlist(&product_id));
        assert_eq!(wishlist.wishlist_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_uses_membership_record_id() {
        let fake = FakeWishlist::default();
        let wishlist = WishlistStore::new(&fake, Arc::new(NullNotifier));
        let product_id = ProductId::new("p1");

        wishlist.add_to_wishlist(&product_id).await;
        let record = wishlist.get_wishlist_item(&product_id).unwrap();
        assert_eq!(record.id.as_str(), "w-p1");

        wishlist.remove_from_wishlist(&product_id).await;
        assert!(wishlist.get_wishlist_item(&product_id).is_none());
    }

    #[tokio::test]
    async fn test_remove_unknown_product_is_a_no_op() {
        let fake = FakeWishlist::default();
        let wishlist = WishlistStore::new(&fake, Arc::new(NullNotifier));

        wishlist
            .remove_from_wishlist(&ProductId::new("missing"))
            .await;

        assert_eq!(fake.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_membership_lookups_are_pure() {
        let fake = FakeWishlist::default();
        let wishlist = WishlistStore::new(&fake, Arc::new(NullNotifier));
        let product_id = ProductId::new("p1");

        wishlist.add_to_wishlist(&product_id).await;
        let requests_before = fake.requests.load(Ordering::SeqCst);

        assert!(wishlist.is_in_wishlist(&product_id));
        assert!(wishlist.get_wishlist_item(&product_id).is_some());

        assert_eq!(fake.requests.load(Ordering::SeqCst), requests_before);
    }
}
