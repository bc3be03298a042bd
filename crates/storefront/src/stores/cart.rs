//! Cart store.

use std::future::Future;
use std::sync::{Arc, RwLock};

use rust_decimal::Decimal;
use tracing::warn;

use sadok_core::{CartItemId, ProductId, UserId};

use crate::backend::types::{CartItem, Product};
use crate::backend::ApiError;
use crate::notify::Notifier;

/// Backend operations the cart store depends on.
///
/// [`crate::backend::BackendClient`] implements this against the real API;
/// tests provide in-memory fakes.
pub trait CartApi: Send + Sync {
    /// Load the cart items for a user.
    fn fetch(&self, user: &UserId) -> impl Future<Output = Result<Vec<CartItem>, ApiError>> + Send;

    /// Add a product (the backend merges quantities for repeats).
    fn add(
        &self,
        product_id: &ProductId,
        quantity: u32,
        user: &UserId,
    ) -> impl Future<Output = Result<CartItem, ApiError>> + Send;

    /// Set an item's quantity.
    fn update_quantity(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> impl Future<Output = Result<CartItem, ApiError>> + Send;

    /// Remove an item.
    fn remove(&self, item_id: &CartItemId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Remove every item for a user.
    fn clear(&self, user: &UserId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Client-side cart state with read-through-refresh semantics.
///
/// Holds a cached copy of the backend cart record for the current user.
/// Mutations send the request and then reload the full list, so the
/// displayed state always matches the server; nothing is patched
/// optimistically. Derived values ([`cart_total`](Self::cart_total),
/// [`cart_count`](Self::cart_count)) are recomputed from the item list on
/// every read and never stored.
pub struct CartStore<B> {
    api: B,
    notifier: Arc<dyn Notifier>,
    user: UserId,
    items: RwLock<Vec<CartItem>>,
}

impl<B: CartApi> CartStore<B> {
    /// Create a cart store for the guest user.
    pub fn new(api: B, notifier: Arc<dyn Notifier>) -> Self {
        Self::for_user(api, notifier, UserId::guest())
    }

    /// Create a cart store for a specific user.
    pub fn for_user(api: B, notifier: Arc<dyn Notifier>, user: UserId) -> Self {
        Self {
            api,
            notifier,
            user,
            items: RwLock::new(Vec::new()),
        }
    }

    /// Load the authoritative item list.
    ///
    /// A failed fetch resets the cart to empty rather than surfacing a
    /// blocking error: "no cart yet" and "fetch failed" look the same to the
    /// UI.
    pub async fn fetch_cart(&self) {
        match self.api.fetch(&self.user).await {
            Ok(items) => self.replace_items(items),
            Err(e) => {
                warn!(error = %e, "Failed to fetch cart, resetting to empty");
                self.replace_items(Vec::new());
            }
        }
    }

    /// Add a product to the cart, then re-fetch the authoritative state.
    pub async fn add_to_cart(&self, product: &Product, quantity: u32) {
        self.add_to_cart_inner(product, quantity, false).await;
    }

    /// [`add_to_cart`](Self::add_to_cart) without the default notification,
    /// for surfaces that render their own confirmation.
    pub async fn add_to_cart_silent(&self, product: &Product, quantity: u32) {
        self.add_to_cart_inner(product, quantity, true).await;
    }

    async fn add_to_cart_inner(&self, product: &Product, quantity: u32, silent: bool) {
        match self.api.add(&product.id, quantity, &self.user).await {
            Ok(_) => {
                self.fetch_cart().await;
                if !silent {
                    self.notifier
                        .success(&format!("{} додано до кошика!", product.name));
                }
            }
            Err(e) => {
                warn!(error = %e, product_id = %product.id, "Failed to add to cart");
                if !silent {
                    self.notifier.error("Помилка додавання до кошика");
                }
            }
        }
    }

    /// Change an item's quantity, then re-fetch.
    ///
    /// A quantity below 1 is a no-op: no request is sent and the state is
    /// left untouched.
    pub async fn update_quantity(&self, item_id: &CartItemId, new_quantity: u32) {
        if new_quantity < 1 {
            return;
        }

        match self.api.update_quantity(item_id, new_quantity).await {
            Ok(_) => self.fetch_cart().await,
            Err(e) => {
                warn!(error = %e, item_id = %item_id, "Failed to update quantity");
                self.notifier.error("Помилка оновлення кількості");
            }
        }
    }

    /// Remove an item, then re-fetch. The product name is echoed in the
    /// confirmation notice.
    pub async fn remove_from_cart(&self, item_id: &CartItemId, product_name: &str) {
        self.remove_from_cart_inner(item_id, product_name, false)
            .await;
    }

    /// [`remove_from_cart`](Self::remove_from_cart) without the default
    /// notification.
    pub async fn remove_from_cart_silent(&self, item_id: &CartItemId, product_name: &str) {
        self.remove_from_cart_inner(item_id, product_name, true)
            .await;
    }

    async fn remove_from_cart_inner(&self, item_id: &CartItemId, product_name: &str, silent: bool) {
        match self.api.remove(item_id).await {
            Ok(()) => {
                self.fetch_cart().await;
                if !silent {
                    self.notifier
                        .success(&format!("{product_name} видалено з кошика"));
                }
            }
            Err(e) => {
                warn!(error = %e, item_id = %item_id, "Failed to remove from cart");
                if !silent {
                    self.notifier.error("Помилка видалення з кошика");
                }
            }
        }
    }

    /// Empty the cart.
    ///
    /// The local state is reset directly (the outcome is deterministic, no
    /// re-fetch needed) and no notification is shown: this runs as a side
    /// effect of successful order placement, not as a user action.
    pub async fn clear_cart(&self) {
        match self.api.clear(&self.user).await {
            Ok(()) => self.replace_items(Vec::new()),
            Err(e) => {
                warn!(error = %e, "Failed to clear cart");
            }
        }
    }

    /// The user identity this cart belongs to.
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Snapshot of the cached item list.
    pub fn items(&self) -> Vec<CartItem> {
        self.read_items().clone()
    }

    /// Sum of `price * quantity` over the item list, recomputed on every
    /// read.
    pub fn cart_total(&self) -> Decimal {
        self.read_items()
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum()
    }

    /// Sum of quantities over the item list, recomputed on every read.
    pub fn cart_count(&self) -> u32 {
        self.read_items().iter().map(|item| item.quantity).sum()
    }

    /// True when the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.read_items().is_empty()
    }

    fn replace_items(&self, items: Vec<CartItem>) {
        let mut guard = self
            .items
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = items;
    }

    fn read_items(&self) -> std::sync::RwLockReadGuard<'_, Vec<CartItem>> {
        self.items
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
