//! Shared fakes for the integration tests.
//!
//! The corpus has no HTTP-mocking layer, so the store trait seams are
//! implemented in-process: [`FakeShop`] is an in-memory backend covering
//! cart, wishlist, and orders; [`GatedLookup`] is an address lookup whose
//! warehouse responses are held until released, to exercise in-flight
//! staleness; [`RecordingNotifier`] captures every user-visible notice.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tokio::sync::Semaphore;

use sadok_core::{CartItemId, OrderId, ProductId, UserId, WishlistItemId};
use sadok_storefront::backend::ApiError;
use sadok_storefront::backend::types::{CartItem, Order, OrderCreate, Product, WishlistItem};
use sadok_storefront::checkout::{CityLookup, OrdersApi};
use sadok_storefront::notify::Notifier;
use sadok_storefront::nova_poshta::{City, NovaPoshtaError, Warehouse};
use sadok_storefront::stores::{CartApi, WishlistApi};

/// A fixed timestamp for fabricated records.
#[must_use]
pub fn test_timestamp() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

/// Build a catalog product for tests.
#[must_use]
pub fn test_product(id: &str, name: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        article: format!("ART-{id}"),
        price: Decimal::from(price),
        old_price: None,
        discount: 0,
        image: format!("/media/{id}.jpg"),
        category: "Хвойні".to_owned(),
        badges: vec![],
        description: String::new(),
        stock: 100,
        created_at: test_timestamp(),
    }
}

// =============================================================================
// RecordingNotifier
// =============================================================================

/// Notice severity, as recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// Notifier that records every notice for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every notice recorded so far.
    #[must_use]
    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().expect("notifier lock").clone()
    }

    /// Number of notices recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.notices.lock().expect("notifier lock").len()
    }

    fn record(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .expect("notifier lock")
            .push((level, message.to_owned()));
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.record(NoticeLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.record(NoticeLevel::Error, message);
    }

    fn warning(&self, message: &str) {
        self.record(NoticeLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.record(NoticeLevel::Info, message);
    }
}

// =============================================================================
// FakeShop
// =============================================================================

#[derive(Default)]
struct ShopState {
    catalog: HashMap<String, Product>,
    cart: HashMap<String, CartItem>,
    wishlist: HashMap<String, WishlistItem>,
    orders: Vec<Order>,
    next_id: u64,
}

/// In-memory backend implementing the cart, wishlist, and orders seams.
#[derive(Default)]
pub struct FakeShopInner {
    state: Mutex<ShopState>,
    requests: AtomicUsize,
    /// When set, every mutating call fails with a 500.
    pub fail_mutations: AtomicBool,
}

/// Shared handle to the in-memory backend.
///
/// A newtype around `Arc<FakeShopInner>` so the store-trait impls below
/// name a local type (the orphan rules forbid implementing a foreign
/// trait for `Arc<_>` directly). Cloning shares the same backend state.
#[derive(Clone, Default)]
pub struct FakeShop(Arc<FakeShopInner>);

impl Deref for FakeShop {
    type Target = FakeShopInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FakeShop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FakeShopInner {
    /// Seed the catalog so cart additions resolve product snapshots.
    pub fn seed_product(&self, product: Product) {
        let mut state = self.state.lock().expect("shop lock");
        state.catalog.insert(product.id.to_string(), product);
    }

    /// Total number of API calls made.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Orders accepted so far.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().expect("shop lock").orders.clone()
    }

    fn next_id(state: &mut ShopState, prefix: &str) -> String {
        state.next_id += 1;
        format!("{prefix}-{}", state.next_id)
    }

    fn bump(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn mutation_guard(&self) -> Result<(), ApiError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 500,
                message: "internal error".to_owned(),
            });
        }
        Ok(())
    }
}

impl CartApi for FakeShop {
    async fn fetch(&self, user: &UserId) -> Result<Vec<CartItem>, ApiError> {
        self.bump();
        let state = self.state.lock().expect("shop lock");
        Ok(state
            .cart
            .values()
            .filter(|item| item.user_id == *user)
            .cloned()
            .collect())
    }

    async fn add(
        &self,
        product_id: &ProductId,
        quantity: u32,
        user: &UserId,
    ) -> Result<CartItem, ApiError> {
        self.bump();
        self.mutation_guard()?;

        let mut state = self.state.lock().expect("shop lock");
        let product = state
            .catalog
            .get(product_id.as_str())
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Product not found".to_owned()))?;

        // Merge quantities for a product already in the cart.
        if let Some(existing) = state
            .cart
            .values_mut()
            .find(|item| item.product_id == *product_id && item.user_id == *user)
        {
            existing.quantity += quantity;
            return Ok(existing.clone());
        }

        let id = FakeShopInner::next_id(&mut state, "cart");
        let item = CartItem {
            id: CartItemId::new(id.clone()),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_image: product.image.clone(),
            price: product.price,
            quantity,
            user_id: user.clone(),
        };
        state.cart.insert(id, item.clone());
        Ok(item)
    }

    async fn update_quantity(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        self.bump();
        self.mutation_guard()?;

        let mut state = self.state.lock().expect("shop lock");
        let item = state
            .cart
            .get_mut(item_id.as_str())
            .ok_or_else(|| ApiError::NotFound("Cart item not found".to_owned()))?;
        item.quantity = quantity;
        Ok(item.clone())
    }

    async fn remove(&self, item_id: &CartItemId) -> Result<(), ApiError> {
        self.bump();
        self.mutation_guard()?;

        let mut state = self.state.lock().expect("shop lock");
        state
            .cart
            .remove(item_id.as_str())
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound("Cart item not found".to_owned()))
    }

    async fn clear(&self, user: &UserId) -> Result<(), ApiError> {
        self.bump();
        self.mutation_guard()?;

        let mut state = self.state.lock().expect("shop lock");
        state.cart.retain(|_, item| item.user_id != *user);
        Ok(())
    }
}

impl WishlistApi for FakeShop {
    async fn fetch(&self, user: &UserId) -> Result<Vec<WishlistItem>, ApiError> {
        self.bump();
        let state = self.state.lock().expect("shop lock");
        Ok(state
            .wishlist
            .values()
            .filter(|item| item.user_id == *user)
            .cloned()
            .collect())
    }

    async fn add(&self, product_id: &ProductId, user: &UserId) -> Result<WishlistItem, ApiError> {
        self.bump();
        self.mutation_guard()?;

        let mut state = self.state.lock().expect("shop lock");

        // Membership records are unique per (user, product).
        if let Some(existing) = state
            .wishlist
            .values()
            .find(|item| item.product_id == *product_id && item.user_id == *user)
        {
            return Ok(existing.clone());
        }

        let id = FakeShopInner::next_id(&mut state, "wish");
        let item = WishlistItem {
            id: WishlistItemId::new(id.clone()),
            product_id: product_id.clone(),
            user_id: user.clone(),
            created_at: test_timestamp(),
        };
        state.wishlist.insert(id, item.clone());
        Ok(item)
    }

    async fn remove(&self, item_id: &WishlistItemId) -> Result<(), ApiError> {
        self.bump();
        self.mutation_guard()?;

        let mut state = self.state.lock().expect("shop lock");
        state
            .wishlist
            .remove(item_id.as_str())
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound("Wishlist item not found".to_owned()))
    }
}

impl OrdersApi for FakeShop {
    async fn create_order(&self, order: &OrderCreate) -> Result<Order, ApiError> {
        self.bump();
        self.mutation_guard()?;

        let mut state = self.state.lock().expect("shop lock");
        let id = FakeShopInner::next_id(&mut state, "order");
        let accepted = Order {
            id: OrderId::new(id),
            user_id: order.user_id.clone(),
            items: order.items.clone(),
            total_amount: order.total_amount,
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            customer_email: order.customer_email.clone(),
            delivery_address: order.delivery_address.clone(),
            delivery_method: order.delivery_method,
            payment_method: order.payment_method,
            status: sadok_core::OrderStatus::Pending,
            notes: order.notes.clone(),
            created_at: test_timestamp(),
            payment_status: None,
        };
        state.orders.push(accepted.clone());
        Ok(accepted)
    }
}

// =============================================================================
// GatedLookup
// =============================================================================

/// Address lookup whose warehouse responses are held until released.
///
/// City search resolves immediately; `warehouses` parks on a semaphore so a
/// test can change the selected city while the fetch is in flight.
pub struct GatedLookupInner {
    release: Semaphore,
    warehouse_call_started: AtomicBool,
    warehouse_calls: AtomicUsize,
    city_calls: AtomicUsize,
}

impl Default for GatedLookupInner {
    fn default() -> Self {
        Self {
            release: Semaphore::new(0),
            warehouse_call_started: AtomicBool::new(false),
            warehouse_calls: AtomicUsize::new(0),
            city_calls: AtomicUsize::new(0),
        }
    }
}

/// Shared handle to the gated lookup.
///
/// A newtype around `Arc<GatedLookupInner>` so the [`CityLookup`] impl
/// names a local type (the orphan rules forbid implementing a foreign
/// trait for `Arc<_>` directly). Cloning shares the same state.
#[derive(Clone, Default)]
pub struct GatedLookup(Arc<GatedLookupInner>);

impl Deref for GatedLookup {
    type Target = GatedLookupInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl GatedLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GatedLookupInner {
    /// Let one parked warehouse call return.
    pub fn release_one(&self) {
        self.release.add_permits(1);
    }

    /// Wait until a warehouse call has parked.
    pub async fn wait_for_warehouse_call(&self) {
        while !self.warehouse_call_started.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
    }

    /// Number of city searches performed.
    #[must_use]
    pub fn city_calls(&self) -> usize {
        self.city_calls.load(Ordering::SeqCst)
    }

    /// Number of warehouse listings performed.
    #[must_use]
    pub fn warehouse_calls(&self) -> usize {
        self.warehouse_calls.load(Ordering::SeqCst)
    }
}

impl CityLookup for GatedLookup {
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, NovaPoshtaError> {
        self.city_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![City {
            ref_id: format!("{query}-ref"),
            name: query.to_owned(),
            area: "Область".to_owned(),
            region: None,
        }])
    }

    async fn warehouses(&self, city_ref: &str) -> Result<Vec<Warehouse>, NovaPoshtaError> {
        self.warehouse_calls.fetch_add(1, Ordering::SeqCst);
        self.warehouse_call_started.store(true, Ordering::SeqCst);

        let permit = self.release.acquire().await.expect("semaphore closed");
        permit.forget();

        Ok(vec![Warehouse {
            ref_id: format!("{city_ref}-w1"),
            description: format!("Відділення №1 ({city_ref})"),
            short_address: None,
            number: "1".to_owned(),
            city_ref: city_ref.to_owned(),
        }])
    }
}
