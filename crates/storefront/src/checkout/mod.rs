//! Checkout flow: address resolution, form validation, order placement.
//!
//! The pieces compose left to right: the [`AddressResolver`] turns
//! keystrokes into a selected city/warehouse pair, the [`CheckoutForm`]
//! gates submission on name, phone, and address, and [`place_order`] sends
//! the order and clears the cart as a silent side effect of success.

mod debounce;
mod form;
mod resolver;

pub use debounce::Debouncer;
pub use form::{CheckoutForm, SELF_PICKUP_ADDRESS, ValidationError};
pub use resolver::{AddressResolver, AddressSelection, CityLookup, SEARCH_DEBOUNCE};

use std::future::Future;

use thiserror::Error;
use tracing::instrument;

use crate::backend::ApiError;
use crate::backend::types::{Order, OrderCreate};
use crate::stores::{CartApi, CartStore};

/// Backend operation order placement depends on.
pub trait OrdersApi: Send + Sync {
    /// Place an order.
    fn create_order(
        &self,
        order: &OrderCreate,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send;
}

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The cart is empty; there is nothing to order.
    #[error("Кошик порожній")]
    EmptyCart,

    /// The form failed the validation gate.
    #[error("Заповніть всі обов'язкові поля")]
    Invalid(Vec<ValidationError>),

    /// The backend rejected the order or the request failed.
    #[error("Помилка оформлення замовлення: {0}")]
    Api(#[from] ApiError),
}

/// Validate the form, place the order, and clear the cart.
///
/// The cart is cleared only after the backend accepts the order, and the
/// clear is silent - the surface shows its own order confirmation. A failed
/// placement leaves the cart untouched so the user can retry.
///
/// # Errors
///
/// Returns [`PlaceOrderError::EmptyCart`] for an empty cart,
/// [`PlaceOrderError::Invalid`] when the validation gate blocks, and
/// [`PlaceOrderError::Api`] when the backend rejects the order.
#[instrument(skip_all, fields(delivery_method = %form.delivery_method))]
pub async fn place_order<O: OrdersApi, C: CartApi>(
    form: &CheckoutForm,
    cart: &CartStore<C>,
    orders: &O,
) -> Result<Order, PlaceOrderError> {
    let items = cart.items();
    if items.is_empty() {
        return Err(PlaceOrderError::EmptyCart);
    }

    let payload = form
        .to_order(&items, cart.cart_total(), cart.user())
        .map_err(PlaceOrderError::Invalid)?;

    let order = orders.create_order(&payload).await?;

    cart.clear_cart().await;

    Ok(order)
}
