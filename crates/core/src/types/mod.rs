//! Core type definitions.
//!
//! Newtype wrappers and enums shared across the storefront and admin clients.

mod id;
mod phone;
mod price;
mod status;

pub use id::{CartItemId, CategoryId, OrderId, ProductId, UserId, WishlistItemId};
pub use phone::{Phone, PhoneError};
pub use price::{CurrencyCode, Price};
pub use status::{DeliveryMethod, OrderStatus, PaymentMethod, PaymentStatus};
