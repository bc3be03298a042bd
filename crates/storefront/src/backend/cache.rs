//! Cache value types for catalog reads.

use super::types::{Category, Product};

/// Values stored in the catalog cache.
///
/// Only immutable-ish catalog data is cached; cart, wishlist, and order
/// state always comes from the backend.
#[derive(Debug, Clone)]
pub enum CacheValue {
    /// A single product by ID.
    Product(Box<Product>),
    /// A filtered/unfiltered product listing.
    Products(Vec<Product>),
    /// The full category list.
    Categories(Vec<Category>),
}
