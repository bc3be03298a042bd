//! Sadok storefront client library.
//!
//! Everything a storefront surface (web UI, CLI, tests) needs to run the
//! plant-nursery shop against the backend REST API:
//!
//! - [`backend`] - typed per-resource wrappers over the backend endpoints
//!   (products, categories, cart, wishlist, orders, settings, payment)
//! - [`nova_poshta`] - the third-party address lookup client
//! - [`stores`] - client-state stores (cart, wishlist, compare, settings)
//!   with read-through-refresh semantics
//! - [`checkout`] - the debounced city/warehouse address resolver, the
//!   checkout form validation gate, and order placement
//! - [`notify`] - the user-visible notification port
//!
//! # Example
//!
//! ```rust,ignore
//! use sadok_storefront::backend::BackendClient;
//! use sadok_storefront::config::StorefrontConfig;
//! use sadok_storefront::notify::TracingNotifier;
//! use sadok_storefront::stores::CartStore;
//! use std::sync::Arc;
//!
//! let config = StorefrontConfig::from_env()?;
//! let backend = BackendClient::new(&config)?;
//! let cart = CartStore::new(backend.clone(), Arc::new(TracingNotifier));
//!
//! cart.fetch_cart().await;
//! let product = backend.get_product(&product_id).await?;
//! cart.add_to_cart(&product, 2).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod checkout;
pub mod config;
pub mod notify;
pub mod nova_poshta;
pub mod stores;
