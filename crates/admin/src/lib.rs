//! Sadok back-office client library.
//!
//! One [`AdminClient`] covers the whole administrative surface of the
//! backend: bearer-token auth, catalog management, order processing,
//! dashboard analytics, the media library, CMS content, and site settings.
//! Per-resource methods live in sibling modules, all as `impl AdminClient`
//! blocks.
//!
//! The auth token persists across restarts through the key-value port from
//! `sadok-core`, under the same fixed keys the browser admin panel used for
//! its local storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use sadok_admin::AdminClient;
//! use sadok_core::JsonFileStore;
//!
//! let client = AdminClient::new(base_url, timeout, JsonFileStore::new(".sadok"))?;
//! client.login("admin", "password").await?;
//!
//! let stats = client.get_dashboard_stats().await?;
//! println!("{} orders pending", stats.pending_orders);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod analytics;
mod auth;
mod categories;
mod client;
mod cms;
mod media;
mod orders;
mod products;
mod site_settings;
pub mod types;

pub use client::{AdminClient, AdminError};
pub use types::*;
