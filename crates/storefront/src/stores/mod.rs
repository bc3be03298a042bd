//! Client-state stores.
//!
//! Each store is a plain, independently testable module with a defined
//! method contract; UI layers (web components, CLI commands) bind to them as
//! thin adapters. The cart and wishlist stores follow a read-through-refresh
//! pattern: after every mutation the authoritative state is reloaded from
//! the backend rather than patched locally, trading a small latency cost for
//! the absence of client/server drift.
//!
//! Stores are `Send + Sync` and use interior mutability, so one instance can
//! be shared across an application. Failed operations leave the last-known-
//! good state in place and surface through the [`crate::notify::Notifier`];
//! they never propagate into the caller.

mod cart;
mod compare;
mod recently_viewed;
mod settings;
mod wishlist;

pub use cart::{CartApi, CartStore};
pub use compare::{CompareStore, MAX_COMPARE_ITEMS};
pub use recently_viewed::{MAX_RECENTLY_VIEWED, RecentlyViewedStore};
pub use settings::{SettingsApi, SettingsStore};
pub use wishlist::{WishlistApi, WishlistStore};
