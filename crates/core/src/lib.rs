//! Sadok Core - Shared types library.
//!
//! This crate provides the common types used across all Sadok components:
//! - `storefront` - Client library for the public nursery storefront
//! - `admin` - Client library for the administrative back-office
//! - `cli` - Command-line adapter over both
//!
//! # Architecture
//!
//! The core crate contains only types, validation, and the local persistence
//! port - no network access and no HTTP clients. This keeps it lightweight
//! and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, phone numbers,
//!   and status enums
//! - [`storage`] - Key-value persistence port with in-memory and JSON-file
//!   implementations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod storage;
pub mod types;

pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use types::*;
