//! FLOAT. Core - Catalog and cart types.
//!
//! This crate provides the domain model used by the storefront:
//! - `storefront` - Public-facing single-page site
//! - `integration-tests` - Black-box HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! sessions, no HTTP. Every operation here is total: adding, removing and
//! totalling a cart never fails.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`catalog`] - The fixed product lineup
//! - [`cart`] - Ordered cart entries with a derived total
//! - [`view`] - Menu and cart drawer visibility flags

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;
pub mod view;

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, CatalogError, Product, ThemeColor};
pub use types::*;
pub use view::ViewFlags;
