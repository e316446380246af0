//! Stateful services behind the route handlers.
//!
//! - `shoppers` - Per-visitor cart and overlay state

pub mod shoppers;

pub use shoppers::{Shopper, ShopperStore, VisitorId};
