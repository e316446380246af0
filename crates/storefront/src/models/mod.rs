//! Domain models for storefront.
//!
//! The catalog and cart types themselves live in `float-core`; this module
//! holds what the visitor's session remembers about them.

pub mod session;

pub use session::keys as session_keys;
