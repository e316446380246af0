//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - The page
//! GET  /health                 - Health check
//!
//! # Cart (form posts, redirect back to the page)
//! POST /cart/add               - Add product, open drawer
//! POST /cart/remove            - Remove one entry (no-op if gone)
//! POST /cart/open              - Show drawer
//! POST /cart/close             - Hide drawer
//! GET  /cart/count             - Cart count badge (same partial as the nav)
//!
//! # Mobile menu
//! POST /menu/toggle            - Open/close menu
//! POST /menu/close             - Close menu and jump to a section
//!
//! # Contact
//! POST /contact                - Acknowledge a message (sent nowhere)
//! ```

pub mod cart;
pub mod contact;
pub mod home;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::StorefrontConfig;
use crate::middleware::{cart_rate_limiter, contact_rate_limiter};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes(trust_proxy_headers: bool) -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route_layer(cart_rate_limiter(trust_proxy_headers))
        .route("/count", get(cart::count))
}

/// Create the mobile menu routes router.
pub fn menu_routes(trust_proxy_headers: bool) -> Router<AppState> {
    Router::new()
        .route("/toggle", post(menu::toggle))
        .route("/close", post(menu::close))
        .route_layer(cart_rate_limiter(trust_proxy_headers))
}

/// Create all routes for the storefront.
pub fn routes(config: &StorefrontConfig) -> Router<AppState> {
    let trust_proxy_headers = config.trust_proxy_headers;

    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes(trust_proxy_headers))
        .nest("/menu", menu_routes(trust_proxy_headers))
        .route(
            "/contact",
            post(contact::submit).route_layer(contact_rate_limiter(trust_proxy_headers)),
        )
}
