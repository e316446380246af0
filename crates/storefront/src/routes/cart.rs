//! Cart route handlers.
//!
//! Every mutation is a plain form post that updates the visitor's shopper
//! state and redirects back to the page (post/redirect/get), so the page works
//! without scripts.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use float_core::{Cart, CartEntry, EntryId, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::models::session::{existing_visitor, visitor_id};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub entry_id: u64,
    pub name: String,
    pub price: String,
    pub color_class: &'static str,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: usize,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            entry_id: entry.id.get(),
            name: entry.product.name.clone(),
            price: entry.product.price.to_string(),
            color_class: entry.product.color.css_class(),
            image: entry.product.image.clone(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.len(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub entry_id: EntryId,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: usize,
}

/// Add a product to the cart and open the drawer.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state.catalog().find(form.product_id)?.clone();
    let visitor = visitor_id(&session).await?;

    let (entry_id, cart_size) = state
        .shoppers()
        .update(visitor, |shopper| {
            let entry_id = shopper.cart.add(product);
            shopper.view.open_cart();
            (entry_id, shopper.cart.len())
        })
        .await;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", form.product_id.to_string())],
    );
    tracing::info!(
        product_id = %form.product_id,
        entry_id = %entry_id,
        cart_size,
        "Added to cart"
    );

    Ok(Redirect::to("/"))
}

/// Remove one entry from the cart. Unknown entry ids are ignored.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let Some(visitor) = existing_visitor(&session).await? else {
        tracing::debug!(entry_id = %form.entry_id, "No cart to remove from");
        return Ok(Redirect::to("/"));
    };

    let removed = state
        .shoppers()
        .update(visitor, |shopper| {
            shopper
                .cart
                .remove(form.entry_id)
                .map(|entry| (entry, shopper.cart.len()))
        })
        .await;

    match removed {
        Some((entry, cart_size)) => tracing::info!(
            entry_id = %form.entry_id,
            product_id = %entry.product.id,
            cart_size,
            "Removed from cart"
        ),
        None => tracing::debug!(entry_id = %form.entry_id, "Cart entry already gone"),
    }

    Ok(Redirect::to("/"))
}

/// Show the cart drawer.
#[instrument(skip(state, session))]
pub async fn open(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let visitor = visitor_id(&session).await?;
    state
        .shoppers()
        .update(visitor, |shopper| shopper.view.open_cart())
        .await;
    Ok(Redirect::to("/"))
}

/// Hide the cart drawer.
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    if let Some(visitor) = existing_visitor(&session).await? {
        state
            .shoppers()
            .update(visitor, |shopper| shopper.view.close_cart())
            .await;
    }
    Ok(Redirect::to("/"))
}

/// Cart count badge fragment.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart_count = match existing_visitor(&session).await? {
        Some(visitor) => {
            state
                .shoppers()
                .update(visitor, |shopper| shopper.cart.len())
                .await
        }
        None => 0,
    };
    Ok(CartCountTemplate { cart_count })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use float_core::Catalog;

    use super::*;

    #[test]
    fn test_cart_view_formats_prices() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add(catalog.get(ProductId::new(1)).unwrap().clone());
        cart.add(catalog.get(ProductId::new(2)).unwrap().clone());

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total, "$17.50");
        assert_eq!(view.items[0].name, "Sunrise Citrus");
        assert_eq!(view.items[0].price, "$8.50");
        assert_eq!(view.items[0].color_class, "theme-orange");
        assert_ne!(view.items[0].entry_id, view.items[1].entry_id);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.items.is_empty());
        assert_eq!(view.total, "$0.00");
    }

    #[test]
    fn test_cart_count_renders_badge() {
        let html = CartCountTemplate { cart_count: 3 }.render().unwrap();
        assert!(html.contains(r#"<span class="cart-badge">3</span>"#));

        let html = CartCountTemplate { cart_count: 0 }.render().unwrap();
        assert!(!html.contains("cart-badge"));
    }
}
