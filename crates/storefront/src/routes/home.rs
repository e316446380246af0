//! Home page route handler.
//!
//! The whole site is this one page: hero, lineup, vibe, marquee, contact and
//! footer, plus the cart drawer and mobile menu overlays when they are open.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use float_core::Product;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::models::session::existing_visitor;
use crate::routes::cart::CartView;
use crate::routes::contact::CONTACT_ACK_MESSAGE;
use crate::services::Shopper;
use crate::state::AppState;

// =============================================================================
// Page Sections
// =============================================================================

/// A navigation target on the page.
#[derive(Clone, Copy)]
pub struct Section {
    pub label: &'static str,
    pub anchor: &'static str,
}

/// Navigation links, in menu order.
pub const SECTIONS: &[Section] = &[
    Section {
        label: "Shop",
        anchor: "shop",
    },
    Section {
        label: "Story",
        anchor: "story",
    },
    Section {
        label: "Vibe",
        anchor: "vibe",
    },
    Section {
        label: "Contact",
        anchor: "contact",
    },
];

/// Hero banner copy.
#[derive(Clone)]
pub struct HeroConfig {
    pub title: &'static str,
    pub subtitle_lines: Vec<&'static str>,
    pub button_text: &'static str,
    pub button_url: &'static str,
    pub scroll_hint: &'static str,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "FLOAT.",
            subtitle_lines: vec![
                "Organic fruit blends that taste like a day at the beach.",
                "No added sugar. Just waves of flavor.",
            ],
            button_text: "TASTE THE VIBE",
            button_url: "#shop",
            scroll_hint: "Scroll to Drift",
        }
    }
}

/// One of the brand pillars in the vibe section.
#[derive(Clone, Copy)]
pub struct Pillar {
    pub title: &'static str,
    pub text: &'static str,
}

pub const PILLARS: &[Pillar] = &[
    Pillar {
        title: "Pure",
        text: "No synthetics. Just nature.",
    },
    Pillar {
        title: "Slow",
        text: "Cold-pressed to keep the chill.",
    },
    Pillar {
        title: "Alive",
        text: "Enzymes that wake you up.",
    },
];

const MARQUEE_TEXT: &str = "KEEP IT FRESH • STAY AFLOAT • SIP THE TIDE • ";
const MARQUEE_REPEAT: usize = 10;

// =============================================================================
// Product View
// =============================================================================

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub tagline: String,
    pub price: String,
    pub description: String,
    pub color_class: &'static str,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.clone(),
            tagline: product.tagline.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            color_class: product.color.css_class(),
            image: product.image.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: HeroConfig,
    pub sections: &'static [Section],
    pub pillars: &'static [Pillar],
    pub marquee: Vec<&'static str>,
    pub products: Vec<ProductView>,
    pub cart: CartView,
    /// Badge count in the nav, shared with the `/cart/count` fragment.
    pub cart_count: usize,
    pub menu_open: bool,
    pub cart_open: bool,
    /// Set once, right after the contact form was submitted.
    pub contact_ack: Option<&'static str>,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    // A first-time visitor has nothing stored yet; don't assign an id just to read.
    let shopper = match existing_visitor(&session).await? {
        Some(visitor) => {
            state
                .shoppers()
                .update(visitor, |shopper| {
                    let snapshot = shopper.clone();
                    shopper.contact_ack = false;
                    snapshot
                })
                .await
        }
        None => Shopper::default(),
    };
    let contact_ack = shopper.contact_ack.then_some(CONTACT_ACK_MESSAGE);

    Ok(HomeTemplate {
        hero: HeroConfig::default(),
        sections: SECTIONS,
        pillars: PILLARS,
        marquee: vec![MARQUEE_TEXT; MARQUEE_REPEAT],
        products: state
            .catalog()
            .products()
            .iter()
            .map(ProductView::from)
            .collect(),
        cart: CartView::from(&shopper.cart),
        cart_count: shopper.cart.len(),
        menu_open: shopper.view.menu_open,
        cart_open: shopper.view.cart_open,
        contact_ack,
    })
}
