//! Mobile menu route handlers.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::session::{existing_visitor, visitor_id};
use crate::routes::home::SECTIONS;
use crate::state::AppState;

/// Close-menu form data: the section the shopper picked.
#[derive(Debug, Deserialize)]
pub struct CloseMenuForm {
    pub section: String,
}

/// Open or close the mobile menu.
#[instrument(skip(state, session))]
pub async fn toggle(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let visitor = visitor_id(&session).await?;
    state
        .shoppers()
        .update(visitor, |shopper| shopper.view.toggle_menu())
        .await;
    Ok(Redirect::to("/"))
}

/// Close the menu and jump to the chosen section.
#[instrument(skip(state, session))]
pub async fn close(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CloseMenuForm>,
) -> Result<Redirect> {
    let target = section_target(&form.section)?;
    if let Some(visitor) = existing_visitor(&session).await? {
        state
            .shoppers()
            .update(visitor, |shopper| shopper.view.close_menu())
            .await;
    }
    Ok(Redirect::to(&target))
}

/// Page URL for a section anchor.
fn section_target(anchor: &str) -> Result<String> {
    SECTIONS
        .iter()
        .find(|s| s.anchor == anchor)
        .map(|s| format!("/#{}", s.anchor))
        .ok_or_else(|| AppError::BadRequest(format!("unknown section '{anchor}'")))
}
