//! Contact form route handler.
//!
//! The form is a stub: submissions are acknowledged on the page and logged,
//! but nothing is sent anywhere.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::session::visitor_id;
use crate::state::AppState;

/// Acknowledgment shown after submitting the form.
pub const CONTACT_ACK_MESSAGE: &str = "Message sent to the ocean!";

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

/// Accept a contact form submission.
///
/// POST /contact
#[instrument(
    skip(state, session, form),
    fields(name_len = tracing::field::Empty, message_len = tracing::field::Empty)
)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Redirect> {
    let name = form.name.trim();
    let message = form.message.trim();

    let span = tracing::Span::current();
    span.record("name_len", name.len());
    span.record("message_len", message.len());

    let visitor = visitor_id(&session).await?;
    state
        .shoppers()
        .update(visitor, |shopper| shopper.contact_ack = true)
        .await;
    tracing::info!("Contact message received");

    Ok(Redirect::to("/#contact"))
}
