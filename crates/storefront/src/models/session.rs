//! Session-stored visitor identity.
//!
//! The session carries only the visitor id. It is written once, on the first
//! request that needs it, and never changes afterwards, so overlapping
//! requests from one browser cannot overwrite each other's session record.
//! Everything mutable lives in the [`ShopperStore`](crate::services::ShopperStore).

use tower_sessions::{Session, session::Error};

use crate::services::VisitorId;

/// Session keys for visitor data.
pub mod keys {
    /// Key for the visitor id that addresses the shopper state.
    pub const VISITOR: &str = "visitor";
}

/// Visitor id for this session, if one was assigned earlier.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value is corrupt.
pub async fn existing_visitor(session: &Session) -> Result<Option<VisitorId>, Error> {
    session.get::<VisitorId>(keys::VISITOR).await
}

/// Visitor id for this session, assigning a fresh one on first use.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value is corrupt.
pub async fn visitor_id(session: &Session) -> Result<VisitorId, Error> {
    if let Some(id) = existing_visitor(session).await? {
        return Ok(id);
    }

    let id = VisitorId::generate();
    session.insert(keys::VISITOR, id).await?;
    tracing::debug!(visitor = %id, "New visitor");
    Ok(id)
}
