//! The fixed decoy surface.
//!
//! A decoy session renders the same screens a real one does. Its inbox
//! holds a single fixed welcome message so the view is never empty, and
//! every mutating operation short-circuits before reaching a store. The
//! content below is the same for every decoy session; nothing in it
//! depends on the identity that was attempted.

use feint_core::{
    env::Environment,
    message::{DECOY_MESSAGE_ID, MESSAGE_TTL_SECS},
};

use crate::view::InboxEntry;

/// Display name shown as the sender of the decoy welcome message.
pub const DECOY_SENDER_NAME: &str = "Feint";

/// Body of the decoy welcome message.
pub const DECOY_WELCOME_BODY: &str = "Hi, nice for you to be here. We hope you enjoy the app.";

/// The complete decoy inbox: one welcome message stamped at `now`.
///
/// The stamp moves with the clock so the entry always looks freshly
/// received and never appears expired.
pub fn decoy_inbox<E: Environment>(env: &E) -> Vec<InboxEntry> {
    let now = env.wall_clock_secs();
    vec![InboxEntry {
        id: DECOY_MESSAGE_ID,
        sender_name: DECOY_SENDER_NAME.to_string(),
        body: DECOY_WELCOME_BODY.to_string(),
        attachment: None,
        created_at: now,
        expires_at: now + MESSAGE_TTL_SECS,
    }]
}
