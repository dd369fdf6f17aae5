//! Feint Client
//!
//! Client operations for Feint mailboxes: registration, the deniable
//! unlock gate, sealed messaging with attachments, and the decoy surface
//! entered on a wrong credential or unknown identity.
//!
//! # Architecture
//!
//! [`MailboxClient`] is the single entry point. It owns an
//! [`Environment`] (clock + RNG) and handles to the three store traits
//! from [`feint_core`]. Every payload is sealed with [`feint_crypto`]
//! before a store sees it, and every operation on a decoy session
//! short-circuits before a store is reached.
//!
//! # Components
//!
//! - [`MailboxClient`]: account lifecycle, messaging, maintenance
//! - [`SystemEnv`]: production clock and OS RNG
//! - [`InboxEntry`] / [`OutgoingAttachment`]: UI-facing views
//! - [`decoy`]: the fixed decoy inbox content

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
pub mod decoy;
mod error;
mod system_env;
mod view;

pub use client::{DECRYPT_FAILED_PLACEHOLDER, MailboxClient};
pub use error::ClientError;
pub use feint_core::{
    env::{Environment, ManualEnv},
    session::{Admission, Session},
};
pub use system_env::SystemEnv;
pub use view::{InboxEntry, OutgoingAttachment};
