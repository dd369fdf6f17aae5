//! Feint Core
//!
//! Domain types and logic for Feint mailboxes: the environment abstraction,
//! session and admission types, the deniable authentication gate, message
//! records with their expiry rules, and the storage traits the client runs
//! against.
//!
//! # The deniable gate
//!
//! Feint never refuses a well-formed login. The gate classifies every
//! attempt internally and admits all of them:
//!
//! ```text
//! identity + credential
//!        │
//!        ▼ one directory lookup, one constant-time compare
//! ┌──────────────┬────────────────────┬──────────────────┐
//! │ match        │ wrong credential   │ unknown identity │
//! ▼              ▼                    ▼                  │
//! Admission::Real(session)   Admission::Decoy(session) ◄─┘
//! ```
//!
//! A decoy session is structurally identical to a real one apart from its
//! flag. Everything downstream of the gate must keep it that way: decoy
//! operations return the same shapes real ones do and never touch a store.
//! Under duress a user can surrender a wrong credential and the resulting
//! session proves nothing about whether the account exists.
//!
//! # Storage
//!
//! The client sees the backend through three synchronous traits:
//! [`store::AccountDirectory`], [`store::MessageStore`] and
//! [`store::BlobStore`]. The in-memory [`store::MemoryStore`] implements
//! all three and counts its calls, which is how tests pin the decoy
//! invariant (a decoy session leaves every counter untouched).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
pub mod gate;
pub mod message;
pub mod session;
pub mod store;

pub use env::{Environment, ManualEnv};
pub use gate::{CREDENTIAL_LEN, GateError, admit, is_valid_credential};
pub use message::{
    AttachmentMeta, DECOY_MESSAGE_ID, DISCARDED_MESSAGE_ID, MAX_ATTACHMENT_BYTES,
    MESSAGE_TTL_SECS, MessageId, MessageRecord, StoredMessage,
};
pub use session::{Admission, Session};
pub use store::{AccountDirectory, BlobStore, MemoryStore, MessageStore, StoreError};
