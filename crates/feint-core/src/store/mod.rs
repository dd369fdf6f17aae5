//! Storage abstraction for Feint mailboxes
//!
//! Trait-based abstraction over the three backend surfaces: the account
//! directory, the message store, and the blob store. The traits are
//! synchronous (no async) to maintain a clean synchronous API design, and
//! they only ever see fingerprints and sealed payloads.
//!
//! Call discipline matters more than usual here: the client must not touch
//! any of these traits from a decoy session. [`MemoryStore`] counts every
//! call so tests can pin that invariant.

mod error;
mod memory;

pub use error::StoreError;
use feint_crypto::Fingerprint;
pub use memory::MemoryStore;

use crate::message::{MessageId, MessageRecord, StoredMessage};

/// Account directory: identity fingerprint to credential fingerprint.
///
/// Must be Clone (handed to multiple clients), Send + Sync (thread-safe),
/// and synchronous. Implementations typically share internal state via Arc,
/// so clones access the same underlying directory.
///
/// # Panics
///
/// Implementations may panic if internal synchronization primitives are
/// poisoned (a thread panicked while holding a lock). Acceptable for
/// test/simulation code, but production implementations should handle
/// poisoned mutexes gracefully.
pub trait AccountDirectory: Clone + Send + Sync + 'static {
    /// Credential fingerprint stored for an identity. `None` if unclaimed.
    fn credential_for(&self, identity: &Fingerprint) -> Result<Option<Fingerprint>, StoreError>;

    /// Claim an identity with a credential fingerprint.
    ///
    /// # Errors
    ///
    /// - `AlreadyRegistered`: the identity fingerprint is already claimed
    fn claim(&self, identity: &Fingerprint, credential: &Fingerprint) -> Result<(), StoreError>;

    /// Replace the credential fingerprint for an existing identity.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`: no entry for this identity
    fn update_credential(
        &self,
        identity: &Fingerprint,
        credential: &Fingerprint,
    ) -> Result<(), StoreError>;

    /// Remove an identity entirely.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`: no entry for this identity
    fn remove_account(&self, identity: &Fingerprint) -> Result<(), StoreError>;
}

/// Message store: sealed records keyed by recipient fingerprint.
///
/// Same bounds and sharing semantics as [`AccountDirectory`].
pub trait MessageStore: Clone + Send + Sync + 'static {
    /// Append a sealed record, returning its assigned id.
    ///
    /// Ids are positive and strictly increasing per store.
    fn append(&self, record: MessageRecord) -> Result<MessageId, StoreError>;

    /// A recipient's inbox, newest first.
    ///
    /// The recipient's expired records are pruned before reading, so an
    /// expired message can never be observed through this call. Other
    /// inboxes are left to [`MessageStore::delete_expired`].
    fn inbox_of(
        &self,
        recipient: &Fingerprint,
        now: u64,
    ) -> Result<Vec<StoredMessage>, StoreError>;

    /// Delete every expired record, returning what was removed.
    ///
    /// The returned records let the caller clean up attachment blobs.
    fn delete_expired(&self, now: u64) -> Result<Vec<MessageRecord>, StoreError>;

    /// Delete one of the recipient's own messages, returning the removed
    /// record.
    ///
    /// Scoped to the recipient: an id belonging to another inbox is left
    /// in place and `None` is returned. The returned record lets the
    /// caller clean up an attachment blob.
    fn delete_message(
        &self,
        recipient: &Fingerprint,
        id: MessageId,
    ) -> Result<Option<MessageRecord>, StoreError>;

    /// Delete a recipient's whole inbox, returning the removed records.
    ///
    /// The returned records let the caller clean up attachment blobs.
    fn purge_recipient(&self, recipient: &Fingerprint) -> Result<Vec<MessageRecord>, StoreError>;
}

/// Blob store: sealed attachment bytes under caller-minted handles.
///
/// Handles are minted by the client from environment randomness
/// (`{hex}.enc`); the store never names blobs itself. Same bounds and
/// sharing semantics as [`AccountDirectory`].
pub trait BlobStore: Clone + Send + Sync + 'static {
    /// Store sealed bytes under a fresh handle.
    ///
    /// # Errors
    ///
    /// - `HandleCollision`: the handle already holds data
    fn put(&self, handle: &str, sealed: Vec<u8>) -> Result<(), StoreError>;

    /// Sealed bytes for a handle. `None` if absent.
    fn get(&self, handle: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Remove a blob. Returns whether it existed.
    fn remove_blob(&self, handle: &str) -> Result<bool, StoreError>;
}
