//! Storage error types.
//!
//! Defines errors that can occur against the backing stores:
//! - `AlreadyRegistered`: identity fingerprint is already claimed
//! - `AccountNotFound`: directory operation on a missing identity
//! - `HandleCollision`: blob handle already in use
//! - `Backend`: underlying storage system errors

use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Identity fingerprint is already claimed in the directory
    #[error("identity already registered")]
    AlreadyRegistered,

    /// Directory operation targeted an identity with no entry
    #[error("account not found")]
    AccountNotFound,

    /// Blob handle already holds data
    ///
    /// Handles are minted from 128 bits of randomness, so a collision in
    /// practice means the same handle was uploaded twice.
    #[error("blob handle collision: {handle}")]
    HandleCollision {
        /// The colliding handle
        handle: String,
    },

    /// I/O error (file system, database, etc.)
    #[error("storage backend error: {0}")]
    Backend(String),
}
