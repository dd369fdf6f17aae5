//! Message records and expiry rules
//!
//! Messages are ephemeral: every record carries an expiry stamp set at send
//! time, and stores prune expired rows before any inbox read. Bodies and
//! sender names are stored sealed (base64 envelopes from the recipient's
//! text key); attachments live in the blob store and the record only keeps
//! the handle.

use feint_crypto::Fingerprint;
use serde::{Deserialize, Serialize};

/// Identifier a message store assigns on append.
///
/// Two sentinel values never come from a store: [`DECOY_MESSAGE_ID`] and
/// [`DISCARDED_MESSAGE_ID`]. Real ids start at 1.
pub type MessageId = i64;

/// Id reported for sends inside a decoy session.
pub const DECOY_MESSAGE_ID: MessageId = 0;

/// Id reported when a send was silently discarded (unknown recipient).
///
/// The caller-visible shape is still success; this sentinel is the only
/// trace, and the UI treats it exactly like a real id.
pub const DISCARDED_MESSAGE_ID: MessageId = -1;

/// Message lifetime in seconds (24 hours).
pub const MESSAGE_TTL_SECS: u64 = 24 * 60 * 60;

/// Maximum attachment payload accepted for sending (10 MiB), measured on
/// the plaintext before sealing.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Metadata for a sealed attachment held in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    /// Blob store handle (`{hex}.enc`)
    pub handle: String,
    /// Original filename, as provided by the sender
    pub name: String,
    /// Size of the original file in bytes
    pub size: u64,
}

/// A sealed message as held by the message store.
///
/// Everything content-bearing is already encrypted when the record is
/// built; the store never sees plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Recipient's identity fingerprint (inbox key)
    pub recipient: Fingerprint,
    /// Sender's identity fingerprint
    pub sender: Fingerprint,
    /// Sender's display name, sealed under the recipient's text key
    pub sealed_sender_name: String,
    /// Message body, sealed under the recipient's text key
    pub sealed_body: String,
    /// Attachment metadata, if any
    pub attachment: Option<AttachmentMeta>,
    /// Unix seconds the message was accepted
    pub created_at: u64,
    /// Unix seconds after which the message is pruned
    pub expires_at: u64,
}

impl MessageRecord {
    /// True once the record has outlived its expiry stamp.
    ///
    /// Expiry is inclusive: a record expires the second its stamp is
    /// reached.
    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at <= now
    }
}

/// A record together with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Store-assigned id, unique per store
    pub id: MessageId,
    /// The sealed record
    pub record: MessageRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(created_at: u64) -> MessageRecord {
        MessageRecord {
            recipient: Fingerprint::of_identity("alice"),
            sender: Fingerprint::of_identity("bob"),
            sealed_sender_name: "c2VhbGVk".to_string(),
            sealed_body: "c2VhbGVkLWJvZHk=".to_string(),
            attachment: None,
            created_at,
            expires_at: created_at + MESSAGE_TTL_SECS,
        }
    }

    #[test]
    fn ttl_is_24_hours() {
        assert_eq!(MESSAGE_TTL_SECS, 86_400);
    }

    #[test]
    fn sentinel_ids_are_outside_store_range() {
        // Stores assign ids from 1; both sentinels must stay below that
        assert!(DECOY_MESSAGE_ID < 1);
        assert!(DISCARDED_MESSAGE_ID < 1);
        assert_ne!(DECOY_MESSAGE_ID, DISCARDED_MESSAGE_ID);
    }

    #[test]
    fn fresh_record_is_not_expired() {
        let record = record(1_000);
        assert!(!record.is_expired(1_000));
        assert!(!record.is_expired(1_000 + MESSAGE_TTL_SECS - 1));
    }

    #[test]
    fn record_expires_exactly_at_stamp() {
        let record = record(1_000);
        assert!(record.is_expired(1_000 + MESSAGE_TTL_SECS));
        assert!(record.is_expired(2_000 + MESSAGE_TTL_SECS));
    }

    #[test]
    fn serde_roundtrip() {
        let record = MessageRecord {
            attachment: Some(AttachmentMeta {
                handle: "0011aabb.enc".to_string(),
                name: "photo.jpg".to_string(),
                size: 2048,
            }),
            ..record(42)
        };
        let stored = StoredMessage { id: 7, record };

        let json = serde_json::to_string(&stored).unwrap();
        let back: StoredMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stored);
    }
}
