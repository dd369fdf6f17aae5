//! View types handed to the UI layer.

use feint_core::message::{AttachmentMeta, MessageId};

/// A decrypted message as rendered in the inbox.
///
/// Sealed fields that fail to open carry
/// [`DECRYPT_FAILED_PLACEHOLDER`](crate::DECRYPT_FAILED_PLACEHOLDER)
/// instead of plaintext; the entry itself is still shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxEntry {
    /// Store id (0 for the decoy welcome message)
    pub id: MessageId,
    /// Sender's display name, decrypted
    pub sender_name: String,
    /// Message body, decrypted
    pub body: String,
    /// Attachment metadata, if the message carries one
    pub attachment: Option<AttachmentMeta>,
    /// Unix seconds the message was accepted
    pub created_at: u64,
    /// Unix seconds after which the message disappears
    pub expires_at: u64,
}

impl InboxEntry {
    /// Whether the message carries a downloadable attachment.
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }
}

/// A plaintext file handed to [`MailboxClient::send`](crate::MailboxClient::send).
///
/// The bytes are sealed before they leave the client; only the name and
/// size travel in the clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingAttachment {
    /// Filename shown to the recipient
    pub name: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}
