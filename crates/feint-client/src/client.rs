//! Mailbox client operations.
//!
//! [`MailboxClient`] is the single entry point the UI layer talks to. It
//! owns the environment and the three store handles, seals every payload
//! before a store sees it, and short-circuits each operation on a decoy
//! session before any store is reached.

use feint_core::{
    env::Environment,
    gate,
    message::{
        AttachmentMeta, DECOY_MESSAGE_ID, DISCARDED_MESSAGE_ID, MAX_ATTACHMENT_BYTES,
        MESSAGE_TTL_SECS, MessageId, MessageRecord,
    },
    session::{Admission, Session},
    store::{AccountDirectory, BlobStore, MessageStore, StoreError},
};
use feint_crypto::{
    CipherKey, Fingerprint, KeyDomain, NONCE_SIZE, derive_key, open_bytes, open_text, seal_bytes,
    seal_text,
};

use crate::{
    decoy,
    error::ClientError,
    view::{InboxEntry, OutgoingAttachment},
};

/// Placeholder rendered for a sealed field that fails to open.
///
/// Open failures are recovered per field: the entry is still listed, the
/// affected field shows this text.
pub const DECRYPT_FAILED_PLACEHOLDER: &str = "[Decryption failed]";

/// Number of random bytes in a blob handle.
const BLOB_HANDLE_RANDOM_SIZE: usize = 16;

/// Client for one Feint deployment.
///
/// Holds the environment (clock + RNG) and cloneable handles to the
/// account directory, message store, and blob store. Plaintext never
/// crosses into a store: bodies, sender names, and attachments are sealed
/// here, under keys derived from the recipient's identity fingerprint.
///
/// Operations that take a [`Session`] check its decoy flag first. A decoy
/// session gets the same response shapes a real one does, produced
/// locally, with zero store traffic.
#[derive(Clone)]
pub struct MailboxClient<E, D, M, B>
where
    E: Environment,
    D: AccountDirectory,
    M: MessageStore,
    B: BlobStore,
{
    env: E,
    directory: D,
    messages: M,
    blobs: B,
}

impl<E, D, M, B> MailboxClient<E, D, M, B>
where
    E: Environment,
    D: AccountDirectory,
    M: MessageStore,
    B: BlobStore,
{
    /// Create a client over the given environment and stores.
    pub fn new(env: E, directory: D, messages: M, blobs: B) -> Self {
        Self { env, directory, messages, blobs }
    }

    /// Whether an identity is still free to register.
    ///
    /// # Errors
    ///
    /// - `Store`: the directory backend failed
    pub fn check_identity(&self, identity: &str) -> Result<bool, ClientError> {
        Ok(!self.lookup(identity)?)
    }

    /// Claim an identity with a credential.
    ///
    /// Only the two fingerprints reach the directory; the identity and
    /// credential strings stay on the device.
    ///
    /// # Errors
    ///
    /// - `MalformedCredential`: credential is not the required shape
    /// - `IdentityTaken`: the identity fingerprint is already claimed
    /// - `Store`: the directory backend failed
    pub fn register(&self, identity: &str, credential: &str) -> Result<(), ClientError> {
        if !gate::is_valid_credential(credential) {
            return Err(ClientError::MalformedCredential { expected: gate::CREDENTIAL_LEN });
        }

        let identity_fp = Fingerprint::of_identity(identity);
        let credential_fp = Fingerprint::of_identity(credential);

        match self.directory.claim(&identity_fp, &credential_fp) {
            Ok(()) => {
                tracing::info!(identity = %identity_fp, "account_registered");
                Ok(())
            },
            Err(StoreError::AlreadyRegistered) => Err(ClientError::IdentityTaken),
            Err(err) => Err(ClientError::Store(err)),
        }
    }

    /// Whether an identity exists.
    ///
    /// Pre-gate probe for the sign-in screen. Deliberately not consulted
    /// by [`unlock`](Self::unlock): the gate admits unknown identities
    /// into the decoy surface regardless of what this returns.
    ///
    /// # Errors
    ///
    /// - `Store`: the directory backend failed
    pub fn lookup(&self, identity: &str) -> Result<bool, ClientError> {
        let identity_fp = Fingerprint::of_identity(identity);
        Ok(self.directory.credential_for(&identity_fp)?.is_some())
    }

    /// Run an unlock attempt through the deniable gate.
    ///
    /// Every well-formed attempt admits. The returned [`Admission`] says
    /// which surface was entered; nothing else about the outcome escapes.
    ///
    /// # Errors
    ///
    /// - `MalformedCredential`: credential is not the required shape
    /// - `Store`: the directory backend failed
    pub fn unlock(&self, identity: &str, credential: &str) -> Result<Admission, ClientError> {
        Ok(gate::admit(&self.directory, identity, credential)?)
    }

    /// Replace the account's credential.
    ///
    /// Decoy sessions report success without a store call.
    ///
    /// # Errors
    ///
    /// - `MalformedCredential`: the new credential is not the required
    ///   shape
    /// - `CredentialMismatch`: `old` does not match the stored digest
    /// - `Store`: the directory backend failed
    pub fn change_credential(
        &self,
        session: &Session,
        old: &str,
        new: &str,
    ) -> Result<(), ClientError> {
        if !gate::is_valid_credential(new) {
            return Err(ClientError::MalformedCredential { expected: gate::CREDENTIAL_LEN });
        }
        if session.is_decoy() {
            return Ok(());
        }

        let old_fp = Fingerprint::of_identity(old);
        let stored = self.directory.credential_for(&session.identity())?;
        // A vanished account and a wrong credential are the same failure
        // to the caller
        if stored.is_none_or(|stored| !old_fp.matches_ct(&stored)) {
            return Err(ClientError::CredentialMismatch);
        }

        let new_fp = Fingerprint::of_identity(new);
        self.directory.update_credential(&session.identity(), &new_fp)?;

        tracing::info!(identity = %session.identity(), "credential_changed");
        Ok(())
    }

    /// Destroy the account: inbox, attachment blobs, then the directory
    /// entry.
    ///
    /// Decoy sessions report success without a store call.
    ///
    /// # Errors
    ///
    /// - `CredentialMismatch`: `credential` does not match the stored
    ///   digest
    /// - `Store`: a store backend failed
    pub fn wipe(&self, session: &Session, credential: &str) -> Result<(), ClientError> {
        if session.is_decoy() {
            return Ok(());
        }

        let credential_fp = Fingerprint::of_identity(credential);
        let stored = self.directory.credential_for(&session.identity())?;
        if stored.is_none_or(|stored| !credential_fp.matches_ct(&stored)) {
            return Err(ClientError::CredentialMismatch);
        }

        let purged = self.messages.purge_recipient(&session.identity())?;
        for record in &purged {
            if let Some(meta) = &record.attachment {
                self.blobs.remove_blob(&meta.handle)?;
            }
        }
        self.directory.remove_account(&session.identity())?;

        tracing::info!(identity = %session.identity(), messages = purged.len(), "account_wiped");
        Ok(())
    }

    /// End a session, destroying its credential digest.
    ///
    /// Identical for real and decoy sessions; dropping a [`Session`]
    /// zeroizes the credential fingerprint it carries.
    pub fn sign_out(&self, session: Session) {
        drop(session);
    }

    /// Send a message, optionally with an attachment.
    ///
    /// The body and the sender's display name are sealed under the
    /// recipient's text key, the attachment under the recipient's file
    /// key, all before anything leaves the client.
    ///
    /// A decoy session reports id [`DECOY_MESSAGE_ID`] immediately. An
    /// unknown recipient is a silent discard: the caller sees the same
    /// success shape with id [`DISCARDED_MESSAGE_ID`], and only the audit
    /// log records what happened.
    ///
    /// # Errors
    ///
    /// - `AttachmentTooLarge`: attachment exceeds
    ///   [`MAX_ATTACHMENT_BYTES`]
    /// - `Store`: a store backend failed
    pub fn send(
        &self,
        session: &Session,
        recipient: &str,
        body: &str,
        attachment: Option<OutgoingAttachment>,
    ) -> Result<MessageId, ClientError> {
        // Local validation applies to both surfaces, so a decoy session
        // sees the same rejection a real one would
        if let Some(attachment) = &attachment
            && attachment.bytes.len() > MAX_ATTACHMENT_BYTES
        {
            return Err(ClientError::AttachmentTooLarge {
                max: MAX_ATTACHMENT_BYTES,
                actual: attachment.bytes.len(),
            });
        }
        if session.is_decoy() {
            return Ok(DECOY_MESSAGE_ID);
        }

        let recipient_fp = Fingerprint::of_identity(recipient);
        if self.directory.credential_for(&recipient_fp)?.is_none() {
            tracing::info!(
                recipient = %recipient_fp,
                reason = "recipient_not_found",
                "message_discarded"
            );
            return Ok(DISCARDED_MESSAGE_ID);
        }

        let text_key = derive_key(&recipient_fp, KeyDomain::Text);
        let sealed_body = seal_text(&text_key, self.mint_nonce(), body);
        let sealed_sender_name = seal_text(&text_key, self.mint_nonce(), session.display_name());

        let attachment_meta = match attachment {
            Some(attachment) => Some(self.upload_attachment(&recipient_fp, attachment)?),
            None => None,
        };

        let now = self.env.wall_clock_secs();
        let record = MessageRecord {
            recipient: recipient_fp,
            sender: session.identity(),
            sealed_sender_name,
            sealed_body,
            attachment: attachment_meta,
            created_at: now,
            expires_at: now + MESSAGE_TTL_SECS,
        };
        let id = self.messages.append(record)?;

        tracing::info!(recipient = %recipient_fp, id, "message_sent");
        Ok(id)
    }

    /// The session's inbox, newest first, decrypted.
    ///
    /// Real sessions read the message store, which prunes the inbox's
    /// expired rows on the way. Each sealed field is opened with the
    /// session's own identity fingerprint as the key seed; a field that
    /// fails to open renders [`DECRYPT_FAILED_PLACEHOLDER`] instead of
    /// failing the whole fetch.
    ///
    /// Decoy sessions get the fixed welcome inbox from [`decoy`].
    ///
    /// # Errors
    ///
    /// - `Store`: the message store backend failed
    pub fn inbox(&self, session: &Session) -> Result<Vec<InboxEntry>, ClientError> {
        if session.is_decoy() {
            return Ok(decoy::decoy_inbox(&self.env));
        }

        let now = self.env.wall_clock_secs();
        let rows = self.messages.inbox_of(&session.identity(), now)?;

        // One key derivation for the whole fetch; per message it is just
        // an AEAD open
        let text_key = derive_key(&session.identity(), KeyDomain::Text);
        let entries = rows
            .into_iter()
            .map(|stored| InboxEntry {
                id: stored.id,
                sender_name: open_or_placeholder(&text_key, &stored.record.sealed_sender_name),
                body: open_or_placeholder(&text_key, &stored.record.sealed_body),
                attachment: stored.record.attachment,
                created_at: stored.record.created_at,
                expires_at: stored.record.expires_at,
            })
            .collect();

        Ok(entries)
    }

    /// Download and open an attachment.
    ///
    /// Unlike text fields there is no placeholder for files: any failure
    /// refuses the download.
    ///
    /// # Errors
    ///
    /// - `AttachmentUnavailable`: no blob under this handle (always the
    ///   case for decoy sessions, which never reach the store)
    /// - `Envelope`: the blob failed authenticated decryption
    /// - `Store`: the blob store backend failed
    pub fn fetch_attachment(
        &self,
        session: &Session,
        meta: &AttachmentMeta,
    ) -> Result<Vec<u8>, ClientError> {
        if session.is_decoy() {
            return Err(ClientError::AttachmentUnavailable);
        }

        let Some(sealed) = self.blobs.get(&meta.handle)? else {
            return Err(ClientError::AttachmentUnavailable);
        };

        let file_key = derive_key(&session.identity(), KeyDomain::File);
        Ok(open_bytes(&file_key, &sealed)?)
    }

    /// Delete one of the session's own messages, along with its
    /// attachment blob.
    ///
    /// Recipient-scoped: an id belonging to another inbox deletes
    /// nothing and returns `false`. Decoy sessions report `true` without
    /// a store call.
    ///
    /// # Errors
    ///
    /// - `Store`: a store backend failed
    pub fn delete(&self, session: &Session, id: MessageId) -> Result<bool, ClientError> {
        if session.is_decoy() {
            return Ok(true);
        }

        let Some(removed) = self.messages.delete_message(&session.identity(), id)? else {
            return Ok(false);
        };
        if let Some(meta) = &removed.attachment {
            self.blobs.remove_blob(&meta.handle)?;
        }

        tracing::info!(identity = %session.identity(), id, "message_deleted");
        Ok(true)
    }

    /// Sweep expired messages and their attachment blobs.
    ///
    /// Maintenance entry point, the counterpart of the per-inbox pruning
    /// that happens on fetch. Returns how many messages were removed.
    ///
    /// # Errors
    ///
    /// - `Store`: a store backend failed
    pub fn prune_expired(&self) -> Result<usize, ClientError> {
        let now = self.env.wall_clock_secs();
        let removed = self.messages.delete_expired(now)?;
        for record in &removed {
            if let Some(meta) = &record.attachment {
                self.blobs.remove_blob(&meta.handle)?;
            }
        }

        if !removed.is_empty() {
            tracing::info!(count = removed.len(), "expired_pruned");
        }
        Ok(removed.len())
    }

    fn upload_attachment(
        &self,
        recipient: &Fingerprint,
        attachment: OutgoingAttachment,
    ) -> Result<AttachmentMeta, ClientError> {
        let file_key = derive_key(recipient, KeyDomain::File);
        let size = attachment.bytes.len() as u64;
        let sealed = seal_bytes(&file_key, self.mint_nonce(), &attachment.bytes);

        let handle = self.mint_blob_handle();
        self.blobs.put(&handle, sealed)?;

        Ok(AttachmentMeta { handle, name: attachment.name, size })
    }

    fn mint_nonce(&self) -> [u8; NONCE_SIZE] {
        let mut nonce = [0u8; NONCE_SIZE];
        self.env.random_bytes(&mut nonce);
        nonce
    }

    /// Random, non-identifying blob handle (`{hex}.enc`).
    fn mint_blob_handle(&self) -> String {
        let mut raw = [0u8; BLOB_HANDLE_RANDOM_SIZE];
        self.env.random_bytes(&mut raw);
        format!("{}.enc", hex::encode(raw))
    }
}

fn open_or_placeholder(key: &CipherKey, armored: &str) -> String {
    open_text(key, armored).unwrap_or_else(|_| DECRYPT_FAILED_PLACEHOLDER.to_string())
}
