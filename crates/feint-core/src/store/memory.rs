use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use feint_crypto::Fingerprint;

use super::{AccountDirectory, BlobStore, MessageStore, StoreError};
use crate::message::{MessageId, MessageRecord, StoredMessage};

/// In-memory backend implementing all three store traits
///
/// Uses `HashMap` for directory and blobs and a Vec for ordered message
/// storage. All state is wrapped in Arc<Mutex<>> to allow Clone and
/// concurrent access. Thread-safe through Mutex, but uses `lock().expect()`
/// which will panic if the mutex is poisoned - acceptable for test code.
///
/// Every trait call increments an operation counter (mutating calls a
/// second one). The decoy invariant tests read these counters: a decoy
/// session must leave them exactly where they were.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

struct MemoryStoreInner {
    /// Identity fingerprint -> credential fingerprint
    accounts: HashMap<Fingerprint, Fingerprint>,

    /// Sealed messages in append order
    messages: Vec<StoredMessage>,

    /// Next id to assign (starts at 1; 0 and -1 are client sentinels)
    next_message_id: MessageId,

    /// Sealed attachment bytes by handle
    blobs: HashMap<String, Vec<u8>>,

    /// Total trait calls observed
    ops: u64,

    /// Mutating trait calls observed
    mutations: u64,
}

impl MemoryStore {
    /// Create a new empty `MemoryStore`
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryStoreInner {
                accounts: HashMap::new(),
                messages: Vec::new(),
                next_message_id: 1,
                blobs: HashMap::new(),
                ops: 0,
                mutations: 0,
            })),
        }
    }

    /// Total number of trait calls observed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a thread panicked while
    /// holding the lock). This is acceptable for test/simulation code.
    #[allow(clippy::expect_used)]
    pub fn op_count(&self) -> u64 {
        self.inner.lock().expect("Mutex poisoned").ops
    }

    /// Number of mutating trait calls observed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test/simulation code.
    #[allow(clippy::expect_used)]
    pub fn mutation_count(&self) -> u64 {
        self.inner.lock().expect("Mutex poisoned").mutations
    }

    /// Number of claimed identities.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test/simulation code.
    #[allow(clippy::expect_used)]
    pub fn account_count(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").accounts.len()
    }

    /// Number of stored messages (including expired rows not yet pruned).
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test/simulation code.
    #[allow(clippy::expect_used)]
    pub fn message_count(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").messages.len()
    }

    /// Number of stored blobs.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test/simulation code.
    #[allow(clippy::expect_used)]
    pub fn blob_count(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").blobs.len()
    }

    #[allow(clippy::expect_used)]
    fn locked(&self) -> std::sync::MutexGuard<'_, MemoryStoreInner> {
        self.inner.lock().expect("Mutex poisoned")
    }
}

impl MemoryStoreInner {
    fn record_read(&mut self) {
        self.ops += 1;
    }

    fn record_mutation(&mut self) {
        self.ops += 1;
        self.mutations += 1;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountDirectory for MemoryStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn credential_for(&self, identity: &Fingerprint) -> Result<Option<Fingerprint>, StoreError> {
        let mut inner = self.locked();
        inner.record_read();
        Ok(inner.accounts.get(identity).copied())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn claim(&self, identity: &Fingerprint, credential: &Fingerprint) -> Result<(), StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();

        if inner.accounts.contains_key(identity) {
            return Err(StoreError::AlreadyRegistered);
        }
        inner.accounts.insert(*identity, *credential);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn update_credential(
        &self,
        identity: &Fingerprint,
        credential: &Fingerprint,
    ) -> Result<(), StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();

        match inner.accounts.get_mut(identity) {
            Some(stored) => {
                *stored = *credential;
                Ok(())
            },
            None => Err(StoreError::AccountNotFound),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn remove_account(&self, identity: &Fingerprint) -> Result<(), StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();

        match inner.accounts.remove(identity) {
            Some(_) => Ok(()),
            None => Err(StoreError::AccountNotFound),
        }
    }
}

impl MessageStore for MemoryStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn append(&self, record: MessageRecord) -> Result<MessageId, StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();

        let id = inner.next_message_id;
        inner.next_message_id += 1;
        inner.messages.push(StoredMessage { id, record });

        debug_assert!(id >= 1);
        Ok(id)
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn inbox_of(
        &self,
        recipient: &Fingerprint,
        now: u64,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        let mut inner = self.locked();
        inner.record_read();

        // The recipient's expired rows go first so they can never be
        // observed. Other inboxes are left for the maintenance sweep,
        // which also cleans up attachment blobs.
        inner
            .messages
            .retain(|stored| !(stored.record.recipient == *recipient && stored.record.is_expired(now)));

        let mut rows: Vec<StoredMessage> = inner
            .messages
            .iter()
            .filter(|stored| stored.record.recipient == *recipient)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.record.created_at.cmp(&a.record.created_at).then(b.id.cmp(&a.id))
        });

        Ok(rows)
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn delete_expired(&self, now: u64) -> Result<Vec<MessageRecord>, StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();

        let (expired, kept): (Vec<StoredMessage>, Vec<StoredMessage>) =
            inner.messages.drain(..).partition(|stored| stored.record.is_expired(now));
        inner.messages = kept;

        Ok(expired.into_iter().map(|stored| stored.record).collect())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn delete_message(
        &self,
        recipient: &Fingerprint,
        id: MessageId,
    ) -> Result<Option<MessageRecord>, StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();

        let position = inner
            .messages
            .iter()
            .position(|stored| stored.id == id && stored.record.recipient == *recipient);
        Ok(position.map(|index| inner.messages.remove(index).record))
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn purge_recipient(&self, recipient: &Fingerprint) -> Result<Vec<MessageRecord>, StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();

        let (purged, kept): (Vec<StoredMessage>, Vec<StoredMessage>) = inner
            .messages
            .drain(..)
            .partition(|stored| stored.record.recipient == *recipient);
        inner.messages = kept;

        Ok(purged.into_iter().map(|stored| stored.record).collect())
    }
}

impl BlobStore for MemoryStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn put(&self, handle: &str, sealed: Vec<u8>) -> Result<(), StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();

        if inner.blobs.contains_key(handle) {
            return Err(StoreError::HandleCollision { handle: handle.to_string() });
        }
        inner.blobs.insert(handle.to_string(), sealed);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn get(&self, handle: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut inner = self.locked();
        inner.record_read();
        Ok(inner.blobs.get(handle).cloned())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test code.
    fn remove_blob(&self, handle: &str) -> Result<bool, StoreError> {
        let mut inner = self.locked();
        inner.record_mutation();
        Ok(inner.blobs.remove(handle).is_some())
    }
}
