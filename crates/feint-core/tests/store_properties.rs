//! Property-based tests for the in-memory store
//!
//! These tests verify expiry and scoping invariants for ALL message
//! interleavings, not just specific examples. Uses proptest to generate
//! arbitrary batches of sealed records and verify what an inbox read can
//! ever observe.

use feint_core::{
    MESSAGE_TTL_SECS, MemoryStore, MessageRecord, MessageStore as _, StoredMessage,
};
use feint_crypto::Fingerprint;
use proptest::prelude::*;

/// Strategy for generating a sealed record with an arbitrary timestamp
fn arbitrary_record() -> impl Strategy<Value = MessageRecord> {
    (0u64..2_000_000, prop_oneof![Just("alice"), Just("bob"), Just("carol")]).prop_map(
        |(created_at, recipient)| MessageRecord {
            recipient: Fingerprint::of_identity(recipient),
            sender: Fingerprint::of_identity("sender"),
            sealed_sender_name: "bmFtZQ==".to_string(),
            sealed_body: "Ym9keQ==".to_string(),
            attachment: None,
            created_at,
            expires_at: created_at + MESSAGE_TTL_SECS,
        },
    )
}

fn is_newest_first(rows: &[StoredMessage]) -> bool {
    rows.windows(2).all(|pair| {
        pair[0].record.created_at > pair[1].record.created_at
            || (pair[0].record.created_at == pair[1].record.created_at
                && pair[0].id > pair[1].id)
    })
}

#[test]
fn prop_inbox_never_shows_expired_rows() {
    proptest!(|(
        records in prop::collection::vec(arbitrary_record(), 0..40),
        now in 0u64..4_000_000,
    )| {
        let store = MemoryStore::new();
        for record in records {
            store.append(record).expect("append");
        }

        let inbox = store.inbox_of(&Fingerprint::of_identity("alice"), now).expect("inbox");

        // PROPERTY: No expired row is ever observable
        prop_assert!(inbox.iter().all(|stored| !stored.record.is_expired(now)));
    });
}

#[test]
fn prop_inbox_is_recipient_scoped_and_ordered() {
    proptest!(|(records in prop::collection::vec(arbitrary_record(), 0..40))| {
        let store = MemoryStore::new();
        let alice = Fingerprint::of_identity("alice");
        let expected = records
            .iter()
            .filter(|record| record.recipient == alice)
            .count();

        for record in records {
            store.append(record).expect("append");
        }

        // Read before anything can expire
        let inbox = store.inbox_of(&alice, 0).expect("inbox");

        // PROPERTY: Exactly the recipient's rows come back, newest first
        prop_assert_eq!(inbox.len(), expected);
        prop_assert!(inbox.iter().all(|stored| stored.record.recipient == alice));
        prop_assert!(is_newest_first(&inbox));
    });
}

#[test]
fn prop_ids_are_positive_and_strictly_increasing() {
    proptest!(|(records in prop::collection::vec(arbitrary_record(), 1..40))| {
        let store = MemoryStore::new();

        let mut last = 0;
        for record in records {
            let id = store.append(record).expect("append");

            // PROPERTY: Ids never collide with the client sentinels (0, -1)
            // and never repeat
            prop_assert!(id > last);
            last = id;
        }
    });
}

#[test]
fn prop_delete_expired_removes_exactly_the_expired() {
    proptest!(|(
        records in prop::collection::vec(arbitrary_record(), 0..40),
        now in 0u64..4_000_000,
    )| {
        let store = MemoryStore::new();
        let expired = records.iter().filter(|record| record.is_expired(now)).count();

        for record in records {
            store.append(record).expect("append");
        }
        let before = store.message_count();

        let removed = store.delete_expired(now).expect("cleanup");

        // PROPERTY: The records returned are exactly the rows dropped
        prop_assert_eq!(removed.len(), expired);
        prop_assert!(removed.iter().all(|record| record.is_expired(now)));
        prop_assert_eq!(store.message_count(), before - removed.len());
    });
}
