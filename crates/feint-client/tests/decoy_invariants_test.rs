//! Invariants of the decoy surface.
//!
//! The deniability story rests on two properties:
//!
//! 1. A decoy session produces the same response shapes a real session
//!    does, so nothing on screen gives it away.
//! 2. A decoy session generates zero store traffic after admission, so
//!    nothing observable at the backend gives it away either.
//!
//! `MemoryStore` counts every trait call, which makes the second property
//! directly checkable: run a full session script and assert the counters
//! never moved.

use feint_client::{
    ClientError, Environment, MailboxClient, ManualEnv, OutgoingAttachment, Session,
    decoy::{DECOY_SENDER_NAME, DECOY_WELCOME_BODY},
};
use feint_core::{
    message::{AttachmentMeta, DECOY_MESSAGE_ID, MESSAGE_TTL_SECS},
    store::MemoryStore,
};

type TestClient = MailboxClient<ManualEnv, MemoryStore, MemoryStore, MemoryStore>;

fn harness() -> (ManualEnv, MemoryStore, TestClient) {
    let env = ManualEnv::with_seed_at(42, 1_700_000_000);
    let store = MemoryStore::new();
    let client = MailboxClient::new(env.clone(), store.clone(), store.clone(), store.clone());
    (env, store, client)
}

/// Every operation the UI can issue, driven against one session.
fn run_full_script(client: &TestClient, session: &Session) {
    client.inbox(session).expect("inbox");
    client.send(session, "alice", "hello", None).expect("send");

    let attachment = OutgoingAttachment { name: "f.bin".to_string(), bytes: vec![1; 256] };
    client.send(session, "alice", "with file", Some(attachment)).expect("send attachment");

    client.delete(session, 1).expect("delete");
    client.change_credential(session, "00000", "11111").expect("change");

    let meta =
        AttachmentMeta { handle: "feedface.enc".to_string(), name: "f.bin".to_string(), size: 256 };
    let _ = client.fetch_attachment(session, &meta);

    client.wipe(session, "00000").expect("wipe");
}

#[test]
fn decoy_script_generates_zero_store_traffic() {
    let (_env, store, client) = harness();
    client.register("alice", "12345").expect("register");

    // Wrong credential against a real account: admitted, decoy
    let admission = client.unlock("alice", "54321").expect("unlock");
    assert!(!admission.is_real());
    let session = admission.into_session();

    let ops_after_unlock = store.op_count();
    let mutations_after_unlock = store.mutation_count();

    run_full_script(&client, &session);
    client.sign_out(session);

    // Not one store call in the whole script
    assert_eq!(store.op_count(), ops_after_unlock);
    assert_eq!(store.mutation_count(), mutations_after_unlock);
    assert_eq!(store.account_count(), 1);
    assert_eq!(store.message_count(), 0);
    assert_eq!(store.blob_count(), 0);
}

#[test]
fn unknown_identity_admission_costs_one_lookup_then_nothing() {
    let (_env, store, client) = harness();

    let admission = client.unlock("ghost", "12345").expect("unlock");
    assert!(!admission.is_real());

    // The gate did its single directory lookup and nothing else
    assert_eq!(store.op_count(), 1);
    assert_eq!(store.mutation_count(), 0);

    run_full_script(&client, admission.session());
    assert_eq!(store.op_count(), 1);
    assert_eq!(store.mutation_count(), 0);
}

#[test]
fn decoy_inbox_is_the_fixed_welcome_message() {
    let (env, _store, client) = harness();
    client.register("alice", "12345").expect("register");

    let session = client.unlock("alice", "99999").expect("unlock").into_session();
    let inbox = client.inbox(&session).expect("inbox");

    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, DECOY_MESSAGE_ID);
    assert_eq!(inbox[0].sender_name, DECOY_SENDER_NAME);
    assert_eq!(inbox[0].body, DECOY_WELCOME_BODY);
    assert!(inbox[0].attachment.is_none());
    assert_eq!(inbox[0].created_at, env.wall_clock_secs());
    assert_eq!(inbox[0].expires_at, env.wall_clock_secs() + MESSAGE_TTL_SECS);
}

#[test]
fn decoy_welcome_is_always_fresh() {
    let (env, _store, client) = harness();

    let session = client.unlock("ghost", "12345").expect("unlock").into_session();

    let first = client.inbox(&session).expect("inbox");
    env.advance_secs(MESSAGE_TTL_SECS * 2);
    let later = client.inbox(&session).expect("inbox");

    // The welcome message rides the clock instead of expiring
    assert_eq!(later[0].created_at, first[0].created_at + MESSAGE_TTL_SECS * 2);
}

#[test]
fn decoy_mutations_report_the_real_success_shapes() {
    let (_env, _store, client) = harness();

    let session = client.unlock("ghost", "12345").expect("unlock").into_session();

    assert_eq!(client.send(&session, "anyone", "hi", None).expect("send"), DECOY_MESSAGE_ID);
    assert!(client.delete(&session, 7).expect("delete"));
    client.change_credential(&session, "12345", "67890").expect("change");
    client.wipe(&session, "12345").expect("wipe");
}

#[test]
fn decoy_attachment_fetch_refuses() {
    let (_env, _store, client) = harness();

    let session = client.unlock("ghost", "12345").expect("unlock").into_session();
    let meta = AttachmentMeta {
        handle: "0123abcd.enc".to_string(),
        name: "secret.pdf".to_string(),
        size: 100,
    };

    let result = client.fetch_attachment(&session, &meta);
    assert_eq!(result, Err(ClientError::AttachmentUnavailable));
}

#[test]
fn malformed_credentials_reject_identically_on_both_paths() {
    let (_env, _store, client) = harness();
    client.register("alice", "12345").expect("register");

    for credential in ["1234", "123456", "12 45", "abcde", ""] {
        let known = client.unlock("alice", credential).expect_err("should reject");
        let unknown = client.unlock("ghost", credential).expect_err("should reject");

        // Same error either way; the shape check precedes the lookup
        assert_eq!(known, ClientError::MalformedCredential { expected: 5 });
        assert_eq!(unknown, ClientError::MalformedCredential { expected: 5 });
    }
}

#[test]
fn decoy_and_real_sessions_are_structurally_alike() {
    let (_env, _store, client) = harness();
    client.register("alice", "12345").expect("register");
    client.register("bob", "54321").expect("register");

    let real = client.unlock("alice", "12345").expect("unlock").into_session();
    let decoy = client.unlock("carol", "11111").expect("unlock").into_session();

    // Both sessions drive the same operations and get the same shapes
    let real_send = client.send(&real, "bob", "hello", None).expect("send");
    let decoy_send = client.send(&decoy, "bob", "hello", None).expect("send");
    assert!(real_send > 0);
    assert_eq!(decoy_send, DECOY_MESSAGE_ID);

    // An empty real inbox and the decoy welcome render through the same
    // view type; only the content differs
    assert!(client.inbox(&real).expect("inbox").is_empty());
    assert_eq!(client.inbox(&decoy).expect("inbox").len(), 1);
}
