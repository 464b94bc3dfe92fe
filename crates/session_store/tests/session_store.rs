use pretty_assertions::assert_eq;
use serde_json::json;
use session_store::{Message, Role, SessionKey, SessionStore};

fn assistant_with_steps(content: &str, steps: &[&str]) -> Message {
    Message::assistant(
        content,
        Some(steps.iter().map(|step| step.to_string()).collect()),
    )
}

#[test]
fn transcript_preserves_append_order() {
    let mut store = SessionStore::new();
    let key = SessionKey::new("ordering");
    let messages = vec![
        Message::user("one"),
        assistant_with_steps("two", &["a"]),
        Message::user("three"),
        Message::assistant("four", None),
        Message::user("five"),
    ];

    for message in messages.clone() {
        store.append_message(&key, message);
    }

    assert_eq!(store.get_transcript(&key), messages.as_slice());
}

#[test]
fn ensure_initialized_is_idempotent() {
    let key = SessionKey::new("idempotent");

    let mut once = SessionStore::new();
    once.ensure_initialized(&key);

    let mut many = SessionStore::new();
    for _ in 0..5 {
        many.ensure_initialized(&key);
    }

    assert!(once.contains(&key));
    assert!(many.contains(&key));
    assert_eq!(once.session_count(), many.session_count());
    assert_eq!(once.get_transcript(&key), many.get_transcript(&key));
    assert_eq!(once.get_steps(&key), many.get_steps(&key));
    assert!(many.get_transcript(&key).is_empty());
    assert!(many.get_steps(&key).is_empty());
}

#[test]
fn ensure_initialized_never_discards_existing_state() {
    let mut store = SessionStore::new();
    let key = SessionKey::default();

    store.append_message(&key, Message::user("keep me"));
    store.append_step(&key, "thinking");
    store.ensure_initialized(&key);

    assert_eq!(store.get_transcript(&key), &[Message::user("keep me")]);
    assert_eq!(store.get_steps(&key), &["thinking".to_string()]);
}

#[test]
fn uninitialized_key_reads_as_empty_without_error() {
    let store = SessionStore::new();
    let key = SessionKey::new("never-touched");

    assert!(store.get_transcript(&key).is_empty());
    assert!(store.get_steps(&key).is_empty());
    assert!(!store.contains(&key));
}

#[test]
fn clear_resets_transcript_and_steps_regardless_of_content() {
    let mut store = SessionStore::new();
    let key = SessionKey::new("clear-me");

    for index in 0..10 {
        store.append_message(&key, Message::user(format!("message {index}")));
    }
    store.set_steps(&key, vec!["step".to_string(), "another".to_string()]);

    store.clear(&key);

    assert!(store.get_transcript(&key).is_empty());
    assert!(store.get_steps(&key).is_empty());
    assert!(store.contains(&key));
}

#[test]
fn set_steps_replaces_step_log_wholesale() {
    let mut store = SessionStore::new();
    let key = SessionKey::new("steps");

    store.append_step(&key, "old one");
    store.append_step(&key, "old two");
    store.set_steps(&key, vec!["fresh".to_string()]);

    assert_eq!(store.get_steps(&key), &["fresh".to_string()]);

    store.set_steps(&key, Vec::new());
    assert!(store.get_steps(&key).is_empty());
}

#[test]
fn distinct_keys_are_isolated() {
    let mut store = SessionStore::new();
    let key_a = SessionKey::new("a");
    let key_b = SessionKey::new("b");

    for index in 0..4 {
        store.append_message(&key_a, Message::user(format!("a{index}")));
        if index < 3 {
            store.append_message(&key_b, Message::user(format!("b{index}")));
        }
    }
    store.append_step(&key_a, "only a");

    assert_eq!(store.get_transcript(&key_a).len(), 4);
    assert_eq!(store.get_transcript(&key_b).len(), 3);
    assert!(store
        .get_transcript(&key_b)
        .iter()
        .all(|message| message.content.starts_with('b')));
    assert!(store.get_steps(&key_b).is_empty());

    store.clear(&key_a);
    assert!(store.get_transcript(&key_a).is_empty());
    assert_eq!(store.get_transcript(&key_b).len(), 3);
}

#[test]
fn end_session_drops_key_state() {
    let mut store = SessionStore::new();
    let key = SessionKey::generate();

    store.append_message(&key, Message::user("transient"));
    assert!(store.end_session(&key));
    assert!(!store.contains(&key));
    assert!(store.get_transcript(&key).is_empty());
    assert!(!store.end_session(&key));
}

#[test]
fn messages_serialize_with_snake_case_roles_and_optional_steps() {
    let user = serde_json::to_value(Message::user("hello")).expect("serialize user message");
    assert_eq!(user, json!({ "role": "user", "content": "hello" }));

    let assistant = serde_json::to_value(assistant_with_steps("ANSWER", &["step1"]))
        .expect("serialize assistant message");
    assert_eq!(
        assistant,
        json!({ "role": "assistant", "content": "ANSWER", "steps": ["step1"] })
    );

    let parsed: Message = serde_json::from_value(json!({ "role": "assistant", "content": "x" }))
        .expect("deserialize message without steps");
    assert_eq!(parsed.role, Role::Assistant);
    assert_eq!(parsed.steps, None);
}
