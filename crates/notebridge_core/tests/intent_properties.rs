use chrono::{Duration, TimeZone, Utc};
use notebridge_core::{InMemoryNoteStore, ManualClock, NoteIntentService, NoteStore};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

fn service() -> (NoteIntentService<InMemoryNoteStore>, Arc<ManualClock>) {
    let start = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let service = NoteIntentService::with_clock(InMemoryNoteStore::new(), clock.clone());
    (service, clock)
}

fn add(note_id: &str, content: &str, from: Option<&str>) -> Value {
    let mut data = json!({ "noteId": note_id, "content": content });
    if let Some(from) = from {
        data["from"] = json!(from);
    }
    json!({ "type": "fdc3.note", "id": data })
}

fn remove(note_id: &str) -> Value {
    json!({ "type": "fdc3.note", "id": { "noteId": note_id } })
}

fn id_set(service: &NoteIntentService<InMemoryNoteStore>) -> BTreeSet<String> {
    service.store().list().iter().map(|note| note.id.clone()).collect()
}

#[test]
fn fresh_add_grows_collection_by_one() {
    let (mut service, _) = service();
    service.handle_add_note(&add("a", "alpha", None));

    let result = service.handle_add_note(&add("b", "beta", None));
    assert!(result.is_success());
    assert_eq!(service.store().len(), 2);
    assert_eq!(service.store().get("b").unwrap().content, "beta");
}

#[test]
fn re_add_updates_in_place_and_refreshes_timestamp() {
    let (mut service, clock) = service();
    service.handle_add_note(&add("n1", "Hello", Some("Alice")));
    let first_timestamp = service.store().get("n1").unwrap().timestamp;

    clock.advance(Duration::seconds(30));
    let result = service.handle_add_note(&add("n1", "Hello, edited", Some("Bob")));

    assert_eq!(result.note_id(), Some("n1"));
    assert_eq!(service.store().len(), 1);
    let note = service.store().get("n1").unwrap();
    assert_eq!(note.content, "Hello, edited");
    assert_eq!(note.from.as_deref(), Some("Bob"));
    assert_eq!(note.timestamp, first_timestamp + Duration::seconds(30));
}

#[test]
fn re_add_without_origin_clears_previous_origin() {
    let (mut service, _) = service();
    service.handle_add_note(&add("n1", "Hello", Some("Alice")));
    service.handle_add_note(&add("n1", "Hello again", None));

    let note = service.store().get("n1").unwrap();
    assert_eq!(note.content, "Hello again");
    assert_eq!(note.from, None);
}

#[test]
fn re_add_with_empty_origin_overwrites_previous_origin() {
    let (mut service, _) = service();
    service.handle_add_note(&add("n1", "Hello", Some("Alice")));
    service.handle_add_note(&add("n1", "Hello", Some("")));

    let note = service.store().get("n1").unwrap();
    assert_eq!(note.from.as_deref(), Some(""));
    assert_eq!(service.store().len(), 1);
}

#[test]
fn wrong_context_type_is_rejected_without_mutation() {
    let (mut service, _) = service();
    service.handle_add_note(&add("keep", "kept", None));
    let before = service.store().clone();

    let result = service.handle_add_note(&json!({
        "type": "fdc3.instrument",
        "id": { "noteId": "n1", "content": "Hello" }
    }));

    assert!(!result.is_success());
    let message = result.error_message().unwrap();
    assert!(message.contains("'fdc3.note'"));
    assert!(message.contains("'fdc3.instrument'"));
    assert_eq!(service.store(), &before);

    let result = service.handle_remove_note(&json!({
        "type": "fdc3.instrument",
        "id": { "noteId": "keep" }
    }));
    assert!(!result.is_success());
    assert_eq!(service.store(), &before);
}

#[test]
fn missing_fields_are_rejected_without_mutation() {
    let (mut service, _) = service();

    for context in [
        json!({ "type": "fdc3.note", "id": { "noteId": "n1" } }),
        json!({ "type": "fdc3.note", "id": { "content": "orphan" } }),
        json!({ "type": "fdc3.note", "id": { "noteId": "", "content": "x" } }),
        json!({ "type": "fdc3.note" }),
    ] {
        let result = service.handle_add_note(&context);
        assert_eq!(
            result.error_message(),
            Some("Missing required fields: id.noteId and id.content must be provided")
        );
    }
    assert!(service.store().is_empty());

    let result = service.handle_remove_note(&json!({ "type": "fdc3.note", "id": {} }));
    assert_eq!(
        result.error_message(),
        Some("Missing required field: id.noteId must be provided")
    );
}

#[test]
fn removing_unknown_id_succeeds_without_mutation() {
    let (mut service, _) = service();
    service.handle_add_note(&add("a", "alpha", None));

    let result = service.handle_remove_note(&remove("ghost"));

    assert!(result.is_success());
    assert_eq!(result.note_id(), Some("ghost"));
    assert_eq!(service.store().len(), 1);
}

#[test]
fn removing_present_id_shrinks_collection_by_one() {
    let (mut service, _) = service();
    service.handle_add_note(&add("a", "alpha", None));
    service.handle_add_note(&add("b", "beta", None));

    let result = service.handle_remove_note(&remove("a"));

    assert!(result.is_success());
    assert_eq!(service.store().len(), 1);
    assert!(service.store().get("a").is_none());
}

#[test]
fn repeated_add_is_idempotent_by_content() {
    let (mut once, _) = service();
    once.handle_add_note(&add("n1", "Hello", Some("Alice")));

    let (mut twice, clock) = service();
    twice.handle_add_note(&add("n1", "Hello", Some("Alice")));
    clock.advance(Duration::milliseconds(250));
    twice.handle_add_note(&add("n1", "Hello", Some("Alice")));

    let strip = |service: &NoteIntentService<InMemoryNoteStore>| {
        service
            .store()
            .list()
            .iter()
            .map(|note| (note.id.clone(), note.content.clone(), note.from.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&once), strip(&twice));
}

#[test]
fn add_then_remove_restores_id_set() {
    let (mut service, _) = service();
    service.handle_add_note(&add("a", "alpha", None));
    let before = id_set(&service);

    service.handle_add_note(&add("n1", "Hello", Some("Alice")));
    service.handle_remove_note(&remove("n1"));

    assert_eq!(id_set(&service), before);
}

#[test]
fn example_scenario_matches_wire_results() {
    let (mut service, _) = service();

    let added = service.handle_add_note(&add("n1", "Hello", Some("Alice")));
    assert_eq!(
        added.to_value(),
        json!({ "type": "fdc3.note", "name": "SUCCESS", "id": { "noteId": "n1" } })
    );
    let stored = serde_json::to_value(service.store().list()).unwrap();
    assert_eq!(
        stored,
        json!([{
            "id": "n1",
            "content": "Hello",
            "from": "Alice",
            "timestamp": "2026-10-18T08:00:00.000Z"
        }])
    );

    let removed = service.handle_remove_note(&remove("n1"));
    assert_eq!(
        removed.to_value(),
        json!({ "type": "fdc3.note", "name": "SUCCESS", "id": { "noteId": "n1" } })
    );
    assert!(service.store().is_empty());
}
