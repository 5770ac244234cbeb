use checklist_core::{Todo, TodoDraft, TodoValidationError};
use uuid::Uuid;

#[test]
fn todo_new_sets_defaults() {
    let todo = Todo::new("Test Todo", "Test Description");

    assert!(!todo.id.is_nil());
    assert_eq!(todo.title, "Test Todo");
    assert_eq!(todo.description, "Test Description");
    assert!(!todo.is_complete);
    assert!(todo.created_at > 0);
}

#[test]
fn todos_with_identical_fields_are_equal() {
    let id = Uuid::new_v4();
    let mut first = Todo::with_id(id, "Test", "Desc", 1_728_000_000_000).unwrap();
    first.is_complete = true;
    let mut second = Todo::with_id(id, "Test", "Desc", 1_728_000_000_000).unwrap();
    second.is_complete = true;

    assert_eq!(first, second);

    second.description = "Other".to_string();
    assert_ne!(first, second);
}

#[test]
fn fresh_todos_get_distinct_ids() {
    let first = Todo::new("a", "");
    let second = Todo::new("a", "");
    assert_ne!(first.id, second.id);
    assert_ne!(first, second);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Todo::with_id(Uuid::nil(), "invalid", "", 0).unwrap_err();
    assert_eq!(err, TodoValidationError::NilId);
}

#[test]
fn validate_rejects_blank_title() {
    let mut todo = Todo::new("ok", "");
    assert!(todo.validate().is_ok());

    todo.title = "  ".to_string();
    assert_eq!(todo.validate().unwrap_err(), TodoValidationError::EmptyTitle);
    assert_eq!(
        TodoDraft::new("", "").validate().unwrap_err(),
        TodoValidationError::EmptyTitle
    );
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut todo = Todo::with_id(id, "Buy milk", "2 litres", 1_728_000_000_123).unwrap();
    todo.is_complete = true;

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["description"], "2 litres");
    assert_eq!(json["is_complete"], true);
    assert_eq!(json["created_at"], 1_728_000_000_123_i64);

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}
