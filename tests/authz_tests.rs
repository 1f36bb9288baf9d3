//! Authorization tests: ownership checks and field redaction

use armory::authz::{can_mutate, project_character, CharacterView};
use armory::db::characters::Character;

fn sample_character() -> Character {
    Character {
        character_code: 42,
        character_name: "warlock".to_string(),
        user_code: 10,
        health: 500,
        power: 100,
        money: 10000,
    }
}

#[test]
fn test_owner_may_mutate() {
    assert!(can_mutate(10, 10));
}

#[test]
fn test_non_owner_may_not_mutate() {
    assert!(!can_mutate(11, 10));
    assert!(!can_mutate(0, 10));
}

#[test]
fn test_owner_projection_includes_money() {
    let view = project_character(Some(10), &sample_character());
    assert!(matches!(view, CharacterView::Owner(_)));

    let json = serde_json::to_value(&view).expect("serialize view");
    assert_eq!(json["money"], 10000);
}

#[test]
fn test_non_owner_projection_omits_money_entirely() {
    let view = project_character(Some(11), &sample_character());
    assert!(matches!(view, CharacterView::Public(_)));

    let json = serde_json::to_value(&view).expect("serialize view");
    // Absent, not null and not zero.
    assert!(!json.as_object().expect("object").contains_key("money"));
}

#[test]
fn test_anonymous_projection_omits_money_entirely() {
    let view = project_character(None, &sample_character());
    let json = serde_json::to_value(&view).expect("serialize view");
    assert!(!json.as_object().expect("object").contains_key("money"));
}

#[test]
fn test_projection_keeps_shared_fields() {
    let owner = serde_json::to_value(project_character(Some(10), &sample_character())).unwrap();
    let public = serde_json::to_value(project_character(Some(11), &sample_character())).unwrap();

    for key in ["userCode", "characterName", "health", "power"] {
        assert_eq!(owner[key], public[key], "field {} differs between views", key);
    }
}

#[test]
fn test_repeated_projection_returns_identical_field_sets() {
    let character = sample_character();

    let first = serde_json::to_value(project_character(Some(11), &character)).unwrap();
    let second = serde_json::to_value(project_character(Some(11), &character)).unwrap();
    assert_eq!(first, second);

    let owner_first = serde_json::to_value(project_character(Some(10), &character)).unwrap();
    let owner_second = serde_json::to_value(project_character(Some(10), &character)).unwrap();
    assert_eq!(owner_first, owner_second);
}
