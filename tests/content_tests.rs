/// Bundled content integration tests: loading, integrity and lint.

use encounter_engine::core::library::{EncounterLibrary, LoadError};
use encounter_engine::core::validate::{lint, validate, ContentIntegrityError};
use encounter_engine::schema::encounter::Encounter;
use std::path::Path;

#[test]
fn bundled_encounters_load() {
    let library = EncounterLibrary::load_dir(Path::new("content/encounters")).unwrap();
    let ids: Vec<&str> = library.ids().collect();
    assert_eq!(ids, vec!["angry_customer", "noisy_neighbor"]);

    let customer = library.get("angry_customer").unwrap();
    assert_eq!(customer.initial_values.reputation, 45);
    assert_eq!(customer.timer_seconds, Some(120));
    assert!(customer.has_mechanic("rush_hour"));
    assert!(!customer.has_mechanic("happy_hour"));
}

#[test]
fn bundled_encounters_lint_clean() {
    let library = EncounterLibrary::load_dir(Path::new("content/encounters")).unwrap();
    for id in library.ids() {
        let encounter = library.get(id).unwrap();
        let findings = lint(encounter);
        assert!(findings.is_empty(), "{}: {:?}", id, findings);
    }
}

#[test]
fn fixtures_load_and_validate() {
    let library = EncounterLibrary::load_dir(Path::new("tests/fixtures")).unwrap();
    assert_eq!(library.len(), 2);
    assert!(library.get("fixture_minimal").is_some());
    assert!(library.get("fixture_standoff").is_some());
}

#[test]
fn dangling_reference_in_ron_is_fatal() {
    let source = r#"#![enable(implicit_some)]
    (
        id: "broken",
        title: "Broken",
        difficulty: 2,
        initial_state: "a",
        states: {
            "a": (id: "a", name: "A", dialogue: "...", player_actions: [wait]),
        },
        transitions: [
            (from: "a", to: "b", action: wait),
        ],
    )"#;
    let encounter = Encounter::parse_ron(source).unwrap();
    assert!(matches!(
        validate(&encounter),
        Err(ContentIntegrityError::DanglingTransition { index: 0, field: "to", .. })
    ));

    let mut library = EncounterLibrary::new();
    let err = library.insert(encounter).unwrap_err();
    assert!(matches!(err, LoadError::Integrity(_)));
    assert!(err.to_string().contains("unknown state 'b'"), "{}", err);
}

#[test]
fn unknown_action_in_ron_fails_to_parse() {
    let source = r#"(
        id: "typo",
        title: "Typo",
        difficulty: 2,
        initial_state: "a",
        states: {
            "a": (id: "a", name: "A", dialogue: "...", player_actions: [shout]),
        },
    )"#;
    assert!(matches!(Encounter::parse_ron(source), Err(LoadError::Ron(_))));
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        Encounter::load_from_ron(Path::new("content/encounters/does_not_exist.ron")),
        Err(LoadError::Io(_))
    ));
}
