use visadesk_engine::{FieldKey, FieldOutcome, LocationFieldState, Panel};
use visadesk_registry::LocationRegistry;

fn field() -> LocationFieldState {
    let registry = LocationRegistry::from_embedded().expect("embedded table");
    LocationFieldState::new(registry, "")
}

#[test]
fn queries_below_two_characters_never_match() {
    let mut field = field();
    for query in ["", "a", "S", " x "] {
        field.input_changed(query);
        assert!(field.matches().is_empty(), "query {query:?}");
        if !query.is_empty() {
            assert_eq!(field.panel(), Panel::TypeMore);
        }
    }
}

#[test]
fn every_match_contains_the_term() {
    let mut field = field();
    for query in ["sa", "SPRING", "ton", "new y"] {
        field.input_changed(query);
        let term = query.to_lowercase();
        for location in field.matches() {
            assert!(location.city.to_lowercase().contains(&term), "{} !~ {query}", location.city);
        }
    }
}

#[test]
fn highlight_follows_modular_arithmetic() {
    let mut field = field();
    field.input_changed("san");
    let len = field.matches().len();
    assert!(len > 1);

    field.key(FieldKey::Down);
    for presses in 1..=(2 * len + 3) {
        field.key(FieldKey::Down);
        assert_eq!(field.highlight(), Some(presses % len));
    }
    let current = field.highlight().unwrap_or_default();
    for presses in 1..=(len + 2) {
        field.key(FieldKey::Up);
        assert_eq!(field.highlight(), Some((current + len * 3 - presses) % len));
    }
}

#[test]
fn selection_round_trips_through_committed_value() {
    let mut field = field();
    field.input_changed("spring");
    let labels: Vec<String> = field.matches().iter().map(|location| location.label()).collect();
    assert!(labels.len() > 3);
    for (index, expected) in labels.into_iter().enumerate() {
        field.input_changed("spring");
        let outcome = field.select(index);
        assert_eq!(outcome, FieldOutcome::Commit(expected.clone()));

        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let mut remounted = LocationFieldState::new(registry, "");
        remounted.external_value_changed(expected.clone());
        assert_eq!(remounted.query(), expected);
    }
}
