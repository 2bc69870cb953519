use visadesk_registry::{DEFAULT_RESULT_LIMIT, LocationRegistry};

fn registry() -> LocationRegistry {
    LocationRegistry::from_embedded().expect("load embedded table")
}

#[test]
fn every_match_contains_the_query() {
    let registry = registry();
    for query in ["sa", "SAN", "ville", "ort", "new", "spring", "st."] {
        let results = registry.search(query, usize::MAX);
        assert!(!results.is_empty(), "expected matches for {query:?}");
        let needle = query.to_lowercase();
        for location in &results {
            assert!(
                location.city.to_lowercase().contains(&needle),
                "{} does not contain {query:?}",
                location.city
            );
        }
    }
}

#[test]
fn same_city_in_several_states_is_returned_in_table_order() {
    let registry = registry();
    let labels: Vec<String> = registry
        .search("springfield", DEFAULT_RESULT_LIMIT)
        .iter()
        .map(|location| location.label())
        .collect();
    assert_eq!(labels, vec!["Springfield, MO", "Springfield, MA", "Springfield, IL"]);
}

#[test]
fn search_is_deterministic_and_limited() {
    let registry = registry();
    let first = registry.search("san", DEFAULT_RESULT_LIMIT);
    let second = registry.search("san", DEFAULT_RESULT_LIMIT);
    assert_eq!(first, second);
    assert_eq!(first.len(), DEFAULT_RESULT_LIMIT);
    assert_eq!(first[0].label(), "San Antonio, TX");
}

#[test]
fn unknown_cities_yield_nothing() {
    assert!(registry().search("xyzzy", DEFAULT_RESULT_LIMIT).is_empty());
}
