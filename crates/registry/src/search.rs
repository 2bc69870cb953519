//! In-memory location search.
//!
//! Matching is a case-insensitive substring test against the city name only,
//! so every result's city contains the query. Results are ranked by how the
//! query matches and ties keep reference-table order, which makes the output
//! deterministic for a given table.

use visadesk_types::Location;

/// Default number of results surfaced by the location field.
pub const DEFAULT_RESULT_LIMIT: usize = 8;

/// How a city name matched the query; lower ranks sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    Exact,
    Prefix,
    WordPrefix,
    Substring,
}

/// Returns up to `limit` locations whose city contains `query`.
///
/// An empty or whitespace-only query yields no results.
pub fn search_locations(locations: &[Location], query: &str, limit: usize) -> Vec<Location> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked = locations
        .iter()
        .enumerate()
        .filter_map(|(index, location)| rank_city(&location.city, &needle).map(|rank| (rank, index, location)))
        .collect::<Vec<_>>();

    ranked.sort_by(|left, right| left.0.cmp(&right.0).then_with(|| left.1.cmp(&right.1)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, _, location)| location.clone())
        .collect()
}

fn rank_city(city: &str, needle: &str) -> Option<MatchRank> {
    let haystack = city.to_lowercase();
    if haystack == needle {
        return Some(MatchRank::Exact);
    }
    if haystack.starts_with(needle) {
        return Some(MatchRank::Prefix);
    }
    let position = haystack.find(needle)?;
    let at_word_start = haystack[..position]
        .chars()
        .last()
        .is_some_and(|previous| previous == ' ' || previous == '-' || previous == '.');
    Some(if at_word_start {
        MatchRank::WordPrefix
    } else {
        MatchRank::Substring
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Location> {
        vec![
            Location::new("Fort Worth", "Texas", "TX"),
            Location::new("Worcester", "Massachusetts", "MA"),
            Location::new("Worth", "Illinois", "IL"),
            Location::new("Stillworth", "Nowhere", "NW"),
            Location::new("Boston", "Massachusetts", "MA"),
        ]
    }

    #[test]
    fn ranks_exact_then_prefix_then_word_then_substring() {
        let results = search_locations(&table(), "WORTH", 10);
        let cities: Vec<&str> = results.iter().map(|l| l.city.as_str()).collect();
        assert_eq!(cities, vec!["Worth", "Fort Worth", "Stillworth"]);
    }

    #[test]
    fn prefix_ties_keep_table_order() {
        let results = search_locations(&table(), "wor", 10);
        let cities: Vec<&str> = results.iter().map(|l| l.city.as_str()).collect();
        assert_eq!(cities, vec!["Worcester", "Worth", "Fort Worth", "Stillworth"]);
    }

    #[test]
    fn respects_limit_and_blank_queries() {
        assert_eq!(search_locations(&table(), "o", 2).len(), 2);
        assert!(search_locations(&table(), "   ", 10).is_empty());
        assert!(search_locations(&table(), "bos", 0).is_empty());
        assert!(search_locations(&table(), "zzz", 10).is_empty());
    }
}
