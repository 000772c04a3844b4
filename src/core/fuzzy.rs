//! Fuzzy filtering of a directory listing for search mode.
//!
//! Scores every entry name with the skim algorithm from `fuzzy_matcher` and returns the
//! matching entries best first. Equal scores keep their listing order.

use crate::core::fm::Entry;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Returns the entries matching `query`, best match first.
///
/// An empty query returns every entry in listing order.
pub fn filter(entries: &[Entry], query: &str) -> Vec<Entry> {
    if query.is_empty() {
        return entries.to_vec();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(usize, i64)> = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, e)| {
            matcher
                .fuzzy_match(&e.name_str(), query)
                .map(|score| (idx, score))
        })
        .collect();

    // sort_by is stable, so ties stay in listing order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(idx, _)| entries[idx].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[Entry]) -> Vec<String> {
        entries.iter().map(|e| e.name_str().into_owned()).collect()
    }

    fn listing() -> Vec<Entry> {
        vec![
            Entry::parent(),
            Entry::synthetic("Cargo.toml", false),
            Entry::synthetic("main.go", false),
            Entry::synthetic("models", true),
            Entry::synthetic("readme.md", false),
        ]
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let all = listing();
        assert_eq!(names(&filter(&all, "")), names(&all));
    }

    #[test]
    fn only_subsequence_matches_survive() {
        let found = names(&filter(&listing(), "mgo"));
        assert_eq!(found, vec!["main.go"]);
    }

    #[test]
    fn results_are_drawn_from_the_listing() {
        let all = listing();
        let all_names = names(&all);
        for query in ["m", "o", "md", "toml", "zzz"] {
            for name in names(&filter(&all, query)) {
                assert!(all_names.contains(&name), "{} not in listing", name);
            }
        }
    }

    #[test]
    fn exact_prefix_ranks_first() {
        let found = names(&filter(&listing(), "main"));
        assert_eq!(found.first().map(String::as_str), Some("main.go"));
    }

    #[test]
    fn no_match_gives_empty() {
        assert!(filter(&listing(), "qqq").is_empty());
    }
}
