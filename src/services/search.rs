use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

impl SearchResults {
    pub fn new(data: Vec<SearchHit>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.data.iter().map(|hit| hit.name.as_str()).collect()
    }
}

/// Case-insensitive substring match using Unicode lowercase on both sides.
///
/// Matching runs in Rust rather than SQL: SQLite's `lower()` only folds
/// ASCII, so the two backends would disagree on names like "ÉCLAIR".
pub fn contains_ignore_case(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("The Musical Hop", "hop"));
        assert!(contains_ignore_case("The Wild Sax Band", "BAND"));
        assert!(contains_ignore_case("ÉCLAIR Hall", "éclair"));
        assert!(contains_ignore_case("anything", ""));
    }

    #[test]
    fn test_wildcards_are_literal() {
        assert!(contains_ignore_case("100% Jazz", "%"));
        assert!(!contains_ignore_case("The Musical Hop", "%"));
        assert!(!contains_ignore_case("The Musical Hop", "_"));
    }

    #[test]
    fn test_results_count_matches_data() {
        let results = SearchResults::new(vec![
            SearchHit {
                id: 1,
                name: "The Musical Hop".to_string(),
                num_upcoming_shows: 0,
            },
            SearchHit {
                id: 3,
                name: "Park Square Live Music & Coffee".to_string(),
                num_upcoming_shows: 1,
            },
        ]);
        assert_eq!(results.count, 2);
        assert_eq!(
            results.names(),
            vec!["The Musical Hop", "Park Square Live Music & Coffee"]
        );
    }
}
