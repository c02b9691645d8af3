//! Case-insensitive title search over the catalog.
//!
//! Used to help pick the exact catalog title before asking for
//! recommendations, since recommendation lookup is exact-match only.

use crate::types::{MatchKind, TitleMatch};
use data_loader::DataIndex;

/// Search catalog titles.
///
/// Exact matches come first, then prefix matches, then substring matches.
/// Inside each group, catalog order is kept. Blank queries match nothing.
pub fn search_titles(data_index: &DataIndex, query: &str, limit: usize) -> Vec<TitleMatch> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut matches: Vec<TitleMatch> = data_index
        .movies()
        .iter()
        .filter_map(|movie| {
            let title_lower = movie.title.to_lowercase();
            let kind = if title_lower == query {
                MatchKind::Exact
            } else if title_lower.starts_with(&query) {
                MatchKind::Prefix
            } else if title_lower.contains(&query) {
                MatchKind::Substring
            } else {
                return None;
            };
            Some(TitleMatch {
                row: movie.row,
                movie_id: movie.movie_id,
                title: movie.title.clone(),
                kind,
            })
        })
        .collect();

    // Stable sort keeps catalog order within a group
    matches.sort_by_key(|m| m.kind);
    matches.truncate(limit);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, SimilarityMatrix};

    fn create_test_index(titles: &[&str]) -> DataIndex {
        let movies = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Movie {
                row: i,
                movie_id: i as u32 + 1,
                title: title.to_string(),
            })
            .collect();
        let n = titles.len();
        let matrix = SimilarityMatrix::from_row_major(n, vec![0.0; n * n]).unwrap();
        DataIndex::from_parts(movies, matrix).unwrap()
    }

    #[test]
    fn test_ranks_exact_then_prefix_then_substring() {
        let index = create_test_index(&["The Avengers", "Avengers: Age of Ultron", "Avengers"]);

        let results = search_titles(&index, "avengers", 10);
        let titles: Vec<&str> = results.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Avengers", "Avengers: Age of Ultron", "The Avengers"]);
        assert_eq!(results[0].kind, MatchKind::Exact);
        assert_eq!(results[2].kind, MatchKind::Substring);
    }

    #[test]
    fn test_limit_and_blank_query() {
        let index = create_test_index(&["Alien", "Aliens", "Alien 3"]);

        assert_eq!(search_titles(&index, "alien", 2).len(), 2);
        assert!(search_titles(&index, "   ", 10).is_empty());
        assert!(search_titles(&index, "predator", 10).is_empty());
    }
}
