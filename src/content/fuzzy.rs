// src/content/fuzzy.rs
//! Fuzzy title scoring — a small, independent utility for ranking
//! already-fetched items against an interactive query.
//!
//! The database query only supports substring matching; this scorer lets
//! the CLI (and any front end doing client-side filtering) order a batch
//! by how well each title matches what the user typed. It is not part of
//! the render core.

/// Scores `title` against `query`, higher is better; `None` when `query`
/// is not a subsequence of `title`.
///
/// Matching is case-insensitive. Contiguous matches and matches starting
/// at a word boundary score higher, so "ohm law" ranks "Ohm's Law" above
/// "Sthenic bohemian flaws".
pub fn score(title: &str, query: &str) -> Option<u32> {
    if query.is_empty() {
        return Some(0);
    }

    let title_chars: Vec<char> = title.chars().flat_map(char::to_lowercase).collect();
    let query_chars: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();

    let mut total: u32 = 0;
    let mut ti = 0usize;
    let mut previous_match: Option<usize> = None;

    for &qc in &query_chars {
        // Whitespace in the query separates terms, it never needs a match.
        if qc.is_whitespace() {
            previous_match = None;
            continue;
        }

        let found = title_chars[ti..].iter().position(|&tc| tc == qc)?;
        let position = ti + found;

        let contiguous = previous_match == Some(position.wrapping_sub(1));
        let word_start = position == 0 || title_chars[position - 1].is_whitespace();

        total += 1;
        if contiguous {
            total += 2;
        }
        if word_start {
            total += 1;
        }

        previous_match = Some(position);
        ti = position + 1;
    }

    Some(total)
}

/// Sorts items by descending fuzzy score of their title, dropping items
/// whose title does not match at all. Stable for equal scores.
pub fn rank<T, F>(items: Vec<T>, query: &str, title_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut scored: Vec<(u32, T)> = items
        .into_iter()
        .filter_map(|item| score(title_of(&item), query).map(|s| (s, item)))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_subsequence_scores_none() {
        assert_eq!(score("Ohm's Law", "xyz"), None);
    }

    #[test]
    fn case_insensitive_subsequence_matches() {
        assert!(score("Ohm's Law", "ohm").is_some());
        assert!(score("Ohm's Law", "OHM LAW").is_some());
    }

    #[test]
    fn contiguous_match_beats_scattered() {
        let contiguous = score("Kirchhoff", "kirch").unwrap();
        let scattered = score("Kinetic orchestra", "kirch").unwrap();
        assert!(contiguous > scattered);
    }

    #[test]
    fn rank_orders_best_first_and_drops_misses() {
        let titles = vec!["Binary Trees", "Ohm's Law", "Normalization"];
        let ranked = rank(titles, "ohm", |t| t);
        assert_eq!(ranked, vec!["Ohm's Law"]);
    }

    #[test]
    fn empty_query_keeps_everything() {
        let titles = vec!["A", "B"];
        assert_eq!(rank(titles, "", |t| t).len(), 2);
    }
}
