use std::collections::HashMap;

use crate::models::{GenreCount, GenreRanking, TrackedItem};

/// Genre assumed when a library says nothing about the user's taste
pub const DEFAULT_GENRE: &str = "Romance";

/// How many genres count as a user's preference
pub const PREFERRED_GENRE_LIMIT: usize = 3;

/// Ranks every genre in the collection by how many items carry it
///
/// Genre entries are split on commas and trimmed; empty tokens are dropped.
/// Ties keep the order in which genres were first seen.
pub fn rank_genres(items: &[TrackedItem]) -> GenreRanking {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    let tokens = items
        .iter()
        .flat_map(|item| item.genres.iter())
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|genre| !genre.is_empty());

    for genre in tokens {
        let count = counts.entry(genre).or_insert_with(|| {
            first_seen.push(genre);
            0
        });
        *count += 1;
    }

    let mut entries: Vec<GenreCount> = first_seen
        .into_iter()
        .map(|genre| GenreCount {
            genre: genre.to_string(),
            count: counts[genre],
        })
        .collect();

    // sort_by is stable, so first-seen order survives among equal counts
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    GenreRanking { entries }
}

/// The user's top genres, never empty
pub fn preferred_genres(items: &[TrackedItem]) -> Vec<String> {
    let ranking = rank_genres(items);
    if ranking.is_empty() {
        return vec![DEFAULT_GENRE.to_string()];
    }
    ranking.top(PREFERRED_GENRE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaType, Status};
    use chrono::Utc;
    use uuid::Uuid;

    fn item_with_genres(genres: &[&str]) -> TrackedItem {
        TrackedItem::new(
            Uuid::new_v4(),
            "Untitled".to_string(),
            MediaType::Movie,
            Status::Completed,
            genres.iter().map(|g| g.to_string()).collect(),
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_collection_falls_back_to_romance() {
        assert_eq!(preferred_genres(&[]), vec!["Romance".to_string()]);
    }

    #[test]
    fn test_blank_genres_fall_back_to_romance() {
        let items = vec![item_with_genres(&["  ", ""]), item_with_genres(&[])];
        assert_eq!(preferred_genres(&items), vec!["Romance".to_string()]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let items = vec![
            item_with_genres(&["Action", "Drama"]),
            item_with_genres(&["Action"]),
            item_with_genres(&["Comedy"]),
        ];

        assert_eq!(preferred_genres(&items), vec!["Action", "Drama", "Comedy"]);
    }

    #[test]
    fn test_ranking_is_truncated_to_three() {
        let items = vec![
            item_with_genres(&["Horror", "Mystery", "Crime", "Western"]),
            item_with_genres(&["Western"]),
        ];

        let preferred = preferred_genres(&items);
        assert_eq!(preferred, vec!["Western", "Horror", "Mystery"]);

        let ranking = rank_genres(&items);
        assert_eq!(ranking.entries.len(), 4);
        assert_eq!(ranking.entries[0].count, 2);
    }

    #[test]
    fn test_comma_joined_entries_are_split_and_trimmed() {
        let items = vec![
            item_with_genres(&["Comedy, Romance"]),
            item_with_genres(&[" Romance "]),
        ];

        let ranking = rank_genres(&items);
        assert_eq!(
            ranking.entries,
            vec![
                GenreCount { genre: "Romance".to_string(), count: 2 },
                GenreCount { genre: "Comedy".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let items = vec![
            item_with_genres(&["Sci-Fi", "Drama", "Thriller"]),
            item_with_genres(&["Thriller", "Sci-Fi"]),
        ];
        assert_eq!(rank_genres(&items), rank_genres(&items));
    }
}
