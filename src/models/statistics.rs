use chrono::{DateTime, Utc};
use serde::Serialize;

use super::MediaType;

/// Per-media-type counters for the four known types
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ByType<T> {
    pub movie: T,
    pub tv: T,
    pub book: T,
    pub game: T,
}

impl<T> ByType<T> {
    /// Mutable slot for a media type; `None` for unknown types
    pub fn get_mut(&mut self, media_type: MediaType) -> Option<&mut T> {
        match media_type {
            MediaType::Movie => Some(&mut self.movie),
            MediaType::Tv => Some(&mut self.tv),
            MediaType::Book => Some(&mut self.book),
            MediaType::Game => Some(&mut self.game),
            MediaType::Unknown => None,
        }
    }
}

/// Status breakdown for a single media type
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeStatusCounts {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub planned: usize,
}

/// The most recently finished item
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastCompleted {
    pub title: String,
    pub completed_at: DateTime<Utc>,
}

/// Aggregated statistics over one user's tracked collection
///
/// Recomputed on every request; never persisted.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub planned: usize,
    pub dropped: usize,
    /// Mean of present ratings, 0 when nothing is rated
    pub average_rating: f64,
    pub by_type: ByType<usize>,
    pub by_type_status: ByType<TypeStatusCounts>,
    pub streak_days: u32,
    pub longest_streak_days: u32,
    pub estimated_hours: f64,
    pub hours_by_type: ByType<f64>,
    pub last_completed: Option<LastCompleted>,
}

/// One genre and how many tracked items carry it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Genres ordered by descending frequency, ties in first-seen order
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct GenreRanking {
    pub entries: Vec<GenreCount>,
}

impl GenreRanking {
    /// Genre names in ranking order, at most `limit` of them
    pub fn top(&self, limit: usize) -> Vec<String> {
        self.entries
            .iter()
            .take(limit)
            .map(|entry| entry.genre.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_type_ignores_unknown() {
        let mut counts: ByType<usize> = ByType::default();
        *counts.get_mut(MediaType::Tv).unwrap() += 2;

        assert!(counts.get_mut(MediaType::Unknown).is_none());
        assert_eq!(counts.tv, 2);
        assert_eq!(counts.movie, 0);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_value(StatisticsSummary::default()).unwrap();
        assert_eq!(json["averageRating"], 0.0);
        assert_eq!(json["byType"]["movie"], 0);
        assert_eq!(json["byTypeStatus"]["tv"]["inProgress"], 0);
        assert!(json["lastCompleted"].is_null());
    }

    #[test]
    fn test_ranking_top_truncates() {
        let ranking = GenreRanking {
            entries: vec![
                GenreCount { genre: "Drama".to_string(), count: 3 },
                GenreCount { genre: "Crime".to_string(), count: 1 },
            ],
        };
        assert_eq!(ranking.top(1), vec!["Drama".to_string()]);
        assert_eq!(ranking.top(5).len(), 2);
    }
}
