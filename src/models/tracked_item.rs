use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Consumption status of a tracked item
///
/// Any status string outside the four known values deserializes to
/// [`Status::Unknown`]. Unknown statuses still count towards a user's total but
/// are left out of every per-status tally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[serde(alias = "plan_to_watch")]
    Plan,
    #[serde(alias = "watching")]
    InProgress,
    Completed,
    Dropped,
    #[serde(other)]
    Unknown,
}

impl Status {
    /// Human-readable status, worded for the kind of media it applies to
    pub fn display_name(&self, media_type: MediaType) -> &'static str {
        match (self, media_type) {
            (Status::Plan, MediaType::Book) => "Plan to Read",
            (Status::Plan, MediaType::Game) => "Plan to Play",
            (Status::Plan, _) => "Plan to Watch",
            (Status::InProgress, MediaType::Book) => "Reading",
            (Status::InProgress, MediaType::Game) => "Playing",
            (Status::InProgress, _) => "Watching",
            (Status::Completed, _) => "Completed",
            (Status::Dropped, _) => "Dropped",
            (Status::Unknown, _) => "Unknown",
        }
    }

    /// Whether time spent on an item with this status counts as consumed
    pub fn is_consuming(&self) -> bool {
        matches!(self, Status::Completed | Status::InProgress)
    }
}

/// Kind of media being tracked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    Book,
    Game,
    #[serde(other)]
    Unknown,
}

impl MediaType {
    pub fn display_name(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Tv => "TV Show",
            MediaType::Book => "Book",
            MediaType::Game => "Game",
            MediaType::Unknown => "Unknown",
        }
    }
}

/// A user's record of engagement with one media entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub media_type: MediaType,
    pub status: Status,
    /// Star rating, 1-5
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub progress_percent: u8,
    #[serde(default)]
    pub watched_episodes: Option<u32>,
    #[serde(default)]
    pub total_episodes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackedItem {
    /// Creates a freshly tracked item with no progress, rating or episodes
    pub fn new(
        user_id: Uuid,
        title: String,
        media_type: MediaType,
        status: Status,
        genres: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            media_type,
            status,
            rating: None,
            progress_percent: 0,
            watched_episodes: None,
            total_episodes: None,
            genres,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A tracked item as returned by the API, with its labels resolved
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedItemView {
    #[serde(flatten)]
    pub item: TrackedItem,
    /// e.g. "Reading" for an in-progress book
    pub status_label: &'static str,
    pub media_type_label: &'static str,
}

impl From<TrackedItem> for TrackedItemView {
    fn from(item: TrackedItem) -> Self {
        Self {
            status_label: item.status.display_name(item.media_type),
            media_type_label: item.media_type.display_name(),
            item,
        }
    }
}
