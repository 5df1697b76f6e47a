use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked item placed on a custom list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    pub id: Uuid,
    pub item_id: Uuid,
    /// Item title at the time it was added
    pub title: String,
    pub added_at: DateTime<Utc>,
}

impl PlaylistEntry {
    pub fn new(item_id: Uuid, title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            title,
            added_at: now,
        }
    }
}

/// A user's custom list of tracked items
///
/// Non-public lists are only shown to their owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_public: bool,
    #[serde(default)]
    pub entries: Vec<PlaylistEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn new(
        user_id: Uuid,
        name: String,
        description: Option<String>,
        is_public: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            description,
            is_public,
            entries: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, item_id: Uuid) -> bool {
        self.entries.iter().any(|entry| entry.item_id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_playlist_is_empty() {
        let playlist = Playlist::new(Uuid::new_v4(), "Comfort watches".to_string(), None, true, Utc::now());
        assert!(playlist.entries.is_empty());
        assert_eq!(playlist.created_at, playlist.updated_at);
    }

    #[test]
    fn test_contains_checks_item_ids() {
        let mut playlist = Playlist::new(Uuid::new_v4(), "Noir".to_string(), None, false, Utc::now());
        let item_id = Uuid::new_v4();
        playlist
            .entries
            .push(PlaylistEntry::new(item_id, "Chinatown".to_string(), Utc::now()));

        assert!(playlist.contains(item_id));
        assert!(!playlist.contains(Uuid::new_v4()));
    }
}
