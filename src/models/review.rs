use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's review of one of their tracked items
///
/// There is at most one review per item; its rating is mirrored onto the item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub rating: u8,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_flagged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        user_id: Uuid,
        item_id: Uuid,
        rating: u8,
        content: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            item_id,
            rating,
            content,
            is_flagged: false,
            created_at: now,
            updated_at: now,
        }
    }
}
