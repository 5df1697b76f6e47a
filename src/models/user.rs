use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile of a user whose library is being tracked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    /// Private profiles expose nothing to other users
    #[serde(default)]
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a new public profile
    pub fn new(username: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            bio: None,
            is_private: false,
            created_at: now,
        }
    }
}
