use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserProfile;

/// One user following another
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(follower_id: Uuid, following_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            follower_id,
            following_id,
            created_at: now,
        }
    }
}

/// The other side of a follow, with when it started
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub user: UserProfile,
    pub since: DateTime<Utc>,
}
