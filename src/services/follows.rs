use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Connection, Follow},
    services::library::{is_visible, Library},
};

impl Library {
    /// Starts following a user
    ///
    /// Following someone twice keeps the original follow; the flag tells
    /// whether a new one was created.
    pub async fn follow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<(Follow, bool)> {
        if follower_id == following_id {
            return Err(AppError::InvalidInput(
                "Users cannot follow themselves".to_string(),
            ));
        }
        self.profile(follower_id).await?;
        self.profile(following_id).await?;

        let follow = Follow::new(follower_id, following_id, self.clock.now_utc());
        let (follow, created) = self.store.add_follow(follow).await?;

        if created {
            tracing::info!(
                follower_id = %follower_id,
                following_id = %following_id,
                "User followed"
            );
        }
        Ok((follow, created))
    }

    pub async fn unfollow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<()> {
        if !self.store.remove_follow(follower_id, following_id).await? {
            return Err(AppError::NotFound(format!(
                "Follow of {} by {}",
                following_id, follower_id
            )));
        }
        tracing::info!(
            follower_id = %follower_id,
            following_id = %following_id,
            "User unfollowed"
        );
        Ok(())
    }

    pub async fn is_following(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        self.profile(follower_id).await?;
        let following = self.store.list_following(follower_id).await?;
        Ok(following.iter().any(|f| f.following_id == following_id))
    }

    /// Who follows the user; empty when the profile is hidden from `viewer`
    pub async fn followers(&self, user_id: Uuid, viewer: Option<Uuid>) -> AppResult<Vec<Connection>> {
        let profile = self.profile(user_id).await?;
        if !is_visible(&profile, viewer) {
            return Ok(Vec::new());
        }

        let follows = self.store.list_followers(user_id).await?;
        self.connections(follows.into_iter().map(|f| (f.follower_id, f.created_at)))
            .await
    }

    /// Whom the user follows; empty when the profile is hidden from `viewer`
    pub async fn following(&self, user_id: Uuid, viewer: Option<Uuid>) -> AppResult<Vec<Connection>> {
        let profile = self.profile(user_id).await?;
        if !is_visible(&profile, viewer) {
            return Ok(Vec::new());
        }

        let follows = self.store.list_following(user_id).await?;
        self.connections(follows.into_iter().map(|f| (f.following_id, f.created_at)))
            .await
    }

    /// Resolves user ids to profiles, skipping users that no longer exist
    async fn connections(
        &self,
        links: impl Iterator<Item = (Uuid, DateTime<Utc>)>,
    ) -> AppResult<Vec<Connection>> {
        let mut connections = Vec::new();
        for (user_id, since) in links {
            if let Some(user) = self.store.get_profile(user_id).await? {
                connections.push(Connection { user, since });
            }
        }
        Ok(connections)
    }
}
