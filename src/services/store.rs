use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Follow, Playlist, Review, TrackedItem, UserProfile},
};

/// Change applied to a stored item while the store holds it exclusively
pub type ItemChange = Box<dyn FnOnce(&mut TrackedItem) -> AppResult<()> + Send>;

/// Change applied to a stored playlist while the store holds it exclusively
pub type PlaylistChange = Box<dyn FnOnce(&mut Playlist) -> AppResult<()> + Send>;

/// Storage for profiles, their tracked items and the social data around them
///
/// The analytics never talk to storage directly; the library service fetches a
/// user's collection through this trait and hands it over as a plain slice.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrackedItemStore: Send + Sync {
    async fn create_profile(&self, profile: UserProfile) -> AppResult<()>;

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// A user's items, most recently updated first
    async fn list_items(&self, user_id: Uuid) -> AppResult<Vec<TrackedItem>>;

    async fn get_item(&self, item_id: Uuid) -> AppResult<Option<TrackedItem>>;

    /// Inserts the item, replacing any item with the same id
    async fn save_item(&self, item: TrackedItem) -> AppResult<()>;

    /// Applies `change` atomically; `None` if the item does not exist
    ///
    /// A change that fails leaves the stored item untouched.
    async fn update_item(
        &self,
        item_id: Uuid,
        change: ItemChange,
    ) -> AppResult<Option<TrackedItem>>;

    /// Removes an item along with its review and playlist entries; `false` if
    /// it did not exist
    async fn remove_item(&self, item_id: Uuid) -> AppResult<bool>;

    /// Stores a follow unless the pair already exists
    ///
    /// Returns the stored follow and whether it was newly created.
    async fn add_follow(&self, follow: Follow) -> AppResult<(Follow, bool)>;

    async fn remove_follow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool>;

    /// Follows pointing at the user, newest first
    async fn list_followers(&self, user_id: Uuid) -> AppResult<Vec<Follow>>;

    /// Follows made by the user, newest first
    async fn list_following(&self, user_id: Uuid) -> AppResult<Vec<Follow>>;

    async fn create_playlist(&self, playlist: Playlist) -> AppResult<()>;

    async fn get_playlist(&self, playlist_id: Uuid) -> AppResult<Option<Playlist>>;

    /// A user's playlists, newest first
    async fn list_playlists(&self, user_id: Uuid) -> AppResult<Vec<Playlist>>;

    /// Applies `change` atomically; `None` if the playlist does not exist
    async fn update_playlist(
        &self,
        playlist_id: Uuid,
        change: PlaylistChange,
    ) -> AppResult<Option<Playlist>>;

    async fn remove_playlist(&self, playlist_id: Uuid) -> AppResult<bool>;

    /// Inserts or replaces the review of an item
    ///
    /// Replacing keeps the existing review's id, creation time and flag.
    /// `None` if the reviewed item does not exist.
    async fn save_review(&self, review: Review) -> AppResult<Option<Review>>;

    async fn get_review(&self, item_id: Uuid) -> AppResult<Option<Review>>;

    /// A user's reviews, most recently updated first
    async fn list_reviews(&self, user_id: Uuid) -> AppResult<Vec<Review>>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

#[derive(Default)]
struct StoreInner {
    profiles: HashMap<Uuid, UserProfile>,
    items: HashMap<Uuid, TrackedItem>,
    follows: Vec<Follow>,
    playlists: HashMap<Uuid, Playlist>,
    /// Keyed by item id
    reviews: HashMap<Uuid, Review>,
}

/// Process-local store, lost on restart
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TrackedItemStore for InMemoryStore {
    async fn create_profile(&self, profile: UserProfile) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.profiles.insert(profile.id, profile);
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let inner = self.inner.read().await;
        Ok(inner.profiles.get(&user_id).cloned())
    }

    async fn list_items(&self, user_id: Uuid) -> AppResult<Vec<TrackedItem>> {
        let inner = self.inner.read().await;
        let mut items: Vec<TrackedItem> = inner
            .items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(items)
    }

    async fn get_item(&self, item_id: Uuid) -> AppResult<Option<TrackedItem>> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(&item_id).cloned())
    }

    async fn save_item(&self, item: TrackedItem) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.items.insert(item.id, item);
        Ok(())
    }

    async fn update_item(
        &self,
        item_id: Uuid,
        change: ItemChange,
    ) -> AppResult<Option<TrackedItem>> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.items.get_mut(&item_id) else {
            return Ok(None);
        };

        let mut updated = stored.clone();
        change(&mut updated)?;
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn remove_item(&self, item_id: Uuid) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        if inner.items.remove(&item_id).is_none() {
            return Ok(false);
        }

        inner.reviews.remove(&item_id);
        for playlist in inner.playlists.values_mut() {
            playlist.entries.retain(|entry| entry.item_id != item_id);
        }
        Ok(true)
    }

    async fn add_follow(&self, follow: Follow) -> AppResult<(Follow, bool)> {
        let mut inner = self.inner.write().await;
        let existing = inner.follows.iter().find(|f| {
            f.follower_id == follow.follower_id && f.following_id == follow.following_id
        });

        if let Some(existing) = existing {
            return Ok((existing.clone(), false));
        }
        inner.follows.push(follow.clone());
        Ok((follow, true))
    }

    async fn remove_follow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.follows.len();
        inner
            .follows
            .retain(|f| !(f.follower_id == follower_id && f.following_id == following_id));
        Ok(inner.follows.len() < before)
    }

    async fn list_followers(&self, user_id: Uuid) -> AppResult<Vec<Follow>> {
        let inner = self.inner.read().await;
        Ok(newest_follows(&inner.follows, |f| f.following_id == user_id))
    }

    async fn list_following(&self, user_id: Uuid) -> AppResult<Vec<Follow>> {
        let inner = self.inner.read().await;
        Ok(newest_follows(&inner.follows, |f| f.follower_id == user_id))
    }

    async fn create_playlist(&self, playlist: Playlist) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.playlists.insert(playlist.id, playlist);
        Ok(())
    }

    async fn get_playlist(&self, playlist_id: Uuid) -> AppResult<Option<Playlist>> {
        let inner = self.inner.read().await;
        Ok(inner.playlists.get(&playlist_id).cloned())
    }

    async fn list_playlists(&self, user_id: Uuid) -> AppResult<Vec<Playlist>> {
        let inner = self.inner.read().await;
        let mut playlists: Vec<Playlist> = inner
            .playlists
            .values()
            .filter(|playlist| playlist.user_id == user_id)
            .cloned()
            .collect();
        playlists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(playlists)
    }

    async fn update_playlist(
        &self,
        playlist_id: Uuid,
        change: PlaylistChange,
    ) -> AppResult<Option<Playlist>> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.playlists.get_mut(&playlist_id) else {
            return Ok(None);
        };

        let mut updated = stored.clone();
        change(&mut updated)?;
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn remove_playlist(&self, playlist_id: Uuid) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.playlists.remove(&playlist_id).is_some())
    }

    async fn save_review(&self, review: Review) -> AppResult<Option<Review>> {
        let mut inner = self.inner.write().await;
        if !inner.items.contains_key(&review.item_id) {
            return Ok(None);
        }

        let stored = match inner.reviews.get(&review.item_id) {
            Some(existing) => Review {
                id: existing.id,
                created_at: existing.created_at,
                is_flagged: existing.is_flagged,
                ..review
            },
            None => review,
        };
        inner.reviews.insert(stored.item_id, stored.clone());
        Ok(Some(stored))
    }

    async fn get_review(&self, item_id: Uuid) -> AppResult<Option<Review>> {
        let inner = self.inner.read().await;
        Ok(inner.reviews.get(&item_id).cloned())
    }

    async fn list_reviews(&self, user_id: Uuid) -> AppResult<Vec<Review>> {
        let inner = self.inner.read().await;
        let mut reviews: Vec<Review> = inner
            .reviews
            .values()
            .filter(|review| review.user_id == user_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(reviews)
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

fn newest_follows(follows: &[Follow], keep: impl Fn(&Follow) -> bool) -> Vec<Follow> {
    let mut matching: Vec<Follow> = follows.iter().filter(|f| keep(f)).cloned().collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matching
}
