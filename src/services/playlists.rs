use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Playlist, PlaylistEntry},
    services::library::{is_visible, Library},
};

/// Changes to a playlist's details; `None` fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct PlaylistUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

fn playlist_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput(
            "Playlist name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Trimmed text, with blank text treated as absent
pub(super) fn optional_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

impl Library {
    pub async fn create_playlist(
        &self,
        user_id: Uuid,
        name: &str,
        description: Option<String>,
        is_public: bool,
    ) -> AppResult<Playlist> {
        self.profile(user_id).await?;
        let playlist = Playlist::new(
            user_id,
            playlist_name(name)?,
            optional_text(description),
            is_public,
            self.clock.now_utc(),
        );
        self.store.create_playlist(playlist.clone()).await?;

        tracing::info!(user_id = %user_id, playlist_id = %playlist.id, "Playlist created");
        Ok(playlist)
    }

    /// A user's playlists as `viewer` sees them
    ///
    /// Other viewers see only public playlists, and none at all on a private
    /// profile.
    pub async fn playlists(&self, user_id: Uuid, viewer: Option<Uuid>) -> AppResult<Vec<Playlist>> {
        let profile = self.profile(user_id).await?;
        if !is_visible(&profile, viewer) {
            return Ok(Vec::new());
        }

        let is_owner = viewer == Some(user_id);
        let playlists = self.store.list_playlists(user_id).await?;
        Ok(playlists
            .into_iter()
            .filter(|playlist| is_owner || playlist.is_public)
            .collect())
    }

    /// A single playlist; hidden ones are reported as not found
    pub async fn playlist(&self, playlist_id: Uuid, viewer: Option<Uuid>) -> AppResult<Playlist> {
        let not_found = || AppError::NotFound(format!("Playlist {}", playlist_id));

        let playlist = self
            .store
            .get_playlist(playlist_id)
            .await?
            .ok_or_else(not_found)?;
        let owner = self.profile(playlist.user_id).await?;

        let is_owner = viewer == Some(owner.id);
        if !is_owner && (!playlist.is_public || !is_visible(&owner, viewer)) {
            return Err(not_found());
        }
        Ok(playlist)
    }

    pub async fn update_playlist(
        &self,
        playlist_id: Uuid,
        update: PlaylistUpdate,
    ) -> AppResult<Playlist> {
        let name = update.name.as_deref().map(playlist_name).transpose()?;
        let description = update.description;
        let is_public = update.is_public;
        let now = self.clock.now_utc();

        self.store
            .update_playlist(
                playlist_id,
                Box::new(move |playlist: &mut Playlist| {
                    if let Some(name) = name {
                        playlist.name = name;
                    }
                    if description.is_some() {
                        playlist.description = optional_text(description);
                    }
                    if let Some(is_public) = is_public {
                        playlist.is_public = is_public;
                    }
                    playlist.updated_at = now;
                    Ok(())
                }),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Playlist {}", playlist_id)))
    }

    pub async fn remove_playlist(&self, playlist_id: Uuid) -> AppResult<()> {
        if !self.store.remove_playlist(playlist_id).await? {
            return Err(AppError::NotFound(format!("Playlist {}", playlist_id)));
        }
        tracing::info!(playlist_id = %playlist_id, "Playlist removed");
        Ok(())
    }

    /// Adds one of the owner's tracked items to a playlist
    pub async fn add_to_playlist(&self, playlist_id: Uuid, item_id: Uuid) -> AppResult<Playlist> {
        let item = self
            .store
            .get_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {}", item_id)))?;
        let now = self.clock.now_utc();

        let playlist = self
            .store
            .update_playlist(
                playlist_id,
                Box::new(move |playlist: &mut Playlist| {
                    if playlist.user_id != item.user_id {
                        return Err(AppError::InvalidInput(
                            "Item belongs to another user".to_string(),
                        ));
                    }
                    if playlist.contains(item.id) {
                        return Err(AppError::InvalidInput(format!(
                            "{} is already in this playlist",
                            item.title
                        )));
                    }
                    playlist.entries.push(PlaylistEntry::new(item.id, item.title, now));
                    playlist.updated_at = now;
                    Ok(())
                }),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Playlist {}", playlist_id)))?;

        tracing::debug!(
            playlist_id = %playlist_id,
            item_id = %item_id,
            entries = playlist.entries.len(),
            "Item added to playlist"
        );
        Ok(playlist)
    }

    pub async fn remove_from_playlist(&self, playlist_id: Uuid, entry_id: Uuid) -> AppResult<()> {
        let now = self.clock.now_utc();
        self.store
            .update_playlist(
                playlist_id,
                Box::new(move |playlist: &mut Playlist| {
                    let position = playlist
                        .entries
                        .iter()
                        .position(|entry| entry.id == entry_id)
                        .ok_or_else(|| AppError::NotFound(format!("Playlist entry {}", entry_id)))?;
                    playlist.entries.remove(position);
                    playlist.updated_at = now;
                    Ok(())
                }),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Playlist {}", playlist_id)))?;
        Ok(())
    }
}
