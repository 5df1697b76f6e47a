use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        GenreRanking, MediaType, Recommendation, StatisticsSummary, Status, TrackedItem,
        UserProfile,
    },
    services::{
        catalog::ExampleCatalog, clock::Clock, genres, recommender::Recommender, statistics,
        store::TrackedItemStore, tracking,
    },
};

/// A user's genre ranking together with the preference derived from it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenreReport {
    pub ranking: GenreRanking,
    pub preferred: Vec<String>,
}

/// Details of an item a user starts tracking
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub media_type: MediaType,
    pub status: Status,
    pub genres: Vec<String>,
    pub total_episodes: Option<u32>,
}

/// Orchestrates storage, the clock and the analytics for one request
///
/// Every analytics call receives the user's collection explicitly; nothing here
/// keeps per-user state between calls.
#[derive(Clone)]
pub struct Library {
    pub(super) store: Arc<dyn TrackedItemStore>,
    catalog: Arc<dyn ExampleCatalog>,
    pub(super) clock: Arc<dyn Clock>,
}

/// Whether `viewer` may see a profile's library and social activity
///
/// Private profiles are visible only to their owner; `None` is an anonymous
/// viewer.
pub(super) fn is_visible(profile: &UserProfile, viewer: Option<Uuid>) -> bool {
    !profile.is_private || viewer == Some(profile.id)
}

impl Library {
    pub fn new(
        store: Arc<dyn TrackedItemStore>,
        catalog: Arc<dyn ExampleCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            catalog,
            clock,
        }
    }

    pub async fn create_profile(
        &self,
        username: String,
        bio: Option<String>,
        is_private: bool,
    ) -> AppResult<UserProfile> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::InvalidInput("Username must not be empty".to_string()));
        }

        let mut profile = UserProfile::new(username, self.clock.now_utc());
        profile.bio = bio;
        profile.is_private = is_private;
        self.store.create_profile(profile.clone()).await?;

        tracing::info!(user_id = %profile.id, store = self.store.name(), "Profile created");
        Ok(profile)
    }

    pub async fn profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))
    }

    /// The user's tracked items, most recently updated first
    pub async fn items(&self, user_id: Uuid) -> AppResult<Vec<TrackedItem>> {
        self.profile(user_id).await?;
        self.store.list_items(user_id).await
    }

    pub async fn track_item(&self, user_id: Uuid, new_item: NewItem) -> AppResult<TrackedItem> {
        self.profile(user_id).await?;

        let title = new_item.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::InvalidInput("Title must not be empty".to_string()));
        }
        if new_item.media_type == MediaType::Unknown {
            return Err(AppError::InvalidInput("Unknown media type".to_string()));
        }
        if new_item.status == Status::Unknown {
            return Err(AppError::InvalidInput("Unknown status".to_string()));
        }

        let mut item = TrackedItem::new(
            user_id,
            title,
            new_item.media_type,
            new_item.status,
            new_item.genres,
            self.clock.now_utc(),
        );
        if item.media_type == MediaType::Tv {
            item.total_episodes = new_item.total_episodes;
            item.watched_episodes = new_item.total_episodes.map(|_| 0);
        }

        self.store.save_item(item.clone()).await?;

        tracing::info!(
            user_id = %user_id,
            item_id = %item.id,
            media_type = ?item.media_type,
            "Item tracked"
        );
        Ok(item)
    }

    pub async fn remove_item(&self, item_id: Uuid) -> AppResult<()> {
        if !self.store.remove_item(item_id).await? {
            return Err(AppError::NotFound(format!("Item {}", item_id)));
        }
        tracing::info!(item_id = %item_id, "Item removed");
        Ok(())
    }

    /// Applies a change stamped with the current time as one store update
    pub(super) async fn modify_item<F>(&self, item_id: Uuid, change: F) -> AppResult<TrackedItem>
    where
        F: FnOnce(&mut TrackedItem, DateTime<Utc>) -> AppResult<()> + Send + 'static,
    {
        let now = self.clock.now_utc();
        let item = self
            .store
            .update_item(
                item_id,
                Box::new(move |item: &mut TrackedItem| change(item, now)),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {}", item_id)))?;

        tracing::debug!(
            item_id = %item_id,
            status = ?item.status,
            progress = item.progress_percent,
            "Item updated"
        );
        Ok(item)
    }

    pub async fn update_progress(
        &self,
        item_id: Uuid,
        progress: i64,
        status: Option<Status>,
    ) -> AppResult<TrackedItem> {
        self.modify_item(item_id, move |item, now| {
            tracking::update_progress(item, progress, status, now)
        })
        .await
    }

    pub async fn update_episodes(
        &self,
        item_id: Uuid,
        watched: u32,
        total: u32,
        status: Option<Status>,
    ) -> AppResult<TrackedItem> {
        self.modify_item(item_id, move |item, now| {
            tracking::update_episodes(item, watched, total, status, now)
        })
        .await
    }

    pub async fn update_status(&self, item_id: Uuid, status: Status) -> AppResult<TrackedItem> {
        self.modify_item(item_id, move |item, now| tracking::update_status(item, status, now))
            .await
    }

    pub async fn update_rating(&self, item_id: Uuid, rating: i64) -> AppResult<TrackedItem> {
        self.modify_item(item_id, move |item, now| tracking::update_rating(item, rating, now))
            .await
    }

    /// Full statistics for the user's own dashboard
    pub async fn statistics(&self, user_id: Uuid) -> AppResult<StatisticsSummary> {
        let items = self.items(user_id).await?;
        Ok(statistics::summarize(
            &items,
            self.clock.today(),
            &self.clock.offset(),
        ))
    }

    /// Statistics as other users see them: all zeros for a private profile
    pub async fn public_statistics(&self, user_id: Uuid) -> AppResult<StatisticsSummary> {
        let profile = self.profile(user_id).await?;
        if !is_visible(&profile, None) {
            tracing::debug!(user_id = %user_id, "Private profile, hiding statistics");
            return Ok(StatisticsSummary::default());
        }
        self.statistics(user_id).await
    }

    pub async fn genres(&self, user_id: Uuid) -> AppResult<GenreReport> {
        let items = self.items(user_id).await?;
        Ok(GenreReport {
            ranking: genres::rank_genres(&items),
            preferred: genres::preferred_genres(&items),
        })
    }

    /// Recommendation personalized by the user's library
    pub async fn recommend(
        &self,
        user_id: Uuid,
        time: &str,
        genre: Option<&str>,
    ) -> AppResult<Option<Recommendation>> {
        let items = self.items(user_id).await?;
        let preferred = genres::preferred_genres(&items);

        let recommendation = self.recommend_with(time, &preferred, genre);
        tracing::info!(
            user_id = %user_id,
            time = %time,
            band = ?recommendation.as_ref().map(|r| r.duration_band),
            "Recommendation requested"
        );
        Ok(recommendation)
    }

    /// Recommendation from an explicit genre preference, no stored library needed
    pub fn recommend_with(
        &self,
        time: &str,
        preferred_genres: &[String],
        genre: Option<&str>,
    ) -> Option<Recommendation> {
        Recommender::new(self.catalog.as_ref()).recommend_for_text(time, preferred_genres, genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DurationBand;
    use crate::services::{
        catalog::StaticCatalog,
        clock::FixedClock,
        store::{InMemoryStore, MockTrackedItemStore},
    };
    use chrono::{DateTime, Duration};

    fn clock() -> Arc<FixedClock> {
        let now = DateTime::parse_from_rfc3339("2024-06-15T18:00:00+00:00").unwrap();
        Arc::new(FixedClock(now))
    }

    fn library_with(store: Arc<dyn TrackedItemStore>) -> Library {
        let catalog = Arc::new(StaticCatalog::builtin().unwrap());
        Library::new(store, catalog, clock())
    }

    fn library() -> Library {
        library_with(Arc::new(InMemoryStore::new()))
    }

    fn new_item(title: &str, media_type: MediaType, status: Status, genres: &[&str]) -> NewItem {
        NewItem {
            title: title.to_string(),
            media_type,
            status,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            total_episodes: None,
        }
    }

    #[tokio::test]
    async fn test_statistics_for_tracked_items() {
        let library = library();
        let user = library
            .create_profile("viewer".to_string(), None, false)
            .await
            .unwrap();

        let heat = library
            .track_item(user.id, new_item("Heat", MediaType::Movie, Status::InProgress, &["Crime"]))
            .await
            .unwrap();
        library.update_progress(heat.id, 100, None).await.unwrap();
        library
            .track_item(user.id, new_item("Dune", MediaType::Book, Status::Plan, &["Sci-Fi"]))
            .await
            .unwrap();

        let stats = library.statistics(user.id).await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.planned, 1);
        assert_eq!(stats.streak_days, 1);
        assert_eq!(stats.estimated_hours, 2.0);
        assert_eq!(stats.last_completed.unwrap().title, "Heat");
    }

    #[tokio::test]
    async fn test_private_profile_hides_public_statistics() {
        let library = library();
        let user = library
            .create_profile("hermit".to_string(), None, true)
            .await
            .unwrap();
        library
            .track_item(user.id, new_item("Heat", MediaType::Movie, Status::Completed, &[]))
            .await
            .unwrap();

        let public = library.public_statistics(user.id).await.unwrap();
        assert_eq!(public, StatisticsSummary::default());

        let own = library.statistics(user.id).await.unwrap();
        assert_eq!(own.total, 1);
    }

    #[tokio::test]
    async fn test_tv_items_start_with_zero_watched_episodes() {
        let library = library();
        let user = library
            .create_profile("binger".to_string(), None, false)
            .await
            .unwrap();

        let mut show = new_item("Dark", MediaType::Tv, Status::Plan, &["Mystery"]);
        show.total_episodes = Some(26);
        let show = library.track_item(user.id, show).await.unwrap();
        assert_eq!(show.watched_episodes, Some(0));

        let show = library.update_episodes(show.id, 13, 26, None).await.unwrap();
        assert_eq!(show.progress_percent, 50);
        assert_eq!(show.status, Status::InProgress);
    }

    #[tokio::test]
    async fn test_invalid_new_items_are_rejected() {
        let library = library();
        let user = library
            .create_profile("viewer".to_string(), None, false)
            .await
            .unwrap();

        let blank = new_item("  ", MediaType::Movie, Status::Plan, &[]);
        let unknown = new_item("Serial", MediaType::Unknown, Status::Plan, &[]);

        assert!(matches!(
            library.track_item(user.id, blank).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            library.track_item(user.id, unknown).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let library = library();
        assert!(matches!(
            library.statistics(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            library.remove_item(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_recommendation_uses_library_genres() {
        let library = library();
        let user = library
            .create_profile("viewer".to_string(), None, false)
            .await
            .unwrap();
        for title in ["Alien", "Aliens"] {
            library
                .track_item(user.id, new_item(title, MediaType::Movie, Status::Completed, &["Horror"]))
                .await
                .unwrap();
        }

        let report = library.genres(user.id).await.unwrap();
        assert_eq!(report.preferred, vec!["Horror"]);

        let rec = library
            .recommend(user.id, "2 hours", None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rec.duration_band, DurationBand::Movie);
        assert_eq!(rec.primary_genre, "Horror");
        assert!(rec.genre_options.iter().any(|o| o.name == "Horror" && o.preferred));

        assert!(library.recommend(user.id, "nothing", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failures_propagate() {
        let mut store = MockTrackedItemStore::new();
        let user_id = Uuid::new_v4();
        let created = clock().now_utc() - Duration::days(30);

        store.expect_get_profile().returning(move |id| {
            Ok(Some(UserProfile {
                id,
                username: "viewer".to_string(),
                bio: None,
                is_private: false,
                created_at: created,
            }))
        });
        store
            .expect_list_items()
            .returning(|_| Err(AppError::Storage("connection reset".to_string())));

        let library = library_with(Arc::new(store));
        assert!(matches!(
            library.statistics(user_id).await,
            Err(AppError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_updates_are_stamped_with_clock_time() {
        let mut store = MockTrackedItemStore::new();
        let stale = TrackedItem::new(
            Uuid::new_v4(),
            "Heat".to_string(),
            MediaType::Movie,
            Status::Completed,
            vec![],
            clock().now_utc() - Duration::days(7),
        );
        let item_id = stale.id;

        store
            .expect_update_item()
            .withf(move |id, _| *id == item_id)
            .times(1)
            .returning(move |_, change| {
                let mut item = stale.clone();
                change(&mut item)?;
                Ok(Some(item))
            });

        let library = library_with(Arc::new(store));
        let updated = library.update_rating(item_id, 5).await.unwrap();
        assert_eq!(updated.rating, Some(5));
        assert_eq!(updated.updated_at, clock().now_utc());
    }

    #[tokio::test]
    async fn test_unknown_requested_status_is_not_stored() {
        let library = library();
        let user = library
            .create_profile("viewer".to_string(), None, false)
            .await
            .unwrap();
        let movie = library
            .track_item(user.id, new_item("Heat", MediaType::Movie, Status::InProgress, &[]))
            .await
            .unwrap();

        assert!(matches!(
            library.update_progress(movie.id, 50, Some(Status::Unknown)).await,
            Err(AppError::InvalidInput(_))
        ));

        let stored = library.items(user.id).await.unwrap();
        assert_eq!(stored[0].status, Status::InProgress);
        assert_eq!(stored[0].progress_percent, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_to_one_item_both_apply() {
        let library = library();
        let user = library
            .create_profile("viewer".to_string(), None, false)
            .await
            .unwrap();
        let movie = library
            .track_item(user.id, new_item("Heat", MediaType::Movie, Status::InProgress, &[]))
            .await
            .unwrap();

        for _ in 0..20 {
            let (rated, finished) = tokio::join!(
                library.update_rating(movie.id, 5),
                library.update_progress(movie.id, 100, None),
            );
            rated.unwrap();
            finished.unwrap();
        }

        let stored = library.items(user.id).await.unwrap();
        assert_eq!(stored[0].rating, Some(5));
        assert_eq!(stored[0].status, Status::Completed);
        assert_eq!(stored[0].progress_percent, 100);
    }

    #[tokio::test]
    async fn test_update_after_removal_does_not_resurrect_item() {
        let library = library();
        let user = library
            .create_profile("viewer".to_string(), None, false)
            .await
            .unwrap();
        let movie = library
            .track_item(user.id, new_item("Heat", MediaType::Movie, Status::Plan, &[]))
            .await
            .unwrap();

        library.remove_item(movie.id).await.unwrap();
        assert!(matches!(
            library.update_rating(movie.id, 4).await,
            Err(AppError::NotFound(_))
        ));
        assert!(library.items(user.id).await.unwrap().is_empty());
    }

    #[test]
    fn test_private_profiles_are_visible_only_to_owner() {
        let mut profile = UserProfile::new("hermit".to_string(), clock().now_utc());
        assert!(is_visible(&profile, None));

        profile.is_private = true;
        assert!(!is_visible(&profile, None));
        assert!(!is_visible(&profile, Some(Uuid::new_v4())));
        assert!(is_visible(&profile, Some(profile.id)));
    }
}
