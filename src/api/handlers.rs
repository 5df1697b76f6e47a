use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::request_id::RequestId;
use crate::models::{
    Connection, Follow, MediaType, Playlist, Recommendation, Review, StatisticsSummary, Status,
    TrackedItemView, UserProfile,
};
use crate::services::{GenreReport, NewItem, PlaylistUpdate};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackItemRequest {
    pub title: String,
    pub media_type: MediaType,
    #[serde(default = "default_status")]
    pub status: Status,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub total_episodes: Option<u32>,
}

fn default_status() -> Status {
    Status::Plan
}

impl From<TrackItemRequest> for NewItem {
    fn from(request: TrackItemRequest) -> Self {
        Self {
            title: request.title,
            media_type: request.media_type,
            status: request.status,
            genres: request.genres,
            total_episodes: request.total_episodes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    /// Out-of-range values are clamped to 0..=100
    pub progress: i64,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEpisodesRequest {
    pub watched_episodes: u32,
    pub total_episodes: u32,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Status,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatingRequest {
    /// Validated to 1..=5 by the library, so any integer is accepted here
    pub rating: i64,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Free-text time budget, e.g. "2 hours"
    pub time: String,
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousRecommendRequest {
    pub time: String,
    #[serde(default)]
    pub preferred_genres: Vec<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// `recommendation` is null when the time budget yields nothing to recommend
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: Option<Recommendation>,
}

/// Who is looking at a profile; absent for anonymous visitors
#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    #[serde(default)]
    pub viewer: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingResponse {
    pub is_following: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaylistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl From<UpdatePlaylistRequest> for PlaylistUpdate {
    fn from(request: UpdatePlaylistRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            is_public: request.is_public,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlaylistEntryRequest {
    pub item_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: i64,
    #[serde(default)]
    pub content: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Create a user profile
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let profile = state
        .library
        .create_profile(request.username, request.bio, request.is_private)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Get a user profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.library.profile(user_id).await?))
}

/// List a user's tracked items
pub async fn list_items(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<TrackedItemView>>> {
    let items = state.library.items(user_id).await?;
    Ok(Json(items.into_iter().map(TrackedItemView::from).collect()))
}

/// Start tracking an item
pub async fn track_item(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<TrackItemRequest>,
) -> AppResult<(StatusCode, Json<TrackedItemView>)> {
    let item = state.library.track_item(user_id, request.into()).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Stop tracking an item
pub async fn remove_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.library.remove_item(item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_progress(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdateProgressRequest>,
) -> AppResult<Json<TrackedItemView>> {
    let item = state
        .library
        .update_progress(item_id, request.progress, request.status)
        .await?;
    Ok(Json(item.into()))
}

pub async fn update_episodes(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdateEpisodesRequest>,
) -> AppResult<Json<TrackedItemView>> {
    let item = state
        .library
        .update_episodes(
            item_id,
            request.watched_episodes,
            request.total_episodes,
            request.status,
        )
        .await?;
    Ok(Json(item.into()))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<TrackedItemView>> {
    let item = state.library.update_status(item_id, request.status).await?;
    Ok(Json(item.into()))
}

pub async fn update_rating(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdateRatingRequest>,
) -> AppResult<Json<TrackedItemView>> {
    let item = state.library.update_rating(item_id, request.rating).await?;
    Ok(Json(item.into()))
}

/// Statistics for the user's own dashboard
pub async fn get_statistics(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<StatisticsSummary>> {
    Ok(Json(state.library.statistics(user_id).await?))
}

/// Statistics as shown on a profile page to other users
pub async fn get_public_statistics(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<StatisticsSummary>> {
    Ok(Json(state.library.public_statistics(user_id).await?))
}

/// Genre ranking and preferred genres
pub async fn get_genres(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<GenreReport>> {
    Ok(Json(state.library.genres(user_id).await?))
}

/// Recommendation personalized by the user's library
pub async fn recommend_for_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        "Processing recommendation request"
    );

    let recommendation = state
        .library
        .recommend(user_id, &request.time, request.genre.as_deref())
        .await?;

    Ok(Json(RecommendationResponse { recommendation }))
}

/// Recommendation from genres supplied by the caller
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AnonymousRecommendRequest>,
) -> Json<RecommendationResponse> {
    let recommendation = state.library.recommend_with(
        &request.time,
        &request.preferred_genres,
        request.genre.as_deref(),
    );

    tracing::info!(
        request_id = %request_id,
        time = %request.time,
        band = ?recommendation.as_ref().map(|r| r.duration_band),
        "Anonymous recommendation served"
    );

    Json(RecommendationResponse { recommendation })
}

// Social

pub async fn list_followers(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<Vec<Connection>>> {
    Ok(Json(state.library.followers(user_id, query.viewer).await?))
}

pub async fn list_following(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<Vec<Connection>>> {
    Ok(Json(state.library.following(user_id, query.viewer).await?))
}

pub async fn is_following(
    State(state): State<AppState>,
    Path((user_id, target_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<FollowingResponse>> {
    let is_following = state.library.is_following(user_id, target_id).await?;
    Ok(Json(FollowingResponse { is_following }))
}

/// Follow a user; repeating the request returns the existing follow
pub async fn follow_user(
    State(state): State<AppState>,
    Path((user_id, target_id)): Path<(Uuid, Uuid)>,
) -> AppResult<(StatusCode, Json<Follow>)> {
    let (follow, created) = state.library.follow(user_id, target_id).await?;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(follow)))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    Path((user_id, target_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state.library.unfollow(user_id, target_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_playlist(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<CreatePlaylistRequest>,
) -> AppResult<(StatusCode, Json<Playlist>)> {
    let playlist = state
        .library
        .create_playlist(user_id, &request.name, request.description, request.is_public)
        .await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// A user's playlists; private ones only when the owner is asking
pub async fn list_playlists(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<Vec<Playlist>>> {
    Ok(Json(state.library.playlists(user_id, query.viewer).await?))
}

pub async fn get_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<Playlist>> {
    Ok(Json(state.library.playlist(playlist_id, query.viewer).await?))
}

pub async fn update_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
    Json(request): Json<UpdatePlaylistRequest>,
) -> AppResult<Json<Playlist>> {
    let playlist = state
        .library
        .update_playlist(playlist_id, request.into())
        .await?;
    Ok(Json(playlist))
}

pub async fn remove_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.library.remove_playlist(playlist_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_playlist_entry(
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
    Json(request): Json<AddPlaylistEntryRequest>,
) -> AppResult<(StatusCode, Json<Playlist>)> {
    let playlist = state
        .library
        .add_to_playlist(playlist_id, request.item_id)
        .await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

pub async fn remove_playlist_entry(
    State(state): State<AppState>,
    Path((playlist_id, entry_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .library
        .remove_from_playlist(playlist_id, entry_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Write or replace the review of an item
pub async fn review_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<ReviewRequest>,
) -> AppResult<Json<Review>> {
    let review = state
        .library
        .review_item(item_id, request.rating, request.content)
        .await?;
    Ok(Json(review))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<Review>> {
    Ok(Json(state.library.review(item_id, query.viewer).await?))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.library.reviews(user_id, query.viewer).await?))
}
