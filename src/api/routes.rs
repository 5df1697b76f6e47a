use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        // Outermost, so the trace span can see the request ID
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Profiles
        .route("/users", post(handlers::create_profile))
        .route("/users/:user_id", get(handlers::get_profile))
        // Tracked items
        .route(
            "/users/:user_id/items",
            get(handlers::list_items).post(handlers::track_item),
        )
        .route("/items/:item_id", delete(handlers::remove_item))
        .route("/items/:item_id/progress", patch(handlers::update_progress))
        .route("/items/:item_id/episodes", patch(handlers::update_episodes))
        .route("/items/:item_id/status", patch(handlers::update_status))
        .route("/items/:item_id/rating", patch(handlers::update_rating))
        // Social
        .route("/users/:user_id/followers", get(handlers::list_followers))
        .route("/users/:user_id/following", get(handlers::list_following))
        .route(
            "/users/:user_id/following/:target_id",
            get(handlers::is_following)
                .put(handlers::follow_user)
                .delete(handlers::unfollow_user),
        )
        .route(
            "/users/:user_id/playlists",
            get(handlers::list_playlists).post(handlers::create_playlist),
        )
        .route(
            "/playlists/:playlist_id",
            get(handlers::get_playlist)
                .patch(handlers::update_playlist)
                .delete(handlers::remove_playlist),
        )
        .route(
            "/playlists/:playlist_id/entries",
            post(handlers::add_playlist_entry),
        )
        .route(
            "/playlists/:playlist_id/entries/:entry_id",
            delete(handlers::remove_playlist_entry),
        )
        .route(
            "/items/:item_id/review",
            get(handlers::get_review).put(handlers::review_item),
        )
        .route("/users/:user_id/reviews", get(handlers::list_reviews))
        // Analytics
        .route("/users/:user_id/stats", get(handlers::get_statistics))
        .route("/users/:user_id/stats/public", get(handlers::get_public_statistics))
        .route("/users/:user_id/genres", get(handlers::get_genres))
        // Recommendations
        .route(
            "/users/:user_id/recommendations",
            post(handlers::recommend_for_user),
        )
        .route("/recommendations", post(handlers::recommend))
}
