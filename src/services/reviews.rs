use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Review,
    services::{
        library::{is_visible, Library},
        playlists::optional_text,
        tracking,
    },
};

impl Library {
    /// Writes or replaces the review of a tracked item
    ///
    /// The review's rating also becomes the item's rating.
    pub async fn review_item(
        &self,
        item_id: Uuid,
        rating: i64,
        content: Option<String>,
    ) -> AppResult<Review> {
        let stars = tracking::validate_rating(rating)?;
        let item = self
            .modify_item(item_id, move |item, now| {
                tracking::update_rating(item, rating, now)
            })
            .await?;

        let review = Review::new(
            item.user_id,
            item.id,
            stars,
            optional_text(content),
            item.updated_at,
        );
        let review = self
            .store
            .save_review(review)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {}", item_id)))?;

        tracing::info!(user_id = %review.user_id, item_id = %item_id, rating = stars, "Review saved");
        Ok(review)
    }

    /// The review of an item; a review on a hidden profile is not found
    pub async fn review(&self, item_id: Uuid, viewer: Option<Uuid>) -> AppResult<Review> {
        let not_found = || AppError::NotFound(format!("Review of item {}", item_id));

        let review = self.store.get_review(item_id).await?.ok_or_else(not_found)?;
        let author = self.profile(review.user_id).await?;
        if !is_visible(&author, viewer) {
            return Err(not_found());
        }
        Ok(review)
    }

    /// A user's reviews; empty when the profile is hidden from `viewer`
    pub async fn reviews(&self, user_id: Uuid, viewer: Option<Uuid>) -> AppResult<Vec<Review>> {
        let profile = self.profile(user_id).await?;
        if !is_visible(&profile, viewer) {
            return Ok(Vec::new());
        }
        self.store.list_reviews(user_id).await
    }
}
