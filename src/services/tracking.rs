use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{Status, TrackedItem},
};

/// Status an item moves to after its progress changed
///
/// Finishing (100%) completes anything not dropped; starting a planned item
/// puts it in progress; otherwise an explicitly requested status applies.
fn status_after_progress(progress: u8, current: Status, requested: Option<Status>) -> Status {
    let effective = requested.unwrap_or(current);
    if progress >= 100 && effective != Status::Dropped {
        Status::Completed
    } else if progress > 0 && effective == Status::Plan {
        Status::InProgress
    } else {
        effective
    }
}

/// An explicitly requested status must be one of the known ones
fn requested_status(status: Option<Status>) -> AppResult<Option<Status>> {
    match status {
        Some(Status::Unknown) => Err(AppError::InvalidInput("Unknown status".to_string())),
        other => Ok(other),
    }
}

/// Records new progress, clamped to 0-100
pub fn update_progress(
    item: &mut TrackedItem,
    progress: i64,
    status: Option<Status>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let status = requested_status(status)?;
    let progress = progress.clamp(0, 100) as u8;

    item.status = status_after_progress(progress, item.status, status);
    item.progress_percent = progress;
    item.updated_at = now;
    Ok(())
}

/// Records watched episodes and derives progress from them
pub fn update_episodes(
    item: &mut TrackedItem,
    watched: u32,
    total: u32,
    status: Option<Status>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let status = requested_status(status)?;
    if watched > total {
        return Err(AppError::InvalidInput(format!(
            "Watched episodes ({}) exceed total episodes ({})",
            watched, total
        )));
    }

    let progress = if total > 0 {
        (f64::from(watched) / f64::from(total) * 100.0).round() as u8
    } else {
        0
    };

    item.watched_episodes = Some(watched);
    item.total_episodes = Some(total);
    item.status = status_after_progress(progress, item.status, status);
    item.progress_percent = progress;
    item.updated_at = now;
    Ok(())
}

/// Changes status; dropping or planning an item resets its progress
pub fn update_status(item: &mut TrackedItem, status: Status, now: DateTime<Utc>) -> AppResult<()> {
    if status == Status::Unknown {
        return Err(AppError::InvalidInput("Unknown status".to_string()));
    }

    if matches!(status, Status::Dropped | Status::Plan) {
        item.progress_percent = 0;
    }
    item.status = status;
    item.updated_at = now;
    Ok(())
}

/// A star rating between 1 and 5
pub fn validate_rating(rating: i64) -> AppResult<u8> {
    match u8::try_from(rating) {
        Ok(stars @ 1..=5) => Ok(stars),
        _ => Err(AppError::InvalidInput(format!(
            "Rating must be between 1 and 5, got {}",
            rating
        ))),
    }
}

/// Sets the star rating
pub fn update_rating(item: &mut TrackedItem, rating: i64, now: DateTime<Utc>) -> AppResult<()> {
    item.rating = Some(validate_rating(rating)?);
    item.updated_at = now;
    Ok(())
}
