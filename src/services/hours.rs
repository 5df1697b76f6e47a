use crate::models::{ByType, MediaType, Status, TrackedItem};

/// Assumed length of one TV episode, in minutes
const EPISODE_MINUTES: f64 = 45.0;

/// Estimated hours spent on a single item
///
/// Only completed and in-progress items count. TV is measured by watched
/// episodes whatever the status; every other type uses a flat per-status guess.
pub fn item_hours(item: &TrackedItem) -> f64 {
    if !item.status.is_consuming() {
        return 0.0;
    }

    let completed = item.status == Status::Completed;
    match item.media_type {
        MediaType::Movie => {
            if completed {
                2.0
            } else {
                1.0
            }
        }
        MediaType::Tv => f64::from(item.watched_episodes.unwrap_or(0)) * EPISODE_MINUTES / 60.0,
        MediaType::Book => {
            if completed {
                8.0
            } else {
                2.0
            }
        }
        MediaType::Game => {
            if completed {
                20.0
            } else {
                5.0
            }
        }
        MediaType::Unknown => 0.0,
    }
}

/// Total estimated hours consumed across the collection
pub fn estimate_hours(items: &[TrackedItem]) -> f64 {
    items.iter().map(item_hours).sum()
}

/// The same estimate, split by media type
pub fn hours_by_type(items: &[TrackedItem]) -> ByType<f64> {
    let mut hours = ByType::default();
    for item in items {
        if let Some(slot) = hours.get_mut(item.media_type) {
            *slot += item_hours(item);
        }
    }
    hours
}
