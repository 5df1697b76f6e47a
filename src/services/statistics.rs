use chrono::{FixedOffset, NaiveDate};

use crate::models::{
    ByType, LastCompleted, Status, StatisticsSummary, TrackedItem, TypeStatusCounts,
};
use crate::services::{hours, streak};

/// Mean of all present, positive ratings; 0 when nothing is rated
pub fn average_rating(items: &[TrackedItem]) -> f64 {
    let ratings: Vec<f64> = items
        .iter()
        .filter_map(|item| item.rating)
        .filter(|&rating| rating > 0)
        .map(f64::from)
        .collect();

    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

/// Builds the statistics summary for one user's collection
///
/// `today` and `offset` anchor the streak to the user's local calendar.
/// Unknown statuses and media types are counted in `total` only.
pub fn summarize(items: &[TrackedItem], today: NaiveDate, offset: &FixedOffset) -> StatisticsSummary {
    let mut summary = StatisticsSummary {
        total: items.len(),
        ..StatisticsSummary::default()
    };
    let mut by_type: ByType<usize> = ByType::default();
    let mut by_type_status: ByType<TypeStatusCounts> = ByType::default();

    for item in items {
        match item.status {
            Status::Completed => summary.completed += 1,
            Status::InProgress => summary.in_progress += 1,
            Status::Plan => summary.planned += 1,
            Status::Dropped => summary.dropped += 1,
            Status::Unknown => {}
        }

        if let Some(count) = by_type.get_mut(item.media_type) {
            *count += 1;
        }

        if let Some(counts) = by_type_status.get_mut(item.media_type) {
            counts.total += 1;
            match item.status {
                Status::Completed => counts.completed += 1,
                Status::InProgress => counts.in_progress += 1,
                Status::Plan => counts.planned += 1,
                Status::Dropped | Status::Unknown => {}
            }
        }
    }

    let completed: Vec<TrackedItem> = items
        .iter()
        .filter(|item| item.status == Status::Completed)
        .cloned()
        .collect();
    let streaks = streak::streak_stats(&completed, today, offset);

    summary.average_rating = average_rating(items);
    summary.by_type = by_type;
    summary.by_type_status = by_type_status;
    summary.streak_days = streaks.current;
    summary.longest_streak_days = streaks.longest;
    summary.estimated_hours = hours::estimate_hours(items);
    summary.hours_by_type = hours::hours_by_type(items);
    summary.last_completed = completed
        .iter()
        .max_by_key(|item| item.updated_at)
        .map(|item| LastCompleted {
            title: item.title.clone(),
            completed_at: item.updated_at,
        });

    tracing::debug!(
        total = summary.total,
        streak_days = summary.streak_days,
        estimated_hours = summary.estimated_hours,
        "Statistics summarized"
    );

    summary
}
