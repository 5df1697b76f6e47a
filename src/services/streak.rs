use chrono::{FixedOffset, NaiveDate};

use crate::models::{Status, TrackedItem};

/// Current and best completion streaks, in days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakStats {
    pub current: u32,
    pub longest: u32,
}

/// Distinct local calendar dates on which something was completed, newest first
fn completion_dates(items: &[TrackedItem], offset: &FixedOffset) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = items
        .iter()
        .filter(|item| item.status == Status::Completed)
        .map(|item| item.updated_at.with_timezone(offset).date_naive())
        .collect();

    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();
    dates
}

/// Consecutive days with at least one completion, ending today or yesterday
///
/// Each date must be exactly one day before the date examined just before it;
/// the first larger gap ends the run. A newest completion older than yesterday
/// means the streak is broken and the result is 0.
pub fn current_streak(items: &[TrackedItem], today: NaiveDate, offset: &FixedOffset) -> u32 {
    let dates = completion_dates(items, offset);

    let Some(&newest) = dates.first() else {
        return 0;
    };

    let days_since = (today - newest).num_days();
    if days_since != 0 && days_since != 1 {
        return 0;
    }

    let continued = dates
        .windows(2)
        .take_while(|pair| (pair[0] - pair[1]).num_days() == 1)
        .count();

    1 + continued as u32
}

/// Longest run of consecutive completion days anywhere in the history
pub fn longest_streak(items: &[TrackedItem], offset: &FixedOffset) -> u32 {
    let dates = completion_dates(items, offset);
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in dates {
        run = match prev {
            Some(later) if (later - date).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

pub fn streak_stats(items: &[TrackedItem], today: NaiveDate, offset: &FixedOffset) -> StreakStats {
    StreakStats {
        current: current_streak(items, today, offset),
        longest: longest_streak(items, offset),
    }
}
