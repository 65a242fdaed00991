//! Upcoming occurrences and reminder times.
//!
//! Times are naive local date-times; the caller supplies `now` so results are
//! reproducible.

use chrono::{Duration, NaiveDateTime};

use crate::models::Block;
use crate::recurrence::occurrences_for_day;
use crate::settings::NotificationSettings;

/// An occurrence starting within the requested horizon.
#[derive(Debug, Clone)]
pub struct Upcoming<'a> {
    pub block: &'a Block,
    pub starts_at: NaiveDateTime,
    /// Human-readable delay, e.g. `2h 5m` or `45m`
    pub time_until: String,
    pub is_today: bool,
}

/// A reminder to fire ahead of an occurrence.
#[derive(Debug, Clone)]
pub struct Reminder<'a> {
    pub block: &'a Block,
    pub remind_at: NaiveDateTime,
    pub starts_at: NaiveDateTime,
    pub title: String,
    pub message: String,
}

/// Formats a positive delay as `{h}h {m}m`, or `{m}m` under an hour.
pub fn format_time_until(delay: Duration) -> String {
    let hours = delay.num_hours();
    let minutes = delay.num_minutes() % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Occurrences starting strictly after `now` and no later than
/// `now + horizon`, ordered by start.
pub fn upcoming(blocks: &[Block], now: NaiveDateTime, horizon: Duration) -> Vec<Upcoming<'_>> {
    let today = now.date();
    let until = now.checked_add_signed(horizon).unwrap_or(NaiveDateTime::MAX);
    let mut found = Vec::new();

    // A block starting at 24:00 the previous day lands on `today`.
    let first_day = today.pred_opt().unwrap_or(today);
    for day in first_day.iter_days().take_while(|day| *day <= until.date()) {
        for block in occurrences_for_day(blocks, day) {
            let starts_at = block.start_time.on(day);
            if starts_at <= now || starts_at > until {
                continue;
            }
            found.push(Upcoming {
                block,
                starts_at,
                time_until: format_time_until(starts_at - now),
                is_today: starts_at.date() == today,
            });
        }
    }

    found.sort_by_key(|u| u.starts_at);
    found
}

/// Reminders for occurrences in the next 24 hours whose reminder time
/// (`start - default_reminder`) is still in the future. Empty when
/// notifications are disabled.
pub fn reminders_due<'a>(
    blocks: &'a [Block],
    now: NaiveDateTime,
    notifications: &NotificationSettings,
) -> Vec<Reminder<'a>> {
    if !notifications.enabled {
        return Vec::new();
    }

    let lead = Duration::minutes(notifications.default_reminder as i64);
    upcoming(blocks, now, Duration::hours(24) + lead)
        .into_iter()
        .filter_map(|u| {
            let remind_at = u.starts_at - lead;
            (remind_at > now).then(|| Reminder {
                block: u.block,
                remind_at,
                starts_at: u.starts_at,
                title: format!("Upcoming: {}", u.block.title),
                message: format!("Starting in {} minutes", notifications.default_reminder),
            })
        })
        .collect()
}
