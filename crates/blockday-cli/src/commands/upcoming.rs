use anyhow::{anyhow, Result};
use blockday_core::repository::Repository;
use blockday_core::upcoming::{reminders_due, upcoming};
use chrono::{Duration, Local};

use crate::cli::UpcomingCommand;
use crate::views::table::{display_reminders, display_upcoming};

pub async fn show_upcoming(repo: &impl Repository, command: UpcomingCommand) -> Result<()> {
    let now = Local::now().naive_local();
    let settings = repo.load_settings().await?;

    let lookahead = Duration::hours(command.hours as i64)
        + Duration::minutes(settings.notifications.default_reminder as i64);
    let until = now
        .checked_add_signed(lookahead)
        .ok_or_else(|| anyhow!("--hours {} reaches past the supported date range", command.hours))?;
    let first_day = now.date().pred_opt().unwrap_or(now.date());
    let blocks = repo.find_blocks_active_between(first_day, until.date()).await?;

    if command.reminders {
        if !settings.notifications.enabled {
            println!("Notifications are turned off (blockday settings set --notifications true).");
            return Ok(());
        }
        display_reminders(&reminders_due(&blocks, now, &settings.notifications));
    } else {
        let palette = repo.palette().await?;
        display_upcoming(&upcoming(&blocks, now, Duration::hours(command.hours as i64)), &palette);
    }

    Ok(())
}
