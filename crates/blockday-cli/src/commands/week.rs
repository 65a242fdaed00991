use anyhow::Result;
use blockday_core::recurrence::{occurrences_for_week, week_days};
use blockday_core::repository::Repository;

use crate::cli::WeekCommand;
use crate::parser::parse_optional_date;
use crate::views::table::display_week;

pub async fn show_week(repo: &impl Repository, command: WeekCommand) -> Result<()> {
    let date = parse_optional_date(command.date.as_deref())?;
    let week_start = match command.week_start {
        Some(start) => start,
        None => repo.load_settings().await?.week_starts_on,
    };

    let days = week_days(date, week_start);
    let blocks = repo.find_blocks_active_between(days[0], days[6]).await?;
    let week = occurrences_for_week(&blocks, date, week_start);

    let palette = repo.palette().await?;
    display_week(&week, &palette);

    Ok(())
}
