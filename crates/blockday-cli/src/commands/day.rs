use anyhow::Result;
use blockday_core::layout::{layout_day, GridConfig};
use blockday_core::recurrence::occurrences_for_day;
use blockday_core::repository::Repository;

use crate::cli::DayCommand;
use crate::parser::parse_optional_date;
use crate::views::table::display_day;

pub async fn show_day(repo: &impl Repository, command: DayCommand, grid: &GridConfig) -> Result<()> {
    let date = parse_optional_date(command.date.as_deref())?;

    let blocks = repo.find_blocks_active_between(date, date).await?;
    let placed = layout_day(&blocks, date, grid);
    let hidden = occurrences_for_day(&blocks, date).len().saturating_sub(placed.len());

    let palette = repo.palette().await?;
    display_day(date, &placed, hidden, grid, &palette);

    Ok(())
}
