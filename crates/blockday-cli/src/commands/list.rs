use anyhow::Result;
use blockday_core::category::normalize_name;
use blockday_core::repository::Repository;

use crate::cli::ListCommand;
use crate::views::table::display_blocks;

pub async fn list_blocks(repo: &impl Repository, command: ListCommand) -> Result<()> {
    let category = command.category.as_deref().map(normalize_name).transpose()?;

    let blocks: Vec<_> = repo
        .find_blocks()
        .await?
        .into_iter()
        .filter(|b| category.as_ref().map_or(true, |c| &b.category == c))
        .filter(|b| !command.recurring || b.is_recurring())
        .collect();

    let palette = repo.palette().await?;
    display_blocks(&blocks, &palette);

    Ok(())
}
