use anyhow::{Context, Result};
use blockday_core::models::Block;
use blockday_core::repository::Repository;

use crate::cli::ImportCommand;

pub async fn import_blocks(repo: &impl Repository, command: ImportCommand) -> Result<()> {
    let json = std::fs::read_to_string(&command.file)
        .with_context(|| format!("Failed to read {}", command.file.display()))?;
    let blocks: Vec<Block> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of blocks", command.file.display()))?;

    let count = repo.import_blocks(blocks).await?;
    println!("Imported {} block(s) from {}", count, command.file.display());
    Ok(())
}
