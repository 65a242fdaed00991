use anyhow::{Context, Result};
use blockday_core::repository::Repository;

use crate::cli::ExportCommand;

pub async fn export_blocks(repo: &impl Repository, command: ExportCommand) -> Result<()> {
    let blocks = repo.find_blocks().await?;
    let json = serde_json::to_string_pretty(&blocks)?;

    match command.file {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} block(s) to {}", blocks.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
