use anyhow::Result;
use blockday_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::DeleteCommand;
use crate::util::resolve_block;

pub async fn delete_block(repo: &impl Repository, command: DeleteCommand) -> Result<()> {
    let block = resolve_block(repo, &command.id).await?;

    if !command.force {
        let prompt = if block.is_recurring() {
            format!("Delete '{}' and all of its occurrences?", block.title)
        } else {
            format!("Are you sure you want to delete block '{}'?", block.title)
        };
        let confirmation = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_block(&block.id).await?;
    println!("Deleted block '{}'.", block.title);
    Ok(())
}
