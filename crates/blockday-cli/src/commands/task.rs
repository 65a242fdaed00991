use anyhow::Result;
use blockday_core::repository::Repository;

use crate::cli::{TaskCommand, TaskSubcommand};
use crate::util::{resolve_block, resolve_task, short_id};
use crate::views::table::display_tasks;

pub async fn task_command(repo: &impl Repository, command: TaskCommand) -> Result<()> {
    match command.command {
        TaskSubcommand::Add { block, title, priority } => {
            let block = resolve_block(repo, &block).await?;
            let updated = repo.add_block_task(&block.id, title, priority).await?;
            if let Some(task) = updated.tasks.last() {
                println!("Added task '{}' ({}) to '{}'", task.title, short_id(&task.id), updated.title);
            }
        }
        TaskSubcommand::Done { block, task } => set_completed(repo, &block, &task, true).await?,
        TaskSubcommand::Undo { block, task } => set_completed(repo, &block, &task, false).await?,
        TaskSubcommand::Remove { block, task } => {
            let block = resolve_block(repo, &block).await?;
            let task = resolve_task(&block, &task)?;
            repo.remove_block_task(&block.id, &task.id).await?;
            println!("Removed task '{}' from '{}'", task.title, block.title);
        }
        TaskSubcommand::List { block } => {
            let block = resolve_block(repo, &block).await?;
            display_tasks(&block);
        }
    }
    Ok(())
}

async fn set_completed(repo: &impl Repository, block_id: &str, task_id: &str, completed: bool) -> Result<()> {
    let block = resolve_block(repo, block_id).await?;
    let task = resolve_task(&block, task_id)?;
    let updated = repo.set_block_task_completed(&block.id, &task.id, completed).await?;

    let done = updated.tasks.iter().filter(|t| t.completed).count();
    let verb = if completed { "Completed" } else { "Reopened" };
    println!(
        "{} task '{}' ({}/{} done in '{}')",
        verb,
        task.title,
        done,
        updated.tasks.len(),
        updated.title
    );
    Ok(())
}
