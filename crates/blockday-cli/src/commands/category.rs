use anyhow::Result;
use blockday_core::repository::Repository;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};

use crate::cli::{CategoryCommand, CategorySubcommand};
use crate::views::table::display_categories;

pub async fn category_command(repo: &impl Repository, command: CategoryCommand) -> Result<()> {
    match command.command {
        CategorySubcommand::Add { name, color } => {
            let category = repo.add_category(&name, &color).await?;
            println!(
                "{} Created category: {} ({})",
                "✓".style(Style::new().green().bold()),
                category.name.bold(),
                category.color
            );
        }
        CategorySubcommand::List => {
            let palette = repo.palette().await?;
            display_categories(&palette.all());
        }
        CategorySubcommand::Delete { name, force } => {
            if !force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Delete category '{}'? Blocks using it fall back to the default colour.",
                        name
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if !confirmation {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }
            repo.delete_category(&name).await?;
            println!("Deleted category '{}'.", name);
        }
    }
    Ok(())
}
