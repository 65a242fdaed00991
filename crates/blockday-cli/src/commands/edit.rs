use anyhow::{anyhow, Result};
use blockday_core::models::{Recurrence, UpdateBlockData};
use blockday_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::cli::EditCommand;
use crate::parser::{parse_date, parse_days_of_week, parse_time};
use crate::util::resolve_block;

pub async fn edit_block(repo: &impl Repository, command: EditCommand) -> Result<()> {
    let block = resolve_block(repo, &command.id).await?;

    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };

    let color = if command.color_clear {
        Some(None)
    } else {
        command.color.map(Some)
    };

    let priority = if command.priority_clear {
        Some(None)
    } else {
        command.priority.map(Some)
    };

    // --every replaces the rule; --on/--until alone adjust the existing one.
    let recurring = if command.recurrence_clear {
        Some(None)
    } else if command.every.is_some() || command.on.is_some() || command.until.is_some() || command.until_clear {
        let mut rule = match (command.every, block.recurring.clone()) {
            (Some(kind), _) => Recurrence::new(kind),
            (None, Some(existing)) => existing,
            (None, None) => {
                return Err(anyhow!(
                    "Block '{}' does not repeat; pass --every to make it recurring",
                    block.title
                ))
            }
        };
        if let Some(days) = command.on.as_deref() {
            rule.days_of_week = Some(parse_days_of_week(days)?);
        }
        if command.until_clear {
            rule.end_date = None;
        } else if let Some(until) = command.until.as_deref() {
            rule.end_date = Some(parse_date(until)?);
        }
        Some(Some(rule))
    } else {
        None
    };

    let update_data = UpdateBlockData {
        title: command.title,
        description,
        date: command.date.as_deref().map(parse_date).transpose()?,
        start_time: command.start.as_deref().map(parse_time).transpose()?,
        end_time: command.end.as_deref().map(parse_time).transpose()?,
        category: command.category,
        color,
        priority,
        has_quiz: command.quiz,
        recurring,
        tasks: None,
    };

    let updated = repo.update_block(&block.id, update_data).await?;
    println!("Updated block '{}' ({})", updated.title, updated.id);
    if updated.is_recurring() {
        println!("{}", "All occurrences, past and future, now follow the new definition.".bright_black());
    }

    Ok(())
}
