use anyhow::Result;
use blockday_core::models::{NewBlockData, Recurrence};
use blockday_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::parser::{parse_date, parse_days_of_week, parse_optional_date, parse_time};
use crate::views::table::recurrence_label;

pub async fn add_block(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let date = parse_optional_date(command.date.as_deref())?;
    let start_time = parse_time(&command.start)?;
    let end_time = parse_time(&command.end)?;

    let recurring = match command.every {
        Some(kind) => Some(Recurrence {
            kind,
            end_date: command.until.as_deref().map(parse_date).transpose()?,
            days_of_week: command.on.as_deref().map(parse_days_of_week).transpose()?,
        }),
        None => None,
    };

    let new_block_data = NewBlockData {
        id: None,
        title: command.title,
        description: command.description,
        date,
        start_time,
        end_time,
        category: command.category,
        color: command.color,
        priority: command.priority,
        has_quiz: command.quiz,
        recurring,
        tasks: command.tasks,
    };

    let added = repo.add_block(new_block_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!(
        "{} Created block: {}",
        "✓".style(success_style),
        added.title.bright_white().bold()
    );
    println!("  {} Block ID: {}", "→".style(info_style), added.id.yellow());
    println!(
        "  {} {} {}–{}",
        "→".style(info_style),
        added.date.format("%a %Y-%m-%d"),
        added.start_time,
        added.end_time
    );
    if let Some(rule) = &added.recurring {
        println!("  {} Repeats {}", "→".style(info_style), recurrence_label(rule));
    }
    if added.duration_minutes() <= 0 {
        println!(
            "  {} Ends at or before its start; it will not show on the grid.",
            "⚠".yellow()
        );
    }

    Ok(())
}
