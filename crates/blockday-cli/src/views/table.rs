use blockday_core::category::{hex_to_rgb, CategoryEntry, ColorResolver};
use blockday_core::layout::{GridConfig, PlacedBlock};
use blockday_core::models::{Block, Priority, Recurrence, RecurrenceKind};
use blockday_core::recurrence::DayOccurrences;
use blockday_core::settings::CalendarSettings;
use blockday_core::upcoming::{Reminder, Upcoming};
use chrono::NaiveDate;
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};

use crate::parser::today;
use crate::util::short_id;

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn color_cell(text: impl ToString, hex: &str) -> Cell {
    let cell = Cell::new(text.to_string());
    match hex_to_rgb(hex) {
        Some((r, g, b)) => cell.fg(Color::Rgb { r, g, b }),
        None => cell,
    }
}

fn title_cell(block: &Block) -> Cell {
    let mut title = block.title.clone();
    if block.is_recurring() {
        title.insert_str(0, "↻ ");
    }
    if block.has_quiz {
        title.push_str(" (Quiz)");
    }
    let cell = Cell::new(title);
    match block.priority {
        Some(Priority::High) => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        Some(Priority::Medium) => cell.fg(Color::Yellow),
        Some(Priority::Low) => cell.fg(Color::Green),
        None => cell,
    }
}

fn tasks_summary(block: &Block) -> String {
    if block.tasks.is_empty() {
        return String::new();
    }
    let done = block.tasks.iter().filter(|t| t.completed).count();
    format!("{}/{}", done, block.tasks.len())
}

fn time_range(block: &Block) -> String {
    format!("{}–{}", block.start_time, block.end_time)
}

/// `weekly (Mon, Wed) until 2024-12-31` and similar.
pub fn recurrence_label(rule: &Recurrence) -> String {
    let mut label = match &rule.kind {
        RecurrenceKind::Weekly => match rule.days_of_week.as_deref() {
            Some(days) if !days.is_empty() => {
                let names: Vec<&str> = days
                    .iter()
                    .filter_map(|d| WEEKDAY_NAMES.get(*d as usize).copied())
                    .collect();
                format!("weekly ({})", names.join(", "))
            }
            _ => "weekly".to_string(),
        },
        RecurrenceKind::Unknown(kind) => format!("unsupported ({})", kind),
        kind => kind.to_string(),
    };
    if let Some(end) = rule.end_date {
        label.push_str(&format!(" until {}", end));
    }
    label
}

pub fn display_blocks(blocks: &[Block], palette: &impl ColorResolver) {
    if blocks.is_empty() {
        println!("No blocks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Date", "Time", "Category", "Repeats", "Tasks", "Updated"]);

    for block in blocks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&block.id)));
        row.add_cell(title_cell(block));
        row.add_cell(Cell::new(block.date.format("%a %Y-%m-%d")));
        row.add_cell(Cell::new(time_range(block)));
        row.add_cell(color_cell(&block.category, palette.block_color(block)));
        row.add_cell(Cell::new(
            block.recurring.as_ref().map(recurrence_label).unwrap_or_default(),
        ));
        row.add_cell(Cell::new(tasks_summary(block)));
        row.add_cell(Cell::new(block.updated_at.humanize()).fg(Color::DarkGrey));
        table.add_row(row);
    }

    println!("{table}");
}

/// Renders one day as hour rows of the time grid. `hidden` counts occurrences
/// left out because they start before the grid.
pub fn display_day(
    date: NaiveDate,
    placed: &[PlacedBlock<'_>],
    hidden: usize,
    grid: &GridConfig,
    palette: &impl ColorResolver,
) {
    let heading = date.format("%A, %B %-d, %Y").to_string();
    if date == today() {
        println!("{} (today)", heading);
    } else {
        println!("{}", heading);
    }

    let slots = grid.hour_slots();
    let mut rows: Vec<Vec<&PlacedBlock<'_>>> = vec![Vec::new(); slots.len()];
    // Blocks starting at or after the grid's end hour get their own group
    let mut late: Vec<&PlacedBlock<'_>> = Vec::new();
    for item in placed {
        let slot = (item.placement.top / grid.pixels_per_hour).floor() as usize;
        match rows.get_mut(slot) {
            Some(row) => row.push(item),
            None => late.push(item),
        }
    }

    let mut table = Table::new();
    table.set_header(vec!["Hour", "ID", "Time", "Title", "Category", "Length", "Tasks"]);

    for (label, items) in slots.iter().zip(rows.iter()) {
        if items.is_empty() {
            table.add_row(vec![Cell::new(label).fg(Color::DarkGrey)]);
            continue;
        }
        add_day_rows(&mut table, Cell::new(label), items, palette);
    }
    if !late.is_empty() {
        let label = Cell::new(format!("after {:02}:00", grid.end_hour)).fg(Color::Yellow);
        add_day_rows(&mut table, label, &late, palette);
    }

    println!("{table}");
    if hidden > 0 {
        println!(
            "{} block(s) start before {:02}:00 and are not shown on the grid.",
            hidden, grid.origin_hour
        );
    }
}

/// One row per block; the hour label goes on the first.
fn add_day_rows(table: &mut Table, hour: Cell, items: &[&PlacedBlock<'_>], palette: &impl ColorResolver) {
    let mut hour = Some(hour);
    for item in items {
        let block = item.block;
        let length = if item.placement.is_degenerate() {
            Cell::new("⚠ ends before start").fg(Color::Yellow)
        } else {
            let minutes = block.duration_minutes();
            Cell::new(format!("{}h {:02}m", minutes / 60, minutes % 60))
        };

        let mut row = Row::new();
        row.add_cell(hour.take().unwrap_or_else(|| Cell::new("")));
        row.add_cell(Cell::new(short_id(&block.id)));
        row.add_cell(Cell::new(time_range(block)));
        row.add_cell(title_cell(block));
        row.add_cell(color_cell(&block.category, palette.block_color(block)));
        row.add_cell(length);
        row.add_cell(Cell::new(tasks_summary(block)));
        table.add_row(row);
    }
}

pub fn display_week(days: &[DayOccurrences<'_>], palette: &impl ColorResolver) {
    let today = today();
    let mut table = Table::new();

    let header: Vec<Cell> = days
        .iter()
        .map(|day| {
            let cell = Cell::new(day.date.format("%a %d/%m"));
            if day.date == today {
                cell.add_attribute(Attribute::Bold).fg(Color::Cyan)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header);

    let cells: Vec<Cell> = days
        .iter()
        .map(|day| {
            let lines: Vec<String> = day
                .blocks
                .iter()
                .map(|block| format!("{} {}", block.start_time, block.title))
                .collect();
            // Single-block days take the block's colour.
            match day.blocks.first() {
                Some(first) if day.blocks.len() == 1 => color_cell(lines.join("\n"), palette.block_color(first)),
                _ => Cell::new(lines.join("\n")),
            }
        })
        .collect();
    table.add_row(cells);

    println!("{table}");
}

pub fn display_tasks(block: &Block) {
    if block.tasks.is_empty() {
        println!("No tasks in '{}'.", block.title);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Priority", "Done"]);
    for task in &block.tasks {
        let mut title = Cell::new(&task.title);
        if task.completed {
            title = title.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey);
        }
        table.add_row(vec![
            Cell::new(short_id(&task.id)),
            title,
            Cell::new(task.priority.map(|p| p.to_string()).unwrap_or_default()),
            Cell::new(if task.completed { "✓" } else { "" }).fg(Color::Green),
        ]);
    }
    println!("{table}");
}

pub fn display_categories(entries: &[CategoryEntry]) {
    let mut table = Table::new();
    table.set_header(vec!["Name", "Colour", "Kind"]);
    for entry in entries {
        table.add_row(vec![
            color_cell(&entry.name, &entry.color),
            Cell::new(&entry.color),
            Cell::new(if entry.is_default { "built-in" } else { "custom" }).fg(Color::DarkGrey),
        ]);
    }
    println!("{table}");
}

pub fn display_upcoming(items: &[Upcoming<'_>], palette: &impl ColorResolver) {
    if items.is_empty() {
        println!("Nothing coming up.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Starts", "In", "Title", "Category"]);
    for item in items {
        let starts = if item.is_today {
            item.starts_at.format("today %H:%M").to_string()
        } else {
            item.starts_at.format("%a %d/%m %H:%M").to_string()
        };
        let mut row = Row::new();
        row.add_cell(Cell::new(starts));
        row.add_cell(Cell::new(&item.time_until).fg(Color::Yellow));
        row.add_cell(title_cell(item.block));
        row.add_cell(color_cell(&item.block.category, palette.block_color(item.block)));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_reminders(reminders: &[Reminder<'_>]) {
    if reminders.is_empty() {
        println!("No reminders pending.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Remind at", "Title", "Message"]);
    for reminder in reminders {
        table.add_row(vec![
            Cell::new(reminder.remind_at.format("%a %d/%m %H:%M")),
            Cell::new(&reminder.title).add_attribute(Attribute::Bold),
            Cell::new(&reminder.message),
        ]);
    }
    println!("{table}");
}

pub fn display_settings(settings: &CalendarSettings) {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let notifications = &settings.notifications;

    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["Default view".to_string(), settings.default_view.to_string()]);
    table.add_row(vec!["Week starts on".to_string(), settings.week_starts_on.to_string()]);
    table.add_row(vec![
        "Working hours".to_string(),
        format!("{}–{}", settings.working_hours.start, settings.working_hours.end),
    ]);
    table.add_row(vec!["Notifications".to_string(), on_off(notifications.enabled).to_string()]);
    table.add_row(vec![
        "Reminder".to_string(),
        format!("{} minutes before", notifications.default_reminder),
    ]);
    table.add_row(vec!["Sound".to_string(), on_off(notifications.sound_enabled).to_string()]);
    table.add_row(vec![
        "Browser notifications".to_string(),
        on_off(notifications.browser_notifications).to_string(),
    ]);
    table.add_row(vec!["Theme".to_string(), settings.theme.to_string()]);
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"type":"daily"}"#, "daily")]
    #[case(r#"{"type":"weekly","daysOfWeek":[1,3]}"#, "weekly (Mon, Wed)")]
    #[case(r#"{"type":"weekly","daysOfWeek":[]}"#, "weekly")]
    #[case(r#"{"type":"monthly","endDate":"2024-12-31"}"#, "monthly until 2024-12-31")]
    #[case(r#"{"type":"yearly"}"#, "unsupported (yearly)")]
    fn test_recurrence_label(#[case] json: &str, #[case] expected: &str) {
        let rule: Recurrence = serde_json::from_str(json).unwrap();
        assert_eq!(recurrence_label(&rule), expected);
    }
}
