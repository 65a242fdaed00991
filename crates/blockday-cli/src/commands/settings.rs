use anyhow::Result;
use blockday_core::repository::Repository;
use blockday_core::settings::CalendarSettings;
use dialoguer::Confirm;

use crate::cli::{SettingsCommand, SettingsSetArgs, SettingsSubcommand};
use crate::parser::parse_time;
use crate::views::table::display_settings;

pub async fn settings_command(repo: &impl Repository, command: SettingsCommand) -> Result<()> {
    match command.command {
        SettingsSubcommand::Show => {
            display_settings(&repo.load_settings().await?);
        }
        SettingsSubcommand::Set(args) => {
            let mut settings = repo.load_settings().await?;
            apply_changes(&mut settings, args)?;
            repo.save_settings(&settings).await?;
            println!("Settings saved.");
            display_settings(&settings);
        }
        SettingsSubcommand::Reset { force } => {
            if !force {
                let confirmation = Confirm::new()
                    .with_prompt("Restore all settings to their defaults?")
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if !confirmation {
                    println!("Reset cancelled.");
                    return Ok(());
                }
            }
            let settings = repo.reset_settings().await?;
            println!("Settings restored to defaults.");
            display_settings(&settings);
        }
    }
    Ok(())
}

fn apply_changes(settings: &mut CalendarSettings, args: SettingsSetArgs) -> Result<()> {
    if let Some(view) = args.view {
        settings.default_view = view;
    }
    if let Some(week_start) = args.week_start {
        settings.week_starts_on = week_start;
    }
    if let Some(start) = args.work_start.as_deref() {
        settings.working_hours.start = parse_time(start)?;
    }
    if let Some(end) = args.work_end.as_deref() {
        settings.working_hours.end = parse_time(end)?;
    }
    if let Some(enabled) = args.notifications {
        settings.notifications.enabled = enabled;
    }
    if let Some(minutes) = args.reminder {
        settings.notifications.default_reminder = minutes;
    }
    if let Some(sound) = args.sound {
        settings.notifications.sound_enabled = sound;
    }
    if let Some(browser) = args.browser_notifications {
        settings.notifications.browser_notifications = browser;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    Ok(())
}
