//! User-level calendar settings.
//!
//! Settings are loaded through [`crate::repository::SettingsRepository`];
//! missing fields take the defaults below, so older stored documents keep
//! loading after new settings are added.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;
use crate::models::TimeOfDay;
use crate::recurrence::WeekStart;

/// Longest reminder lead time accepted, in minutes.
pub const MAX_REMINDER_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Daily,
    #[default]
    Weekly,
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarView::Daily => write!(f, "daily"),
            CalendarView::Weekly => write!(f, "weekly"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid view: {0} (expected daily or weekly)")]
pub struct ParseCalendarViewError(String);

impl FromStr for CalendarView {
    type Err = ParseCalendarViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(CalendarView::Daily),
            "weekly" | "week" => Ok(CalendarView::Weekly),
            _ => Err(ParseCalendarViewError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::System => write!(f, "system"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid theme: {0} (expected light, dark or system)")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkingHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: TimeOfDay::new(9, 0).unwrap_or_default(),
            end: TimeOfDay::new(17, 0).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub enabled: bool,
    /// Minutes before a block starts
    pub default_reminder: u32,
    pub sound_enabled: bool,
    pub browser_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_reminder: 15,
            sound_enabled: true,
            browser_notifications: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarSettings {
    pub default_view: CalendarView,
    pub working_hours: WorkingHours,
    pub week_starts_on: WeekStart,
    pub notifications: NotificationSettings,
    pub theme: Theme,
}

impl CalendarSettings {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.working_hours.end <= self.working_hours.start {
            return Err(CoreError::InvalidInput(format!(
                "Working hours must end after they start ({} - {})",
                self.working_hours.start, self.working_hours.end
            )));
        }
        if self.notifications.default_reminder > MAX_REMINDER_MINUTES {
            return Err(CoreError::InvalidInput(format!(
                "Reminder lead time must be at most {} minutes, got {}",
                MAX_REMINDER_MINUTES, self.notifications.default_reminder
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CalendarSettings::default();
        assert_eq!(settings.default_view, CalendarView::Weekly);
        assert_eq!(settings.week_starts_on, WeekStart::Monday);
        assert_eq!(settings.working_hours.start.to_string(), "09:00");
        assert_eq!(settings.working_hours.end.to_string(), "17:00");
        assert_eq!(settings.notifications.default_reminder, 15);
        assert!(settings.notifications.enabled);
        assert_eq!(settings.theme, Theme::System);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_document_merges_with_defaults() {
        let settings: CalendarSettings =
            serde_json::from_str(r#"{"theme":"dark","notifications":{"defaultReminder":30}}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.notifications.default_reminder, 30);
        assert!(settings.notifications.sound_enabled);
        assert_eq!(settings.default_view, CalendarView::Weekly);
    }

    #[test]
    fn test_validate_rejects_inverted_working_hours() {
        let mut settings = CalendarSettings::default();
        settings.working_hours.end = "08:00".parse().unwrap();
        assert!(matches!(settings.validate(), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_long_reminder() {
        let mut settings = CalendarSettings::default();
        settings.notifications.default_reminder = MAX_REMINDER_MINUTES + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Day".parse::<CalendarView>(), Ok(CalendarView::Daily));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
