use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Time of day
// ============================================================================

/// Wall-clock `HH:MM` time in the grid's local time.
///
/// `24:00` is accepted so a block can end exactly at midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        let valid = (hour < 24 && minute < 60) || (hour == 24 && minute == 0);
        valid.then_some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> i32 {
        self.hour as i32 * 60 + self.minute as i32
    }

    /// Combines this time with a calendar date. `24:00` lands on the next day.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::default()) + Duration::minutes(self.minutes_since_midnight() as i64)
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid time '{0}', expected HH:MM (24-hour)")]
pub struct ParseTimeOfDayError(String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeOfDayError(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(err)?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
            return Err(err());
        }

        let hour: u8 = hour.parse().map_err(|_| err())?;
        let minute: u8 = minute.parse().map_err(|_| err())?;
        TimeOfDay::new(hour, minute).ok_or_else(err)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeOfDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Priority
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

// ============================================================================
// Recurrence rules
// ============================================================================

/// Frequency of a recurrence rule.
///
/// Rule types written by other clients are preserved as `Unknown` rather than
/// rejected; such rules never produce an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    Unknown(String),
}

impl From<String> for RecurrenceKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "daily" => RecurrenceKind::Daily,
            "weekly" => RecurrenceKind::Weekly,
            "monthly" => RecurrenceKind::Monthly,
            _ => RecurrenceKind::Unknown(value),
        }
    }
}

impl From<RecurrenceKind> for String {
    fn from(value: RecurrenceKind) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceKind::Daily => write!(f, "daily"),
            RecurrenceKind::Weekly => write!(f, "weekly"),
            RecurrenceKind::Monthly => write!(f, "monthly"),
            RecurrenceKind::Unknown(other) => write!(f, "{}", other),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence type: {0}")]
pub struct ParseRecurrenceKindError(String);

/// Strict parsing for user input; stored data goes through `From<String>`.
impl FromStr for RecurrenceKind {
    type Err = ParseRecurrenceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match RecurrenceKind::from(s.to_lowercase()) {
            RecurrenceKind::Unknown(_) => Err(ParseRecurrenceKindError(s.to_string())),
            kind => Ok(kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(rename = "type")]
    pub kind: RecurrenceKind,
    /// Last date on which the rule is active, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Weekday numbers, 0 = Sunday … 6 = Saturday. Only read by weekly rules.
    #[serde(
        default,
        deserialize_with = "lenient_days_of_week",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_of_week: Option<Vec<u8>>,
}

impl Recurrence {
    pub fn new(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            end_date: None,
            days_of_week: None,
        }
    }
}

/// Accepts whatever a client stored under `daysOfWeek`. Anything that is not
/// an array becomes `None`. Entries that are not weekday numbers are kept as
/// out-of-range values, so a list of junk never matches instead of falling
/// back to the anchor weekday.
fn lenient_days_of_week<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_array().map(|items| {
            items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|day| u8::try_from(day).ok())
                        .unwrap_or(u8::MAX)
                })
                .collect()
        })
    }))
}

// ============================================================================
// Blocks
// ============================================================================

/// A checklist item attached to a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// The scheduled unit of the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Anchor date: the only occurrence of a one-off block, the first
    /// possible occurrence of a recurring one.
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub category: String,
    /// Explicit colour; when absent the category palette decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub has_quiz: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
    #[serde(default)]
    pub tasks: Vec<BlockTask>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Block {
    pub fn is_recurring(&self) -> bool {
        self.recurring.is_some()
    }

    /// Length in minutes. Negative when `end_time` precedes `start_time`.
    pub fn duration_minutes(&self) -> i32 {
        self.end_time.minutes_since_midnight() - self.start_time.minutes_since_midnight()
    }

    /// Applies an edit in place. Changing `recurring` redefines every
    /// occurrence, past ones included.
    pub fn apply_update(&mut self, data: UpdateBlockData) {
        if let Some(title) = data.title {
            self.title = title;
        }
        if let Some(description) = data.description {
            self.description = description;
        }
        if let Some(date) = data.date {
            self.date = date;
        }
        if let Some(start_time) = data.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = data.end_time {
            self.end_time = end_time;
        }
        if let Some(category) = data.category {
            self.category = category;
        }
        if let Some(color) = data.color {
            self.color = color;
        }
        if let Some(priority) = data.priority {
            self.priority = priority;
        }
        if let Some(has_quiz) = data.has_quiz {
            self.has_quiz = has_quiz;
        }
        if let Some(recurring) = data.recurring {
            self.recurring = recurring;
        }
        if let Some(tasks) = data.tasks {
            self.tasks = tasks;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewBlockData {
    /// Caller-assigned identity; a UUID is generated when absent.
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub category: String,
    pub color: Option<String>,
    pub priority: Option<Priority>,
    pub has_quiz: bool,
    pub recurring: Option<Recurrence>,
    /// Titles of the checklist items to create with the block
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBlockData {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub category: Option<String>,
    pub color: Option<Option<String>>,
    pub priority: Option<Option<Priority>>,
    pub has_quiz: Option<bool>,
    pub recurring: Option<Option<Recurrence>>,
    pub tasks: Option<Vec<BlockTask>>,
}

// ============================================================================
// Categories
// ============================================================================

/// A user-defined category stored alongside the built-in palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomCategory {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}
