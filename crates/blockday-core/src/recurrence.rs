//! Occurrence expansion.
//!
//! Every function here is a pure function of its arguments: the occurrence set
//! of a block depends only on its anchor `date` and `recurring` rule, so any
//! day can be queried independently and in any order. Dates are compared as
//! calendar dates; no timezone-aware instant is ever constructed.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Block, RecurrenceKind};

/// Weekday number as stored in recurrence rules: 0 = Sunday … 6 = Saturday.
#[inline]
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Returns whether `block` has an occurrence on `date`.
///
/// - One-off blocks occur only on their anchor date.
/// - Recurring blocks occur only inside `[date, end_date]` (both inclusive).
/// - `daily` fires every day in the window.
/// - `weekly` fires on the listed weekdays, or on the anchor's weekday when the
///   list is missing or empty.
/// - `monthly` fires when the day of month equals the anchor's; an anchor of
///   the 31st therefore skips months with fewer days.
/// - Unknown rule types never fire.
pub fn occurs_on(block: &Block, date: NaiveDate) -> bool {
    let Some(rule) = &block.recurring else {
        return date == block.date;
    };

    if date < block.date {
        return false;
    }
    if rule.end_date.is_some_and(|end| date > end) {
        return false;
    }

    match rule.kind {
        RecurrenceKind::Daily => true,
        RecurrenceKind::Weekly => {
            let weekday = weekday_number(date);
            match rule.days_of_week.as_deref() {
                Some(days) if !days.is_empty() => days.contains(&weekday),
                _ => weekday == weekday_number(block.date),
            }
        }
        RecurrenceKind::Monthly => date.day() == block.date.day(),
        RecurrenceKind::Unknown(_) => false,
    }
}

/// Blocks occurring on `date`, in input order.
pub fn occurrences_for_day(blocks: &[Block], date: NaiveDate) -> Vec<&Block> {
    blocks.iter().filter(|block| occurs_on(block, date)).collect()
}

/// Blocks occurring on `date`, ordered by start time (ties keep input order).
pub fn sorted_occurrences_for_day(blocks: &[Block], date: NaiveDate) -> Vec<&Block> {
    let mut day = occurrences_for_day(blocks, date);
    day.sort_by_key(|block| block.start_time);
    day
}

/// Enumerates the dates in `[start, end]` on which `block` occurs.
pub fn occurrence_dates_between(block: &Block, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| occurs_on(block, *day))
        .collect()
}

// ============================================================================
// Weeks
// ============================================================================

/// First day of a displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid week start: {0} (expected sunday or monday)")]
pub struct ParseWeekStartError(String);

impl FromStr for WeekStart {
    type Err = ParseWeekStartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" | "sun" | "0" => Ok(WeekStart::Sunday),
            "monday" | "mon" | "1" => Ok(WeekStart::Monday),
            _ => Err(ParseWeekStartError(s.to_string())),
        }
    }
}

/// The seven dates of the week containing `date`.
pub fn week_days(date: NaiveDate, start: WeekStart) -> [NaiveDate; 7] {
    let offset = match start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    let first = date - Duration::days(offset as i64);
    std::array::from_fn(|i| first + Duration::days(i as i64))
}

/// One column of a week view.
#[derive(Debug, Clone)]
pub struct DayOccurrences<'a> {
    pub date: NaiveDate,
    pub blocks: Vec<&'a Block>,
}

/// Expands `blocks` over the week containing `date`, each day sorted by start
/// time.
pub fn occurrences_for_week(blocks: &[Block], date: NaiveDate, start: WeekStart) -> Vec<DayOccurrences<'_>> {
    week_days(date, start)
        .into_iter()
        .map(|day| DayOccurrences {
            date: day,
            blocks: sorted_occurrences_for_day(blocks, day),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Recurrence, TimeOfDay};
    use chrono::{Utc, Weekday};
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn block(anchor: &str, recurring: Option<Recurrence>) -> Block {
        Block {
            id: "b1".to_string(),
            title: "Focus".to_string(),
            description: None,
            date: date(anchor),
            start_time: "09:00".parse().unwrap(),
            end_time: "10:30".parse().unwrap(),
            category: "work".to_string(),
            color: None,
            priority: None,
            has_quiz: false,
            recurring,
            tasks: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn rule(kind: RecurrenceKind, end: Option<&str>, days: Option<Vec<u8>>) -> Option<Recurrence> {
        Some(Recurrence {
            kind,
            end_date: end.map(date),
            days_of_week: days,
        })
    }

    mod occurs_on_tests {
        use super::*;

        #[rstest]
        #[case("2024-06-03", true)]
        #[case("2024-06-02", false)]
        #[case("2024-06-04", false)]
        #[case("2025-06-03", false)]
        fn test_one_off_only_on_anchor(#[case] query: &str, #[case] expected: bool) {
            let b = block("2024-06-03", None);
            assert_eq!(occurs_on(&b, date(query)), expected);
        }

        #[rstest]
        #[case("2024-06-02", false)]
        #[case("2024-06-03", true)]
        #[case("2024-06-15", true)]
        #[case("2024-06-30", true)]
        #[case("2024-07-01", false)]
        fn test_daily_window_is_inclusive(#[case] query: &str, #[case] expected: bool) {
            let b = block("2024-06-03", rule(RecurrenceKind::Daily, Some("2024-06-30"), None));
            assert_eq!(occurs_on(&b, date(query)), expected);
        }

        #[test]
        fn test_daily_without_end_is_unbounded() {
            let b = block("2024-06-03", rule(RecurrenceKind::Daily, None, None));
            assert!(occurs_on(&b, date("2099-01-01")));
        }

        #[test]
        fn test_end_date_before_anchor_never_occurs() {
            let b = block("2024-06-03", rule(RecurrenceKind::Daily, Some("2024-06-01"), None));
            assert!(occurrence_dates_between(&b, date("2024-05-01"), date("2024-07-01")).is_empty());
        }

        #[test]
        fn test_weekly_days_of_week_over_two_weeks() {
            // 2024-06-03 is a Monday; Mon/Wed/Fri
            let b = block("2024-06-03", rule(RecurrenceKind::Weekly, None, Some(vec![1, 3, 5])));
            let hits = occurrence_dates_between(&b, date("2024-06-10"), date("2024-06-23"));
            assert_eq!(hits.len(), 6);
            assert!(hits.iter().all(|d| [1, 3, 5].contains(&weekday_number(*d))));
        }

        #[test]
        fn test_weekly_anchor_weekday_not_listed_is_skipped() {
            let b = block("2024-06-03", rule(RecurrenceKind::Weekly, None, Some(vec![2])));
            assert!(!occurs_on(&b, date("2024-06-03")));
            assert!(occurs_on(&b, date("2024-06-04")));
        }

        #[rstest]
        #[case(None)]
        #[case(Some(vec![]))]
        fn test_weekly_falls_back_to_anchor_weekday(#[case] days: Option<Vec<u8>>) {
            // 2024-06-04 is a Tuesday
            let b = block("2024-06-04", rule(RecurrenceKind::Weekly, Some("2024-07-31"), days));
            for d in date("2024-05-01").iter_days().take(120) {
                let expected = d.weekday() == Weekday::Tue && d >= date("2024-06-04") && d <= date("2024-07-31");
                assert_eq!(occurs_on(&b, d), expected, "{}", d);
            }
        }

        #[rstest]
        #[case(r#"{"type":"weekly","daysOfWeek":[9]}"#)]
        #[case(r#"{"type":"weekly","daysOfWeek":["x"]}"#)]
        fn test_weekly_out_of_range_days_never_match(#[case] json: &str) {
            let b = Block {
                recurring: Some(serde_json::from_str(json).unwrap()),
                ..block("2024-06-03", None)
            };
            for d in date("2024-06-03").iter_days().take(14) {
                assert!(!occurs_on(&b, d), "{}", d);
            }
        }

        #[rstest]
        #[case("2024-04-30", false)]
        #[case("2024-05-31", true)]
        #[case("2024-02-29", false)]
        #[case("2024-03-31", true)]
        #[case("2024-01-31", true)]
        fn test_monthly_on_31st_skips_short_months(#[case] query: &str, #[case] expected: bool) {
            let b = block("2024-01-31", rule(RecurrenceKind::Monthly, None, None));
            assert_eq!(occurs_on(&b, date(query)), expected);
        }

        #[test]
        fn test_monthly_before_anchor_is_excluded() {
            let b = block("2024-03-15", rule(RecurrenceKind::Monthly, None, None));
            assert!(!occurs_on(&b, date("2024-02-15")));
            assert!(occurs_on(&b, date("2024-04-15")));
        }

        #[test]
        fn test_unknown_kind_fails_closed() {
            let b = block("2024-06-03", rule(RecurrenceKind::Unknown("yearly".into()), None, None));
            assert!(!occurs_on(&b, date("2024-06-03")));
            assert!(!occurs_on(&b, date("2025-06-03")));
        }
    }

    mod day_and_week_tests {
        use super::*;

        #[test]
        fn test_occurrences_for_day_keeps_input_order() {
            let mut late = block("2024-06-03", None);
            late.id = "late".into();
            late.start_time = "15:00".parse().unwrap();
            let mut early = block("2024-06-03", None);
            early.id = "early".into();
            early.start_time = "08:00".parse().unwrap();
            let other = block("2024-06-04", None);

            let blocks = vec![late, other, early];
            let ids: Vec<_> = occurrences_for_day(&blocks, date("2024-06-03"))
                .iter()
                .map(|b| b.id.as_str())
                .collect();
            assert_eq!(ids, vec!["late", "early"]);

            let sorted: Vec<_> = sorted_occurrences_for_day(&blocks, date("2024-06-03"))
                .iter()
                .map(|b| b.start_time)
                .collect();
            assert_eq!(sorted, vec![TimeOfDay::new(8, 0).unwrap(), TimeOfDay::new(15, 0).unwrap()]);
        }

        #[test]
        fn test_weekly_monday_rule_end_to_end() {
            let blocks = vec![block("2024-06-03", rule(RecurrenceKind::Weekly, None, Some(vec![1])))];
            assert_eq!(occurrences_for_day(&blocks, date("2024-06-10")).len(), 1);
            assert!(occurrences_for_day(&blocks, date("2024-06-11")).is_empty());
        }

        #[rstest]
        #[case(WeekStart::Monday, "2024-06-03", "2024-06-09")]
        #[case(WeekStart::Sunday, "2024-06-02", "2024-06-08")]
        fn test_week_days(#[case] start: WeekStart, #[case] first: &str, #[case] last: &str) {
            for query in ["2024-06-03", "2024-06-05", "2024-06-08"] {
                let days = week_days(date(query), start);
                assert_eq!(days[0], date(first));
                assert_eq!(days[6], date(last));
                assert!(days.contains(&date(query)));
            }
        }

        #[test]
        fn test_week_days_sunday_query_with_monday_start() {
            let days = week_days(date("2024-06-09"), WeekStart::Monday);
            assert_eq!(days[0], date("2024-06-03"));
        }

        #[test]
        fn test_occurrences_for_week_expands_recurrence() {
            let blocks = vec![
                block("2024-06-03", rule(RecurrenceKind::Weekly, None, Some(vec![1, 3, 5]))),
                block("2024-06-06", None),
            ];
            let week = occurrences_for_week(&blocks, date("2024-06-05"), WeekStart::Monday);
            let counts: Vec<_> = week.iter().map(|d| d.blocks.len()).collect();
            assert_eq!(counts, vec![1, 0, 1, 1, 1, 0, 0]);
        }

        #[test]
        fn test_week_start_parse() {
            assert_eq!("Sunday".parse::<WeekStart>(), Ok(WeekStart::Sunday));
            assert_eq!("1".parse::<WeekStart>(), Ok(WeekStart::Monday));
            assert!("friday".parse::<WeekStart>().is_err());
        }
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..3650).prop_map(|offset| date("2020-01-01") + Duration::days(offset))
    }

    proptest! {
        #[test]
        fn prop_one_off_matches_anchor_only(anchor in arb_date(), query in arb_date()) {
            let b = Block { date: anchor, ..block("2024-01-01", None) };
            prop_assert_eq!(occurs_on(&b, query), query == anchor);
        }

        #[test]
        fn prop_daily_matches_window(anchor in arb_date(), span in 0i64..400, query in arb_date()) {
            let end = anchor + Duration::days(span);
            let b = Block {
                date: anchor,
                recurring: Some(Recurrence { kind: RecurrenceKind::Daily, end_date: Some(end), days_of_week: None }),
                ..block("2024-01-01", None)
            };
            prop_assert_eq!(occurs_on(&b, query), query >= anchor && query <= end);
        }

        #[test]
        fn prop_weekly_listed_days_fire_three_times_per_week(anchor in arb_date(), start in arb_date()) {
            let b = Block {
                date: anchor,
                recurring: Some(Recurrence { kind: RecurrenceKind::Weekly, end_date: None, days_of_week: Some(vec![1, 3, 5]) }),
                ..block("2024-01-01", None)
            };
            let from = start.max(anchor);
            let hits = occurrence_dates_between(&b, from, from + Duration::days(13));
            prop_assert_eq!(hits.len(), 6);
        }

        #[test]
        fn prop_occurs_on_never_before_anchor(anchor in arb_date(), query in arb_date(), kind in 0u8..4) {
            let kind = match kind {
                0 => RecurrenceKind::Daily,
                1 => RecurrenceKind::Weekly,
                2 => RecurrenceKind::Monthly,
                _ => RecurrenceKind::Unknown("hourly".into()),
            };
            let b = Block { date: anchor, recurring: Some(Recurrence::new(kind)), ..block("2024-01-01", None) };
            if query < anchor {
                prop_assert!(!occurs_on(&b, query));
            }
        }
    }
}
