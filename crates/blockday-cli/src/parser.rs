use anyhow::{anyhow, Result};
use blockday_core::models::TimeOfDay;
use chrono::{Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Accepts `YYYY-MM-DD` or an English phrase such as `tomorrow` or
/// `next friday`, resolved against the local clock.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    let trimmed = date_str.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(trimmed, Local::now(), Dialect::Uk)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", date_str, e))
}

pub fn parse_optional_date(date_str: Option<&str>) -> Result<NaiveDate> {
    date_str.map(parse_date).unwrap_or_else(|| Ok(today()))
}

pub fn parse_time(time_str: &str) -> Result<TimeOfDay> {
    time_str.parse::<TimeOfDay>().map_err(|e| anyhow!(e))
}

/// Parses a comma-separated weekday list into 0 (Sunday) … 6 (Saturday).
/// Names may be abbreviated to three letters; numbers are taken as-is.
pub fn parse_days_of_week(days_str: &str) -> Result<Vec<u8>> {
    let mut days = Vec::new();
    for part in days_str.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day = parse_weekday(part).ok_or_else(|| {
            anyhow!("Unknown weekday '{}'. Use mon,tue,wed,thu,fri,sat,sun or 0-6", part)
        })?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        return Err(anyhow!("No weekdays given"));
    }
    days.sort_unstable();
    Ok(days)
}

fn parse_weekday(s: &str) -> Option<u8> {
    if let Ok(n) = s.parse::<u8>() {
        return (n <= 6).then_some(n);
    }
    let lower = s.to_lowercase();
    const NAMES: [&str; 7] = ["sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday"];
    NAMES
        .iter()
        .position(|name| lower.len() >= 3 && name.starts_with(lower.as_str()))
        .map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mon,wed,fri", vec![1, 3, 5])]
    #[case("Sunday, Saturday", vec![0, 6])]
    #[case("1,3", vec![1, 3])]
    #[case("tue,2,tuesday", vec![2])]
    #[case("fri,mon", vec![1, 5])]
    fn test_parse_days_of_week(#[case] input: &str, #[case] expected: Vec<u8>) {
        assert_eq!(parse_days_of_week(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("7")]
    #[case("mo")]
    #[case("mon,funday")]
    fn test_parse_days_of_week_rejects(#[case] input: &str) {
        assert!(parse_days_of_week(input).is_err());
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(
            parse_date("2024-06-03").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
        );
    }

    #[test]
    fn test_parse_date_relative() {
        let tomorrow = today().succ_opt().unwrap();
        assert_eq!(parse_date("tomorrow").unwrap(), tomorrow);
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn test_parse_optional_date_defaults_to_today() {
        assert_eq!(parse_optional_date(None).unwrap(), today());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("9:30").unwrap().to_string(), "09:30");
        assert!(parse_time("9.30").is_err());
    }
}
