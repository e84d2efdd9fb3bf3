//! Day-first date parsing.
//!
//! Source dates are written day first (`08/11/2017` is 8 November 2017).
//! Accepted shapes:
//!
//! - `DD/MM/YYYY`, `DD-MM-YYYY`, `DD.MM.YYYY`
//! - the same with a two-digit year (`00`-`68` -> 2000s, `69`-`99` -> 1900s)
//! - ISO `YYYY-MM-DD` (and `/` or `.` separators)
//! - any of the above followed by a `HH:MM` or `HH:MM:SS` time, which is dropped
//!
//! Anything else is missing. Month-first input is never guessed.

use chrono::{NaiveDate, NaiveTime};

const SEPARATORS: [char; 3] = ['/', '-', '.'];

/// Parse a day-first date string. Returns `None` when the value is empty or
/// not a valid calendar date.
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (date_part, time_part) = match trimmed.split_once([' ', 'T']) {
        Some((date, time)) => (date, Some(time.trim())),
        None => (trimmed, None),
    };
    if let Some(time) = time_part
        && !is_valid_time(time)
    {
        return None;
    }

    parse_date_part(date_part)
}

fn parse_date_part(value: &str) -> Option<NaiveDate> {
    let separator = value.chars().find(|ch| SEPARATORS.contains(ch))?;
    let parts: Vec<&str> = value.split(separator).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if ![first, second, third]
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
    {
        return None;
    }

    if first.len() == 4 {
        // Year first: YYYY-MM-DD
        let year = first.parse::<i32>().ok()?;
        let month = parse_component(second)?;
        let day = parse_component(third)?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let day = parse_component(first)?;
    let month = parse_component(second)?;
    let year = match third.len() {
        2 => expand_two_digit_year(third.parse::<i32>().ok()?),
        4 => third.parse::<i32>().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_component(value: &str) -> Option<u32> {
    if value.len() > 2 {
        return None;
    }
    value.parse::<u32>().ok()
}

fn expand_two_digit_year(year: i32) -> i32 {
    if year < 69 { 2000 + year } else { 1900 + year }
}

fn is_valid_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
        || NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn day_first_slash() {
        assert_eq!(parse_day_first("08/11/2017"), Some(ymd(2017, 11, 8)));
        assert_eq!(parse_day_first("8/6/2016"), Some(ymd(2016, 6, 8)));
    }

    #[test]
    fn day_first_other_separators() {
        assert_eq!(parse_day_first("31-12-2018"), Some(ymd(2018, 12, 31)));
        assert_eq!(parse_day_first("01.02.2015"), Some(ymd(2015, 2, 1)));
    }

    #[test]
    fn two_digit_year() {
        assert_eq!(parse_day_first("05/01/21"), Some(ymd(2021, 1, 5)));
        assert_eq!(parse_day_first("05/01/99"), Some(ymd(1999, 1, 5)));
    }

    #[test]
    fn iso_year_first() {
        assert_eq!(parse_day_first("2021-01-20"), Some(ymd(2021, 1, 20)));
        assert_eq!(parse_day_first("2021/02/01"), Some(ymd(2021, 2, 1)));
    }

    #[test]
    fn trailing_time_is_dropped() {
        assert_eq!(parse_day_first("08/11/2017 14:30"), Some(ymd(2017, 11, 8)));
        assert_eq!(parse_day_first("2017-11-08T00:00:00"), Some(ymd(2017, 11, 8)));
        assert_eq!(parse_day_first("08/11/2017 noon"), None);
    }

    #[test]
    fn month_first_is_not_guessed() {
        // 31 is not a month
        assert_eq!(parse_day_first("12/31/2017"), None);
    }

    #[test]
    fn invalid_values_are_missing() {
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("   "), None);
        assert_eq!(parse_day_first("not a date"), None);
        assert_eq!(parse_day_first("31/02/2018"), None);
        assert_eq!(parse_day_first("1/2"), None);
        assert_eq!(parse_day_first("+1/02/2018"), None);
        assert_eq!(parse_day_first("01/02/201"), None);
    }
}
