//! Contiguous calendar dimension.

use chrono::{Datelike, NaiveDate};
use star_model::{DateRow, Dimension, NormalizedRecord, Result, StarError};

use crate::keys::KeyLookup;

/// `YYYYMMDD` encoded as an integer.
///
/// Strictly increasing with the calendar date and collision free.
pub fn date_key(date: NaiveDate) -> i32 {
    date.year() * 10_000 + date.month() as i32 * 100 + date.day() as i32
}

/// Earliest and latest date over all order and ship dates.
pub fn date_range(records: &[NormalizedRecord]) -> Result<(NaiveDate, NaiveDate)> {
    let mut dates = records
        .iter()
        .flat_map(|record| [record.order_date, record.ship_date])
        .flatten();
    let first = dates.next().ok_or(StarError::NoValidDates {
        row_count: records.len(),
    })?;
    Ok(dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    }))
}

/// Calendar attributes for one day.
pub fn date_row(date: NaiveDate) -> DateRow {
    DateRow {
        date_key: date_key(date),
        full_date: date,
        day: date.day(),
        month: date.month(),
        month_name: date.format("%B").to_string(),
        quarter: date.month0() / 3 + 1,
        year: date.year(),
        week_of_year: date.iso_week().week(),
    }
}

/// Every day from the earliest to the latest date, inclusive, whether or not
/// any order falls on it.
pub fn build_date_dimension(
    records: &[NormalizedRecord],
) -> Result<(Vec<DateRow>, KeyLookup<NaiveDate, i32>)> {
    let (start, end) = date_range(records)?;
    let rows: Vec<DateRow> = start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(date_row)
        .collect();

    let mut lookup = KeyLookup::new(Dimension::Date);
    for row in &rows {
        lookup.insert(row.full_date, row.date_key);
    }
    Ok((rows, lookup))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn key_encodes_calendar_date() {
        assert_eq!(date_key(ymd(2017, 11, 8)), 20171108);
        assert_eq!(date_key(ymd(2000, 1, 1)), 20000101);
    }

    #[test]
    fn row_attributes() {
        let row = date_row(ymd(2021, 1, 1));
        assert_eq!(row.month_name, "January");
        assert_eq!(row.quarter, 1);
        // 2021-01-01 falls in ISO week 53 of 2020.
        assert_eq!(row.week_of_year, 53);

        let row = date_row(ymd(2019, 12, 31));
        assert_eq!(row.quarter, 4);
        assert_eq!(row.week_of_year, 1);
        assert_eq!(row.day, 31);
        assert_eq!(row.month, 12);
        assert_eq!(row.year, 2019);
    }
}
