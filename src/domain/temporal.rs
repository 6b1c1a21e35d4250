use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::records::{TemporalMap, parse_month_key, parse_year_key};

/// A calendar month, with `month` in 1..=12.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Build from keys as they appear in payloads ("2025", "03").
    pub fn from_keys(year: &str, month: &str) -> Option<Self> {
        Self::new(parse_year_key(year)?, parse_month_key(month)?)
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A non-empty month located inside a [`TemporalMap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthRecords<'a, E> {
    pub year: i32,
    pub month: u32,
    pub records: &'a [E],
}

impl<E> MonthRecords<'_, E> {
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// Most recent month holding at least one record, skipping `exclude`.
pub fn find_latest_records<E>(
    map: &TemporalMap<E>,
    exclude: Option<YearMonth>,
) -> Option<MonthRecords<'_, E>> {
    map.years().rev().find_map(|(year, months)| {
        months.iter().rev().find_map(|(&month, records)| {
            let excluded = exclude.is_some_and(|ym| ym.year == year && ym.month == month);
            (!records.is_empty() && !excluded).then_some(MonthRecords {
                year,
                month,
                records,
            })
        })
    })
}

/// Oldest month holding at least one record.
pub fn find_earliest_records<E>(map: &TemporalMap<E>) -> Option<MonthRecords<'_, E>> {
    map.years().find_map(|(year, months)| {
        months
            .iter()
            .find(|(_, records)| !records.is_empty())
            .map(|(&month, records)| MonthRecords {
                year,
                month,
                records,
            })
    })
}

/// Records for exactly `(year, month)`, or an empty slice.
pub fn get_month_list<E>(map: &TemporalMap<E>, year: i32, month: u32) -> &[E] {
    map.year(year)
        .and_then(|months| months.get(&month))
        .map(Vec::as_slice)
        .unwrap_or_default()
}
