use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

/// Category bucket used when a record carries no usable category.
pub const DEFAULT_CATEGORY: &str = "기타";

/// Month number to the ordered records logged in that month.
pub type MonthMap<E> = BTreeMap<u32, Vec<E>>;

/// Where a reading session took place.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PlaceCode {
    Home,
    Cafe,
    Library,
    Moving,
    Unknown,
}

impl PlaceCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCode::Home => "HOME",
            PlaceCode::Cafe => "CAFE",
            PlaceCode::Library => "LIBRARY",
            PlaceCode::Moving => "MOVING",
            PlaceCode::Unknown => "UNKNOWN",
        }
    }

    /// Resolve a raw place code, bucketing anything unrecognised as `Unknown`.
    pub fn from_code(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(PlaceCode::Unknown)
    }
}

impl FromStr for PlaceCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "HOME" => Ok(PlaceCode::Home),
            "CAFE" => Ok(PlaceCode::Cafe),
            "LIBRARY" => Ok(PlaceCode::Library),
            "MOVING" => Ok(PlaceCode::Moving),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PlaceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records that can be bucketed by genre.
pub trait Categorized {
    fn raw_category(&self) -> Option<&str>;

    /// The record's category, or [`DEFAULT_CATEGORY`] when it is missing or blank.
    fn category(&self) -> &str {
        self.raw_category()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

/// A completed book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub finish_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub hashtags: Vec<String>,
}

impl FinishEvent {
    pub fn finished_at(&self) -> Option<NaiveDateTime> {
        self.finish_at.as_deref().and_then(parse_timestamp)
    }
}

impl Categorized for FinishEvent {
    fn raw_category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// A single logged reading session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub read_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub place: Option<String>,
}

impl SessionEvent {
    pub fn read_at(&self) -> Option<NaiveDateTime> {
        self.read_at.as_deref().and_then(parse_timestamp)
    }

    pub fn place(&self) -> PlaceCode {
        PlaceCode::from_code(self.place.as_deref())
    }
}

impl Categorized for SessionEvent {
    fn raw_category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a record timestamp into the wall-clock time it denotes.
///
/// Timestamps carrying an offset are shifted to the local timezone and naive
/// date-times are taken as written. Bare dates mean UTC midnight, shifted to
/// the local timezone like any other offset-bearing value.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().map(|date| {
        date.and_time(NaiveTime::MIN)
            .and_utc()
            .with_timezone(&Local)
            .naive_local()
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Sparse `year -> month -> records` index.
///
/// Keys are kept as integers, so iteration is always in calendar order no
/// matter how the source document ordered or encoded them. Keys that parse
/// to the same month ("03" and "3") are merged in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalMap<E> {
    years: BTreeMap<i32, MonthMap<E>>,
}

impl<E> Default for TemporalMap<E> {
    fn default() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }
}

impl<E> TemporalMap<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, year: i32, month: u32, record: E) {
        self.month_entry(year, month).push(record);
    }

    pub fn extend_month(&mut self, year: i32, month: u32, records: impl IntoIterator<Item = E>) {
        self.month_entry(year, month).extend(records);
    }

    fn month_entry(&mut self, year: i32, month: u32) -> &mut Vec<E> {
        self.years
            .entry(year)
            .or_default()
            .entry(month)
            .or_default()
    }

    pub fn year(&self, year: i32) -> Option<&MonthMap<E>> {
        self.years.get(&year)
    }

    /// Years in ascending order.
    pub fn years(&self) -> impl DoubleEndedIterator<Item = (i32, &MonthMap<E>)> {
        self.years.iter().map(|(year, months)| (*year, months))
    }

    /// True when no month holds a single record.
    pub fn is_empty(&self) -> bool {
        self.years
            .values()
            .all(|months| months.values().all(Vec::is_empty))
    }

    /// Total number of records across every month.
    pub fn record_count(&self) -> usize {
        self.years
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }
}

impl<E> FromIterator<(i32, u32, E)> for TemporalMap<E> {
    fn from_iter<I: IntoIterator<Item = (i32, u32, E)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (year, month, record) in iter {
            map.push(year, month, record);
        }
        map
    }
}

impl<E: Serialize> Serialize for TemporalMap<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.years.serialize(serializer)
    }
}

impl<'de, E: DeserializeOwned> Deserialize<'de> for TemporalMap<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(TemporalMap::from_value(value))
    }
}

impl<E: DeserializeOwned> TemporalMap<E> {
    fn from_value(value: Value) -> Self {
        let mut map = Self::new();
        let years = match value {
            Value::Object(years) => years,
            Value::Null => return map,
            _ => {
                warn!("temporal map is not an object; treating as empty");
                return map;
            }
        };

        for (year_key, months) in years {
            let Some(year) = parse_year_key(&year_key) else {
                debug!(key = %year_key, "skipping non-numeric year key");
                continue;
            };
            let Value::Object(months) = months else {
                continue;
            };
            for (month_key, records) in months {
                let Some(month) = parse_month_key(&month_key) else {
                    debug!(year, key = %month_key, "skipping invalid month key");
                    continue;
                };
                let Value::Array(records) = records else {
                    continue;
                };
                let parsed = records
                    .into_iter()
                    .filter_map(|record| match serde_json::from_value::<E>(record) {
                        Ok(record) => Some(record),
                        Err(err) => {
                            warn!(year, month, error = %err, "skipping malformed record");
                            None
                        }
                    })
                    .collect::<Vec<_>>();
                map.extend_month(year, month, parsed);
            }
        }
        map
    }
}

/// Parse a year key given as a decimal string.
pub fn parse_year_key(key: &str) -> Option<i32> {
    key.trim().parse().ok()
}

/// Parse a month key given as a decimal string, accepting only 1 to 12.
pub fn parse_month_key(key: &str) -> Option<u32> {
    key.trim()
        .parse()
        .ok()
        .filter(|month| (1..=12).contains(month))
}
