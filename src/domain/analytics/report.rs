use serde::{Deserialize, Serialize};

use crate::domain::temporal::YearMonth;

/// Title shown when no persona can be derived.
pub const EMPTY_TITLE: &str = "아직 독서 캐릭터가 없어요";
pub const EMPTY_DESCRIPTION: &str = "완독한 책을 기록하면 나만의 독서 캐릭터를 알려드릴게요.";
/// Illustration key of the empty summary.
pub const EMPTY_CHARACTER_KEY: &str = "empty";

/// Persona-style summary heading the monthly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub description: String,
    /// Share of users with the same character, 0 to 100.
    pub percent: Option<u32>,
    pub is_empty: bool,
    pub character_key: String,
    pub place_key: Option<String>,
}

impl Summary {
    pub fn empty(target: YearMonth, percent: Option<u32>) -> Self {
        Self {
            year: target.year,
            month: target.month,
            title: EMPTY_TITLE.to_string(),
            description: EMPTY_DESCRIPTION.to_string(),
            percent,
            is_empty: true,
            character_key: EMPTY_CHARACTER_KEY.to_string(),
            place_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordWeight {
    pub word: String,
    pub weight: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreShare {
    pub name: String,
    pub count: u64,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceShare {
    pub label: String,
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            TimeSlot::Morning
        } else if hour < 18 {
            TimeSlot::Afternoon
        } else {
            TimeSlot::Evening
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCounts {
    pub morning: u64,
    pub afternoon: u64,
    pub evening: u64,
}

impl SlotCounts {
    pub fn increment(&mut self, slot: TimeSlot) {
        match slot {
            TimeSlot::Morning => self.morning += 1,
            TimeSlot::Afternoon => self.afternoon += 1,
            TimeSlot::Evening => self.evening += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.morning + self.afternoon + self.evening
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCounts {
    /// 0 is Sunday.
    pub weekday: u32,
    pub label: String,
    pub slots: SlotCounts,
}

/// The complete document handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub summary: Summary,
    pub monthly_status: Vec<MonthCount>,
    pub review_keywords: Vec<KeywordWeight>,
    pub genre_distribution: Vec<GenreShare>,
    pub reading_counts_by_weekday: Vec<WeekdayCounts>,
    pub reading_places: Vec<PlaceShare>,
}
