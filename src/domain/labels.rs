use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

const PLACE_LABELS: [(&str, &str); 5] = [
    ("HOME", "집"),
    ("CAFE", "카페"),
    ("LIBRARY", "도서관"),
    ("MOVING", "이동중"),
    ("UNKNOWN", "기타"),
];

const PLACE_MOODS: [(&str, &[&str]); 4] = [
    ("HOME", &["포근한", "편안한"]),
    ("CAFE", &["여유로운", "감성적인"]),
    ("LIBRARY", &["집중하는", "차분한"]),
    ("MOVING", &["부지런한", "틈새를 즐기는"]),
];

const GENRE_PERSONAS: [(&str, &str); 11] = [
    ("소설", "이야기 수집가"),
    ("에세이", "공감 여행자"),
    ("시", "낭만가"),
    ("인문", "사색가"),
    ("사회과학", "관찰자"),
    ("자기계발", "성장러"),
    ("경제/경영", "전략가"),
    ("과학", "탐구자"),
    ("역사", "시간 여행자"),
    ("예술", "감상가"),
    ("기타", "자유로운 탐험가"),
];

/// Static lookup tables the report engine reads labels from.
///
/// Missing keys are never an error: callers fall back to the raw code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelTables {
    /// Place code to display label.
    pub place_labels: HashMap<String, String>,
    /// Place code to mood words; only the first word is used in titles.
    pub place_moods: HashMap<String, Vec<String>>,
    /// Genre name to persona noun.
    pub genre_personas: HashMap<String, String>,
    /// Weekday labels indexed from Sunday.
    pub weekday_labels: Vec<String>,
}

impl Default for LabelTables {
    fn default() -> Self {
        Self {
            place_labels: owned_pairs(&PLACE_LABELS),
            place_moods: PLACE_MOODS
                .iter()
                .map(|(place, moods)| {
                    (
                        (*place).to_string(),
                        moods.iter().map(ToString::to_string).collect(),
                    )
                })
                .collect(),
            genre_personas: owned_pairs(&GENRE_PERSONAS),
            weekday_labels: WEEKDAY_LABELS.iter().map(ToString::to_string).collect(),
        }
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl LabelTables {
    /// Display label for a place code, or the code itself.
    pub fn place_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.place_labels.get(code).map_or(code, String::as_str)
    }

    pub fn mood(&self, code: &str) -> Option<&str> {
        self.place_moods
            .get(code)
            .and_then(|moods| moods.first())
            .map(String::as_str)
    }

    pub fn persona(&self, genre: &str) -> Option<&str> {
        self.genre_personas.get(genre).map(String::as_str)
    }

    /// Label for a Sunday-based weekday index, or the index itself.
    pub fn weekday_label(&self, weekday: u32) -> String {
        self.weekday_labels
            .get(weekday as usize)
            .cloned()
            .unwrap_or_else(|| weekday.to_string())
    }
}
