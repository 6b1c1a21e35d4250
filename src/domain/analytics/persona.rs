use chrono::NaiveDate;
use tracing::debug;

use crate::domain::analytics::report::Summary;
use crate::domain::grammar::{loc_particle, obj_particle};
use crate::domain::labels::LabelTables;
use crate::domain::payload::CharacterDescriptor;
use crate::domain::records::{FinishEvent, TemporalMap};
use crate::domain::temporal::{YearMonth, find_latest_records};

/// Everything the summary is derived from.
#[derive(Debug, Clone, Copy)]
pub struct PersonaInput<'a> {
    /// Month whose charts were requested; used only for the empty summary.
    pub target: YearMonth,
    pub finished: &'a TemporalMap<FinishEvent>,
    pub character: Option<&'a CharacterDescriptor>,
    pub character_num: f64,
    pub user_total_num: f64,
    /// Today's date; its month is still in progress and never represents the user.
    pub today: NaiveDate,
}

/// Share of users sharing this character, rounded and clamped to 0..=100.
pub fn percentile(character_num: f64, user_total_num: f64) -> Option<u32> {
    if !user_total_num.is_finite() || user_total_num <= 0.0 {
        return None;
    }
    let percent = (character_num / user_total_num * 100.0).round();
    if percent.is_nan() {
        return None;
    }
    Some(percent.clamp(0.0, 100.0) as u32)
}

/// Illustration slug: whitespace removed, lower-cased.
pub fn character_slug(persona: &str) -> String {
    persona
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Build the persona summary for the latest completed month.
///
/// The summary's year and month come from that month, not from `target`.
pub fn synthesize_summary(input: &PersonaInput<'_>, labels: &LabelTables) -> Summary {
    let percent = percentile(input.character_num, input.user_total_num);
    let in_progress = YearMonth::of_date(input.today);

    let Some(latest) = find_latest_records(input.finished, Some(in_progress)) else {
        debug!(%in_progress, "no completed month before the current one");
        return Summary::empty(input.target, None);
    };

    let character = input.character;
    let (Some(place), Some(genre)) = (
        character.and_then(CharacterDescriptor::place),
        character.and_then(CharacterDescriptor::tendency),
    ) else {
        debug!("character descriptor has no usable place or genre");
        return Summary::empty(input.target, None);
    };
    let Some(persona) = labels.persona(genre) else {
        debug!(genre, "no persona for genre");
        return Summary::empty(input.target, None);
    };

    let place_label = labels.place_label(place);
    let title = match labels.mood(place) {
        Some(mood) => format!("{mood} {persona}"),
        None => persona.to_string(),
    };
    let description = format!(
        "{title}형은 주로 {place_label}{} {genre}{} 읽는 사람이에요.",
        loc_particle(place_label),
        obj_particle(genre),
    );

    Summary {
        year: latest.year,
        month: latest.month,
        title,
        description,
        percent,
        is_empty: false,
        character_key: character_slug(persona),
        place_key: Some(place.to_lowercase()),
    }
}
