use std::collections::HashMap;

use chrono::{Datelike, Timelike};
use tracing::debug;

use crate::domain::analytics::report::{
    GenreShare, KeywordWeight, MonthCount, PlaceShare, SlotCounts, TimeSlot, WeekdayCounts,
};
use crate::domain::grammar::clean_hashtag;
use crate::domain::labels::LabelTables;
use crate::domain::records::{Categorized, FinishEvent, MonthMap, SessionEvent};

/// Counts keyed by name, remembering first-seen order for stable tie-breaks.
#[derive(Debug, Default)]
struct Tally {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, key: &str) {
        if let Some(&i) = self.index.get(key) {
            self.counts[i].1 += 1;
        } else {
            self.index.insert(key.to_string(), self.counts.len());
            self.counts.push((key.to_string(), 1));
        }
    }

    fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// Entries ordered by count, highest first; equal counts keep insertion order.
    fn into_ranked(self) -> Vec<(String, u64)> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Twelve `{month, count}` entries for one year, zero-filled.
pub fn build_monthly_status<E>(year: Option<&MonthMap<E>>) -> Vec<MonthCount> {
    (1..=12)
        .map(|month| MonthCount {
            month,
            count: year
                .and_then(|months| months.get(&month))
                .map_or(0, |records| records.len() as u64),
        })
        .collect()
}

/// Most frequent hashtags across `records`, at most `limit` of them.
///
/// Tags are counted as written, minus surrounding whitespace. With
/// `normalize` set, `#` prefixes and inner whitespace are stripped first, so
/// "#전쟁" and "전쟁" share one entry.
pub fn build_review_keywords(
    records: &[FinishEvent],
    limit: usize,
    normalize: bool,
) -> Vec<KeywordWeight> {
    let mut tally = Tally::default();
    for tag in records.iter().flat_map(|r| &r.hashtags) {
        if normalize {
            if let Some(word) = clean_hashtag(tag) {
                tally.add(&word);
            }
        } else {
            let word = tag.trim();
            if !word.is_empty() {
                tally.add(word);
            }
        }
    }
    tally
        .into_ranked()
        .into_iter()
        .take(limit)
        .map(|(word, weight)| KeywordWeight { word, weight })
        .collect()
}

/// Sunday-first weekday matrix with every slot at zero.
pub fn empty_weekday_counts(labels: &LabelTables) -> Vec<WeekdayCounts> {
    (0..7)
        .map(|weekday| WeekdayCounts {
            weekday,
            label: labels.weekday_label(weekday),
            slots: SlotCounts::default(),
        })
        .collect()
}

/// Reading sessions bucketed by weekday and time of day.
pub fn build_reading_counts_by_weekday(
    records: &[SessionEvent],
    labels: &LabelTables,
) -> Vec<WeekdayCounts> {
    let mut buckets = empty_weekday_counts(labels);
    for record in records {
        let Some(read_at) = record.read_at() else {
            debug!(read_at = ?record.read_at, "skipping session with unparseable timestamp");
            continue;
        };
        let weekday = read_at.weekday().num_days_from_sunday() as usize;
        buckets[weekday]
            .slots
            .increment(TimeSlot::from_hour(read_at.hour()));
    }
    buckets
}

/// Share of sessions per place label, largest first.
pub fn build_reading_places(records: &[SessionEvent], labels: &LabelTables) -> Vec<PlaceShare> {
    let mut tally = Tally::default();
    for record in records {
        tally.add(record.place().as_str());
    }
    let total = tally.total();
    let mut places: Vec<PlaceShare> = tally
        .counts
        .into_iter()
        .map(|(code, count)| PlaceShare {
            label: labels.place_label(&code).to_string(),
            ratio: ratio(count, total),
        })
        .collect();
    places.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    places
}

/// Share of records per category, ordered by raw count.
pub fn build_genre_distribution<E: Categorized>(records: &[E]) -> Vec<GenreShare> {
    let mut tally = Tally::default();
    for record in records {
        tally.add(record.category());
    }
    let total = tally.total();
    tally
        .into_ranked()
        .into_iter()
        .map(|(name, count)| GenreShare {
            name,
            count,
            ratio: ratio(count, total),
        })
        .collect()
}
