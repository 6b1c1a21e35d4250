use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::ReportError;
use crate::domain::distributions::{
    build_genre_distribution, build_monthly_status, build_reading_counts_by_weekday,
    build_reading_places, build_review_keywords, empty_weekday_counts,
};
use crate::domain::labels::LabelTables;
use crate::domain::payload::{ReportBody, ReportPayload};
use crate::domain::persona::{PersonaInput, synthesize_summary};
use crate::domain::report::{MonthlyReport, Summary};
use crate::domain::temporal::{YearMonth, get_month_list};

/// Keyword cap used unless configured otherwise. Older clients used 10.
pub const DEFAULT_KEYWORD_LIMIT: usize = 8;

/// `percent` reported by the Empty-Report's summary.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum EmptyPercent {
    #[default]
    Null,
    Zero,
}

impl EmptyPercent {
    pub fn value(self) -> Option<u32> {
        match self {
            EmptyPercent::Null => None,
            EmptyPercent::Zero => Some(0),
        }
    }
}

impl FromStr for EmptyPercent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "null" | "none" => Ok(EmptyPercent::Null),
            "zero" | "0" => Ok(EmptyPercent::Zero),
            other => Err(format!("expected 'null' or 'zero', got '{other}'")),
        }
    }
}

impl fmt::Display for EmptyPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EmptyPercent::Null => "null",
            EmptyPercent::Zero => "zero",
        })
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ReportConfig {
    pub keyword_limit: usize,
    pub empty_percent: EmptyPercent,
    /// Merge hashtag spellings ("#전쟁", "전쟁") before ranking keywords.
    pub normalize_hashtags: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            empty_percent: EmptyPercent::default(),
            normalize_hashtags: false,
        }
    }
}

/// A fully-shaped report with nothing in it.
pub fn make_empty_report(
    target: YearMonth,
    empty_percent: EmptyPercent,
    labels: &LabelTables,
) -> MonthlyReport {
    MonthlyReport {
        summary: Summary::empty(target, empty_percent.value()),
        monthly_status: build_monthly_status::<()>(None),
        review_keywords: Vec::new(),
        genre_distribution: Vec::new(),
        reading_counts_by_weekday: empty_weekday_counts(labels),
        reading_places: Vec::new(),
    }
}

/// Builds monthly reports from raw API payloads.
#[derive(Debug, Clone, Default)]
pub struct ReportService {
    config: ReportConfig,
    labels: LabelTables,
}

impl ReportService {
    pub fn new(config: ReportConfig, labels: LabelTables) -> Self {
        Self { config, labels }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelTables {
        &self.labels
    }

    pub fn empty_report(&self, target: YearMonth) -> MonthlyReport {
        make_empty_report(target, self.config.empty_percent, &self.labels)
    }

    /// Build the report for `target`.
    ///
    /// "No report yet" (`RR404`, a missing body, or no records at all) yields
    /// the empty report. Any other failure code is returned as an error.
    pub fn build(
        &self,
        payload: &ReportPayload,
        target: YearMonth,
        today: NaiveDate,
    ) -> Result<MonthlyReport, ReportError> {
        if !payload.success {
            if payload.is_no_report() {
                debug!(%target, "no report exists yet");
                return Ok(self.empty_report(target));
            }
            let error = payload.error.clone().unwrap_or_default();
            return Err(ReportError::Api {
                code: error.code,
                message: error.message,
            });
        }

        let Some(body) = payload.response_dto.as_ref() else {
            debug!(%target, "payload has no body");
            return Ok(self.empty_report(target));
        };
        if body.has_no_activity() {
            debug!(%target, "user has no recorded activity");
            return Ok(self.empty_report(target));
        }

        Ok(self.assemble(body, target, today))
    }

    fn assemble(&self, body: &ReportBody, target: YearMonth, today: NaiveDate) -> MonthlyReport {
        let start = Instant::now();
        let finished = body.finished();
        let month_finished = get_month_list(finished, target.year, target.month);
        let month_sessions = get_month_list(body.sessions(), target.year, target.month);

        let summary = synthesize_summary(
            &PersonaInput {
                target,
                finished,
                character: body.character.as_ref(),
                character_num: body.character_num,
                user_total_num: body.user_total_num,
                today,
            },
            &self.labels,
        );

        let report = MonthlyReport {
            summary,
            monthly_status: build_monthly_status(finished.year(target.year)),
            review_keywords: build_review_keywords(
                month_finished,
                self.config.keyword_limit,
                self.config.normalize_hashtags,
            ),
            genre_distribution: build_genre_distribution(month_finished),
            reading_counts_by_weekday: build_reading_counts_by_weekday(
                month_sessions,
                &self.labels,
            ),
            reading_places: build_reading_places(month_sessions, &self.labels),
        };

        info!(
            duration_ms = start.elapsed().as_millis(),
            %target,
            finished = month_finished.len(),
            sessions = month_sessions.len(),
            "monthly report built"
        );
        report
    }
}
