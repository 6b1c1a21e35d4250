use anyhow::Result;
use serde::Serialize;

use super::{BuildCommand, EmptyCommand, FetchCommand, ReportArgs, SpanCommand};
use super::{print_json, read_payload};
use crate::application::services::ReportService;
use crate::domain::payload::ReportPayload;
use crate::domain::records::TemporalMap;
use crate::domain::temporal::{YearMonth, find_earliest_records, find_latest_records};
use crate::infrastructure::client::ReportClient;

fn service(args: &ReportArgs) -> Result<ReportService> {
    Ok(ReportService::new(args.config(), args.label_tables()?))
}

fn build_and_print(args: &ReportArgs, payload: &ReportPayload) -> Result<()> {
    let report = service(args)?.build(payload, args.target()?, args.today())?;
    print_json(&report)
}

pub fn build(command: BuildCommand) -> Result<()> {
    let payload = read_payload(&command.payload)?;
    build_and_print(&command.report, &payload)
}

pub async fn fetch(client: &ReportClient, command: FetchCommand) -> Result<()> {
    let payload = client.fetch_monthly(command.report.target()?).await?;
    build_and_print(&command.report, &payload)
}

pub fn empty(command: EmptyCommand) -> Result<()> {
    let report = service(&command.report)?.empty_report(command.report.target()?);
    print_json(&report)
}

#[derive(Debug, Serialize)]
struct RecordSpan {
    earliest: Option<YearMonth>,
    latest: Option<YearMonth>,
    records: usize,
}

impl RecordSpan {
    fn of<E>(map: &TemporalMap<E>) -> Self {
        Self {
            earliest: find_earliest_records(map).map(|m| m.year_month()),
            latest: find_latest_records(map, None).map(|m| m.year_month()),
            records: map.record_count(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PayloadSpan {
    finish: RecordSpan,
    sessions: RecordSpan,
}

pub fn span(command: SpanCommand) -> Result<()> {
    let payload = read_payload(&command.payload)?;
    let body = payload.response_dto.unwrap_or_default();
    print_json(&PayloadSpan {
        finish: RecordSpan::of(body.finished()),
        sessions: RecordSpan::of(body.sessions()),
    })
}
