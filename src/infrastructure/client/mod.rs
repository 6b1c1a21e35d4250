use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::domain::ReportError;
use crate::domain::payload::ReportPayload;
use crate::domain::temporal::YearMonth;

const USER_AGENT: &str = "reading-report/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MONTHLY_REPORT_PATH: &str = "api/v1/reports/monthly";

/// Fetches monthly report payloads from the reading API.
pub struct ReportClient {
    base_url: Url,
    http: Client,
    token: Option<String>,
}

impl ReportClient {
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self, ReportError> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| {
                ReportError::transport(format!("failed to configure HTTP client: {err}"))
            })?;

        Ok(Self {
            base_url: normalized,
            http,
            token,
        })
    }

    pub fn from_base_url(base_url: &str, token: Option<String>) -> Result<Self, ReportError> {
        let url = Url::parse(base_url)
            .map_err(|err| ReportError::transport(format!("invalid API url {base_url}: {err}")))?;
        Self::new(url, token)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ReportError> {
        self.base_url
            .join(path)
            .map_err(|err| ReportError::transport(format!("invalid API path {path}: {err}")))
    }

    /// Fetch the raw payload for `target`.
    ///
    /// An `RR404` answer comes back as a payload, not an error.
    pub async fn fetch_monthly(&self, target: YearMonth) -> Result<ReportPayload, ReportError> {
        let mut url = self.endpoint(MONTHLY_REPORT_PATH)?;
        url.query_pairs_mut()
            .append_pair("year", &target.year.to_string())
            .append_pair("month", &target.month.to_string());

        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ReportError::transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ReportError::transport(err.to_string()))?;

        debug!(
            %target,
            status = status.as_u16(),
            bytes = body.len(),
            "report response received"
        );
        classify_response(status, &body)
    }
}

/// Map an HTTP outcome to a payload or an error.
///
/// Success bodies must decode. A 404 is only "no report yet" when its body
/// carries the `RR404` code; every other failure is surfaced.
pub fn classify_response(status: StatusCode, body: &[u8]) -> Result<ReportPayload, ReportError> {
    if status.is_success() {
        return serde_json::from_slice(body).map_err(|err| ReportError::decode(err.to_string()));
    }

    let payload = serde_json::from_slice::<ReportPayload>(body).ok();
    let no_report = payload.as_ref().is_some_and(ReportPayload::is_no_report);
    if status == StatusCode::NOT_FOUND && no_report {
        return Ok(ReportPayload::no_report());
    }

    let message = payload
        .and_then(|p| p.error)
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
    warn!(status = status.as_u16(), %message, "report request failed");
    Err(ReportError::Status {
        status: status.as_u16(),
        message,
    })
}
