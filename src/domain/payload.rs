use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::records::{FinishEvent, SessionEvent, TemporalMap};

/// Error code meaning the user has no report yet. Not a failure.
pub const NO_REPORT_CODE: &str = "RR404";

/// Placeholder the server sends in place of a character field it cannot compute.
pub const EMPTY_DATA: &str = "empty_data";

/// Raw monthly report response as delivered by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_dto: Option<ReportBody>,
}

impl ReportPayload {
    pub fn no_report() -> Self {
        Self {
            success: false,
            error: Some(ApiError {
                code: NO_REPORT_CODE.to_string(),
                message: String::new(),
            }),
            response_dto: None,
        }
    }

    /// True when the failure is the "no report exists yet" signal.
    pub fn is_no_report(&self) -> bool {
        self.error.as_ref().is_some_and(ApiError::is_no_report)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    pub fn is_no_report(&self) -> bool {
        self.code == NO_REPORT_CODE
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    #[serde(default)]
    pub character: Option<CharacterDescriptor>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub character_num: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub user_total_num: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: RecordsEnvelope<FinishEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub log_data: RecordsEnvelope<SessionEvent>,
}

impl ReportBody {
    pub fn finished(&self) -> &TemporalMap<FinishEvent> {
        &self.data.data
    }

    pub fn sessions(&self) -> &TemporalMap<SessionEvent> {
        &self.log_data.data
    }

    /// True when neither map holds a single record.
    pub fn has_no_activity(&self) -> bool {
        self.finished().is_empty() && self.sessions().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "E: Serialize",
    deserialize = "E: DeserializeOwned"
))]
pub struct RecordsEnvelope<E> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub data: TemporalMap<E>,
}

impl<E> Default for RecordsEnvelope<E> {
    fn default() -> Self {
        Self {
            code: None,
            data: TemporalMap::default(),
        }
    }
}

impl<E> From<TemporalMap<E>> for RecordsEnvelope<E> {
    fn from(data: TemporalMap<E>) -> Self {
        Self { code: None, data }
    }
}

/// The user's dominant reading place and genre, as computed server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDescriptor {
    #[serde(default)]
    pub many_place: Option<String>,
    #[serde(default)]
    pub reading_tendency: Option<String>,
}

impl CharacterDescriptor {
    pub fn new(many_place: impl Into<String>, reading_tendency: impl Into<String>) -> Self {
        Self {
            many_place: Some(many_place.into()),
            reading_tendency: Some(reading_tendency.into()),
        }
    }

    pub fn place(&self) -> Option<&str> {
        usable(self.many_place.as_deref())
    }

    pub fn tendency(&self) -> Option<&str> {
        usable(self.reading_tendency.as_deref())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any finite JSON number; everything else counts as zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or_default(),
        _ => 0.0,
    })
}

fn usable(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != EMPTY_DATA)
}
