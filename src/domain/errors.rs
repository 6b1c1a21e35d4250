use thiserror::Error;

/// Failures that must reach the caller instead of resolving to an empty report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report request failed ({code}): {message}")]
    Api { code: String, message: String },
    #[error("report request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("invalid report payload: {0}")]
    Decode(String),
    #[error("report request could not be sent: {0}")]
    Transport(String),
    #[error("invalid label tables: {0}")]
    Labels(String),
}

impl ReportError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
