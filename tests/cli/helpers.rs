use std::io::Write;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::NamedTempFile;

const ENV_VARS: [&str; 6] = [
    "READING_REPORT_URL",
    "READING_REPORT_TOKEN",
    "READING_REPORT_KEYWORD_LIMIT",
    "READING_REPORT_EMPTY_PERCENT",
    "READING_REPORT_LABELS",
    "READING_REPORT_NORMALIZE_HASHTAGS",
];

pub fn run_reading_report(args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_reading-report"));
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run reading-report")
}

pub fn write_payload(payload: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{payload}").expect("Failed to write payload");
    file
}

pub fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|_| panic!("Should output valid JSON, got: {stdout}"))
}

/// Finish events in 2024-03 (two) and 2025-04 (one), sessions in 2024-03.
pub fn two_year_payload() -> Value {
    serde_json::json!({
        "success": true,
        "responseDto": {
            "character": { "manyPlace": "LIBRARY", "readingTendency": "역사" },
            "characterNum": 3,
            "userTotalNum": 12,
            "data": {
                "code": "OK",
                "data": {
                    "2024": {
                        "3": [
                            { "finishAt": "2024-03-10T10:00:00", "category": "역사", "hashtags": ["전쟁", "여운 남는"] },
                            { "finishAt": "2024-03-21T22:00:00", "category": "소설", "hashtags": ["전쟁"] }
                        ]
                    },
                    "2025": {
                        "04": [
                            { "finishAt": "2025-04-02T09:00:00", "category": "역사", "hashtags": [] }
                        ]
                    }
                }
            },
            "logData": {
                "code": "OK",
                "data": {
                    "2024": {
                        "3": [
                            { "readAt": "2024-03-10T09:00:00", "category": "역사", "place": "LIBRARY" },
                            { "readAt": "2024-03-12T19:30:00", "category": "소설", "place": "MOVING" }
                        ]
                    }
                }
            }
        }
    })
}
