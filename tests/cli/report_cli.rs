use serde_json::json;

use crate::helpers::{run_reading_report, stdout_json, two_year_payload, write_payload};

#[test]
fn test_build_charts_requested_month_and_summarises_latest() {
    let file = write_payload(&two_year_payload());
    let path = file.path().to_str().unwrap();

    let output = run_reading_report(&[
        "build", "--payload", path, "--year", "2024", "--month", "3", "--today", "2025-06-18",
    ]);
    let report = stdout_json(&output);

    assert_eq!(report["monthlyStatus"].as_array().unwrap().len(), 12);
    assert_eq!(report["monthlyStatus"][2]["count"], 2);
    assert_eq!(report["reviewKeywords"][0]["word"], "전쟁");
    assert_eq!(report["reviewKeywords"][0]["weight"], 2);
    assert_eq!(report["reviewKeywords"][1]["word"], "여운 남는");
    assert_eq!(report["genreDistribution"].as_array().unwrap().len(), 2);
    assert_eq!(report["readingCountsByWeekday"].as_array().unwrap().len(), 7);
    assert_eq!(report["readingPlaces"].as_array().unwrap().len(), 2);

    let summary = &report["summary"];
    assert_eq!(summary["isEmpty"], false);
    assert_eq!(summary["year"], 2025);
    assert_eq!(summary["month"], 4);
    assert_eq!(summary["title"], "집중하는 시간 여행자");
    assert_eq!(
        summary["description"],
        "집중하는 시간 여행자형은 주로 도서관에서 역사를 읽는 사람이에요."
    );
    assert_eq!(summary["percent"], 25);
    assert_eq!(summary["characterKey"], "시간여행자");
    assert_eq!(summary["placeKey"], "library");
}

#[test]
fn test_build_excludes_in_progress_month_from_summary() {
    let file = write_payload(&two_year_payload());
    let path = file.path().to_str().unwrap();

    let output = run_reading_report(&[
        "build", "--payload", path, "--year", "2025", "--month", "4", "--today", "2025-04-30",
    ]);
    let report = stdout_json(&output);

    assert_eq!(report["monthlyStatus"][3]["count"], 1);
    assert_eq!(report["summary"]["isEmpty"], false);
    assert_eq!(report["summary"]["year"], 2024);
    assert_eq!(report["summary"]["month"], 3);
}

#[test]
fn test_build_no_report_payload_prints_empty_report() {
    let file = write_payload(&json!({
        "success": false,
        "error": { "code": "RR404", "message": "report not found" }
    }));
    let path = file.path().to_str().unwrap();

    let output = run_reading_report(&["build", "--payload", path, "--year", "2025", "--month", "6"]);
    let report = stdout_json(&output);

    assert_eq!(report["summary"]["isEmpty"], true);
    assert_eq!(report["summary"]["characterKey"], "empty");
    assert!(report["summary"]["percent"].is_null());
    assert_eq!(report["summary"]["month"], 6);
    assert!(report["reviewKeywords"].as_array().unwrap().is_empty());
}

#[test]
fn test_build_failure_code_exits_with_error() {
    let file = write_payload(&json!({
        "success": false,
        "error": { "code": "RR500", "message": "database unavailable" }
    }));
    let path = file.path().to_str().unwrap();

    let output = run_reading_report(&["build", "--payload", path, "--year", "2025", "--month", "6"]);

    assert!(!output.status.success(), "failure payload should not succeed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RR500"), "stderr should name the code: {stderr}");
    assert!(output.stdout.is_empty(), "no report should be printed");
}

#[test]
fn test_build_honours_keyword_limit() {
    let file = write_payload(&two_year_payload());
    let path = file.path().to_str().unwrap();

    let output = run_reading_report(&[
        "build",
        "--payload",
        path,
        "--year",
        "2024",
        "--month",
        "3",
        "--keyword-limit",
        "1",
    ]);
    let report = stdout_json(&output);

    assert_eq!(report["reviewKeywords"].as_array().unwrap().len(), 1);
}

#[test]
fn test_build_counts_hashtags_verbatim_unless_normalized() {
    let file = write_payload(&json!({
        "success": true,
        "responseDto": {
            "characterNum": 1.0,
            "userTotalNum": 4.0,
            "data": {
                "data": {
                    "2024": {
                        "3": [
                            { "finishAt": "2024-03-10T10:00:00", "hashtags": ["#전쟁", "여운 남는"] },
                            { "finishAt": "2024-03-11T10:00:00", "hashtags": ["전쟁"] }
                        ]
                    }
                }
            }
        }
    }));
    let path = file.path().to_str().unwrap();
    let args = ["build", "--payload", path, "--year", "2024", "--month", "3"];

    let report = stdout_json(&run_reading_report(&args));
    let keywords = report["reviewKeywords"].as_array().unwrap();
    assert_eq!(keywords.len(), 3);
    assert_eq!(keywords[0], json!({ "word": "#전쟁", "weight": 1 }));
    assert_eq!(keywords[1], json!({ "word": "여운 남는", "weight": 1 }));

    let mut normalized_args = args.to_vec();
    normalized_args.push("--normalize-hashtags");
    let report = stdout_json(&run_reading_report(&normalized_args));
    assert_eq!(report["reviewKeywords"][0], json!({ "word": "전쟁", "weight": 2 }));
    assert_eq!(report["reviewKeywords"][1], json!({ "word": "여운남는", "weight": 1 }));
}

#[test]
fn test_build_rejects_invalid_month() {
    let file = write_payload(&two_year_payload());
    let path = file.path().to_str().unwrap();

    let output = run_reading_report(&["build", "--payload", path, "--year", "2024", "--month", "13"]);

    assert!(!output.status.success());
}

#[test]
fn test_build_rejects_missing_payload_file() {
    let output = run_reading_report(&[
        "build",
        "--payload",
        "/nonexistent/payload.json",
        "--year",
        "2024",
        "--month",
        "3",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read payload file"), "{stderr}");
}

#[test]
fn test_empty_command_with_zero_percent() {
    let output = run_reading_report(&[
        "empty",
        "--year",
        "2025",
        "--month",
        "1",
        "--empty-percent",
        "zero",
    ]);
    let report = stdout_json(&output);

    assert_eq!(report["summary"]["percent"], 0);
    assert_eq!(report["summary"]["isEmpty"], true);
    assert_eq!(report["readingCountsByWeekday"][0]["label"], "일");
    assert_eq!(report["readingCountsByWeekday"][0]["slots"]["morning"], 0);
}

#[test]
fn test_span_reports_first_and_last_month() {
    let file = write_payload(&two_year_payload());
    let path = file.path().to_str().unwrap();

    let output = run_reading_report(&["span", "--payload", path]);
    let span = stdout_json(&output);

    assert_eq!(span["finish"]["earliest"], json!({ "year": 2024, "month": 3 }));
    assert_eq!(span["finish"]["latest"], json!({ "year": 2025, "month": 4 }));
    assert_eq!(span["finish"]["records"], 3);
    assert_eq!(span["sessions"]["latest"], json!({ "year": 2024, "month": 3 }));
}
