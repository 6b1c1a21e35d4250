use chrono::NaiveDate;
use reading_report::application::services::ReportService;
use reading_report::domain::ReportError;
use reading_report::domain::temporal::YearMonth;
use reading_report::infrastructure::client::ReportClient;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn june() -> YearMonth {
    YearMonth::new(2025, 6).unwrap()
}

fn client_for(server: &MockServer, token: Option<&str>) -> ReportClient {
    ReportClient::from_base_url(&server.uri(), token.map(ToString::to_string))
        .expect("Failed to build client")
}

#[tokio::test]
async fn fetch_returns_decoded_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/monthly"))
        .and(query_param("year", "2025"))
        .and(query_param("month", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "responseDto": {
                "character": { "manyPlace": "HOME", "readingTendency": "소설" },
                "characterNum": 1,
                "userTotalNum": 4,
                "data": { "code": "OK", "data": { "2025": { "5": [{ "finishAt": "2025-05-01T10:00:00", "category": "소설" }] } } },
                "logData": { "code": "OK", "data": {} }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server, None)
        .fetch_monthly(june())
        .await
        .expect("fetch should succeed");

    let report = ReportService::default()
        .build(&payload, june(), NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
        .expect("report should build");
    assert!(!report.summary.is_empty);
    assert_eq!((report.summary.year, report.summary.month), (2025, 5));
    assert_eq!(report.summary.percent, Some(25));
}

#[tokio::test]
async fn fetch_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/monthly"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server, Some("secret-token"))
        .fetch_monthly(june())
        .await
        .expect("fetch should succeed");
    assert!(payload.response_dto.is_none());
}

#[tokio::test]
async fn rr404_resolves_to_empty_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/monthly"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": { "code": "RR404", "message": "report not found" }
        })))
        .mount(&server)
        .await;

    let payload = client_for(&server, None)
        .fetch_monthly(june())
        .await
        .expect("RR404 is not an error");
    assert!(payload.is_no_report());

    let service = ReportService::default();
    let report = service
        .build(&payload, june(), NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
        .expect("report should build");
    assert_eq!(report, service.empty_report(june()));
}

#[tokio::test]
async fn plain_not_found_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/monthly"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .fetch_monthly(june())
        .await
        .expect_err("404 without RR404 must fail");
    assert!(matches!(err, ReportError::Status { status: 404, .. }));
}

#[tokio::test]
async fn server_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/monthly"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "success": false,
            "error": { "code": "RR503", "message": "maintenance" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .fetch_monthly(june())
        .await
        .expect_err("503 must fail");
    assert!(matches!(err, ReportError::Status { status: 503, ref message } if message == "maintenance"));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ReportClient::from_base_url(&uri, None).expect("Failed to build client");
    let err = client
        .fetch_monthly(june())
        .await
        .expect_err("closed server must fail");
    assert!(matches!(err, ReportError::Transport(_)));
}
