//! Tests for the Calendarific client against a mock directory.

use std::time::Duration;

use availability_engine::error::EngineError;
use availability_engine::{CalendarificClient, CountryCode, EngineConfig, HolidaySource};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CalendarificClient {
    CalendarificClient::new(&server.uri(), "test-key", Duration::from_secs(2)).unwrap()
}

fn us() -> CountryCode {
    CountryCode::parse("US").unwrap()
}

#[tokio::test]
async fn parses_dates_and_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/holidays"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("country", "US"))
        .and(query_param("year", "2022"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"code": 200},
            "response": {"holidays": [
                {"name": "Christmas Eve", "date": {"iso": "2022-12-23"}},
                {"name": "Daylight Saving Time ends", "date": {"iso": "2022-11-06T02:00:00-05:00"}},
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dates = client(&server).fetch(us(), 2022).await.unwrap();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2022, 12, 23).unwrap(),
            NaiveDate::from_ymd_opt(2022, 11, 6).unwrap(),
        ]
    );
}

#[tokio::test]
async fn empty_response_array_means_no_holidays() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"meta": {"code": 200}, "response": []})),
        )
        .mount(&server)
        .await;

    let dates = client(&server).fetch(us(), 2022).await.unwrap();
    assert!(dates.is_empty());
}

#[tokio::test]
async fn non_empty_response_array_is_an_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": [1, 2]})))
        .mount(&server)
        .await;

    let err = client(&server).fetch(us(), 2022).await.unwrap_err();
    assert!(matches!(err, EngineError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn error_status_surfaces_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API key"})))
        .mount(&server)
        .await;

    match client(&server).fetch(us(), 2022).await {
        Err(EngineError::UpstreamUnavailable(message)) => assert_eq!(message, "Invalid API key"),
        other => panic!("expected upstream failure, got {:?}", other),
    }
}

#[tokio::test]
async fn error_status_falls_back_to_meta_detail() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "meta": {"code": 429, "error_type": "too many requests", "error_detail": "Rate limit reached"},
            "response": []
        })))
        .mount(&server)
        .await;

    match client(&server).fetch(us(), 2022).await {
        Err(EngineError::UpstreamUnavailable(message)) => assert_eq!(message, "Rate limit reached"),
        other => panic!("expected upstream failure, got {:?}", other),
    }
}

#[tokio::test]
async fn error_status_without_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&server)
        .await;

    match client(&server).fetch(us(), 2022).await {
        Err(EngineError::UpstreamUnavailable(message)) => {
            assert_eq!(message, "Unknown error with holidays API.")
        }
        other => panic!("expected upstream failure, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_success_body_is_an_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).fetch(us(), 2022).await.unwrap_err();
    assert!(matches!(err, EngineError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn slow_directory_times_out() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = CalendarificClient::new(&server.uri(), "k", Duration::from_millis(200)).unwrap();
    let err = client.fetch(us(), 2022).await.unwrap_err();
    assert!(matches!(err, EngineError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn unreachable_directory_is_an_upstream_failure() {
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    let client = CalendarificClient::new("http://127.0.0.1:9", "k", Duration::from_secs(1)).unwrap();
    let err = client.fetch(us(), 2022).await.unwrap_err();
    assert!(matches!(err, EngineError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn from_config_uses_base_url_and_key() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .and(query_param("api_key", "from-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {"holidays": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = EngineConfig {
        api_key: "from-config".to_string(),
        base_url: format!("{}/", server.uri()),
        ..EngineConfig::default()
    };
    let client = CalendarificClient::from_config(&config).unwrap();
    client.fetch(us(), 2023).await.unwrap();
}

#[test]
fn config_defaults_from_empty_document() {
    let config: EngineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.base_url, "https://calendarific.com/api/v2");
    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.cache_ttl(), Duration::from_secs(86_400));
    assert!(config.api_key.is_empty());
}
