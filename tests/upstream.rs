//! End-to-end tool behaviour against a mocked Ticket Tailor API.

use pretty_assertions::assert_eq;
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ticket_tailor_mcp::config::Config;
use ticket_tailor_mcp::error::TailorError;
use ticket_tailor_mcp::params::QueryParams;
use ticket_tailor_mcp::server::TailorServer;
use ticket_tailor_mcp::tailor_client::TailorClient;
use ticket_tailor_mcp::tools::{EventsInput, OrdersInput};

const API_KEY: &str = "test_api_key";
const BASIC_AUTH: &str = "Basic dGVzdF9hcGlfa2V5Og==";

fn client_for(base_url: &str) -> TailorClient {
    let config = Config::new(API_KEY, base_url).unwrap();
    TailorClient::new(&config).unwrap()
}

#[tokio::test]
async fn events_request_carries_normalized_window() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(header("Authorization", BASIC_AUTH))
        .and(header("Accept", "application/json"))
        .and(query_param("start_at.gte", "1704067200"))
        .and(query_param("end_at.lte", "1709251200"))
        .and(query_param("status", "published"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "ev_1", "name": "New Year Gala", "status": "published",
                 "start": {"iso": "2024-01-05T19:00:00+00:00"}, "venue": {"name": "Main Hall"}}
            ],
            "links": {"next": null, "previous": null}
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = TailorServer::new(client_for(&mock.uri()));
    let text = server
        .get_events(Parameters(EventsInput {
            start_date: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

    let events: Vec<Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["venue"]["name"], "Main Hall");
}

#[tokio::test]
async fn orders_not_found_yields_empty_list() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "error_code": "NOT_FOUND",
            "message": "Not found"
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = TailorServer::new(client_for(&mock.uri()));
    let text = server
        .get_orders(Parameters(OrdersInput {
            event_id: Some("ev_missing".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert_eq!(text, "[]");
}

#[tokio::test]
async fn orders_blank_filters_stay_off_the_wire() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("event_id", "ev_7"))
        .and(query_param("buyer.email", "ada@example.com"))
        .and(query_param("status", "completed"))
        .and(query_param("limit", "50"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("buyer.phone"))
        .and(query_param_is_missing("created_at.gte"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "or_1", "status": "completed", "buyer": {"name": "Ada"}}]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = TailorServer::new(client_for(&mock.uri()));
    let text = server
        .get_orders(Parameters(OrdersInput {
            event_id: Some("ev_7".to_string()),
            email: Some(" ada@example.com ".to_string()),
            phone: Some("   ".to_string()),
            created_at_min: Some(String::new()),
            ..Default::default()
        }))
        .await
        .unwrap();

    let orders: Vec<Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(orders[0]["id"], "or_1");
}

#[tokio::test]
async fn missing_data_field_is_empty() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"links": {}})))
        .mount(&mock)
        .await;

    let records = client_for(&mock.uri())
        .list_events(&QueryParams::new())
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn server_error_is_swallowed_by_fetch() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&mock)
        .await;

    let records = client_for(&mock.uri())
        .fetch("events", &QueryParams::new().with("limit", Some("1")))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn every_error_status_folds_to_empty() {
    for status in [400u16, 401, 403, 429, 502, 503] {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .expect(1)
            .mount(&mock)
            .await;

        let records = client_for(&mock.uri())
            .list_orders(&QueryParams::new())
            .await
            .unwrap();
        assert!(records.is_empty(), "status {status}");
    }
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock)
        .await;

    let err = client_for(&mock.uri())
        .list_orders(&QueryParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TailorError::Serialization(_)));
}

#[tokio::test]
async fn transport_failure_surfaces_as_tool_error() {
    // Nothing listens on port 1.
    let server = TailorServer::new(client_for("http://127.0.0.1:1"));
    let err = server
        .get_events(Parameters(EventsInput::default()))
        .await
        .unwrap_err();

    assert!(err.starts_with("Failed to fetch events"));
    assert!(!err.contains(API_KEY));
}

#[tokio::test]
async fn connection_test_reports_bad_key() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock)
        .await;

    let err = client_for(&mock.uri()).test_connection().await.unwrap_err();
    assert!(matches!(err, TailorError::ConnectionTest { .. }));
    assert!(err.to_string().contains("TICKET_TAILOR_API_KEY"));
}

#[tokio::test]
async fn connection_test_succeeds_on_empty_page() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock)
        .await;

    assert!(client_for(&mock.uri()).test_connection().await.is_ok());
}
