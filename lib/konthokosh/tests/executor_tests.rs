//! Integration tests for `HyperClient` and `ApiClient` using wiremock.

use std::time::Duration;

use konthokosh::{
    ApiClient, ApiRequest, BackendConfig, Error, HttpClient, HyperClient, Method, Payload,
    Request, RequestOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Greeting {
    text: String,
}

fn executor(server: &MockServer) -> ApiClient<HyperClient> {
    ApiClient::from_config(&BackendConfig::parse(&server.uri()).expect("config"))
}

#[tokio::test]
async fn test_transport_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let url = url::Url::parse(&format!("{}/ping", mock_server.uri())).expect("url");
    let response = client
        .execute(Request::builder(Method::Get, url).build())
        .await
        .expect("response");

    assert!(response.is_success());
    assert_eq!(&response.body()[..], b"pong");
}

#[tokio::test]
async fn test_default_headers_and_json_body() {
    let mock_server = MockServer::start().await;
    let input = Greeting {
        text: "hello".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/greetings"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(&input))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = ApiRequest::with_json(Method::Post, "/greetings", &input).expect("json");
    let response = executor(&mock_server)
        .request_as::<Greeting>(&request)
        .await
        .expect("response");

    assert!(response.ok());
    assert_eq!(response.status(), 201);
    assert_eq!(response.data(), &input);
}

#[tokio::test]
async fn test_query_parameters_keep_insertion_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let request = ApiRequest::get("/api/v1/posts").options(
        RequestOptions::new()
            .query("page", 2)
            .query("size", 10)
            .query("keyword", "ai")
            .query("keyword", "ml"),
    );
    executor(&mock_server).request(&request).await.expect("response");

    let received = mock_server.received_requests().await.expect("recording");
    let [request] = received.as_slice() else {
        panic!("expected one request, got {}", received.len());
    };
    assert_eq!(
        request.url.query(),
        Some("page=2&size=10&keyword=ai&keyword=ml")
    );
}

#[tokio::test]
async fn test_header_overrides_win() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .and(header("Accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = ApiRequest::get("/data")
        .options(RequestOptions::new().header("accept", "text/plain"));
    let response = executor(&mock_server).request(&request).await.expect("response");

    assert_eq!(response.data(), &Payload::Text("plain".to_string()));
}

#[tokio::test]
async fn test_http_error_keeps_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "database unavailable"})),
        )
        .mount(&mock_server)
        .await;

    let err = executor(&mock_server)
        .request(&ApiRequest::get("/broken"))
        .await
        .expect_err("500");

    assert!(err.is_server_error());
    assert_eq!(err.status(), 500);
    assert_eq!(err.message(), "API request failed: 500 Internal Server Error");

    #[derive(Deserialize)]
    struct Detail {
        message: String,
    }
    let detail = err
        .decode_payload::<Detail>()
        .expect("payload")
        .expect("detail");
    assert_eq!(detail.message, "database unavailable");
}

#[tokio::test]
async fn test_malformed_json_is_contract_violation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/garbled"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{\"success\": tru", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let err = executor(&mock_server)
        .request(&ApiRequest::get("/garbled"))
        .await
        .expect_err("malformed");

    assert!(err.is_contract_violation());
    assert_eq!(err.status(), 200);
    assert!(err.payload().is_some());
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let config = BackendConfig::parse(&mock_server.uri())
        .expect("config")
        .timeout(Duration::from_millis(100));
    let started = std::time::Instant::now();

    let err = ApiClient::from_config(&config)
        .request(&ApiRequest::get("/slow"))
        .await
        .expect_err("timeout");

    assert!(err.is_timeout());
    assert_eq!(err.status(), 408);
    assert_eq!(err.message(), "Request timeout");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_concurrent_requests_time_out_independently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let config = BackendConfig::parse(&mock_server.uri())
        .expect("config")
        .timeout(Duration::from_millis(300));
    let api = ApiClient::from_config(&config);

    let slow_request = ApiRequest::get("/slow");
    let fast_request = ApiRequest::get("/fast");
    let (slow, fast) = tokio::join!(api.request(&slow_request), api.request(&fast_request));

    assert!(matches!(slow, Err(Error::Timeout)));
    assert!(fast.expect("fast").ok());
}

#[tokio::test]
async fn test_connection_error() {
    let api = ApiClient::new(HyperClient::new(), "http://127.0.0.1:1").expect("api");

    let err = api
        .request(&ApiRequest::get("/unreachable"))
        .await
        .expect_err("connection refused");

    assert!(err.is_connection());
    assert_eq!(err.status(), 0);
    assert!(err.message().starts_with("Network error"));
}

#[tokio::test]
async fn test_debug_logging_layer_is_transparent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/items/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = HyperClient::builder().with_debug_logging().build();
    let api = ApiClient::new(http, mock_server.uri()).expect("api");

    let response = api
        .request(&ApiRequest::delete("/items/3"))
        .await
        .expect("response");

    assert_eq!(response.status(), 204);
    assert!(response.data().is_empty());
}
