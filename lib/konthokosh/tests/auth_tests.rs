//! Integration tests for `AuthenticatedClient` using wiremock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use assert2::{check, let_assert};
use konthokosh::{
    ApiClient, AuthenticatedClient, BackendConfig, HyperClient, RequestOptions, StaticToken,
    TOKEN_UNAVAILABLE, TokenError, TokenFn, TokenProvider,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn authenticated<P: TokenProvider>(
    server: &MockServer,
    tokens: P,
) -> AuthenticatedClient<HyperClient, P> {
    let config = BackendConfig::parse(&server.uri())
        .expect("config")
        .default_header("Authorization", "Bearer leaked-default");
    AuthenticatedClient::new(ApiClient::from_config(&config), tokens)
}

/// `Authorization` values of every request the server saw.
async fn authorization_headers(server: &MockServer) -> Vec<Vec<String>> {
    server
        .received_requests()
        .await
        .expect("recording")
        .iter()
        .map(|request| {
            request
                .headers
                .get_all("authorization")
                .iter()
                .filter_map(|value| value.to_str().ok().map(str::to_string))
                .collect()
        })
        .collect()
}

async fn mount_ok(server: &MockServer) {
    Mock::given(path("/api/v1/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_bearer_header() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let client = authenticated(&mock_server, StaticToken::new("jwt-123"));
    let response = client
        .get(
            "/api/v1/posts",
            RequestOptions::new().header("authorization", "Bearer leaked-override"),
        )
        .await
        .expect("response");

    check!(response.ok());
    check!(authorization_headers(&mock_server).await == vec![vec!["Bearer jwt-123".to_string()]]);
}

#[tokio::test]
async fn test_token_is_fetched_per_request() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let issued = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&issued);
    let tokens = TokenFn::new(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        async move { Ok(Some(format!("token-{n}"))) }
    });
    let client = authenticated(&mock_server, tokens);

    client
        .get("/api/v1/posts", RequestOptions::new())
        .await
        .expect("first");
    client
        .delete("/api/v1/posts", RequestOptions::new())
        .await
        .expect("second");

    check!(issued.load(Ordering::SeqCst) == 2);
    check!(
        authorization_headers(&mock_server).await
            == vec![
                vec!["Bearer token-1".to_string()],
                vec!["Bearer token-2".to_string()],
            ]
    );
}

#[tokio::test]
async fn test_skip_auth_sends_no_header() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let client = authenticated(&mock_server, StaticToken::new("jwt-123"));
    client
        .put(
            "/api/v1/posts",
            &json!({"post": "edited"}),
            RequestOptions::new().skip_auth(),
        )
        .await
        .expect("response");

    check!(authorization_headers(&mock_server).await == vec![Vec::<String>::new()]);
}

#[tokio::test]
async fn test_signed_out_sends_no_header() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let client = authenticated(&mock_server, StaticToken::none());
    check!(!client.is_signed_in().await);

    client
        .patch("/api/v1/posts", &json!({"isActive": false}), RequestOptions::new())
        .await
        .expect("response");

    check!(authorization_headers(&mock_server).await == vec![Vec::<String>::new()]);
}

#[tokio::test]
async fn test_provider_failure_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let tokens = TokenFn::new(|| async { Err(TokenError::new("refresh token revoked")) });
    let client = authenticated(&mock_server, tokens);

    let result = client
        .post("/api/v1/posts", &json!({"post": "hi"}), RequestOptions::new())
        .await;

    let_assert!(Err(err) = result);
    check!(err.is_authentication());
    check!(err.status() == 401);
    check!(err.message() == TOKEN_UNAVAILABLE);
}

#[tokio::test]
async fn test_server_rejection_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({
                "statusCode": 401,
                "success": false,
                "message": "jwt expired",
                "data": null
            })),
        )
        .mount(&mock_server)
        .await;

    let client = authenticated(&mock_server, StaticToken::new("expired"));
    let result = client.get("/api/v1/posts", RequestOptions::new()).await;

    let_assert!(Err(err) = result);
    check!(!err.is_authentication());
    check!(err.status() == 401);
    check!(err.user_message() == "Authentication failed. Please log in again.");
}
