use std::time::Duration;

use diary_engine::{
    fetch_all, resolve_account, FailureKind, FetchSettings, MastodonApi, ReqwestMastodonClient,
    StopReason,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> ReqwestMastodonClient {
    ReqwestMastodonClient::new(FetchSettings {
        scheme: "http".to_string(),
        ..FetchSettings::default()
    })
    .unwrap()
}

fn host(server: &MockServer) -> String {
    server.address().to_string()
}

fn status(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "created_at": "2024-01-01T10:00:00.000Z",
        "content": format!("<p>#Diary {id}</p>"),
        "in_reply_to_id": null
    })
}

#[tokio::test]
async fn resolves_profile_to_account_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/lookup"))
        .and(query_param("acct", "@alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "109",
            "username": "alice"
        })))
        .mount(&server)
        .await;

    let account = resolve_account(&client(), &format!("{}/@alice", server.uri()))
        .await
        .unwrap();
    assert_eq!(account.id, "109");
    assert_eq!(account.username, "@alice");
    assert_eq!(account.host, host(&server));
}

#[tokio::test]
async fn error_body_means_user_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/lookup"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Record not found" })),
        )
        .mount(&server)
        .await;

    let err = resolve_account(&client(), &format!("{}/@ghost", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::UserNotFound);
    assert!(!err.kind.is_network());
}

#[tokio::test]
async fn empty_handle_is_sent_to_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/lookup"))
        .and(query_param("acct", ""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Record not found" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = resolve_account(&client(), &format!("{}/@alice/", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::UserNotFound);
}

#[tokio::test]
async fn missing_id_means_user_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "x" })))
        .mount(&server)
        .await;

    let err = resolve_account(&client(), &format!("{}/@x", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::UserNotFound);
}

#[tokio::test]
async fn lookup_http_failure_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/lookup"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = resolve_account(&client(), &format!("{}/@alice", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert!(err.kind.is_network());
}

#[tokio::test]
async fn invalid_profile_url_fails_before_any_request() {
    let err = resolve_account(&client(), "not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidProfileUrl);
}

#[tokio::test]
async fn statuses_are_paged_with_decremented_max_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/109/statuses"))
        .and(query_param_is_missing("max_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            status("120"),
            status("100")
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/109/statuses"))
        .and(query_param("max_id", "99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([status("42")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/109/statuses"))
        .and(query_param("max_id", "41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let account = diary_core::Account {
        host: host(&server),
        username: "@alice".to_string(),
        id: "109".to_string(),
    };
    let outcome = fetch_all(&client(), &account).await.unwrap();
    let ids: Vec<_> = outcome.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["120", "100", "42"]);
    assert_eq!(outcome.stop, StopReason::Exhausted);
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/1/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client()
        .account_statuses(&host(&server), "1", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(err.kind.is_network());
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/lookup"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "id": "1" })),
        )
        .mount(&server)
        .await;

    let client = ReqwestMastodonClient::new(FetchSettings {
        scheme: "http".to_string(),
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    })
    .unwrap();
    let err = client
        .lookup_account(&host(&server), "@alice")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
