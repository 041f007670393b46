//! Integration tests for `HttpFetcher` using wiremock HTTP mocks.

use placesweep_places::{HttpFetcher, JsonFetch, PlacesError};
use reqwest::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_fetcher() -> HttpFetcher {
    HttpFetcher::new(5, "placesweep-test/0.1").expect("fetcher construction should not fail")
}

fn url(server: &MockServer, rest: &str) -> Url {
    Url::parse(&format!("{}{rest}", server.uri())).expect("mock URL should parse")
}

#[tokio::test]
async fn json_body_is_returned_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(header("user-agent", "placesweep-test/0.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "OK", "results": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch_json(&url(&server, "/nearbysearch/json?key=k"))
        .await
        .expect("request should succeed");

    assert_eq!(
        body.and_then(|b| b.get("status").cloned()),
        Some(serde_json::json!("OK"))
    );
}

#[tokio::test]
async fn non_json_body_is_none_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch_json(&url(&server, "/details/json"))
        .await
        .expect("unparsable body is not a transport error");

    assert!(body.is_none());
}

#[tokio::test]
async fn server_error_status_is_an_error_with_key_redacted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_fetcher()
        .fetch_json(&url(&server, "/details/json?placeid=p1&key=super-secret"))
        .await
        .unwrap_err();

    match err {
        PlacesError::UnexpectedStatus { status, url } => {
            assert_eq!(status, 500);
            assert!(!url.contains("super-secret"), "key leaked: {url}");
            assert!(url.contains("placeid=p1"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let server = MockServer::start().await;
    let target = url(&server, "/nearbysearch/json");
    drop(server);

    let err = test_fetcher().fetch_json(&target).await.unwrap_err();

    assert!(matches!(err, PlacesError::Http(_)), "got {err:?}");
}
