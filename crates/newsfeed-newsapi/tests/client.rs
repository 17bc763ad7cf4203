//! Integration tests for `NewsApiClient` using wiremock HTTP mocks.

use chrono::{Local, NaiveDate};
use newsfeed_newsapi::{ArticleSource, FetchError, NewsApiClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str, max_pages: u32) -> NewsApiClient {
    NewsApiClient::with_base_url(30, max_pages, base_url)
        .expect("client construction should not fail")
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn articles(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| {
            json!({
                "source": { "id": null, "name": format!("Source {i}") },
                "author": format!("Author {i}"),
                "title": format!("Headline {i}"),
                "url": format!("https://news.example/{i}"),
                "urlToImage": null,
                "publishedAt": "2025-10-03T08:00:00Z",
                "content": "Body."
            })
        })
        .collect()
}

fn page_body(total_results: u64, page_articles: Vec<Value>) -> Value {
    json!({
        "status": "ok",
        "totalResults": total_results,
        "articles": page_articles
    })
}

#[tokio::test]
async fn sends_expected_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "apple"))
        .and(query_param("from", "2025-10-02"))
        .and(query_param("to", "2025-10-03"))
        .and(query_param("sortBy", "popularity"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("language", "en"))
        .and(query_param("pageSize", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, articles(0, 1))))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let result = client
        .fetch_window("test-key", "apple", ymd(2025, 10, 2), ymd(2025, 10, 3))
        .await
        .expect("fetch should succeed");

    assert_eq!(result.status, "ok");
    assert_eq!(result.total_results, 1);
}

#[tokio::test]
async fn fetch_uses_local_date_window() {
    let server = MockServer::start().await;
    let today = Local::now().date_naive();
    let from = today.pred_opt().unwrap();

    Mock::given(method("GET"))
        .and(query_param("from", from.format("%Y-%m-%d").to_string()))
        .and(query_param("to", today.format("%Y-%m-%d").to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, Vec::new())))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    client
        .fetch("test-key", "technology", 1)
        .await
        .expect("fetch should succeed");
}

#[tokio::test]
async fn empty_first_page_stops_after_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, Vec::new())))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 10);
    let result = client
        .fetch_window("test-key", "nothing", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap();

    assert_eq!(result.total_results, 0);
    assert!(result.articles.is_empty());
    assert_eq!(result.pages, 1);
}

#[tokio::test]
async fn all_results_on_first_page_stops_after_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(5, articles(0, 5))))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 10);
    let result = client
        .fetch_window("test-key", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap();

    assert_eq!(result.total_results, 5);
    assert_eq!(result.articles.len(), 5);
    assert_eq!(result.articles[0]["title"], "Headline 0");
    assert_eq!(result.articles[4]["title"], "Headline 4");
}

#[tokio::test]
async fn default_page_cap_makes_exactly_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(250, articles(0, 100))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(250, articles(100, 100))))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let result = client
        .fetch_window("test-key", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap();

    assert_eq!(result.total_results, 100);
    assert_eq!(result.pages, 1);
}

#[tokio::test]
async fn raised_page_cap_follows_pages_until_total_reached() {
    let server = MockServer::start().await;

    for (page, start, count) in [(1, 0, 100), (2, 100, 100), (3, 200, 50)] {
        Mock::given(method("GET"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page_body(250, articles(start, count))),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server.uri(), 10);
    let result = client
        .fetch_window("test-key", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap();

    assert_eq!(result.total_results, 250);
    assert_eq!(result.pages, 3);
    assert_eq!(result.articles[0]["title"], "Headline 0");
    assert_eq!(result.articles[249]["title"], "Headline 249");
}

#[tokio::test]
async fn short_page_stops_pagination() {
    let server = MockServer::start().await;

    // totalResults overstates what the API will actually serve.
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1000, articles(0, 100))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1000, articles(100, 40))))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 10);
    let result = client
        .fetch_window("test-key", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap();

    assert_eq!(result.total_results, 140);
    assert_eq!(result.pages, 2);
}

#[tokio::test]
async fn api_error_status_returns_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "code": "parameterInvalid",
            "message": "You are trying to request results too far in the past."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let err = client
        .fetch_window("test-key", "apple", ymd(2020, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Api(_)), "got: {err:?}");
    assert!(err.to_string().contains("too far in the past"));
}

#[tokio::test]
async fn api_error_without_message_reports_unknown_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "error" })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let err = client
        .fetch_window("test-key", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Unknown error"), "got: {err}");
}

#[tokio::test]
async fn non_2xx_status_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid or incorrect."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let err = client
        .fetch_window("bad-key", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap_err();

    match err {
        FetchError::UnexpectedStatus { status, ref message } => {
            assert_eq!(status, 401);
            assert!(message.contains("API key is invalid"));
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_json_body_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let err = client
        .fetch_window("test-key", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::UnexpectedStatus { status: 503, .. }
    ));
}

#[tokio::test]
async fn malformed_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let err = client
        .fetch_window("test-key", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn transport_error_does_not_leak_api_key() {
    // Nothing listens on this port.
    let client = test_client("http://127.0.0.1:1", 1);
    let err = client
        .fetch_window("super-secret", "apple", ymd(2025, 1, 1), ymd(2025, 1, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Http(_)), "got: {err:?}");
    assert!(!err.to_string().contains("super-secret"));
}
