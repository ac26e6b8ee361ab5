mod common;

use std::time::Duration;

use datura_sdk::types::{
    AiSearchRequest, AiSearchResult, Model, Tool, TwitterSearchRequest,
};
use datura_sdk::{ClientConfig, Datura, DaturaError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Datura {
    Datura::with_base_url("dt-test-key", &server.uri()).expect("client")
}

#[tokio::test]
async fn basic_web_search_is_get_with_exact_query_params() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/web"))
        .and(query_param("query", "cats"))
        .and(query_param("num", "10"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"title": "All about cats", "link": "https://example.com/cats", "snippet": "cats"},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client.basic_web_search("cats", 10, 0).await.unwrap();

    assert_eq!(resp.data.len(), 1);
    assert_eq!(resp.data[0].title, "All about cats");
}

#[tokio::test]
async fn twitter_by_id_is_get_with_no_body_and_no_query() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/twitter/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "12345",
            "text": "hello",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client.twitter_by_id("12345").await.unwrap();
    assert_eq!(resp.0.id, "12345");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn twitter_search_payload_is_sparse_on_the_wire() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    // The matcher requires the body to be exactly {"query":"foo"}; any
    // stray key falls through to a 404 and fails the test.
    Mock::given(method("POST"))
        .and(path("/twitter"))
        .and(body_json(serde_json::json!({"query": "foo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client
        .basic_twitter_search(TwitterSearchRequest::new("foo"))
        .await
        .unwrap();
    assert!(resp.data.is_empty());
}

#[tokio::test]
async fn unauthorized_surfaces_status_and_exact_body() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/web"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"detail":"unauthorized"}"#))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.basic_web_search("cats", 10, 0).await.unwrap_err();

    match err {
        DaturaError::Http { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, r#"{"detail":"unauthorized"}"#);
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn timeout_is_network_error_with_exactly_one_attempt() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/twitter/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(5)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new("dt-test-key")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let client = Datura::from_config(&config).unwrap();

    let err = client.twitter_by_id("1").await.unwrap_err();
    assert!(matches!(err, DaturaError::Network(_)), "got {err:?}");
    // expect(1) verifies on drop that no retry was attempted.
}

#[tokio::test]
async fn malformed_json_body_is_decode_error() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/web"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.basic_web_search("cats", 10, 0).await.unwrap_err();
    assert!(matches!(err, DaturaError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn nonconforming_response_is_schema_error() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/twitter"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .basic_twitter_search(TwitterSearchRequest::new("foo"))
        .await
        .unwrap_err();
    assert!(matches!(err, DaturaError::Schema(_)), "got {err:?}");
}

#[tokio::test]
async fn invalid_date_fails_before_any_request() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/twitter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TwitterSearchRequest::new("foo").start_date("12-01-2024");
    let err = client.basic_twitter_search(request).await.unwrap_err();

    assert!(matches!(err, DaturaError::Schema(_)), "got {err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn ai_search_with_no_tools_fails_before_any_request() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    let client = client_for(&server);
    let request = AiSearchRequest::new("anything", vec![], Model::Nova);
    let err = client.ai_search(request).await.unwrap_err();

    assert!(matches!(err, DaturaError::Schema(_)), "got {err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn ai_search_resolves_structured_text_and_raw_shapes() {
    common::init_test_tracing();

    // Structured: object carrying recognized sections.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/desearch/ai/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "completion_links": ["https://example.com"],
            "miner_tweets": [{"id": "1", "text": "gm"}],
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);
    let request = AiSearchRequest::new("whats new", vec![Tool::Twitter], Model::Nova);
    match client.ai_search(request.clone()).await.unwrap() {
        AiSearchResult::Structured(resp) => {
            assert_eq!(resp.miner_tweets.unwrap()[0].text, "gm");
        }
        other => panic!("expected Structured, got {other:?}"),
    }

    // Text: body is a bare JSON string.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/desearch/ai/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!("plain answer")))
        .mount(&server)
        .await;
    let client = client_for(&server);
    match client.ai_search(request.clone()).await.unwrap() {
        AiSearchResult::Text(s) => assert_eq!(s, "plain answer"),
        other => panic!("expected Text, got {other:?}"),
    }

    // Raw: anything else, here an array.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/desearch/ai/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
        .mount(&server)
        .await;
    let client = client_for(&server);
    match client.ai_search(request).await.unwrap() {
        AiSearchResult::Raw(value) => assert!(value.is_array()),
        other => panic!("expected Raw, got {other:?}"),
    }
}

#[tokio::test]
async fn twitter_by_urls_posts_url_list() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/twitter/urls"))
        .and(body_json(serde_json::json!({
            "urls": ["https://x.com/elonmusk/status/12345"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "12345", "text": "hello"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client
        .twitter_by_urls(vec!["https://x.com/elonmusk/status/12345".into()])
        .await
        .unwrap();
    assert_eq!(resp.data[0].id, "12345");
}

#[tokio::test]
async fn links_searches_decode_their_sections() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/desearch/ai/search/links/web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "search_results": [{"title": "t", "link": "https://example.com"}],
            "completion_links": ["https://example.com"],
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/desearch/ai/search/links/twitter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "miner_tweets": [{"id": "9", "text": "links"}],
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let web = client
        .web_links_search(datura_sdk::types::WebLinksRequest::new(
            "rust web frameworks",
            vec![Tool::Web],
            Model::Orbit,
        ))
        .await
        .unwrap();
    assert_eq!(web.search_results[0].link, "https://example.com");

    let twitter = client
        .twitter_links_search(datura_sdk::types::TwitterLinksRequest::new(
            "rust web frameworks",
            Model::Orbit,
        ))
        .await
        .unwrap();
    assert_eq!(twitter.miner_tweets[0].id, "9");
}
