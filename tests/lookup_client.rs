mod common;

use common::mock_service::{MockQueryService, MockResponse};
use common::{lookup_config, primary_answer};
use prime_counter::lookup::{LookupFailure, NthPrimeWorkflow, RequestOutcome};
use prime_counter::prime::{LookupError, PrimeLookup, WolframAlphaClient};
use prime_counter::state::AppState;
use std::sync::Arc;

async fn client_for(service: &MockQueryService) -> WolframAlphaClient {
    WolframAlphaClient::new(&lookup_config(&service.query_url())).unwrap()
}

#[tokio::test]
async fn test_sends_single_query_keyed_on_n() {
    let service = MockQueryService::start().await;
    service
        .enqueue_response(MockResponse::json(&primary_answer("7919")))
        .await;
    let client = client_for(&service).await;

    assert_eq!(client.fetch_nth_prime(1000).await.unwrap(), 7919);

    let queries = service.captured_queries().await;
    assert_eq!(queries.len(), 1);
    let query = &queries[0];
    assert_eq!(query.get("input").map(String::as_str), Some("prime 1000"));
    assert_eq!(query.get("format").map(String::as_str), Some("plaintext"));
    assert_eq!(query.get("output").map(String::as_str), Some("JSON"));
    assert_eq!(query.get("appid").map(String::as_str), Some("test-app"));
}

#[tokio::test]
async fn test_first_integer_in_free_text_is_used() {
    let service = MockQueryService::start().await;
    service
        .enqueue_response(MockResponse::json(&primary_answer("29 (the 10th prime)")))
        .await;
    let client = client_for(&service).await;

    assert_eq!(client.fetch_nth_prime(10).await.unwrap(), 29);
}

#[tokio::test]
async fn test_no_primary_pod_is_service_error() {
    let service = MockQueryService::start().await;
    service.enqueue_response(MockResponse::default()).await;
    let client = client_for(&service).await;

    assert!(matches!(
        client.fetch_nth_prime(3).await,
        Err(LookupError::ServiceError { .. })
    ));
}

#[tokio::test]
async fn test_text_without_digits_is_unparseable() {
    let service = MockQueryService::start().await;
    service
        .enqueue_response(MockResponse::json(&primary_answer("(data not available)")))
        .await;
    let client = client_for(&service).await;

    match client.fetch_nth_prime(3).await {
        Err(LookupError::Unparseable { answer }) => assert_eq!(answer, "(data not available)"),
        other => panic!("expected Unparseable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_unparseable() {
    let service = MockQueryService::start().await;
    service.enqueue_response(MockResponse::json("<html>oops</html>")).await;
    let client = client_for(&service).await;

    assert!(matches!(
        client.fetch_nth_prime(3).await,
        Err(LookupError::Unparseable { .. })
    ));
}

#[tokio::test]
async fn test_error_status_is_network_error() {
    let service = MockQueryService::start().await;
    service
        .enqueue_response(MockResponse::error(503, "unavailable"))
        .await;
    let client = client_for(&service).await;

    assert!(matches!(
        client.fetch_nth_prime(3).await,
        Err(LookupError::Network(_))
    ));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client =
        WolframAlphaClient::new(&lookup_config(&format!("http://{}/v2/query", addr))).unwrap();

    assert!(matches!(
        client.fetch_nth_prime(3).await,
        Err(LookupError::Network(_))
    ));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let service = MockQueryService::start().await;
    service
        .enqueue_response(MockResponse::json(&primary_answer("5")).with_delay(3_000))
        .await;
    let mut config = lookup_config(&service.query_url());
    config.timeout_seconds = 1;
    let client = WolframAlphaClient::new(&config).unwrap();

    match client.fetch_nth_prime(3).await {
        Err(LookupError::Network(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_workflow_against_http_service() {
    let service = MockQueryService::start().await;
    service
        .enqueue_response(MockResponse::json(&primary_answer("13")))
        .await;
    service.enqueue_response(MockResponse::error(500, "boom")).await;

    let state = AppState::new();
    let workflow = NthPrimeWorkflow::new(state.clone(), Arc::new(client_for(&service).await));

    let RequestOutcome::Started(handle) = workflow.request(6) else {
        panic!("expected lookup to start");
    };
    assert_eq!(handle.wait().await.unwrap(), Some(13));
    assert_eq!(state.take_pending_prime_result(), Some(13));

    let RequestOutcome::Started(handle) = workflow.request(7) else {
        panic!("expected lookup to start");
    };
    assert!(matches!(
        handle.wait().await,
        Err(LookupFailure::Lookup(LookupError::Network(_)))
    ));
    assert_eq!(state.pending_prime_result(), None);
}
