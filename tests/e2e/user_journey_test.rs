// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use nobix::client::review_client::{ClientState, ReviewClient};
use nobix::client::transport::HttpReviewTransport;
use nobix::config::settings::LlmSettings;
use nobix::domain::models::review::MediaType;
use nobix::domain::services::llm_service::LLMService;
use nobix::domain::services::review_service::ReviewService;
use nobix::presentation::routes;
use nobix::utils::retry_policy::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::helpers::fixtures::{completion_body, review_body};

/// 启动服务并返回根地址
async fn spawn_app(upstream: &MockServer) -> String {
    let llm = LLMService::new(&LlmSettings {
        api_key: Some("test-key".to_string()),
        api_base_url: upstream.uri(),
        timeout_secs: 5,
        ..LlmSettings::default()
    })
    .unwrap()
    .with_retry_policy(RetryPolicy::none());
    let app = routes::routes(Arc::new(ReviewService::new(Arc::new(llm))));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client(base_url: &str) -> ReviewClient<HttpReviewTransport> {
    ReviewClient::new(HttpReviewTransport::new(base_url, Duration::from_secs(10)).unwrap())
}

#[tokio::test]
async fn user_gets_a_review_then_resets() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body(&review_body(""), &["https://example.com/naruto"])),
        )
        .expect(1)
        .mount(&upstream)
        .await;
    let base_url = spawn_app(&upstream).await;

    let mut client = client(&base_url);
    client.set_title("Naruto");
    client.set_media_type(MediaType::Manga);

    match client.submit().await {
        ClientState::Success(displayed) => {
            assert_eq!(displayed.title, "Naruto");
            assert_eq!(displayed.media_type, MediaType::Manga);
            assert_eq!(displayed.review.citations, vec!["https://example.com/naruto".to_string()]);
            assert!(displayed.review.spoilers.is_empty());
        }
        other => panic!("unexpected state: {:?}", other),
    }

    client.reset();
    assert_eq!(client.state(), &ClientState::Idle);
}

#[tokio::test]
async fn user_sees_upstream_failure_as_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            &serde_json::json!({"summary": "Incomplete"}),
            &[],
        )))
        .mount(&upstream)
        .await;
    let base_url = spawn_app(&upstream).await;

    let mut client = client(&base_url);
    client.set_title("Dune");
    client.set_media_type(MediaType::Movie);

    match client.submit().await {
        ClientState::Error(message) => assert!(message.contains("missing required fields")),
        other => panic!("unexpected state: {:?}", other),
    }
    assert!(client.input_enabled());
}

#[tokio::test]
async fn unreachable_service_is_an_error_state() {
    let mut client = client("http://127.0.0.1:9");
    client.set_title("Dune");

    assert!(matches!(client.submit().await, ClientState::Error(_)));
}
