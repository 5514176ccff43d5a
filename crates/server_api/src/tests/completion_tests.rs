use super::*;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct UpstreamState {
    status: StatusCode,
    body: serde_json::Value,
    seen: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>,
}

async fn handle_chat_completion(
    State(state): State<UpstreamState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.seen.lock().await.push((auth, body));
    (state.status, Json(state.body.clone()))
}

async fn spawn_upstream(
    status: StatusCode,
    body: serde_json::Value,
) -> (String, Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = UpstreamState {
        status,
        body,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(handle_chat_completion))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/v1"), seen)
}

#[tokio::test]
async fn sends_prompt_as_single_user_message_with_fixed_model() {
    let (base_url, seen) = spawn_upstream(
        StatusCode::OK,
        serde_json::json!({ "choices": [{ "message": { "role": "assistant", "content": "world" } }] }),
    )
    .await;
    let client = OpenAiCompletionClient::new(format!("{base_url}/"), Some("sk-test".into()));

    let result = client.complete("hello").await.expect("completion");
    assert_eq!(result, "world");

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(
        body,
        &serde_json::json!({
            "model": "gpt-4",
            "messages": [{ "role": "user", "content": "hello" }]
        })
    );
}

#[tokio::test]
async fn null_content_becomes_empty_string() {
    let (base_url, _seen) = spawn_upstream(
        StatusCode::OK,
        serde_json::json!({ "choices": [{ "message": { "role": "assistant", "content": null } }] }),
    )
    .await;
    let client = OpenAiCompletionClient::new(base_url, Some("sk-test".into()));
    assert_eq!(client.complete("hello").await.expect("completion"), "");
}

#[tokio::test]
async fn provider_error_status_is_reported() {
    let (base_url, _seen) = spawn_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        serde_json::json!({ "error": { "message": "rate limited" } }),
    )
    .await;
    let client = OpenAiCompletionClient::new(base_url, Some("sk-test".into()));
    let err = client.complete("hello").await.expect_err("should fail");
    assert!(matches!(err, CompletionError::Status { status: 429, .. }));
}

#[tokio::test]
async fn empty_choices_is_malformed() {
    let (base_url, _seen) =
        spawn_upstream(StatusCode::OK, serde_json::json!({ "choices": [] })).await;
    let client = OpenAiCompletionClient::new(base_url, Some("sk-test".into()));
    let err = client.complete("hello").await.expect_err("should fail");
    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_credential_fails_without_calling_upstream() {
    let (base_url, seen) = spawn_upstream(StatusCode::OK, serde_json::json!({})).await;
    let client = OpenAiCompletionClient::new(base_url, Some("   ".into()));
    assert!(!client.has_credential());
    let err = client.complete("hello").await.expect_err("should fail");
    assert!(matches!(err, CompletionError::MissingCredential));
    assert!(seen.lock().await.is_empty());
}

#[test]
fn debug_output_redacts_credential() {
    let client = OpenAiCompletionClient::new(DEFAULT_OPENAI_BASE_URL, Some("sk-secret".into()));
    let debug = format!("{client:?}");
    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("<redacted>"));
}
