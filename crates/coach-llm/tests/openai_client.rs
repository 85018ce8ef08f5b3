//! OpenAiLLMClient against a local stand-in for the chat completion API.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use coach_llm::{LLMClient, LLMError, LlmConfig, Message, OpenAiLLMClient};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Seen {
    authorization: Option<String>,
    body: Option<Value>,
}

type Shared = Arc<Mutex<Seen>>;

async fn handle_ok(
    State(seen): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut seen = seen.lock().unwrap();
    seen.authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    seen.body = Some(body);
    Json(json!({
        "choices": [ { "message": { "role": "assistant", "content": "Corrected." } } ],
        "usage": { "prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12 }
    }))
}

async fn handle_rate_limited() -> (StatusCode, &'static str) {
    (StatusCode::TOO_MANY_REQUESTS, "slow down")
}

async fn handle_no_choices() -> Json<Value> {
    Json(json!({ "choices": [] }))
}

async fn handle_null_content() -> Json<Value> {
    Json(json!({ "choices": [ { "message": { "content": null } } ] }))
}

async fn handle_not_json() -> &'static str {
    "<html>gateway</html>"
}

async fn spawn_provider() -> (String, Shared) {
    let seen: Shared = Arc::new(Mutex::new(Seen::default()));
    let app = Router::new()
        .route("/ok", post(handle_ok))
        .route("/rate-limited", post(handle_rate_limited))
        .route("/no-choices", post(handle_no_choices))
        .route("/null-content", post(handle_null_content))
        .route("/not-json", post(handle_not_json))
        .with_state(Arc::clone(&seen));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

fn client(base: &str, path: &str) -> OpenAiLLMClient {
    let mut config = LlmConfig::new("sk-test");
    config.api_url = format!("{}{}", base, path);
    config.model = "gpt-test".to_string();
    config.max_tokens = 321;
    OpenAiLLMClient::new(config)
}

#[tokio::test]
async fn sends_bearer_key_and_chat_body() {
    let (base, seen) = spawn_provider().await;
    let llm = client(&base, "/ok");
    let messages = [Message::system("be brief"), Message::user("fix this")];
    let out = llm.complete_with_messages(&messages).await.unwrap();
    assert_eq!(out, "Corrected.");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer sk-test"));
    let body = seen.body.as_ref().unwrap();
    assert_eq!(body["model"], "gpt-test");
    assert_eq!(body["max_tokens"], 321);
    assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "be brief");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "fix this");
}

#[tokio::test]
async fn non_success_status_is_api_error_with_status_and_body() {
    let (base, _) = spawn_provider().await;
    let err = client(&base, "/rate-limited").complete("hi").await.unwrap_err();
    match err {
        LLMError::Api(msg) => {
            assert!(msg.contains("429"), "{msg}");
            assert!(msg.contains("slow down"), "{msg}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_other_error() {
    let (base, _) = spawn_provider().await;
    let err = client(&base, "/no-choices").complete("hi").await.unwrap_err();
    assert!(matches!(err, LLMError::Other(_)), "got {err:?}");
}

#[tokio::test]
async fn null_content_is_other_error() {
    let (base, _) = spawn_provider().await;
    let err = client(&base, "/null-content").complete("hi").await.unwrap_err();
    assert!(matches!(err, LLMError::Other(_)), "got {err:?}");
}

#[tokio::test]
async fn non_json_success_body_is_parse_error() {
    let (base, _) = spawn_provider().await;
    let err = client(&base, "/not-json").complete("hi").await.unwrap_err();
    assert!(matches!(err, LLMError::Parse(_)), "got {err:?}");
}
