//! Session and client against a live API server on an ephemeral port.

use coach_api::config::CorsOrigins;
use coach_api::server::{self, AppState};
use coach_client::{ClientError, CoachClient, CoachSession};
use coach_llm::{LlmWritingCoach, MockLLMClient};
use coach_types::{Feature, FeedbackRequest, Level};
use std::sync::Arc;

const FEEDBACK_REPLY: &str = "---START_RESPONSE---
CORRECTED_TEXT: This is an example.
CHANGES_LIST:
- Changed \"a example\" to \"an example\" - article before a vowel sound.
---END_RESPONSE---";

async fn spawn(state: AppState) -> String {
    let app = server::router(Arc::new(state), &CorsOrigins::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_with_reply(reply: &str) -> String {
    let coach = Arc::new(LlmWritingCoach::new(MockLLMClient::with_reply(reply)));
    spawn(AppState::new(coach)).await
}

#[tokio::test]
async fn feedback_round_trip_populates_session() {
    let client = CoachClient::new(spawn_with_reply(FEEDBACK_REPLY).await);
    let mut session = CoachSession::new();
    session.text = "This is a example.".into();
    session.level = Level::B1;

    assert!(session.submit(&client).await);
    let fb = session.feedback().unwrap();
    assert_eq!(fb.corrected_text, "This is an example.");
    assert!(!fb.changes_list.is_empty());
    assert!(session.error().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn daily_task_and_vocabulary_tabs() {
    let client = CoachClient::new(
        spawn_with_reply(r#"[{"word":"diligent","definition":"hard-working","example":"A diligent student."}]"#)
            .await,
    );
    let mut session = CoachSession::new();
    session.select_feature(Feature::Vocabulary);
    session.topic = "school".into();
    assert!(session.submit(&client).await);
    assert_eq!(session.vocabulary().unwrap().vocabulary[0].word, "diligent");

    // the reply has no task markers, so the whole reply becomes the task
    session.select_feature(Feature::DailyTask);
    assert!(session.vocabulary().is_none());
    assert!(session.submit(&client).await);
    assert!(session.daily_task().unwrap().task.contains("diligent"));
}

#[tokio::test]
async fn api_error_surfaces_detail() {
    let client = CoachClient::new(spawn(AppState::uninitialized()).await);
    let err = client
        .feedback(&FeedbackRequest::new("Hello"))
        .await
        .unwrap_err();
    match &err {
        ClientError::Api { status, detail } => {
            assert_eq!(*status, 503);
            assert!(detail.contains("not initialized"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Error from API: "));
}

#[tokio::test]
async fn provider_failure_is_api_error_in_session() {
    let coach = Arc::new(LlmWritingCoach::new(MockLLMClient::with_error("quota exceeded")));
    let client = CoachClient::new(spawn(AppState::new(coach)).await);
    let mut session = CoachSession::new();
    session.text = "Hello".into();
    assert!(!session.submit(&client).await);
    let msg = session.error().unwrap();
    assert!(msg.starts_with("Error from API: An error occurred during AI processing:"));
    assert!(session.feedback().is_none());
}

#[tokio::test]
async fn unreachable_server_is_no_response() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CoachClient::new(format!("http://{}", addr));
    let mut session = CoachSession::new();
    session.text = "Hello".into();
    assert!(!session.submit(&client).await);
    assert_eq!(
        session.error(),
        Some("No response from server. Please check if the backend is running.")
    );
}

#[tokio::test]
async fn connection_closed_without_reply_is_no_response() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        use tokio::io::AsyncReadExt;
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            drop(stream);
        }
    });

    let client = CoachClient::new(format!("http://{}", addr));
    let err = client
        .feedback(&FeedbackRequest::new("Hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NoResponse), "got {err:?}");

    let mut session = CoachSession::new();
    session.text = "Hello".into();
    assert!(!session.submit(&client).await);
    assert_eq!(
        session.error(),
        Some("No response from server. Please check if the backend is running.")
    );
}
