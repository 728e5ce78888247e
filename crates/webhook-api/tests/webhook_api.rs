//! Integration tests for the webhook endpoint.
//!
//! Requests are driven through the full router with `tower::ServiceExt`,
//! backed by an in-memory database and mock platform collaborators. The
//! end-to-end test swaps in the real job queue and worker, serving the
//! transcript from a local HTTP listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::Router;
use coordinator::{Coordinator, JobQueue, Summarizer};
use database::models::{Agent, Meeting, MeetingStatus, User};
use database::{agent, meeting, user, Database};
use http_body_util::BodyExt;
use mock_platform::{MockCallPlatform, MockChatPlatform, MockJobDispatcher, MockLanguageModel};
use platform_core::Job;
use tower::ServiceExt;
use webhook_api::routes;
use webhook_api::state::AppState;

struct Harness {
    db: Database,
    calls: Arc<MockCallPlatform>,
    jobs: Arc<MockJobDispatcher>,
    app: Router,
}

async fn harness() -> Harness {
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();

    let calls = Arc::new(MockCallPlatform::new());
    let chat = Arc::new(MockChatPlatform::new());
    let llm = Arc::new(MockLanguageModel::replying("agent reply"));
    let jobs = Arc::new(MockJobDispatcher::new());

    let coordinator = Arc::new(Coordinator::new(
        db.clone(),
        calls.clone(),
        chat.clone(),
        llm.clone(),
        jobs.clone(),
    ));
    let state = AppState::new(coordinator, calls.clone());
    let app = routes::router().with_state(state);

    Harness {
        db,
        calls,
        jobs,
        app,
    }
}

async fn seed(db: &Database) {
    user::create_user(
        db.pool(),
        &User {
            id: "u1".to_string(),
            name: "Alice".to_string(),
        },
    )
    .await
    .unwrap();
    agent::create_agent(
        db.pool(),
        &Agent {
            id: "a1".to_string(),
            name: "Notetaker".to_string(),
            instructions: "Take careful notes.".to_string(),
            user_id: "u1".to_string(),
        },
    )
    .await
    .unwrap();
    meeting::create_meeting(db.pool(), &Meeting::new("m1", "Weekly sync", "u1", "a1"))
        .await
        .unwrap();
}

/// POST the body to /api/webhook with valid-looking headers.
async fn post(app: &Router, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/webhook")
        .header("content-type", "application/json")
        .header("x-signature", "sig")
        .header("x-api-key", "key")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let h = harness().await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&h.app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}

#[tokio::test]
async fn test_missing_signature_header_is_bad_request() {
    let h = harness().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/webhook")
        .header("x-api-key", "key")
        .body(Body::from(r#"{"type": "call.session_ended"}"#))
        .unwrap();
    let (status, _) = send(&h.app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_api_key_is_bad_request() {
    let h = harness().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/webhook")
        .header("x-signature", "sig")
        .header("x-api-key", "")
        .body(Body::from(r#"{"type": "call.session_ended"}"#))
        .unwrap();
    let (status, _) = send(&h.app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_signature_is_unauthorized_with_no_side_effects() {
    let h = harness().await;
    seed(&h.db).await;
    h.calls.set_verify(false);

    let body = r#"{"type": "call.session_started", "call": {"custom": {"meetingId": "m1"}}}"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let row = meeting::get_meeting(h.db.pool(), "m1").await.unwrap();
    assert_eq!(row.status, MeetingStatus::Upcoming);
    assert!(h.calls.connected().is_empty());
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let h = harness().await;
    let (status, _) = post(&h.app, "not json at all").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_event_type_is_acknowledged() {
    let h = harness().await;
    seed(&h.db).await;

    let (status, body) = post(&h.app, r#"{"type": "call.reaction_new"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));

    let row = meeting::get_meeting(h.db.pool(), "m1").await.unwrap();
    assert_eq!(row.status, MeetingStatus::Upcoming);
    assert!(h.jobs.jobs().is_empty());
}

#[tokio::test]
async fn test_missing_event_type_is_acknowledged() {
    let h = harness().await;
    let (status, _) = post(&h.app, r#"{"call_cid": "default:m1"}"#).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_session_started_activates_and_connects_agent() {
    let h = harness().await;
    seed(&h.db).await;

    let body = r#"{"type": "call.session_started", "call": {"custom": {"meetingId": "m1"}}}"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::OK);

    let row = meeting::get_meeting(h.db.pool(), "m1").await.unwrap();
    assert_eq!(row.status, MeetingStatus::Active);
    assert!(row.started_at.is_some());
    assert_eq!(h.calls.connected(), vec![("m1".to_string(), "a1".to_string())]);
    assert_eq!(h.calls.instructions(), vec!["Take careful notes.".to_string()]);
}

#[tokio::test]
async fn test_duplicate_session_started_is_not_found() {
    let h = harness().await;
    seed(&h.db).await;

    let body = r#"{"type": "call.session_started", "call": {"custom": {"meetingId": "m1"}}}"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Exactly one agent connection from the first delivery.
    assert_eq!(h.calls.connected().len(), 1);
}

#[tokio::test]
async fn test_session_started_without_meeting_id_is_bad_request() {
    let h = harness().await;
    let body = r#"{"type": "call.session_started", "call": {}}"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_participant_left_ends_the_call() {
    let h = harness().await;
    let body = r#"{"type": "call.session_participant_left", "call_cid": "default:m1"}"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.calls.ended(), vec!["m1".to_string()]);
}

#[tokio::test]
async fn test_participant_left_platform_failure_is_server_error() {
    let h = harness().await;
    h.calls.set_fail_end_call(true);
    let body = r#"{"type": "call.session_participant_left", "call_cid": "default:m1"}"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_transcription_ready_records_url_and_enqueues_job() {
    let h = harness().await;
    seed(&h.db).await;

    let body = r#"{
        "type": "call.transcription_ready",
        "call_cid": "default:m1",
        "call_transcription": {"url": "https://cdn.example/t.jsonl"}
    }"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::OK);

    let row = meeting::get_meeting(h.db.pool(), "m1").await.unwrap();
    assert_eq!(row.transcript_url.as_deref(), Some("https://cdn.example/t.jsonl"));
    assert_eq!(
        h.jobs.jobs(),
        vec![Job::Summarize {
            meeting_id: "m1".to_string(),
            transcript_url: "https://cdn.example/t.jsonl".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_transcription_ready_for_unknown_meeting_is_not_found() {
    let h = harness().await;

    let body = r#"{
        "type": "call.transcription_ready",
        "call_cid": "default:ghost",
        "call_transcription": {"url": "https://cdn.example/t.jsonl"}
    }"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(h.jobs.jobs().is_empty());
}

#[tokio::test]
async fn test_recording_ready_records_url_without_a_job() {
    let h = harness().await;
    seed(&h.db).await;

    let body = r#"{
        "type": "call.recording_ready",
        "call_cid": "default:m1",
        "call_recording": {"url": "https://cdn.example/r.mp4"}
    }"#;
    let (status, _) = post(&h.app, body).await;
    assert_eq!(status, StatusCode::OK);

    let row = meeting::get_meeting(h.db.pool(), "m1").await.unwrap();
    assert_eq!(row.recording_url.as_deref(), Some("https://cdn.example/r.mp4"));
    assert!(h.jobs.jobs().is_empty());
}

/// Serve a fixed transcript body from an ephemeral local listener.
async fn serve_transcript(body: &'static str) -> String {
    let app = Router::new().route("/t.jsonl", get(move || async move { body }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/t.jsonl")
}

/// Full lifecycle: started, ended, transcript summarized by the real
/// worker, then a post-meeting chat question answered by the agent.
#[tokio::test]
async fn test_full_meeting_lifecycle() {
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();

    let calls = Arc::new(MockCallPlatform::new());
    let chat = Arc::new(MockChatPlatform::new());
    let llm = Arc::new(MockLanguageModel::replying("The team agreed to ship on Friday."));

    let (queue, rx) = JobQueue::channel();
    let summarizer = Summarizer::new(db.clone(), llm.clone()).unwrap();
    coordinator::spawn_worker(summarizer, rx);

    let coordinator = Arc::new(Coordinator::new(
        db.clone(),
        calls.clone(),
        chat.clone(),
        llm.clone(),
        Arc::new(queue),
    ));
    let state = AppState::new(coordinator, calls.clone());
    let app = routes::router().with_state(state);

    seed(&db).await;

    // Session starts: meeting goes active, agent joins the call.
    let body = r#"{"type": "call.session_started", "call": {"custom": {"meetingId": "m1"}}}"#;
    let (status, _) = post(&app, body).await;
    assert_eq!(status, StatusCode::OK);

    // Session ends: meeting moves to processing.
    let body = r#"{"type": "call.session_ended", "call": {"custom": {"meetingId": "m1"}}}"#;
    let (status, _) = post(&app, body).await;
    assert_eq!(status, StatusCode::OK);
    let row = meeting::get_meeting(db.pool(), "m1").await.unwrap();
    assert_eq!(row.status, MeetingStatus::Processing);

    // Transcript lands: the worker fetches it, summarizes, completes.
    let url = serve_transcript(concat!(
        r#"{"speaker_id": "u1", "type": "speech", "text": "Can we ship Friday?", "start_ts": 0.0, "stop_ts": 2.0}"#,
        "\n",
        r#"{"speaker_id": "a1", "type": "speech", "text": "Yes, the release is ready.", "start_ts": 2.0, "stop_ts": 4.0}"#,
        "\n",
    ))
    .await;
    let body = format!(
        r#"{{"type": "call.transcription_ready", "call_cid": "default:m1", "call_transcription": {{"url": "{url}"}}}}"#
    );
    let (status, _) = post(&app, &body).await;
    assert_eq!(status, StatusCode::OK);

    let mut row = meeting::get_meeting(db.pool(), "m1").await.unwrap();
    for _ in 0..100 {
        if row.status == MeetingStatus::Completed {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        row = meeting::get_meeting(db.pool(), "m1").await.unwrap();
    }
    assert_eq!(row.status, MeetingStatus::Completed);
    assert_eq!(row.summary.as_deref(), Some("The team agreed to ship on Friday."));

    // The transcript handed to the model carried resolved speaker names.
    let (_, messages) = llm.last_call().unwrap();
    assert!(messages[0].content.contains("Alice"));
    assert!(messages[0].content.contains("Notetaker"));

    // A follow-up question in the meeting channel gets an agent reply.
    llm.set_reply("You decided to ship on Friday.");
    let body = r#"{
        "type": "message.new",
        "user": {"id": "u1"},
        "channel_id": "m1",
        "message": {"text": "What did we decide?"}
    }"#;
    let (status, _) = post(&app, body).await;
    assert_eq!(status, StatusCode::OK);

    let sent = chat.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel_id, "m1");
    assert_eq!(sent[0].sender_id, "a1");
    assert_eq!(sent[0].text, "You decided to ship on Friday.");
}
