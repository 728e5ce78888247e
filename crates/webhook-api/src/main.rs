//! Webhook server for the Huddle meeting assistant.
//!
//! Receives signed events from the call/chat platform and drives the
//! meeting lifecycle: agent connection on session start, transcript
//! summarization after the call, and post-meeting Q&A over chat.

use std::sync::Arc;

use coordinator::{Coordinator, JobQueue, Summarizer};
use database::Database;
use openai_client::OpenAiClient;
use stream_client::StreamClient;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use webhook_api::config::Config;
use webhook_api::routes;
use webhook_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Platform and LLM clients
    let stream = Arc::new(StreamClient::from_env()?);
    let llm = Arc::new(OpenAiClient::from_env()?);

    // Background summarization worker
    let (queue, rx) = JobQueue::channel();
    let summarizer = Summarizer::new(db.clone(), llm.clone())?;
    coordinator::spawn_worker(summarizer, rx);

    // Event coordinator
    let coordinator = Arc::new(Coordinator::new(
        db,
        stream.clone(),
        stream.clone(),
        llm,
        Arc::new(queue),
    ));

    // Build application state and router
    let state = AppState::new(coordinator, stream);
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Webhook server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
