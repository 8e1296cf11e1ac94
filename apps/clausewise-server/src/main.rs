//! ClauseWise Server
//!
//! Contract analysis over HTTP plus live review rooms over WebSocket:
//!
//! - Analysis (clauses, summary, entities, risks, deadline alerts)
//! - Question answering against an uploaded contract
//! - Two-document comparison
//! - Shared document/chat rooms with periodic reminders
//!
//! ## Enrichment
//!
//! When watsonx.ai or Watson NLU credentials are present in the environment
//! the summary, clause simplification, answers and entities are upgraded by
//! those services. Without them every endpoint runs on local heuristics.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use clause_engine::{ClauseEngine, EngineSettings};
use collab_rooms::{run_alert_broadcaster, BroadcasterConfig, RoomManager};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod config;
mod enrichment;
mod error;
mod service;
mod ws;

use api::{handle_analyze, handle_ask, handle_compare, handle_health};
use config::{NluConfig, WatsonxConfig};
use enrichment::{WatsonNlu, WatsonxGenerator};
use service::AnalysisService;
use ws::handle_ws;

/// Command-line arguments for the ClauseWise server
#[derive(Parser, Debug)]
#[command(name = "clausewise-server")]
#[command(about = "Contract analysis and live review rooms")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Seconds between room reminder alerts
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    alert_interval_secs: u64,

    /// Days ahead a date must fall within to raise a deadline alert
    #[arg(long, default_value = "60")]
    deadline_window_days: i64,

    /// Sentences in the heuristic summary
    #[arg(long, default_value = "6")]
    summary_sentences: usize,

    /// Drop empty rooms idle for this many seconds (never, if unset)
    #[arg(long)]
    room_idle_ttl_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
    pub rooms: Arc<RoomManager>,
}

/// All routes, without transport-level middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/analyze", post(handle_analyze))
        .route("/ask", post(handle_ask))
        .route("/compare", post(handle_compare))
        .route("/ws/:room_id", get(handle_ws))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ClauseWise server on {}:{}", args.host, args.port);

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("rate limit must be greater than zero"))?,
    );

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let generator = WatsonxGenerator::new(WatsonxConfig::from_env(), http.clone());
    let enricher = WatsonNlu::new(NluConfig::from_env(), http);

    let engine = ClauseEngine::new(EngineSettings {
        summary_sentences: args.summary_sentences,
        deadline_window_days: args.deadline_window_days,
        ..EngineSettings::default()
    });
    let service = AnalysisService::new(engine, Arc::new(generator), Arc::new(enricher));
    info!(
        "Granite generation: {}, Watson NLU: {}",
        service.uses_granite(),
        service.uses_watson_nlu()
    );

    let rooms = Arc::new(RoomManager::new());
    tokio::spawn(run_alert_broadcaster(
        Arc::clone(&rooms),
        BroadcasterConfig {
            interval: Duration::from_secs(args.alert_interval_secs),
            idle_ttl: args.room_idle_ttl_secs.map(Duration::from_secs),
            ..BroadcasterConfig::default()
        },
    ));

    let state = AppState {
        service: Arc::new(service),
        rooms,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);

    // The governor keys on the peer address.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
