pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    llm::DeepSeekClient,
    model::OnnxClassifier,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

pub fn router(state: AppState, body_limit_bytes: usize) -> Router {
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/chat", post(handlers::chat))
        .nest_service("/static", assets)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit_bytes)),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Startup fails here rather than serving without a model
    let classifier = OnnxClassifier::load(&config.model.path)?;

    if config.llm.api_key.is_empty() {
        warn!("No chat API key configured; /chat requests will be rejected upstream");
    }
    let chat = DeepSeekClient::new(config.llm.clone())?;

    let app_state = AppState {
        classifier: Arc::new(classifier),
        chat: Arc::new(chat),
        static_dir: PathBuf::from(&config.server.static_dir),
    };

    let app = router(app_state, config.server.body_limit_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
