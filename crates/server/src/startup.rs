use axum::Router;
use configs::AppConfig;
use service::{message::MessageStore, tvseries::TvSeriesLookup};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the message store and the TV series lookup described by `cfg`.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let messages = MessageStore::from_data_file(cfg.store.data_file.as_deref()).await?;
    if cfg.store.data_file.is_none() {
        info!("message store is in-memory only; data is lost on restart");
    }
    service::metrics::MESSAGES_STORED.set(messages.count().await as i64);

    let tvseries = TvSeriesLookup::from_base_url(cfg.tvseries.base_url.as_deref(), cfg.tvseries.timeout())?;
    if tvseries.is_configured() {
        info!(base_url = cfg.tvseries.base_url.as_deref().unwrap_or_default(), "tv series lookup enabled");
    } else {
        warn!("tv series lookup not configured; /tvseries/{{id}} answers 503");
    }

    Ok(ServerState::new(messages, tvseries))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app from `cfg` and serve it until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "http server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(%addr, "http server stopped");
    Ok(())
}
