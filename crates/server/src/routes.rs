use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod greeting;
pub mod tvseries;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> Result<String, ApiError> {
    Ok(service::metrics::encode_metrics()?)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: greeting CRUD, TV series lookup and ops endpoints
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let greeting_routes = Router::new()
        .route("/greeting/hello", get(greeting::hello))
        .route("/greeting/goodbye", get(greeting::goodbye))
        .route("/greeting/json", get(greeting::json_greeting))
        .route("/greeting/create", post(greeting::create))
        .route("/greeting/read", get(greeting::read_all))
        .route("/greeting/read/:id", get(greeting::read))
        .route("/greeting/update/:id", put(greeting::update))
        .route("/greeting/delete/:id", delete(greeting::delete));

    let tvseries_routes = Router::new().route("/tvseries/:id", get(tvseries::get_by_id));

    let ops_routes = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Compose
    ops_routes
        .merge(greeting_routes)
        .merge(tvseries_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
