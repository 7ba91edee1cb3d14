use axum::{
    extract::{Path, State},
    Json,
};
use models::tvseries::TvSeries;

use crate::errors::ApiError;
use crate::state::ServerState;

/// 透传外部 TV 剧集数据；未配置上游时返回 503
#[utoipa::path(
    get, path = "/tvseries/{id}", tag = "tvseries",
    params(("id" = u64, Path, description = "TV series id at the provider")),
    responses(
        (status = 200, description = "Provider document, unmodified"),
        (status = 404, description = "TV series not found"),
        (status = 502, description = "Provider failure"),
        (status = 503, description = "TV series lookup is not configured")
    )
)]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<TvSeries>, ApiError> {
    Ok(Json(state.tvseries.get_by_id(id).await?))
}
