use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::{errors::ServiceError, tvseries::TvSeriesError};
use thiserror::Error;
use tracing::error;

/// Every handler failure, rendered as a plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    TvSeries(#[from] TvSeriesError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::TvSeries(TvSeriesError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::TvSeries(TvSeriesError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::TvSeries(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            // 内部错误细节只写日志，不返回给调用方
            ApiError::Service(ServiceError::Storage(_) | ServiceError::Internal(_)) => {
                error!(error = %self, "internal error");
                "Internal Server Error".to_string()
            }
            _ => self.to_string(),
        };
        (status, body).into_response()
    }
}
