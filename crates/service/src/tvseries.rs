//! External TV series lookup (`GET {base_url}/shows/{id}`).
//!
//! The lookup is either explicitly not configured, in which case every call
//! fails fast, or bound to a remote provider through a pooled HTTP client.

use std::time::Duration;

use models::tvseries::TvSeries;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::metrics;

#[derive(Debug, Error)]
pub enum TvSeriesError {
    #[error("TV series lookup is not configured")]
    NotConfigured,
    #[error("TV series not found")]
    NotFound,
    #[error("upstream returned status {0}")]
    Upstream(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl TvSeriesError {
    fn outcome(&self) -> &'static str {
        match self {
            TvSeriesError::NotConfigured => "not_configured",
            TvSeriesError::NotFound => "not_found",
            TvSeriesError::Upstream(_) => "upstream_error",
            TvSeriesError::Network(_) => "network_error",
            TvSeriesError::Parse(_) => "parse_error",
        }
    }
}

/// HTTP client for a TVmaze-compatible API.
#[derive(Debug, Clone)]
pub struct TvMazeClient {
    http: reqwest::Client,
    base_url: String,
}

impl TvMazeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TvSeriesError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TvSeriesError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_by_id(&self, id: u64) -> Result<TvSeries, TvSeriesError> {
        let url = format!("{}/shows/{id}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TvSeriesError::Network(e.to_string()))?;
        match resp.status() {
            StatusCode::NOT_FOUND => Err(TvSeriesError::NotFound),
            s if !s.is_success() => Err(TvSeriesError::Upstream(s.as_u16())),
            _ => resp
                .json::<serde_json::Value>()
                .await
                .map(TvSeries)
                .map_err(|e| TvSeriesError::Parse(e.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub enum TvSeriesLookup {
    NotConfigured,
    Remote(TvMazeClient),
}

impl TvSeriesLookup {
    /// `Remote` when a base URL is given, `NotConfigured` otherwise.
    pub fn from_base_url(base_url: Option<&str>, timeout: Duration) -> Result<Self, TvSeriesError> {
        match base_url {
            Some(url) => Ok(TvSeriesLookup::Remote(TvMazeClient::new(url, timeout)?)),
            None => Ok(TvSeriesLookup::NotConfigured),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, TvSeriesLookup::Remote(_))
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: u64) -> Result<TvSeries, TvSeriesError> {
        let result = match self {
            TvSeriesLookup::NotConfigured => Err(TvSeriesError::NotConfigured),
            TvSeriesLookup::Remote(client) => client.get_by_id(id).await,
        };
        match &result {
            Ok(_) => {
                metrics::TVSERIES_LOOKUPS_TOTAL.with_label_values(&["ok"]).inc();
                debug!(id, "tv series fetched");
            }
            Err(e) => {
                metrics::TVSERIES_LOOKUPS_TOTAL.with_label_values(&[e.outcome()]).inc();
                match e {
                    TvSeriesError::NotConfigured | TvSeriesError::NotFound => debug!(id, error = %e, "tv series lookup failed"),
                    _ => warn!(id, error = %e, "tv series upstream failure"),
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::json;

    async fn show(Path(id): Path<u64>) -> Result<Json<serde_json::Value>, AxumStatus> {
        match id {
            1 => Ok(Json(json!({"id": 1, "name": "Under the Dome", "genres": ["Drama"]}))),
            500 => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    async fn spawn_upstream() -> Result<String, anyhow::Error> {
        let app = Router::new()
            .route("/shows/:id", get(show))
            .route("/broken/shows/:id", get(|| async { "not json" }));
        let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{}", addr))
    }

    #[tokio::test]
    async fn not_configured_fails_fast() {
        let lookup = TvSeriesLookup::from_base_url(None, Duration::from_secs(1)).unwrap();
        assert!(!lookup.is_configured());
        let err = lookup.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, TvSeriesError::NotConfigured));
        assert_eq!(err.to_string(), "TV series lookup is not configured");
    }

    #[tokio::test]
    async fn remote_passes_body_through() -> Result<(), anyhow::Error> {
        let base = spawn_upstream().await?;
        let lookup = TvSeriesLookup::from_base_url(Some(format!("{base}/").as_str()), Duration::from_secs(5))?;
        assert!(lookup.is_configured());

        let series = lookup.get_by_id(1).await?;
        assert_eq!(series.0["name"], "Under the Dome");
        assert_eq!(series.0["genres"][0], "Drama");
        Ok(())
    }

    #[tokio::test]
    async fn remote_maps_upstream_statuses() -> Result<(), anyhow::Error> {
        let base = spawn_upstream().await?;
        let client = TvMazeClient::new(&base, Duration::from_secs(5))?;
        assert_eq!(client.base_url(), base);

        assert!(matches!(client.get_by_id(42).await, Err(TvSeriesError::NotFound)));
        assert!(matches!(client.get_by_id(500).await, Err(TvSeriesError::Upstream(500))));

        let broken = TvMazeClient::new(format!("{base}/broken"), Duration::from_secs(5))?;
        assert!(matches!(broken.get_by_id(1).await, Err(TvSeriesError::Parse(_))));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_upstream_is_network_error() -> Result<(), anyhow::Error> {
        // bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))?;
        let addr = listener.local_addr()?;
        drop(listener);

        let client = TvMazeClient::new(format!("http://{addr}"), Duration::from_secs(2))?;
        assert!(matches!(client.get_by_id(1).await, Err(TvSeriesError::Network(_))));
        Ok(())
    }
}
