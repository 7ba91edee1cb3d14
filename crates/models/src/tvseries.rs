use serde::{Deserialize, Serialize};

/// TV series document as returned by the external provider, passed through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TvSeries(pub serde_json::Value);
