use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::errors::ServiceError;

/// A single JSON document on disk holding a full state snapshot.
///
/// Writes go to a sibling `.tmp` file first and are then renamed over the
/// target, so a crash mid-write never leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file is `Ok(None)`; an unreadable or
    /// undecodable file is an error.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, ServiceError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                ServiceError::Storage(format!("corrupt snapshot {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::Storage(format!("cannot read {}: {e}", self.path.display()))),
        }
    }

    /// Replace the snapshot with `value`.
    pub async fn save<T: Serialize>(&self, value: &T) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("cannot create {}: {e}", parent.display())))?;
        }
        let data = serde_json::to_vec_pretty(value).map_err(|e| ServiceError::Storage(e.to_string()))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot replace {}: {e}", self.path.display())))?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("json_snapshot_{}", uuid::Uuid::new_v4()))
            .join("state.json")
    }

    #[tokio::test]
    async fn missing_file_loads_as_none() -> Result<(), anyhow::Error> {
        let snap = JsonSnapshot::new(temp_path());
        let loaded: Option<BTreeMap<String, u32>> = snap.load().await?;
        assert!(loaded.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_creates_parent_dirs() -> Result<(), anyhow::Error> {
        let path = temp_path();
        let snap = JsonSnapshot::new(&path);

        let mut state = BTreeMap::new();
        state.insert("a".to_string(), 1u32);
        snap.save(&state).await?;

        let loaded: Option<BTreeMap<String, u32>> = snap.load().await?;
        assert_eq!(loaded, Some(state));
        assert!(!snap.tmp_path().exists());

        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let path = temp_path();
        let snap = JsonSnapshot::new(&path);
        snap.save(&1u32).await?;
        tokio::fs::write(&path, b"{not json").await?;

        let loaded = snap.load::<u32>().await;
        assert!(matches!(loaded, Err(ServiceError::Storage(_))));

        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
        Ok(())
    }
}
