use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::model::{DEFAULT_CANDIDATE, JobConfigCandidate};
use crate::common::error::{AppError, Result};
use crate::infrastructure::storage::ConfigStore;

/// Finds the job settings templates that apply to an upload.
pub struct JobConfigRepository<'a> {
    store: &'a dyn ConfigStore,
    prefix: &'a str,
    default_path: &'a Path,
}

impl<'a> JobConfigRepository<'a> {
    pub fn new(store: &'a dyn ConfigStore, prefix: &'a str, default_path: &'a Path) -> Self {
        Self {
            store,
            prefix,
            default_path,
        }
    }

    /// Every template under the jobs prefix of `bucket`, or the packaged
    /// default when the prefix holds none.
    pub async fn discover_candidates(&self, bucket: &str) -> Result<Vec<JobConfigCandidate>> {
        let keys = self.store.list_keys(bucket, self.prefix).await?;

        let mut candidates = Vec::new();
        for key in keys.into_iter().filter(|key| key != self.prefix) {
            let body = self.store.get_object(bucket, &key).await?;
            let settings = parse_settings(&body, &key)?;
            debug!(bucket, key = %key, "loaded job settings");
            candidates.push(JobConfigCandidate {
                filename: key,
                settings,
            });
        }

        if candidates.is_empty() {
            info!(bucket, prefix = self.prefix, "no job settings found, using packaged default");
            candidates.push(self.load_default().await?);
        }

        Ok(candidates)
    }

    async fn load_default(&self) -> Result<JobConfigCandidate> {
        let body = tokio::fs::read(self.default_path)
            .await
            .map_err(|source| AppError::PackagedRead {
                path: self.default_path.to_path_buf(),
                source,
            })?;

        Ok(JobConfigCandidate {
            filename: DEFAULT_CANDIDATE.to_string(),
            settings: parse_settings(&body, &self.default_path.display().to_string())?,
        })
    }
}

fn parse_settings(body: &[u8], origin: &str) -> Result<Value> {
    serde_json::from_slice(body).map_err(|source| AppError::ConfigParse {
        origin: origin.to_string(),
        source,
    })
}
