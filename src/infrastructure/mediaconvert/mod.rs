pub mod casing;
pub mod client;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::common::error::Result;

/// One `CreateJob` call, in the PascalCase form job templates are written in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobSubmission {
    pub role: String,
    pub user_metadata: BTreeMap<String, String>,
    pub settings: Value,
}

/// The managed transcoding service, seen as a single synchronous call.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Submits the job and returns the service's job descriptor.
    async fn create_job(&self, submission: &JobSubmission) -> Result<Value>;
}
