//! In-memory collaborators for exercising the job pipeline without AWS.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{Value, json};

use crate::common::error::{AppError, Result};
use crate::infrastructure::mediaconvert::{JobSubmission, JobSubmitter};
use crate::infrastructure::storage::ConfigStore;

/// A single bucket whose objects are listed in key order, like S3.
pub struct InMemoryStore {
    bucket: String,
    objects: BTreeMap<String, Bytes>,
}

impl InMemoryStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: BTreeMap::new(),
        }
    }

    pub fn with_object(mut self, key: &str, body: &str) -> Self {
        self.objects
            .insert(key.to_string(), Bytes::copy_from_slice(body.as_bytes()));
        self
    }

    fn check_bucket(&self, bucket: &str) -> Result<()> {
        if bucket == self.bucket {
            Ok(())
        } else {
            Err(AppError::Storage(format!("no such bucket {}", bucket)))
        }
    }
}

#[async_trait]
impl ConfigStore for InMemoryStore {
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        self.check_bucket(bucket)?;
        Ok(self
            .objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        self.check_bucket(bucket)?;
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::Storage(format!("no such key {}", key)))
    }
}

/// Records every submission; optionally fails the n-th call (zero based).
#[derive(Default)]
pub struct RecordingSubmitter {
    pub submissions: Mutex<Vec<JobSubmission>>,
    fail_at: Option<usize>,
}

impl RecordingSubmitter {
    pub fn failing_at(index: usize) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            fail_at: Some(index),
        }
    }

    pub fn submitted(&self) -> Vec<JobSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobSubmitter for RecordingSubmitter {
    async fn create_job(&self, submission: &JobSubmission) -> Result<Value> {
        let mut submissions = self.submissions.lock().unwrap();
        let index = submissions.len();
        if self.fail_at == Some(index) {
            return Err(AppError::ExternalService("AccessDenied".to_string()));
        }
        submissions.push(submission.clone());

        Ok(json!({
            "Job": {
                "Id": format!("job-{}", index),
                "Role": submission.role,
                "Status": "SUBMITTED",
                "UserMetadata": submission.user_metadata,
            }
        }))
    }
}
