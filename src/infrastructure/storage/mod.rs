pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;

use crate::common::error::Result;

/// Read access to the bucket holding job settings templates.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Keys of every object under `prefix`, in listing order.
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes>;
}
