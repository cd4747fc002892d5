use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};

use crate::infrastructure::mediaconvert::JobSubmitter;
use crate::infrastructure::mediaconvert::client::MediaConvertService;
use crate::infrastructure::storage::ConfigStore;
use crate::infrastructure::storage::s3::StorageService;
use crate::modules::jobs::encryption::{KeySelector, RandomKeySelector};

/// Clients shared by every invocation of a warm function instance.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn ConfigStore>,
    pub transcoder: Arc<dyn JobSubmitter>,
    pub key_selector: Arc<dyn KeySelector>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn ConfigStore>,
        transcoder: Arc<dyn JobSubmitter>,
        key_selector: Arc<dyn KeySelector>,
    ) -> Self {
        Self {
            storage,
            transcoder,
            key_selector,
        }
    }

    pub async fn from_aws(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        Self::new(
            Arc::new(StorageService::new(&sdk_config)),
            Arc::new(MediaConvertService::new(&sdk_config)),
            Arc::new(RandomKeySelector),
        )
    }
}
