use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Filename reported for the packaged fallback settings.
pub const DEFAULT_CANDIDATE: &str = "Default";

#[derive(Debug, Clone)]
pub struct JobConfigCandidate {
    pub filename: String,
    pub settings: Value,
}

/// User metadata stamped on every submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobMetadata {
    #[serde(rename = "assetID")]
    pub asset_id: Uuid,
    pub application: String,
    pub input: String,
    pub settings: String,
    #[serde(rename = "staticKey", skip_serializing_if = "Option::is_none")]
    pub static_key: Option<String>,
}

impl JobMetadata {
    /// Same asset, restamped with another candidate's filename.
    pub fn for_candidate(&self, filename: &str) -> Self {
        Self {
            settings: filename.to_string(),
            ..self.clone()
        }
    }

    pub fn to_user_metadata(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::from([
            ("assetID".to_string(), self.asset_id.to_string()),
            ("application".to_string(), self.application.clone()),
            ("input".to_string(), self.input.clone()),
            ("settings".to_string(), self.settings.clone()),
        ]);
        if let Some(key) = &self.static_key {
            map.insert("staticKey".to_string(), key.clone());
        }
        map
    }
}

/// Builds metadata with a freshly generated asset id.
pub fn build_metadata(
    application: &str,
    source_path: &str,
    candidate_filename: &str,
    static_key: Option<&str>,
) -> JobMetadata {
    JobMetadata {
        asset_id: Uuid::new_v4(),
        application: application.to_string(),
        input: source_path.to_string(),
        settings: candidate_filename.to_string(),
        static_key: static_key.map(str::to_string),
    }
}
