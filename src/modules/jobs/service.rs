use serde_json::Value;
use tracing::{debug, info};

use super::encryption::{apply_static_key_encryption, redact_static_keys, select_static_key};
use super::events::UploadEvent;
use super::model::{JobConfigCandidate, JobMetadata, build_metadata};
use super::repository::JobConfigRepository;
use super::settings::{resolve_output_paths, set_file_input};
use crate::common::error::Result;
use crate::config::settings::AppConfig;
use crate::infrastructure::mediaconvert::JobSubmission;
use crate::state::AppState;

pub struct JobService;

impl JobService {
    /// Resolves and submits one job per discovered template, in order.
    ///
    /// Stops at the first failure; jobs already submitted stay submitted.
    /// Returns the descriptor of the last job submitted.
    pub async fn process_upload(
        state: &AppState,
        config: &AppConfig,
        upload: &UploadEvent,
    ) -> Result<Option<Value>> {
        let repository = JobConfigRepository::new(
            state.storage.as_ref(),
            &config.jobs_prefix,
            &config.default_job_path,
        );
        let candidates = repository.discover_candidates(&upload.bucket).await?;

        let source_uri = upload.source_uri();
        let static_key = config
            .encryption
            .as_ref()
            .and_then(|encryption| {
                select_static_key(state.key_selector.as_ref(), &encryption.static_keys)
            });
        info!(
            source = %source_uri,
            candidates = candidates.len(),
            encrypted = static_key.is_some(),
            "processing upload"
        );

        let mut asset: Option<JobMetadata> = None;
        let mut last_job = None;
        for candidate in candidates {
            let metadata = match &asset {
                Some(asset) => asset.for_candidate(&candidate.filename),
                None => build_metadata(
                    &config.application,
                    &source_uri,
                    &candidate.filename,
                    static_key.as_deref(),
                ),
            };
            asset.get_or_insert_with(|| metadata.clone());

            let filename = candidate.filename.clone();
            let submission = Self::resolve_candidate(config, upload, metadata, candidate)?;
            let job = state.transcoder.create_job(&submission).await?;

            let job_id = job
                .pointer("/Job/Id")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            info!(
                settings = %filename,
                job_id,
                "submitted transcoding job"
            );
            last_job = Some(job);
        }

        Ok(last_job)
    }

    /// Applies every per-upload rewrite to one template.
    pub fn resolve_candidate(
        config: &AppConfig,
        upload: &UploadEvent,
        metadata: JobMetadata,
        candidate: JobConfigCandidate,
    ) -> Result<JobSubmission> {
        let mut settings = candidate.settings;

        set_file_input(&mut settings, &metadata.input)?;
        resolve_output_paths(&mut settings, &upload.object_key, &upload.bucket)?;

        if let (Some(key), Some(encryption)) = (&metadata.static_key, &config.encryption) {
            let providers =
                apply_static_key_encryption(&mut settings, key, &encryption.key_provider_url);
            debug!(providers, "applied static key encryption");
        }

        debug!(settings = %redact_static_keys(&settings), "resolved job settings");
        debug!(
            asset_id = %metadata.asset_id,
            application = %metadata.application,
            input = %metadata.input,
            template = %metadata.settings,
            "job metadata"
        );

        Ok(JobSubmission {
            role: config.media_convert_role.clone(),
            user_metadata: metadata.to_user_metadata(),
            settings,
        })
    }
}
