use std::time::SystemTime;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_mediaconvert::error::DisplayErrorContext;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::casing::{from_wire, to_wire};
use super::{JobSubmission, JobSubmitter};
use crate::common::error::{AppError, Result};

const SIGNING_NAME: &str = "mediaconvert";
const CREATE_JOB_PATH: &str = "/2017-08-29/jobs";

/// MediaConvert client bound to the account-specific endpoint.
///
/// The endpoint is discovered on first use and reused for the lifetime of the
/// process. Jobs are posted as raw JSON so that console-exported templates
/// pass through without being mapped onto the SDK's typed settings.
pub struct MediaConvertService {
    sdk_config: SdkConfig,
    client: aws_sdk_mediaconvert::Client,
    http: reqwest::Client,
    endpoint: OnceCell<String>,
}

impl MediaConvertService {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            sdk_config: sdk_config.clone(),
            client: aws_sdk_mediaconvert::Client::new(sdk_config),
            http: reqwest::Client::new(),
            endpoint: OnceCell::new(),
        }
    }

    async fn endpoint(&self) -> Result<&str> {
        let endpoint = self
            .endpoint
            .get_or_try_init(|| async {
                #[allow(deprecated)]
                let output = self.client.describe_endpoints().send().await.map_err(|e| {
                    AppError::ExternalService(format!(
                        "failed to describe endpoints: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;

                let url = output
                    .endpoints()
                    .first()
                    .and_then(|endpoint| endpoint.url())
                    .ok_or_else(|| {
                        AppError::ExternalService("no MediaConvert endpoint returned".to_string())
                    })?
                    .trim_end_matches('/')
                    .to_string();

                info!(endpoint = %url, "discovered MediaConvert endpoint");
                Ok::<_, AppError>(url)
            })
            .await?;

        Ok(endpoint.as_str())
    }

    async fn signed_post(&self, url: &str, body: Vec<u8>) -> Result<reqwest::RequestBuilder> {
        let provider = self.sdk_config.credentials_provider().ok_or_else(|| {
            AppError::ExternalService("no AWS credentials provider configured".to_string())
        })?;
        let credentials = provider
            .provide_credentials()
            .await
            .map_err(|e| AppError::ExternalService(format!("failed to load credentials: {}", e)))?;
        let identity = credentials.into();

        let region = self
            .sdk_config
            .region()
            .map(|region| region.to_string())
            .ok_or_else(|| AppError::ExternalService("no AWS region configured".to_string()))?;

        let params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&region)
            .name(SIGNING_NAME)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| AppError::ExternalService(format!("invalid signing parameters: {}", e)))?
            .into();

        let headers = [("content-type", "application/json")];
        let signable = SignableRequest::new(
            "POST",
            url,
            headers.into_iter(),
            SignableBody::Bytes(&body),
        )
        .map_err(|e| AppError::ExternalService(format!("unsignable request: {}", e)))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| AppError::ExternalService(format!("failed to sign request: {}", e)))?
            .into_parts();

        let mut request = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .body(body);
        for (name, value) in instructions.headers() {
            request = request.header(name, value);
        }

        Ok(request)
    }
}

#[async_trait]
impl JobSubmitter for MediaConvertService {
    async fn create_job(&self, submission: &JobSubmission) -> Result<Value> {
        let endpoint = self.endpoint().await?;
        let url = format!("{}{}", endpoint, CREATE_JOB_PATH);

        let body = encode_submission(submission)?;

        debug!(%url, bytes = body.len(), "posting CreateJob");

        let response = self
            .signed_post(&url, body)
            .await?
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("CreateJob request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::ExternalService(format!("failed to read CreateJob response: {}", e)))?;

        decode_job(status, &text)
    }
}

fn encode_submission(submission: &JobSubmission) -> Result<Vec<u8>> {
    let payload = serde_json::to_value(submission)
        .map_err(|e| AppError::ExternalService(format!("failed to encode job: {}", e)))?;

    serde_json::to_vec(&to_wire(payload))
        .map_err(|e| AppError::ExternalService(format!("failed to encode job: {}", e)))
}

fn decode_job(status: StatusCode, text: &str) -> Result<Value> {
    if !status.is_success() {
        return Err(AppError::ExternalService(format!(
            "CreateJob returned {}: {}",
            status, text
        )));
    }

    let job: Value = serde_json::from_str(text).map_err(|e| {
        AppError::ExternalService(format!("unreadable CreateJob response: {}", e))
    })?;

    Ok(from_wire(job))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use serde_json::json;

    #[test]
    fn rejected_job_is_an_external_service_error() {
        let body = r#"{"message": "Invalid role"}"#;

        let err = decode_job(StatusCode::BAD_REQUEST, body).unwrap_err();

        assert!(
            matches!(&err, AppError::ExternalService(message) if message.contains("400") && message.contains("Invalid role"))
        );
        assert!(matches!(
            decode_job(StatusCode::TOO_MANY_REQUESTS, "{}"),
            Err(AppError::ExternalService(_))
        ));
    }

    #[test]
    fn unreadable_success_body_is_an_external_service_error() {
        assert!(matches!(
            decode_job(StatusCode::CREATED, "<html>"),
            Err(AppError::ExternalService(_))
        ));
    }

    #[test]
    fn accepted_job_comes_back_in_template_casing() {
        let body = r#"{"job": {"id": "1700000000000-abc123", "status": "SUBMITTED"}}"#;

        let job = decode_job(StatusCode::CREATED, body).unwrap();

        assert_eq!(job["Job"]["Id"], "1700000000000-abc123");
        assert_eq!(job["Job"]["Status"], "SUBMITTED");
    }

    #[test]
    fn submission_body_uses_wire_member_names() {
        let submission = JobSubmission {
            role: "arn:aws:iam::123456789012:role/mc".to_string(),
            user_metadata: BTreeMap::from([("assetID".to_string(), "abc".to_string())]),
            settings: json!({"Inputs": [{"FileInput": "s3://media/inputs/clip.mp4"}]}),
        };

        let body: Value = serde_json::from_slice(&encode_submission(&submission).unwrap()).unwrap();

        assert_eq!(
            body,
            json!({
                "role": "arn:aws:iam::123456789012:role/mc",
                "userMetadata": {"assetID": "abc"},
                "settings": {"inputs": [{"fileInput": "s3://media/inputs/clip.mp4"}]}
            })
        );
    }
}
