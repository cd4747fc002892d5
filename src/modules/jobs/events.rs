use aws_lambda_events::event::s3::S3Event;

use crate::common::error::{AppError, Result};

/// The object upload that triggered this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket: String,
    pub object_key: String,
}

impl UploadEvent {
    /// Reads the first notification record; later records are ignored.
    pub fn from_s3_event(event: &S3Event) -> Result<Self> {
        let record = event
            .records
            .first()
            .ok_or(AppError::InvalidEvent("no records"))?;

        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or(AppError::InvalidEvent("record has no bucket name"))?;
        let object_key = record
            .s3
            .object
            .key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(AppError::InvalidEvent("record has no object key"))?;

        Ok(Self { bucket, object_key })
    }

    pub fn source_uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.object_key)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn s3_event(bucket: &str, key: &str) -> S3Event {
        serde_json::from_value(json!({
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2024-05-01T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "userIdentity": {"principalId": "EXAMPLE"},
                "requestParameters": {"sourceIPAddress": "127.0.0.1"},
                "responseElements": {
                    "x-amz-request-id": "EXAMPLE123456789",
                    "x-amz-id-2": "EXAMPLE123/5678abcdefghijklambdaisawesome/mnopqrstuvwxyzABCDEFGH"
                },
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "upload-trigger",
                    "bucket": {
                        "name": bucket,
                        "ownerIdentity": {"principalId": "EXAMPLE"},
                        "arn": format!("arn:aws:s3:::{}", bucket)
                    },
                    "object": {
                        "key": key,
                        "size": 1024,
                        "eTag": "0123456789abcdef0123456789abcdef",
                        "sequencer": "0A1B2C3D4E5F678901"
                    }
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn reads_bucket_and_key_from_first_record() {
        let event = UploadEvent::from_s3_event(&s3_event("media", "inputs/2024/clip.mp4")).unwrap();

        assert_eq!(event.bucket, "media");
        assert_eq!(event.object_key, "inputs/2024/clip.mp4");
        assert_eq!(event.source_uri(), "s3://media/inputs/2024/clip.mp4");
    }

    #[test]
    fn empty_notification_is_rejected() {
        let event: S3Event = serde_json::from_value(json!({"Records": []})).unwrap();
        assert!(matches!(
            UploadEvent::from_s3_event(&event),
            Err(AppError::InvalidEvent("no records"))
        ));
    }
}
