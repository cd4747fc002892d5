use std::path::PathBuf;

use crate::common::error::AppError;
use crate::config::env::{EnvKey, EnvVars};

pub const DEFAULT_JOB_PATH: &str = "job.json";
pub const DEFAULT_JOBS_PREFIX: &str = "jobs/";

/// Static-key encryption parameters; only present when the key pool is non-empty.
#[derive(Clone, Debug)]
pub struct EncryptionConfig {
    pub static_keys: Vec<String>,
    pub key_provider_url: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub media_convert_role: String,
    pub application: String,
    pub encryption: Option<EncryptionConfig>,
    pub default_job_path: PathBuf,
    pub jobs_prefix: String,
}

impl AppConfig {
    pub fn from_vars(vars: &EnvVars) -> Result<Self, AppError> {
        let static_keys = vars.static_keys();
        let encryption = if static_keys.is_empty() {
            None
        } else {
            Some(EncryptionConfig {
                static_keys,
                key_provider_url: required(vars, EnvKey::KeyProviderUrl)?,
            })
        };

        Ok(Self {
            media_convert_role: required(vars, EnvKey::MediaConvertRole)?,
            application: required(vars, EnvKey::Application)?,
            encryption,
            default_job_path: PathBuf::from(vars.get_or(EnvKey::DefaultJobPath, DEFAULT_JOB_PATH)),
            jobs_prefix: vars.get_or(EnvKey::JobsPrefix, DEFAULT_JOBS_PREFIX),
        })
    }
}

fn required(vars: &EnvVars, key: EnvKey) -> Result<String, AppError> {
    vars.get(key)
        .map(str::to_string)
        .ok_or_else(|| AppError::Config(key.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Vec<(&'static str, &'static str)> {
        vec![
            ("MediaConvertRole", "arn:aws:iam::123456789012:role/MediaConvert"),
            ("Application", "vod"),
        ]
    }

    #[test]
    fn resolves_defaults_without_encryption() {
        let config = AppConfig::from_vars(&base().into_iter().collect()).unwrap();

        assert_eq!(config.application, "vod");
        assert!(config.encryption.is_none());
        assert_eq!(config.jobs_prefix, "jobs/");
        assert_eq!(config.default_job_path, PathBuf::from("job.json"));
    }

    #[test]
    fn missing_role_is_a_config_error() {
        let vars: EnvVars = [("Application", "vod")].into_iter().collect();
        let err = AppConfig::from_vars(&vars).unwrap_err();
        assert!(matches!(err, AppError::Config("MediaConvertRole")));
    }

    #[test]
    fn empty_static_key_disables_encryption() {
        let mut vars = base();
        vars.push(("StaticKey1", ""));
        vars.push(("KeyProviderUrl", "https://keys.example.com/key"));

        let config = AppConfig::from_vars(&vars.into_iter().collect()).unwrap();
        assert!(config.encryption.is_none());
    }

    #[test]
    fn key_pool_requires_provider_url() {
        let mut vars = base();
        vars.push(("StaticKey1", "00112233445566778899aabbccddeeff"));
        let err = AppConfig::from_vars(&vars.clone().into_iter().collect()).unwrap_err();
        assert!(matches!(err, AppError::Config("KeyProviderUrl")));

        vars.push(("KeyProviderUrl", "https://keys.example.com/key"));
        let config = AppConfig::from_vars(&vars.into_iter().collect()).unwrap();
        let encryption = config.encryption.unwrap();
        assert_eq!(encryption.static_keys, vec!["00112233445566778899aabbccddeeff"]);
        assert_eq!(encryption.key_provider_url, "https://keys.example.com/key");
    }
}
