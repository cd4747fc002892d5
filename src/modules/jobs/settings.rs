//! In-place rewriting of a job settings document for one upload.

use serde_json::Value;
use tracing::debug;

use crate::common::error::{AppError, Result};

const HLS_GROUP: &str = "HLS_GROUP_SETTINGS";
const FILE_GROUP: &str = "FILE_GROUP_SETTINGS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputGroupKind {
    Hls,
    File,
    Other(String),
}

impl OutputGroupKind {
    pub fn parse(value: &str) -> Self {
        match value {
            HLS_GROUP => OutputGroupKind::Hls,
            FILE_GROUP => OutputGroupKind::File,
            other => OutputGroupKind::Other(other.to_string()),
        }
    }

    /// Member of `OutputGroupSettings` carrying the group's `Destination`.
    fn settings_member(&self) -> Option<&'static str> {
        match self {
            OutputGroupKind::Hls => Some("HlsGroupSettings"),
            OutputGroupKind::File => Some("FileGroupSettings"),
            OutputGroupKind::Other(_) => None,
        }
    }
}

/// Points `Inputs[0].FileInput` at the uploaded object.
pub fn set_file_input(settings: &mut Value, source_uri: &str) -> Result<()> {
    let input = settings
        .get_mut("Inputs")
        .and_then(Value::as_array_mut)
        .and_then(|inputs| inputs.first_mut())
        .and_then(Value::as_object_mut)
        .ok_or_else(|| AppError::Structural("Inputs[0]".to_string()))?;

    input.insert("FileInput".to_string(), Value::String(source_uri.to_string()));
    Ok(())
}

/// Directory part of `source_key`, without leading separators, with
/// `inputs` replaced by `outputs` anywhere in the string.
pub fn output_directory(source_key: &str) -> String {
    let directory = match source_key.rsplit_once('/') {
        Some((head, _)) => head.trim_end_matches('/'),
        None => "",
    };

    directory
        .trim_start_matches('/')
        .replace("inputs", "outputs")
}

/// Path component of a template destination such as
/// `s3://template-bucket/templates/x.m3u8`, taken verbatim: no percent
/// encoding and no dot-segment removal. Query and fragment are dropped.
/// A value without `scheme://` is treated as a bare path.
pub fn template_path(destination: &str) -> &str {
    let without_query = match destination.find(['?', '#']) {
        Some(end) => &destination[..end],
        None => destination,
    };

    match without_query.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => match rest.find('/') {
            Some(start) => &rest[start..],
            None => "",
        },
        _ => without_query,
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Rewrites the destination of every HLS and file output group so it lands
/// under the upload's output directory in `destination_bucket`. Returns the
/// number of groups rewritten.
pub fn resolve_output_paths(
    settings: &mut Value,
    source_key: &str,
    destination_bucket: &str,
) -> Result<usize> {
    let directory = output_directory(source_key);
    let groups = settings
        .get_mut("OutputGroups")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| AppError::Structural("OutputGroups".to_string()))?;

    let mut rewritten = 0;
    for (index, group) in groups.iter_mut().enumerate() {
        let group_settings = group
            .get_mut("OutputGroupSettings")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                AppError::Structural(format!("OutputGroups[{}].OutputGroupSettings", index))
            })?;

        let kind = group_settings
            .get("Type")
            .and_then(Value::as_str)
            .map(OutputGroupKind::parse)
            .ok_or_else(|| {
                AppError::Structural(format!("OutputGroups[{}].OutputGroupSettings.Type", index))
            })?;

        let Some(member) = kind.settings_member() else {
            if let OutputGroupKind::Other(other) = &kind {
                debug!(group = index, kind = %other, "leaving output group destination unchanged");
            }
            continue;
        };

        let destination = group_settings
            .get_mut(member)
            .and_then(|s| s.get_mut("Destination"))
            .ok_or_else(|| {
                AppError::Structural(format!(
                    "OutputGroups[{}].OutputGroupSettings.{}.Destination",
                    index, member
                ))
            })?;

        let template = destination.as_str().ok_or_else(|| {
            AppError::Structural(format!(
                "OutputGroups[{}].OutputGroupSettings.{}.Destination as a string",
                index, member
            ))
        })?;

        *destination = Value::String(format!(
            "s3://{}/{}{}",
            destination_bucket,
            directory,
            template_path(template)
        ));
        rewritten += 1;
    }

    Ok(rewritten)
}
