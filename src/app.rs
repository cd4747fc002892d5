use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::LambdaEvent;
use serde_json::Value;
use tracing::error;

use crate::common::error::Result;
use crate::common::response::HandlerResponse;
use crate::config::env::EnvVars;
use crate::config::settings::AppConfig;
use crate::modules::jobs::events::UploadEvent;
use crate::modules::jobs::service::JobService;
use crate::state::AppState;

pub async fn function_handler(
    state: &AppState,
    event: LambdaEvent<S3Event>,
) -> Result<HandlerResponse, lambda_runtime::Error> {
    Ok(handle_event(state, &EnvVars::from_process(), &event.payload).await)
}

/// Any failure turns the whole invocation into a 500; jobs submitted before
/// the failure are not reported.
pub async fn handle_event(state: &AppState, vars: &EnvVars, event: &S3Event) -> HandlerResponse {
    match process(state, vars, event).await {
        Ok(job) => HandlerResponse::success(job.as_ref()),
        Err(e) => {
            error!(error = %e, "failed to submit transcoding jobs");
            HandlerResponse::error()
        }
    }
}

async fn process(state: &AppState, vars: &EnvVars, event: &S3Event) -> Result<Option<Value>> {
    let config = AppConfig::from_vars(vars)?;
    let upload = UploadEvent::from_s3_event(event)?;

    JobService::process_upload(state, &config, &upload).await
}
