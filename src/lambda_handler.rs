use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{debug, info};
use crate::{
    application::sync_service::SyncService,
    domain::{
        error::SyncError,
        models::{StorageEvent, SyncConfig, SyncResponse},
    },
};

/// Lambda entry point. Configuration is read from the environment on every invocation.
pub async fn function_handler(event: LambdaEvent<Value>, service: &SyncService) -> Result<SyncResponse, Error> {
    info!("Received invocation: {}", event.context.request_id);
    Ok(handle_payload(event.payload, &SyncConfig::from_env(), service).await)
}

pub async fn handle_payload(payload: Value, config: &SyncConfig, service: &SyncService) -> SyncResponse {
    debug!("Received event: {}", payload);

    match decode_event(payload) {
        Ok(event) => service.handle(&event, config).await,
        Err(e) => SyncService::internal_error(&e),
    }
}

pub fn decode_event(payload: Value) -> Result<StorageEvent, SyncError> {
    serde_json::from_value(payload).map_err(|e| SyncError::Event(e.to_string()))
}
