pub mod agent_starter;
pub mod fallback_starter;

use aws_sdk_bedrockagent::{error::{DisplayErrorContext, ProvideErrorMetadata}, Client};
use tracing::debug;
use crate::domain::error::SyncError;

/// Issues `StartIngestionJob` on the given client and maps SDK failures to `SyncError::Remote`.
pub(crate) async fn start_job(client: &Client, surface: &'static str, knowledge_base_id: &str, data_source_id: &str) -> Result<Option<String>, SyncError> {
    debug!("Calling StartIngestionJob on {} (knowledge base: {}, data source: {})", surface, knowledge_base_id, data_source_id);

    let output = client
        .start_ingestion_job()
        .knowledge_base_id(knowledge_base_id)
        .data_source_id(data_source_id)
        .send()
        .await
        .map_err(|e| {
            let kind = e.code().unwrap_or("Unknown").to_string();
            SyncError::remote(surface, kind, DisplayErrorContext(&e).to_string())
        })?;

    let job = output.ingestion_job();
    if let Some(job) = job {
        debug!("Ingestion job {} status: {:?}", job.ingestion_job_id(), job.status());
    }
    Ok(job.map(|job| job.ingestion_job_id().to_string()))
}
