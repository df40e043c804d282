use async_trait::async_trait;
use crate::domain::error::SyncError;

#[async_trait]
pub trait IngestionStarter: Send + Sync {
    /// Name used in logs to tell the primary and secondary surfaces apart.
    fn surface(&self) -> &'static str;

    /// Starts an ingestion job and returns its id, if the service reported one.
    async fn start_ingestion_job(&self, knowledge_base_id: &str, data_source_id: &str) -> Result<Option<String>, SyncError>;
}
