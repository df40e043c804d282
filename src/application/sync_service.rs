use std::sync::Arc;
use tracing::{info, debug, error, warn};
use crate::domain::{
    error::SyncError,
    models::{ObjectRef, ResponseBody, StorageEvent, SyncConfig, SyncResponse, SUPPORTED_EXTENSIONS},
    ports::IngestionStarter,
};

pub struct SyncService {
    primary: Arc<dyn IngestionStarter>,
    secondary: Arc<dyn IngestionStarter>,
}

impl SyncService {
    pub fn new(primary: Arc<dyn IngestionStarter>, secondary: Arc<dyn IngestionStarter>) -> Self {
        Self { primary, secondary }
    }

    /// Runs one storage event through the sync sequence. Never fails: every
    /// outcome, including remote errors, is reported as a response.
    pub async fn handle(&self, event: &StorageEvent, config: &SyncConfig) -> SyncResponse {
        match self.sync(event, config).await {
            Ok(response) => response,
            Err(e @ SyncError::MissingConfig { .. }) => {
                error!("{}", e);
                SyncResponse::new(400, &ResponseBody::Failed { error: e.to_string() })
            },
            Err(e) => Self::internal_error(&e),
        }
    }

    pub fn internal_error(err: &SyncError) -> SyncResponse {
        let error_msg = format!("Error processing S3 event: {}", err);
        error!("{}", error_msg);
        SyncResponse::new(500, &ResponseBody::Failed { error: error_msg })
    }

    async fn sync(&self, event: &StorageEvent, config: &SyncConfig) -> Result<SyncResponse, SyncError> {
        // Step 1: Locate the uploaded object
        let object = event.first_object();
        if event.records.is_empty() {
            warn!("S3 event contains no records, continuing with empty identifiers");
        }
        info!("Processing S3 event - Bucket: {}, Key: {}", object.bucket, object.key);

        // Step 2: Validate configuration
        let (knowledge_base_id, data_source_id) = match (&config.knowledge_base_id, &config.data_source_id) {
            (Some(kb), Some(ds)) => (kb.as_str(), ds.as_str()),
            _ => {
                return Err(SyncError::MissingConfig {
                    knowledge_base_id: config.knowledge_base_id.clone(),
                    data_source_id: config.data_source_id.clone(),
                });
            }
        };
        debug!("Configuration present - knowledge base: {}, data source: {}", knowledge_base_id, data_source_id);

        // Step 3: Filter by extension
        let file_extension = file_extension(&object.key);
        if !is_supported(&file_extension) {
            info!("Skipping file {} - unsupported file type: {}", object.key, file_extension);
            return Ok(SyncResponse::new(200, &ResponseBody::Skipped {
                message: format!("Skipped unsupported file type: {}", file_extension),
                file: object.key,
            }));
        }
        debug!("File type '{}' is supported", file_extension);

        // Step 4: Start the ingestion job
        info!("Starting ingestion job for Knowledge Base: {}, Data Source: {}", knowledge_base_id, data_source_id);
        let ingestion_job_id = self.start_with_fallback(knowledge_base_id, data_source_id).await?;

        Ok(Self::started(object, ingestion_job_id))
    }

    async fn start_with_fallback(&self, knowledge_base_id: &str, data_source_id: &str) -> Result<Option<String>, SyncError> {
        match self.primary.start_ingestion_job(knowledge_base_id, data_source_id).await {
            Ok(job_id) => {
                info!("Successfully started ingestion job: {:?}", job_id);
                return Ok(job_id);
            },
            Err(e) => {
                error!("{} API error: {}", self.primary.surface(), e);
                if let SyncError::Remote { kind, .. } = &e {
                    error!("Error type: {}", kind);
                }
            }
        }

        info!("Trying with {}...", self.secondary.surface());
        let job_id = self.secondary.start_ingestion_job(knowledge_base_id, data_source_id).await
            .map_err(|e| {
                error!("{} error: {}", self.secondary.surface(), e);
                e
            })?;
        info!("Successfully started ingestion job with {}: {:?}", self.secondary.surface(), job_id);
        Ok(job_id)
    }

    fn started(object: ObjectRef, ingestion_job_id: Option<String>) -> SyncResponse {
        SyncResponse::new(200, &ResponseBody::Started {
            message: "Document sync initiated successfully".to_string(),
            ingestion_job_id,
            file: object.key,
            bucket: object.bucket,
        })
    }
}

/// Lowercased text after the last `.` of the key, or empty when there is none.
pub fn file_extension(key: &str) -> String {
    key.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

pub fn is_supported(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension)
}
