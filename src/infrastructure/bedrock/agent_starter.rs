use async_trait::async_trait;
use aws_sdk_bedrockagent::Client;
use tracing::debug;
use crate::domain::{error::SyncError, ports::IngestionStarter};

/// Primary surface: the Bedrock Agent client created once at process start.
pub struct BedrockAgentStarter {
    client: Client,
}

impl BedrockAgentStarter {
    pub fn new(client: Client) -> Self {
        debug!("Initializing Bedrock Agent ingestion starter");
        Self { client }
    }
}

#[async_trait]
impl IngestionStarter for BedrockAgentStarter {
    fn surface(&self) -> &'static str {
        "bedrock-agent"
    }

    async fn start_ingestion_job(&self, knowledge_base_id: &str, data_source_id: &str) -> Result<Option<String>, SyncError> {
        super::start_job(&self.client, self.surface(), knowledge_base_id, data_source_id).await
    }
}
