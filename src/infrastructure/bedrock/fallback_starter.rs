use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockagent::{config::Region, Client};
use tracing::{debug, info};
use crate::domain::{error::SyncError, ports::IngestionStarter};

/// Secondary surface. Resolves a fresh AWS config and client on every call.
pub struct FallbackBedrockStarter {
    region: Option<String>,
    endpoint_url: Option<String>,
}

impl FallbackBedrockStarter {
    pub fn new(region: Option<String>, endpoint_url: Option<String>) -> Self {
        Self { region, endpoint_url }
    }

    /// Reads `BEDROCK_FALLBACK_REGION` and `BEDROCK_FALLBACK_ENDPOINT_URL`, falling
    /// back to `AWS_ENDPOINT_URL` for the endpoint.
    pub fn from_env() -> Self {
        let region = non_empty_var("BEDROCK_FALLBACK_REGION");
        let endpoint_url = non_empty_var("BEDROCK_FALLBACK_ENDPOINT_URL")
            .or_else(|| non_empty_var("AWS_ENDPOINT_URL"));
        Self::new(region, endpoint_url)
    }

    async fn client(&self) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            info!("Fallback Bedrock region: {}", region);
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            info!("Fallback Bedrock endpoint: {}", endpoint_url);
            loader = loader.endpoint_url(endpoint_url);
        }

        let config = loader.load().await;
        debug!("Fallback AWS region: {:?}", config.region());
        Client::new(&config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[async_trait]
impl IngestionStarter for FallbackBedrockStarter {
    fn surface(&self) -> &'static str {
        "bedrock-agent-fallback"
    }

    async fn start_ingestion_job(&self, knowledge_base_id: &str, data_source_id: &str) -> Result<Option<String>, SyncError> {
        let client = self.client().await;
        super::start_job(&client, self.surface(), knowledge_base_id, data_source_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fallback_endpoint_defers_to_aws_endpoint() {
        std::env::set_var("BEDROCK_FALLBACK_ENDPOINT_URL", "");
        std::env::set_var("AWS_ENDPOINT_URL", "http://localhost:4566");
        std::env::remove_var("BEDROCK_FALLBACK_REGION");

        let starter = FallbackBedrockStarter::from_env();

        assert_eq!(starter.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(starter.region, None);

        std::env::set_var("BEDROCK_FALLBACK_ENDPOINT_URL", "http://fallback:4566");
        assert_eq!(FallbackBedrockStarter::from_env().endpoint_url.as_deref(), Some("http://fallback:4566"));

        std::env::remove_var("BEDROCK_FALLBACK_ENDPOINT_URL");
        std::env::remove_var("AWS_ENDPOINT_URL");
    }
}
