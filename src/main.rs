use std::sync::Arc;
use aws_config::BehaviorVersion;
use kb_sync::{
    application::sync_service::SyncService,
    infrastructure::bedrock::{agent_starter::BedrockAgentStarter, fallback_starter::FallbackBedrockStarter},
    lambda_handler::function_handler,
    queue_worker::QueueWorker,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::{info, debug};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kb_sync=debug,aws_sdk=warn,aws_config=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .without_time()
        .init();

    info!("Starting knowledge base sync");
    debug!("Environment variables: KNOWLEDGE_BASE_ID={}, DATA_SOURCE_ID={}, RUN_MODE={}",
        std::env::var("KNOWLEDGE_BASE_ID").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("DATA_SOURCE_ID").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("RUN_MODE").unwrap_or_else(|_| "not set".to_string())
    );

    let mut aws_config_builder = aws_config::defaults(BehaviorVersion::latest());

    // Configure endpoint for LocalStack if AWS_ENDPOINT_URL is set
    if let Ok(endpoint_url) = std::env::var("AWS_ENDPOINT_URL") {
        info!("Using custom AWS endpoint: {}", endpoint_url);
        aws_config_builder = aws_config_builder.endpoint_url(&endpoint_url);
    }

    let aws_config = aws_config_builder.load().await;
    debug!("AWS region: {:?}", aws_config.region());

    let primary = Arc::new(BedrockAgentStarter::new(aws_sdk_bedrockagent::Client::new(&aws_config)));
    let secondary = Arc::new(FallbackBedrockStarter::from_env());
    let service = SyncService::new(primary, secondary);
    debug!("Ingestion starters initialized");

    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "lambda".to_string());
    info!("Using run mode: {}", run_mode);

    match run_mode.as_str() {
        "queue" => {
            let queue_url = std::env::var("SQS_QUEUE_URL")
                .map_err(|_| "SQS_QUEUE_URL environment variable is required in queue mode")?;
            let worker = QueueWorker::new(service, aws_sdk_sqs::Client::new(&aws_config), queue_url);
            worker.run().await?;
            Ok(())
        },
        _ => {
            let service = &service;
            run(service_fn(move |event: LambdaEvent<serde_json::Value>| async move {
                function_handler(event, service).await
            }))
            .await
        }
    }
}
