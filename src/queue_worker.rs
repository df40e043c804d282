use aws_sdk_sqs::Client as SqsClient;
use tracing::{info, error, debug, warn};
use crate::{
    application::sync_service::SyncService,
    domain::{error::SyncError, models::SyncConfig},
    lambda_handler::handle_payload,
};

/// Long-polls an SQS queue fed by S3 notifications and runs each message
/// through the same sync sequence as the Lambda entry point.
pub struct QueueWorker {
    service: SyncService,
    sqs_client: SqsClient,
    queue_url: String,
}

impl QueueWorker {
    pub fn new(service: SyncService, sqs_client: SqsClient, queue_url: String) -> Self {
        Self { service, sqs_client, queue_url }
    }

    pub async fn run(&self) -> Result<(), SyncError> {
        info!("Starting queue worker, polling SQS queue: {}", self.queue_url);

        let mut poll_count = 0u64;
        loop {
            poll_count += 1;
            debug!("Polling SQS queue (attempt {})", poll_count);

            let response = self.sqs_client
                .receive_message()
                .queue_url(&self.queue_url)
                .max_number_of_messages(10)
                .wait_time_seconds(20)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to receive messages from SQS: {}", e);
                    SyncError::Queue(e.to_string())
                })?;

            let messages = response.messages.unwrap_or_default();
            if messages.is_empty() {
                debug!("No messages received from SQS");
                continue;
            }
            info!("Received {} messages from SQS", messages.len());

            for (i, message) in messages.iter().enumerate() {
                let status = match &message.body {
                    Some(body) => self.process_body(body, &SyncConfig::from_env()).await,
                    None => {
                        warn!("Received message without body");
                        400
                    },
                };

                if !should_delete(status) {
                    error!("Message {} finished with status {}, leaving it for redelivery", i + 1, status);
                    continue;
                }
                info!("Message {} finished with status {}", i + 1, status);

                if let Some(receipt_handle) = &message.receipt_handle {
                    debug!("Deleting processed message from queue");
                    self.sqs_client
                        .delete_message()
                        .queue_url(&self.queue_url)
                        .receipt_handle(receipt_handle)
                        .send()
                        .await
                        .map_err(|e| {
                            error!("Failed to delete message from SQS: {}", e);
                            SyncError::Queue(e.to_string())
                        })?;
                }
            }
        }
    }

    /// Returns the status code the sync sequence produced for one message body.
    pub async fn process_body(&self, body: &str, config: &SyncConfig) -> u16 {
        let payload = match serde_json::from_str(body) {
            Ok(payload) => payload,
            Err(e) => {
                return SyncService::internal_error(&SyncError::Event(e.to_string())).status_code;
            }
        };

        handle_payload(payload, config, &self.service).await.status_code
    }
}

/// Messages whose handling ended in a server-side failure stay on the queue.
pub fn should_delete(status: u16) -> bool {
    status < 500
}
