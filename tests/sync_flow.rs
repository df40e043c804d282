use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use async_trait::async_trait;
use kb_sync::{
    application::sync_service::SyncService,
    domain::{error::SyncError, models::SyncConfig, ports::IngestionStarter},
    lambda_handler::handle_payload,
};
use serde_json::{json, Value};

struct CountingStarter {
    job_id: Option<&'static str>,
    calls: AtomicUsize,
}

impl CountingStarter {
    fn new(job_id: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self { job_id, calls: AtomicUsize::new(0) })
    }
}

#[async_trait]
impl IngestionStarter for CountingStarter {
    fn surface(&self) -> &'static str {
        "counting"
    }

    async fn start_ingestion_job(&self, _knowledge_base_id: &str, _data_source_id: &str) -> Result<Option<String>, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.job_id {
            Some(id) => Ok(Some(id.to_string())),
            None => Err(SyncError::remote("counting", "AccessDeniedException", "not authorized")),
        }
    }
}

fn config() -> SyncConfig {
    SyncConfig {
        knowledge_base_id: Some("KB123".to_string()),
        data_source_id: Some("DS456".to_string()),
    }
}

fn s3_event(key: &str) -> Value {
    json!({
        "Records": [{
            "eventName": "ObjectCreated:Put",
            "s3": {
                "bucket": { "name": "kb-docs", "arn": "arn:aws:s3:::kb-docs" },
                "object": { "key": key, "size": 1024 }
            }
        }]
    })
}

#[tokio::test]
async fn full_notification_starts_ingestion() {
    let primary = CountingStarter::new(Some("JOB-1"));
    let service = SyncService::new(primary.clone(), CountingStarter::new(Some("JOB-2")));

    let response = handle_payload(s3_event("manuals/setup.docx"), &config(), &service).await;

    let wire = serde_json::to_value(&response).unwrap();
    assert_eq!(wire["statusCode"], 200);
    let body: Value = serde_json::from_str(wire["body"].as_str().unwrap()).unwrap();
    assert_eq!(body["message"], "Document sync initiated successfully");
    assert_eq!(body["ingestionJobId"], "JOB-1");
    assert_eq!(body["file"], "manuals/setup.docx");
    assert_eq!(body["bucket"], "kb-docs");
    assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn both_surfaces_failing_yields_500() {
    let primary = CountingStarter::new(None);
    let secondary = CountingStarter::new(None);
    let service = SyncService::new(primary.clone(), secondary.clone());

    let response = handle_payload(s3_event("faq.md"), &config(), &service).await;

    assert_eq!(response.status_code, 500);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("not authorized"));
    assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
    assert_eq!(secondary.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_records_yield_500_not_a_runtime_error() {
    let service = SyncService::new(CountingStarter::new(Some("JOB-1")), CountingStarter::new(Some("JOB-2")));

    let response = handle_payload(json!({ "Records": "oops" }), &config(), &service).await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.contains("Error processing S3 event"));
}

#[tokio::test]
async fn record_without_s3_section_does_not_crash() {
    let primary = CountingStarter::new(Some("JOB-1"));
    let service = SyncService::new(primary.clone(), CountingStarter::new(Some("JOB-2")));

    let response = handle_payload(json!({ "Records": [{}] }), &config(), &service).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(primary.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn null_bucket_name_still_starts_ingestion() {
    let primary = CountingStarter::new(Some("JOB-1"));
    let service = SyncService::new(primary.clone(), CountingStarter::new(Some("JOB-2")));
    let payload = json!({
        "Records": [{ "s3": { "bucket": { "name": null }, "object": { "key": "a.pdf" } } }]
    });

    let response = handle_payload(payload, &config(), &service).await;

    assert_eq!(response.status_code, 200);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["bucket"], "");
    assert_eq!(body["file"], "a.pdf");
    assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
}
