use serde::{Deserialize, Serialize};

pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["pdf", "txt", "docx", "md", "json"];

/// S3 object-created notification. Every field defaults so partial events still decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StorageRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageRecord {
    #[serde(default)]
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Entity {
    #[serde(default)]
    pub bucket: S3Bucket,
    #[serde(default)]
    pub object: S3Object,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Bucket {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Object {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl StorageEvent {
    /// Only the first record is considered; an empty event yields empty identifiers.
    pub fn first_object(&self) -> ObjectRef {
        self.records
            .first()
            .map(|record| ObjectRef {
                bucket: record.s3.bucket.name.clone().unwrap_or_default(),
                key: record.s3.object.key.clone().unwrap_or_default(),
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    pub knowledge_base_id: Option<String>,
    pub data_source_id: Option<String>,
}

impl SyncConfig {
    pub fn from_env() -> Self {
        Self {
            knowledge_base_id: non_empty_var("KNOWLEDGE_BASE_ID"),
            data_source_id: non_empty_var("DATA_SOURCE_ID"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Response handed back to the invoking platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    #[serde(rename_all = "camelCase")]
    Started {
        message: String,
        ingestion_job_id: Option<String>,
        file: String,
        bucket: String,
    },
    Skipped {
        message: String,
        file: String,
    },
    Failed {
        error: String,
    },
}

impl SyncResponse {
    pub fn new(status_code: u16, body: &ResponseBody) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
        Self { status_code, body }
    }

    pub fn parsed_body(&self) -> Result<ResponseBody, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
