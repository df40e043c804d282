use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Missing required environment variables. Knowledge Base ID: {}, Data Source ID: {}",
        .knowledge_base_id.as_deref().unwrap_or("None"),
        .data_source_id.as_deref().unwrap_or("None"))]
    MissingConfig {
        knowledge_base_id: Option<String>,
        data_source_id: Option<String>,
    },

    #[error("{surface} error ({kind}): {message}")]
    Remote {
        surface: &'static str,
        kind: String,
        message: String,
    },

    #[error("invalid event payload: {0}")]
    Event(String),

    #[error("queue error: {0}")]
    Queue(String),
}

impl SyncError {
    pub fn remote(surface: &'static str, kind: impl Into<String>, message: impl Into<String>) -> Self {
        SyncError::Remote {
            surface,
            kind: kind.into(),
            message: message.into(),
        }
    }
}
