use thiserror::Error;

/// All errors that can occur in folio-core.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("journal not found: {0}")]
    JournalNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("{entity} id {id} not found")]
    RecordNotFound { entity: &'static str, id: i64 },

    #[error("invalid metadata document: {0}")]
    InvalidDocument(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
