use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
