use trends_id::IdError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{collection} id {id} not found")]
    NotFound { collection: String, id: String },
    #[error("{collection} id {id} already exists")]
    DuplicateId { collection: String, id: String },
    #[error("{collection} id {id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        collection: String,
        id: String,
        expected: u32,
        actual: u32,
    },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    InvalidId(#[from] IdError),
    #[error("document has no id")]
    MissingId,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write document file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read document file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize document: {0}")]
    Deserialization(serde_json::Error),
    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
