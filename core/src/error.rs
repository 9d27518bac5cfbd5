use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaffleError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Cannot pick from an empty list")]
    EmptyInput,

    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Bundled asset could not be parsed: {0}")]
    AssetParse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Background task failed: {0}")]
    Dispatch(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RaffleError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation { field, reason: reason.into() }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound { entity: entity.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type RaffleResult<T> = Result<T, RaffleError>;
