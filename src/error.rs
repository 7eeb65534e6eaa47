use crate::db::models::ModelId;
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Failures of the persistent store itself.
#[derive(Debug, ThisError)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored record could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, ThisError)]
pub enum RepositoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Top-level error surfaced to the operator by every catalog action.
#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("Storage failure: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to read {}: {source}", path.display())]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No model with id {0}")]
    NotFound(ModelId),

    #[error("Admin access required to {0}")]
    Forbidden(&'static str),
}

impl From<StorageError> for CatalogError {
    fn from(e: StorageError) -> Self {
        CatalogError::Repository(e.into())
    }
}

impl CatalogError {
    /// Validation failures keep the upload form intact so the operator can fix and resubmit.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }
}
