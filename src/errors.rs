use crate::Family;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CreationalError {
    #[error("Department from the `{found}` family cannot be assigned to a `{expected}` user")]
    IncompatibleFamily { expected: Family, found: Family },

    #[error("Department belongs to a different `{0}` store")]
    ForeignStore(Family),

    #[error("Name `{0}` is already taken")]
    DuplicateName(String),

    #[error("Entity `{0}` not found")]
    EntityNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database operation failed: {0}")]
    RusqliteError(#[from] rusqlite::Error),
}

impl CreationalError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::EntityNotFound(what.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Returns true for failures caused by wiring entities of different stores or families.
    pub fn is_family_mismatch(&self) -> bool {
        matches!(self, Self::IncompatibleFamily { .. } | Self::ForeignStore(_))
    }
}
