use thiserror::Error;
use uuid::Uuid;

/// Error type covering the failure modes of the expense core.
///
/// Storage corruption is not represented here: corrupt payloads are recovered
/// in place by the storage adapter (reset to defaults plus a warning log) and
/// never surface to callers.
#[derive(Debug, Error)]
pub enum MoniError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Built-in category is immutable: {0}")]
    BuiltinCategory(String),
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Network error: {0}")]
    Network(String),
}

pub type Result<T> = std::result::Result<T, MoniError>;

impl From<std::io::Error> for MoniError {
    fn from(err: std::io::Error) -> Self {
        MoniError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for MoniError {
    fn from(err: serde_json::Error) -> Self {
        MoniError::Storage(err.to_string())
    }
}
