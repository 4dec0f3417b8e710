use appvault_storage::StorageError;
use thiserror::Error;

pub type ActivityResult<T> = Result<T, ActivityError>;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}
