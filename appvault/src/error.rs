use appvault_activity::ActivityError;
use appvault_blobstore::BlobError;
use appvault_storage::StorageError;
use appvault_types::ValidationError;
use appvault_vault::VaultError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error(transparent)]
    Activity(#[from] ActivityError),

    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
