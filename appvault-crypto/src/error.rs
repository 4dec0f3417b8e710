use thiserror::Error;

pub type CryptoResult<T> = Result<T, CryptoError>;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("value is not codec output")]
    NotEncoded,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("ciphertext too short: {actual} bytes, need at least {minimum}")]
    Truncated { minimum: usize, actual: usize },

    #[error("decrypted value is not UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
