//! Obfuscation and password helpers for App Vault.
//!
//! # Obfuscation codec
//!
//! Password secrets are encoded with a single key compiled into the
//! application before the collection is written. The scheme is
//! ChaCha20-Poly1305 under SHA-256 of the shared key string, with a fresh
//! random nonce per value:
//!
//! ```text
//! av1:<base64(nonce || ciphertext || tag)>
//! ```
//!
//! This is **not** a security boundary. Anyone holding the program holds
//! the key; the codec only keeps secrets from being readable at a glance
//! in the stored data.
//!
//! # Password helpers
//!
//! A random password generator and the 0–6 point strength meter shown
//! next to the password field.

mod codec;
mod error;
mod legacy;
mod password;

pub use codec::{ObfuscationCodec, CODEC_PREFIX, NONCE_SIZE, SHARED_KEY, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use password::{
    generate_password, password_strength, PasswordStrength, StrengthLabel, DEFAULT_PASSWORD_LENGTH,
    PASSWORD_CHARSET,
};
