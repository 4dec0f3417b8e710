//! Fixed-key reversible encoding for stored secrets.

use crate::error::{CryptoError, CryptoResult};
use crate::legacy;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::debug;

/// Key string shipped with the application.
pub const SHARED_KEY: &str = "app-vault-secret-key";

/// Marks a value as produced by this codec.
pub const CODEC_PREFIX: &str = "av1:";

pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;

/// Encodes and decodes single text fields under one shared key.
#[derive(Clone)]
pub struct ObfuscationCodec {
    cipher: ChaCha20Poly1305,
    passphrase: Vec<u8>,
}

impl fmt::Debug for ObfuscationCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObfuscationCodec").finish_non_exhaustive()
    }
}

impl Default for ObfuscationCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ObfuscationCodec {
    /// Codec under the application's shared key.
    pub fn new() -> Self {
        Self::with_key(SHARED_KEY)
    }

    /// Codec under a different key string (tests, migrations).
    pub fn with_key(key: &str) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        let cipher = ChaCha20Poly1305::new(Key::from_slice(digest.as_slice()));
        Self {
            cipher,
            passphrase: key.as_bytes().to_vec(),
        }
    }

    /// Encodes `plaintext` with a fresh random nonce.
    pub fn encode(&self, plaintext: &str) -> CryptoResult<String> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut payload = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        payload.extend_from_slice(nonce.as_slice());
        payload.extend_from_slice(&ciphertext);
        Ok(format!("{CODEC_PREFIX}{}", STANDARD.encode(payload)))
    }

    /// Decodes codec output and legacy salted values, returning anything
    /// else unchanged.
    ///
    /// Values written before any encoding existed are plain text and must
    /// keep loading, so no input is an error here.
    pub fn decode(&self, value: &str) -> String {
        match self.try_decode(value) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                debug!("codec fallback to raw value: {e}");
                value.to_string()
            }
        }
    }

    /// Strict decode that reports why a value could not be decoded.
    ///
    /// Accepts `av1:` values and the OpenSSL-salted AES values written by
    /// the browser build under the same key string.
    pub fn try_decode(&self, value: &str) -> CryptoResult<String> {
        let Some(encoded) = value.strip_prefix(CODEC_PREFIX) else {
            if legacy::is_salted(value) {
                return legacy::decrypt_salted(value, &self.passphrase);
            }
            return Err(CryptoError::NotEncoded);
        };
        let payload = STANDARD.decode(encoded)?;
        if payload.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::Truncated {
                minimum: NONCE_SIZE + TAG_SIZE,
                actual: payload.len(),
            });
        }

        let (nonce, ciphertext) = payload.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::Decryption("wrong key or tampered value".to_string()))?;
        Ok(String::from_utf8(plaintext)?)
    }

    /// Whether `value` carries the codec prefix. Legacy salted values do
    /// not count; they are re-encoded on the next save.
    pub fn is_encoded(value: &str) -> bool {
        value.starts_with(CODEC_PREFIX)
    }
}
