//! Reader for secrets written by the browser build of App Vault.
//!
//! Those values are OpenSSL "salted" AES-256-CBC text: base64 of
//! `Salted__` ‖ 8-byte salt ‖ ciphertext. Key and IV come from the
//! passphrase through EVP_BytesToKey (MD5, one round). They are only ever
//! read; new values are written in the `av1:` form.

use crate::error::{CryptoError, CryptoResult};
use aes::Aes256;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use md5::{Digest, Md5};

const SALTED_MAGIC: &[u8] = b"Salted__";
/// Base64 of [`SALTED_MAGIC`] up to the last character it fully determines.
const SALTED_PREFIX: &str = "U2FsdGVkX1";
const SALT_SIZE: usize = 8;
const KEY_SIZE: usize = 32;
const IV_SIZE: usize = 16;
const BLOCK_SIZE: usize = 16;

type Aes256CbcDec = cbc::Decryptor<Aes256>;

pub(crate) fn is_salted(value: &str) -> bool {
    value.trim_start().starts_with(SALTED_PREFIX)
}

pub(crate) fn decrypt_salted(value: &str, passphrase: &[u8]) -> CryptoResult<String> {
    let raw = STANDARD.decode(value.trim())?;
    let body = raw.strip_prefix(SALTED_MAGIC).ok_or(CryptoError::NotEncoded)?;
    if body.len() < SALT_SIZE + BLOCK_SIZE {
        return Err(CryptoError::Truncated {
            minimum: SALTED_MAGIC.len() + SALT_SIZE + BLOCK_SIZE,
            actual: raw.len(),
        });
    }

    let (salt, ciphertext) = body.split_at(SALT_SIZE);
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Decryption(
            "legacy ciphertext is not block aligned".to_string(),
        ));
    }
    let (key, iv) = derive_key_iv(passphrase, salt);
    let mut buf = ciphertext.to_vec();
    let plaintext = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|e| CryptoError::Decryption(e.to_string()))?
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| CryptoError::Decryption("wrong key or corrupted legacy value".to_string()))?;
    Ok(String::from_utf8(plaintext.to_vec())?)
}

/// EVP_BytesToKey with MD5 and a single iteration.
fn derive_key_iv(passphrase: &[u8], salt: &[u8]) -> ([u8; KEY_SIZE], [u8; IV_SIZE]) {
    let mut derived = Vec::with_capacity(KEY_SIZE + IV_SIZE + 16);
    let mut block = Vec::new();
    while derived.len() < KEY_SIZE + IV_SIZE {
        let mut hasher = Md5::new();
        hasher.update(&block);
        hasher.update(passphrase);
        hasher.update(salt);
        block = hasher.finalize().to_vec();
        derived.extend_from_slice(&block);
    }

    let mut key = [0u8; KEY_SIZE];
    let mut iv = [0u8; IV_SIZE];
    key.copy_from_slice(&derived[..KEY_SIZE]);
    iv.copy_from_slice(&derived[KEY_SIZE..KEY_SIZE + IV_SIZE]);
    (key, iv)
}
