//! Password generation and strength scoring.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Characters the generator draws from.
pub const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Generates a random password of `length` characters from [`PASSWORD_CHARSET`].
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    /// 0 to 6.
    pub score: u8,
    pub label: StrengthLabel,
}

/// One point each for: length >= 8, length >= 12, lowercase, uppercase,
/// digit, and any non-alphanumeric character.
pub fn password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let checks = [
        length >= 8,
        length >= 12,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|passed| **passed).count() as u8;
    let label = match score {
        0..=2 => StrengthLabel::Weak,
        3..=4 => StrengthLabel::Medium,
        _ => StrengthLabel::Strong,
    };
    PasswordStrength { score, label }
}
