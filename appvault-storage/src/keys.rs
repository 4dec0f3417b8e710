//! Persisted key layout.

use appvault_types::RecordKind;

pub const LINKS: &str = "app-vault-links";
pub const PDFS: &str = "app-vault-pdfs";
pub const PASSWORDS: &str = "app-vault-passwords";
pub const TASKS: &str = "app-vault-tasks";
pub const PROFILE: &str = "app-vault-profile";

/// Streak counter, stored as a decimal integer.
pub const STREAK: &str = "task-streak";
/// Last calendar day (`yyyy-mm-dd`) the streak was credited.
pub const STREAK_DAY: &str = "task-streak-day";

/// Reserved for the user-count display counter; never written here.
pub const USER_COUNT: &str = "app-vault-user-count";
/// Reserved for the user-count last-increment timestamp; never written here.
pub const USER_COUNT_LAST_INCREMENT: &str = "app-vault-last-increment";

/// Key holding the collection for `kind`.
pub fn collection_key(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Link => LINKS,
        RecordKind::Pdf => PDFS,
        RecordKind::Password => PASSWORDS,
        RecordKind::Task => TASKS,
    }
}
