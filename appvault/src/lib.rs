//! App Vault core.
//!
//! A personal store for bookmarks, PDFs, passwords, tasks and a profile,
//! kept as JSON collections in a key-value store, with a calendar of daily
//! activity and a task completion streak.
//!
//! [`AppVault`] wires the repositories from the member crates over one
//! injected [`KeyValueStore`] and [`Clock`], and runs the streak update
//! after every task change. The member crates are re-exported for hosts
//! that need the lower-level pieces.
//!
//! ```no_run
//! use appvault::{AppVault, AppVaultConfig};
//!
//! appvault::init_logging();
//! let config = AppVaultConfig::load("app-vault.toml".as_ref())?;
//! let vault = AppVault::open(config)?;
//! println!("streak: {}", vault.streak());
//! # Ok::<(), appvault::AppError>(())
//! ```

mod app;
mod config;
mod error;
mod logging;

pub use app::{AppVault, CalendarMonth};
pub use config::AppVaultConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;

pub use appvault_activity as activity;
pub use appvault_blobstore as blobstore;
pub use appvault_crypto as crypto;
pub use appvault_storage as storage;
pub use appvault_types as types;
pub use appvault_vault as vault;

pub use appvault_storage::KeyValueStore;
pub use appvault_types::Clock;
