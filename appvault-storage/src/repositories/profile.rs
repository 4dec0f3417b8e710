use crate::error::StorageResult;
use crate::keys;
use crate::kv::{read_json, write_json, KeyValueStore};
use appvault_types::{Profile, UpdateProfileRequest};
use std::sync::Arc;
use tracing::warn;

/// The singleton user profile.
#[derive(Clone)]
pub struct ProfileRepository {
    kv: Arc<dyn KeyValueStore>,
}

impl ProfileRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// The stored profile, or an empty one if none is stored or it is unreadable.
    pub fn load(&self) -> Profile {
        match read_json::<Profile>(self.kv.as_ref(), keys::PROFILE) {
            Ok(profile) => profile.unwrap_or_default(),
            Err(e) => {
                warn!("profile unreadable, using empty profile: {e}");
                Profile::default()
            }
        }
    }

    pub fn save(&self, request: UpdateProfileRequest) -> StorageResult<Profile> {
        request.validate()?;
        let profile = request.into_profile();
        write_json(self.kv.as_ref(), keys::PROFILE, &profile)?;
        Ok(profile)
    }
}
