use mentorhub_store::{keys, SettingsStore, SettingsStoreExt as _};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::preferences::load_or_default;

/// Career details shown on the profile page, stored under `userProfile`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub title: String,
    pub gcb_level: String,
    pub gc_tenure: String,
    pub location: String,
    pub languages: Vec<String>,
    pub other_languages: String,
    pub leadership_experiences: String,
    pub additional_experiences: String,
    pub business_area: String,
}

impl UserProfile {
    pub fn load(store: &impl SettingsStore) -> Result<Self, AppError> {
        load_or_default(store, keys::USER_PROFILE)
    }

    pub fn save(&self, store: &impl SettingsStore) -> Result<(), AppError> {
        store.set_json(keys::USER_PROFILE, self)?;
        info!("user profile saved");
        Ok(())
    }
}
