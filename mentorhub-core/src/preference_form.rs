//! The preference form on the dashboards.
//!
//! Unlike the wizard it has no steps: every field is on one page and the
//! labels depend on the role. Saving writes the whole record, keeping what
//! the form does not show.

use mentorhub_store::{keys, SettingsStore};
use tracing::info;

use crate::error::AppError;
use crate::multi_select::{pills, MultiSelect};
use crate::preferences::{MultiField, PreferenceRecord};
use crate::role::Role;

/// Where the form keeps its record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreferenceStorage {
    /// `profileData`, shared with the wizard.
    #[default]
    Shared,
    /// One record per role, `mentorPreferences` or `menteePreferences`.
    PerRole,
}

pub struct PreferenceForm<S> {
    store: S,
    role: Role,
    key: String,
    record: PreferenceRecord,
}

impl<S: SettingsStore> PreferenceForm<S> {
    pub fn open(store: S, role: Role) -> Result<Self, AppError> {
        Self::open_with(store, role, PreferenceStorage::Shared)
    }

    pub fn open_with(
        store: S,
        role: Role,
        storage: PreferenceStorage,
    ) -> Result<Self, AppError> {
        let key = match storage {
            PreferenceStorage::Shared => keys::PROFILE_DATA.to_owned(),
            PreferenceStorage::PerRole => keys::role_preferences(role.as_str()),
        };
        let record = PreferenceRecord::load_from(&store, &key)?;
        Ok(Self {
            store,
            role,
            key,
            record,
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// A mentor describes the mentees they want, and vice versa.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self.role {
            Role::Mentor => "Mentee Preferences",
            Role::Mentee | Role::Both => "Mentor Preferences",
        }
    }

    #[must_use]
    pub const fn fields(&self) -> [MultiField; 6] {
        [
            MultiField::Regions,
            MultiField::Languages,
            MultiField::Functions,
            MultiField::Strengths,
            MultiField::Availability,
            MultiField::LearningGoals,
        ]
    }

    #[must_use]
    pub const fn label(&self, field: MultiField) -> &'static str {
        match (field, self.role) {
            (MultiField::Functions, _) => "Business Functions",
            (MultiField::Strengths, Role::Mentor) => "Strengths to Offer",
            (MultiField::Strengths, Role::Mentee | Role::Both) => "Strengths to Develop",
            (other, _) => other.label(),
        }
    }

    #[must_use]
    pub fn selection(&self, field: MultiField) -> &[String] {
        self.record.selection(field)
    }

    pub fn toggle(&mut self, field: MultiField, value: &str) -> Result<bool, AppError> {
        MultiSelect::new(field.catalog(), self.record.selection_mut(field)).toggle(value)
    }

    pub fn remove_pill(&mut self, field: MultiField, value: &str) {
        MultiSelect::new(field.catalog(), self.record.selection_mut(field)).remove(value);
    }

    #[must_use]
    pub fn pills(&self, field: MultiField) -> Vec<&str> {
        pills(field.catalog(), self.selection(field))
    }

    /// Writes the record as `role` may see it: only mentors keep a limit.
    pub fn save(&self) -> Result<PreferenceRecord, AppError> {
        let record = self.record.clone().for_role(self.role);
        record.save_to(&self.store, &self.key)?;
        info!("{} preferences saved to {}", self.role, self.key);
        Ok(record)
    }
}
