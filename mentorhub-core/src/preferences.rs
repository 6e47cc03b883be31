use core::fmt::{self, Display};
use core::str::FromStr;

use mentorhub_store::{keys, SettingsStore, SettingsStoreExt as _, StoreError};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::catalog::{
    Catalog, AVAILABILITY, FUNCTIONS, LANGUAGES, LEARNING_GOALS, OTHER_LANGUAGE, REGIONS,
    STRENGTHS,
};
use crate::error::AppError;
use crate::role::Role;

/// The multi-valued fields of a [`PreferenceRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MultiField {
    Regions,
    Languages,
    Functions,
    Strengths,
    /// Dashboard form only.
    Availability,
    /// Dashboard form only.
    LearningGoals,
}

impl MultiField {
    #[must_use]
    pub const fn catalog(self) -> Catalog {
        match self {
            Self::Regions => REGIONS,
            Self::Languages => LANGUAGES,
            Self::Functions => FUNCTIONS,
            Self::Strengths => STRENGTHS,
            Self::Availability => AVAILABILITY,
            Self::LearningGoals => LEARNING_GOALS,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Regions => "Regions",
            Self::Languages => "Languages",
            Self::Functions => "Functions / Expertise",
            Self::Strengths => "Strengths",
            Self::Availability => "Availability",
            Self::LearningGoals => "Learning Goals",
        }
    }
}

/// How many mentees a mentor accepts, always within `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxMentees(u8);

impl MaxMentees {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, AppError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::InvalidMaxMentees(value.to_string()))
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for MaxMentees {
    fn default() -> Self {
        Self(3)
    }
}

impl Display for MaxMentees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for MaxMentees {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input
            .trim()
            .parse::<u8>()
            .map_err(|_| AppError::InvalidMaxMentees(input.to_owned()))
            .and_then(|value| {
                Self::new(value).map_err(|_| AppError::InvalidMaxMentees(input.to_owned()))
            })
    }
}

// stored as a string, that is what the number input produced
impl Serialize for MaxMentees {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MaxMentees {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

// a cleared number input stores "", that must not cost the rest of the record
fn lenient_max_mentees<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<MaxMentees>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Valid(MaxMentees),
        Invalid(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Valid(value)) => Some(value),
        Some(Raw::Invalid(_)) => {
            warn!(
                "ignoring stored maxMentees outside {}..={}",
                MaxMentees::MIN,
                MaxMentees::MAX
            );
            None
        }
        None => None,
    })
}

/// Reads JSON under `key`, substituting the default for missing or malformed
/// values. Only store failures are errors.
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(
    store: &impl SettingsStore,
    key: &str,
) -> Result<T, AppError> {
    match store.get_json::<T>(key) {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(StoreError::Decode { key, source }) => {
            warn!("discarding malformed {key}: {source}");
            Ok(T::default())
        }
        Err(error) => Err(error.into()),
    }
}

/// The self-description a user submits through the wizard or the
/// preference form. Stored as JSON under `profileData`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceRecord {
    pub regions: Vec<String>,
    pub languages: Vec<String>,
    /// Only meaningful while `languages` contains `"other"`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub other_languages: String,
    #[serde(alias = "expertise")]
    pub functions: Vec<String>,
    pub strengths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub availability: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub learning_goals: Vec<String>,
    /// Mentors only. A stored value out of range reads as unset.
    #[serde(
        deserialize_with = "lenient_max_mentees",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_mentees: Option<MaxMentees>,
    #[serde(alias = "bio")]
    pub additional_info: String,
}

impl PreferenceRecord {
    /// Loads the stored record. Anything that does not decode is logged and
    /// replaced by the empty record, so a broken value never blocks the form.
    pub fn load(store: &impl SettingsStore) -> Result<Self, AppError> {
        Self::load_from(store, keys::PROFILE_DATA)
    }

    /// Like [`Self::load`] for a record kept under another key.
    pub fn load_from(store: &impl SettingsStore, key: &str) -> Result<Self, AppError> {
        load_or_default(store, key)
    }

    /// Single whole-record write.
    pub fn save(&self, store: &impl SettingsStore) -> Result<(), AppError> {
        self.save_to(store, keys::PROFILE_DATA)
    }

    pub fn save_to(&self, store: &impl SettingsStore, key: &str) -> Result<(), AppError> {
        store.set_json(key, self)?;
        Ok(())
    }

    #[must_use]
    pub fn selection(&self, field: MultiField) -> &[String] {
        match field {
            MultiField::Regions => &self.regions,
            MultiField::Languages => &self.languages,
            MultiField::Functions => &self.functions,
            MultiField::Strengths => &self.strengths,
            MultiField::Availability => &self.availability,
            MultiField::LearningGoals => &self.learning_goals,
        }
    }

    pub fn selection_mut(&mut self, field: MultiField) -> &mut Vec<String> {
        match field {
            MultiField::Regions => &mut self.regions,
            MultiField::Languages => &mut self.languages,
            MultiField::Functions => &mut self.functions,
            MultiField::Strengths => &mut self.strengths,
            MultiField::Availability => &mut self.availability,
            MultiField::LearningGoals => &mut self.learning_goals,
        }
    }

    #[must_use]
    pub fn wants_other_languages(&self) -> bool {
        self.languages.iter().any(|language| language == OTHER_LANGUAGE)
    }

    /// Drops what does not apply to `role`: the mentee limit for anyone but
    /// mentors and the hidden "other languages" text.
    #[must_use]
    pub fn for_role(mut self, role: Role) -> Self {
        if role != Role::Mentor {
            self.max_mentees = None;
        }
        if !self.wants_other_languages() {
            self.other_languages.clear();
        }
        self
    }
}
