use core::fmt::{self, Display};
use core::str::FromStr;

use mentorhub_store::{keys, SettingsStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::router::{Navigator, Route};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
    /// Parsed for completeness, never written by role selection.
    Both,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mentor => "mentor",
            Self::Mentee => "mentee",
            Self::Both => "both",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mentor" => Ok(Self::Mentor),
            "mentee" => Ok(Self::Mentee),
            "both" => Ok(Self::Both),
            other => Err(AppError::UnknownRole(other.to_owned())),
        }
    }
}

/// Reads a role stored under `key`. Garbage reads as no role.
pub fn stored_role(store: &impl SettingsStore, key: &str) -> Result<Option<Role>, AppError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(role) => Ok(Some(role)),
        Err(error) => {
            warn!("ignoring stored {key}: {error}");
            Ok(None)
        }
    }
}

/// What the dashboards need to know about the signed in user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleState {
    pub role: Option<Role>,
    pub has_multiple_roles: bool,
}

impl RoleState {
    pub fn load(store: &impl SettingsStore) -> Result<Self, AppError> {
        Ok(Self {
            role: stored_role(store, keys::CURRENT_ROLE)?,
            has_multiple_roles: store.get(keys::HAS_MULTIPLE_ROLES)?.as_deref() == Some("true"),
        })
    }
}

/// Role chosen on the standalone role page.
pub fn select_role(
    store: &impl SettingsStore,
    navigator: &impl Navigator,
    role: Role,
) -> Result<(), AppError> {
    store.set(keys::USER_ROLE, role.as_str())?;
    store.set(keys::CURRENT_ROLE, role.as_str())?;
    // keeps the role switcher on the dashboards
    store.set(keys::HAS_MULTIPLE_ROLES, "true")?;
    debug!("selected role {role}");
    navigator.push(Route::Dashboard);
    Ok(())
}

/// Switches the dashboard shown. Choosing the current role does nothing.
pub fn switch_role(
    store: &impl SettingsStore,
    navigator: &impl Navigator,
    current: Role,
    role: Role,
) -> Result<bool, AppError> {
    if role == current {
        return Ok(false);
    }
    store.set(keys::CURRENT_ROLE, role.as_str())?;
    debug!("switched role {current} -> {role}");
    navigator.push(Route::Dashboard);
    Ok(true)
}

pub fn logout(store: &impl SettingsStore, navigator: &impl Navigator) -> Result<(), AppError> {
    store.remove(keys::USER_ROLE)?;
    store.remove(keys::CURRENT_ROLE)?;
    navigator.push(Route::Landing);
    Ok(())
}
