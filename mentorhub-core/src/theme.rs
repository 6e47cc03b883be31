use core::fmt::{self, Display};
use core::str::FromStr;

use mentorhub_store::{keys, SettingsStore};
use tracing::debug;

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The stored choice, else the system preference.
    pub fn load(store: &impl SettingsStore, prefers_dark: bool) -> Result<Self, AppError> {
        let system = if prefers_dark { Self::Dark } else { Self::Light };
        Ok(match store.get(keys::THEME)? {
            Some(raw) => raw.parse().unwrap_or_else(|()| {
                debug!("ignoring stored theme {raw:?}");
                system
            }),
            None => system,
        })
    }

    /// Flips and persists, returning the new theme.
    pub fn toggle(self, store: &impl SettingsStore) -> Result<Self, AppError> {
        let next = self.flipped();
        store.set(keys::THEME, next.as_str())?;
        Ok(next)
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}
