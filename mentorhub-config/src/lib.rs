use core::fmt::{Debug, Display};
use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "mentorhub.toml";
pub const ENV_PREFIX: &str = "MENTORHUB_";

/// Shape of the mentor discovery feed.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    /// Records per fetched page.
    pub page_size: usize,
    /// Once a page with a number above this has been fetched the feed is exhausted.
    pub last_page: u32,
    /// First id handed out by the mock source, right after the seeded mentors.
    pub id_base: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 3,
            last_page: 3,
            id_base: 6,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// JSON file backing the settings store.
    pub store_path: PathBuf,
    /// `tracing` filter directive, `RUST_LOG` takes precedence.
    pub log_filter: Option<String>,
    pub feed: FeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("mentorhub-store.json"),
            log_filter: None,
            feed: FeedConfig::default(),
        }
    }
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
    #[error("feed.page_size must be at least 1")]
    EmptyPage,
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Defaults, overridden by `mentorhub.toml`, overridden by `MENTORHUB_*`
/// variables (`MENTORHUB_FEED__PAGE_SIZE=5`).
#[must_use]
pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn get_config() -> Result<Config, ConfigError> {
    from_figment(&figment())
}

pub fn from_figment(figment: &Figment) -> Result<Config, ConfigError> {
    let config: Config = figment.extract()?;
    if config.feed.page_size == 0 {
        return Err(ConfigError::EmptyPage);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use figment::Jail;

    use super::{get_config, Config, ConfigError, FeedConfig};

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = get_config().map_err(|error| error.to_string())?;
            assert_eq!(config, Config::default());
            assert_eq!(config.feed, FeedConfig {
                page_size: 3,
                last_page: 3,
                id_base: 6,
            });
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "mentorhub.toml",
                r#"
                store_path = "state/store.json"
                log_filter = "debug"

                [feed]
                last_page = 5
                "#,
            )?;
            jail.set_env("MENTORHUB_FEED__PAGE_SIZE", "4");
            let config = get_config().map_err(|error| error.to_string())?;
            assert_eq!(config.store_path, PathBuf::from("state/store.json"));
            assert_eq!(config.log_filter.as_deref(), Some("debug"));
            assert_eq!(config.feed.page_size, 4);
            assert_eq!(config.feed.last_page, 5);
            assert_eq!(config.feed.id_base, 6);
            Ok(())
        });
    }

    #[test]
    fn empty_pages_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("MENTORHUB_FEED__PAGE_SIZE", "0");
            assert!(matches!(get_config(), Err(ConfigError::EmptyPage)));
            Ok(())
        });
    }
}
