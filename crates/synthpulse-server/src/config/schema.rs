use serde::Deserialize;
use synthpulse_core::error::{PulseError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub updater: UpdaterSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            updater: UpdaterSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PulseError::InvalidConfig("version must be 1".into()));
        }

        self.updater.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdaterSection {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_min_active_users")]
    pub min_active_users: i64,

    #[serde(default = "default_max_active_users")]
    pub max_active_users: i64,

    /// Fixed seed for the simulated gauge. Unset means seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for UpdaterSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            min_active_users: default_min_active_users(),
            max_active_users: default_max_active_users(),
            seed: None,
        }
    }
}

impl UpdaterSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=600000).contains(&self.interval_ms) {
            return Err(PulseError::InvalidConfig(
                "updater.interval_ms must be between 100 and 600000".into(),
            ));
        }
        if self.min_active_users > self.max_active_users {
            return Err(PulseError::InvalidConfig(
                "updater.min_active_users must not exceed max_active_users".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_interval_ms() -> u64 {
    5000
}
fn default_min_active_users() -> i64 {
    50
}
fn default_max_active_users() -> i64 {
    200
}
