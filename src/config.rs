//! Settings of the `deploy-config` tool itself, not of the emitted configurations.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DEPLOY_CONFIG_LOGLEVEL` | Log filter when `RUST_LOG` is unset | `info` |
//! | `DEPLOY_CONFIG_PRETTY` | Pretty-print emitted JSON | `true` |

use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "DEPLOY_CONFIG_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub loglevel: String,
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            pretty: true,
        }
    }
}

impl Settings {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }
}
