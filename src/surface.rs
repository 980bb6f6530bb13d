use crate::env::EnvLookup;
use crate::error::ConfigError;
use crate::migration::MigrationConfigProvider;
use crate::server::ServerDeploymentConfigProvider;
use serde::Serialize;

/// Which external tool the emitted document is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSurface {
    Migration,
    Server,
}

/// Load the selected configuration and serialize it in the consuming tool's shape.
pub fn render(
    surface: ConfigSurface,
    env: &impl EnvLookup,
    pretty: bool,
) -> Result<String, ConfigError> {
    match surface {
        ConfigSurface::Migration => to_json(&MigrationConfigProvider::load(env)?, pretty),
        ConfigSurface::Server => to_json(&ServerDeploymentConfigProvider::load(), pretty),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, ConfigError> {
    let doc = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(doc)
}
