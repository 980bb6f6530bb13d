//! Configuration handed to the schema-migration tool at generate/push/pull time.
//!
//! Emitted shape:
//! `{ "schema", "out", "dialect", "dbCredentials": { "url" } }`

use crate::env::EnvLookup;
use crate::error::{Absence, ConfigError};
use serde::Serialize;
use std::env::VarError;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL_EXTERNAL";
pub const SCHEMA_PATH: &str = "./app/db/schema.ts";
pub const MIGRATIONS_DIR: &str = "./app/db/migrations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Postgresql,
}

/// Database connection string. Only ever built from a non-empty value.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CredentialBundle {
    url: String,
}

impl CredentialBundle {
    fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL with any password masked, for logs.
    pub fn redacted(&self) -> String {
        match Url::parse(&self.url) {
            Ok(mut parsed) if parsed.password().is_some() => {
                // set_password only fails for cannot-be-a-base URLs, which carry no password.
                let _ = parsed.set_password(Some("****"));
                parsed.to_string()
            }
            Ok(parsed) => parsed.to_string(),
            Err(_) => "<unparsable url>".to_string(),
        }
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("url", &self.redacted())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    pub schema: PathBuf,
    pub out: PathBuf,
    pub dialect: Dialect,
    pub db_credentials: CredentialBundle,
}

pub struct MigrationConfigProvider;

impl MigrationConfigProvider {
    /// Build the migration config, refusing to proceed without a database URL.
    ///
    /// Empty and non-UTF-8 values are rejected the same way as an unset one;
    /// the error only records which case it was.
    pub fn load(env: &impl EnvLookup) -> Result<MigrationConfig, ConfigError> {
        let reason = match env.var(DATABASE_URL_VAR) {
            Ok(v) if !v.is_empty() => return Ok(Self::build(v)),
            Ok(_) => Absence::Empty,
            Err(VarError::NotPresent) => Absence::Unset,
            Err(VarError::NotUnicode(_)) => Absence::NotUnicode,
        };
        debug!(var = DATABASE_URL_VAR, %reason, "database credential rejected");
        Err(ConfigError::MissingCredential {
            var: DATABASE_URL_VAR,
            reason,
        })
    }

    fn build(url: String) -> MigrationConfig {
        let credentials = CredentialBundle::new(url);
        debug!(url = %credentials.redacted(), "database credential resolved");

        let cfg = MigrationConfig {
            schema: PathBuf::from(SCHEMA_PATH),
            out: PathBuf::from(MIGRATIONS_DIR),
            dialect: Dialect::Postgresql,
            db_credentials: credentials,
        };
        info!(
            schema = %cfg.schema.display(),
            out = %cfg.out.display(),
            dialect = ?cfg.dialect,
            "migration config loaded"
        );
        cfg
    }
}
