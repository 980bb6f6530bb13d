use std::fmt;
use thiserror::Error as ThisError;

/// Why a required variable was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    Unset,
    Empty,
    NotUnicode,
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absence::Unset => f.write_str("is not set"),
            Absence::Empty => f.write_str("is set but empty"),
            Absence::NotUnicode => f.write_str("is set but not valid UTF-8"),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("{var} environment variable is required ({reason})")]
    MissingCredential { var: &'static str, reason: Absence },

    #[error("Settings error: {0}")]
    Settings(#[from] Box<figment::Error>),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// True for every flavour of missing database credential.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ConfigError::MissingCredential { .. })
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Settings(Box::new(e))
    }
}
