//! Environment lookup used by the providers.
//!
//! Providers never touch `std::env` directly; they take an [`EnvLookup`] so
//! tests can hand them a fixed map instead of mutating the process
//! environment.

use std::collections::HashMap;
use std::env::VarError;
use std::ffi::OsString;

pub trait EnvLookup {
    /// Same contract as [`std::env::var`]: a set but non-UTF-8 value is
    /// `NotUnicode`, never `NotPresent`.
    fn var(&self, key: &str) -> Result<String, VarError>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }
}

/// In-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, OsString>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvLookup for MapEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.vars
            .get(key)
            .cloned()
            .ok_or(VarError::NotPresent)?
            .into_string()
            .map_err(VarError::NotUnicode)
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { vars }
    }
}
