//! Alpha Vantage API key loading.
//!
//! The key lives either in a local text file, where it is the last
//! whitespace-separated token of the first line (so both `KEY` and
//! `alphavantage key: KEY` work), or in an environment variable.

use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::ConfigError;

/// Environment variable consulted by [`ApiKey::from_default_env`].
pub const API_KEY_ENV: &str = "TICKCHART_ALPHAVANTAGE_API_KEY";

/// Default key file name, resolved against the working directory.
pub const DEFAULT_KEY_FILE: &str = "AlphaVantage.txt";

/// Alpha Vantage API key. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let unreadable = |source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unreadable)?;
        let mut first_line = String::new();
        BufReader::new(file)
            .read_line(&mut first_line)
            .map_err(unreadable)?;

        first_line
            .split_whitespace()
            .next_back()
            .map(Self::new)
            .ok_or_else(|| ConfigError::Malformed {
                path: path.to_path_buf(),
            })
    }

    /// Key from environment variable `var`; `None` when unset or blank.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var)
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(Self)
    }

    pub fn from_default_env() -> Option<Self> {
        Self::from_env(API_KEY_ENV)
    }

    /// Environment key if present, otherwise the key file.
    pub fn resolve(key_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::resolve_with_env(API_KEY_ENV, key_file)
    }

    /// Like [`ApiKey::resolve`], reading the environment key from `var`.
    pub fn resolve_with_env(var: &str, key_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::from_env(var) {
            Some(key) => {
                tracing::debug!(var, "using API key from environment");
                Ok(key)
            }
            None => Self::from_file(key_file),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
