use std::{env::VarError, path::PathBuf};

use thiserror::Error;

/// Failure to read an environment variable the application asked for.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvVarError {
    /// The variable is not set.
    #[error("Missing environment variable: {0}")]
    Missing(String),

    /// The variable is set but holds only whitespace.
    #[error("Environment variable {0} is set but empty")]
    Empty(String),

    /// The variable holds bytes that are not valid unicode.
    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),
}

/// Reads an environment variable, returning a structured error if it's missing or blank.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, EnvVarError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(EnvVarError::Empty(name.to_string())),
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Err(EnvVarError::Missing(name.to_string())),
        Err(VarError::NotUnicode(_)) => Err(EnvVarError::NotUnicode(name.to_string())),
    }
}

/// Reads an optional path-valued environment variable.
///
/// An unset variable is `Ok(None)`; a blank or non-unicode one is still an error,
/// since that usually means a broken shell profile rather than "not configured".
pub fn get_env_path(name: &str) -> Result<Option<PathBuf>, EnvVarError> {
    match get_env_var(name) {
        Ok(value) => Ok(Some(PathBuf::from(value))),
        Err(EnvVarError::Missing(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
