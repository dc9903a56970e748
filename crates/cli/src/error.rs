//! Error types for padctl

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("No supported controllers found")]
    NoControllers,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Config file already exists: {} (use --force to overwrite)", .0.display())]
    ConfigExists(PathBuf),

    #[error("Device access unavailable: {0}")]
    TransportUnavailable(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoControllers => 2,
            CliError::InvalidConfiguration(_) | CliError::ConfigExists(_) => 4,
            CliError::TransportUnavailable(_) => 5,
        }
    }
}

impl From<padlink_engine::ConfigError> for CliError {
    fn from(e: padlink_engine::ConfigError) -> Self {
        CliError::InvalidConfiguration(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        assert_eq!(CliError::NoControllers.exit_code(), 2);
        assert_eq!(CliError::InvalidConfiguration(String::new()).exit_code(), 4);
        assert_eq!(CliError::ConfigExists(PathBuf::from("a")).exit_code(), 4);
        assert_eq!(
            CliError::TransportUnavailable(String::new()).exit_code(),
            5
        );
    }
}
