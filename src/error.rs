//! Error types and handling for the `DepBrief` service

use thiserror::Error;

/// Main error type for the `DepBrief` service
#[derive(Error, Debug)]
pub enum DepbriefError {
    /// A required reference table failed to load or parse.
    ///
    /// Fatal to the session: no feature operates without its backing table.
    #[error("Failed to load table '{table}': {message}")]
    Load { table: String, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather feed communication errors
    #[error("Weather feed error: {message}")]
    Feed { message: String },

    /// Preference store errors
    #[error("Preference store error: {message}")]
    Store { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl DepbriefError {
    /// Create a new table-load error
    pub fn load<T: Into<String>, S: Into<String>>(table: T, message: S) -> Self {
        Self::Load {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new weather feed error
    pub fn feed<S: Into<String>>(message: S) -> Self {
        Self::Feed {
            message: message.into(),
        }
    }

    /// Create a new preference store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DepbriefError::Load { table, .. } => {
                format!(
                    "Reference table '{table}' could not be loaded. The briefing service cannot start without it."
                )
            }
            DepbriefError::Config { .. } => {
                "Configuration error. Please check your config file and environment overrides."
                    .to_string()
            }
            DepbriefError::Feed { .. } => {
                "Unable to reach the weather feed. Station reports will show as unavailable."
                    .to_string()
            }
            DepbriefError::Store { .. } => {
                "Preference store operation failed. Defaults are in effect.".to_string()
            }
            DepbriefError::Io { .. } => {
                "File operation failed. Please check data directory permissions.".to_string()
            }
            DepbriefError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let load_err = DepbriefError::load("navaids", "missing header");
        assert!(matches!(load_err, DepbriefError::Load { .. }));

        let config_err = DepbriefError::config("bad port");
        assert!(matches!(config_err, DepbriefError::Config { .. }));

        let feed_err = DepbriefError::feed("connection refused");
        assert!(matches!(feed_err, DepbriefError::Feed { .. }));
    }

    #[test]
    fn test_user_messages() {
        let load_err = DepbriefError::load("rules", "truncated file");
        assert!(load_err.user_message().contains("rules"));

        let feed_err = DepbriefError::feed("test");
        assert!(feed_err.user_message().contains("weather feed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: DepbriefError = io_err.into();
        assert!(matches!(app_err, DepbriefError::Io { .. }));
    }
}
