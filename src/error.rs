use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Holocron operations
pub type Result<T> = std::result::Result<T, HolocronError>;

/// Errors that can occur during Holocron operations
#[derive(Error, Debug)]
pub enum HolocronError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API error with HTTP status
    #[error("SWAPI error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The API answered but had no matching entity
    #[error("Not found: {0}")]
    NotFound(String),

    /// Cache file exists but is not a valid cache document
    #[error(
        "Cache file {} is corrupt ({source}). Run 'holocron cache --clean' to reset it.",
        path.display()
    )]
    CorruptCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A search completed but produced no data
    #[error("{reason}")]
    SearchFailed { term: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl HolocronError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether the remote call itself failed, as opposed to finding nothing
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Http(_) | Self::Json(_))
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::CorruptCache { .. } => 3,
            Self::Config(_) | Self::Toml(_) | Self::TomlSerialize(_) | Self::Env(_) => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(HolocronError::api(500, "boom").is_transport());
        assert!(!HolocronError::NotFound("x".to_string()).is_transport());
        assert!(!HolocronError::InvalidArgument("x".to_string()).is_transport());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(HolocronError::InvalidArgument("x".into()).exit_code(), 2);
        assert_eq!(HolocronError::Config("x".into()).exit_code(), 4);
        assert_eq!(
            HolocronError::SearchFailed {
                term: "Yoda".into(),
                reason: "nothing".into()
            }
            .exit_code(),
            1
        );

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let corrupt = HolocronError::CorruptCache {
            path: PathBuf::from("cache.json"),
            source,
        };
        assert_eq!(corrupt.exit_code(), 3);
        assert!(corrupt.to_string().contains("cache --clean"));
    }
}
