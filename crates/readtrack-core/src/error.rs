use thiserror::Error;

/// All errors that can occur in readtrack-core.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Rejected locally, before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Library service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from library service: {0}")]
    Parse(String),

    #[error("Library service did not return an id for the created entry")]
    MissingId,

    #[error("Invalid service URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = TrackerError::Api {
            status: 404,
            message: "Book not found".to_string(),
        };
        assert_eq!(err.to_string(), "Library service returned 404: Book not found");
    }
}
