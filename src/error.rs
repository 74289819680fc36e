//! Error types for the barista gateway

use thiserror::Error;

/// Result type alias for barista operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while taking orders
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Order rejected because required fields are empty
    #[error("order is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Tool call error (unknown tool, bad arguments)
    #[error("tool error: {0}")]
    Tool(String),

    /// Storage backend error not tied to an IO call
    #[error("storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_names() {
        let err = Error::MissingFields(vec!["size", "name"]);
        assert_eq!(err.to_string(), "order is missing required fields: size, name");
    }
}
