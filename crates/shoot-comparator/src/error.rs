//! Comparator error types

use thiserror::Error;

/// Errors caused by malformed comparator input
#[derive(Debug, Error)]
pub enum ComparatorError {
    /// A Shoot document could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A known extension carries an undecodable provider config
    #[error("Invalid provider config of extension {extension_type}: {source}")]
    ExtensionDecode {
        /// Extension type
        extension_type: String,
        /// Underlying decoding error
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
