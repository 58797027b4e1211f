//! Hyperscaler errors

use thiserror::Error;

/// Errors produced while generating network layouts or handling provider documents
#[derive(Debug, Error)]
pub enum HyperscalerError {
    /// The worker CIDR could not be parsed
    #[error("Invalid CIDR {cidr}: {reason}")]
    InvalidCidr {
        /// Offending input
        cidr: String,
        /// What is wrong with it
        reason: String,
    },

    /// The worker CIDR prefix length is outside the supported range
    #[error("Unsupported prefix length /{prefix_len} of {cidr}, expected /{min} to /{max}")]
    UnsupportedPrefixLength {
        /// Offending CIDR
        cidr: String,
        /// Its prefix length
        prefix_len: u8,
        /// Smallest supported prefix length
        min: u8,
        /// Largest supported prefix length
        max: u8,
    },

    /// Too few or too many zones were requested
    #[error("Zone count {count} out of range, expected {min} to {max}")]
    ZoneCount {
        /// Requested zone count
        count: usize,
        /// Minimum zone count
        min: usize,
        /// Maximum zone count
        max: usize,
    },

    /// A zone name was supplied twice
    #[error("Duplicate zone name: {0}")]
    DuplicateZone(String),

    /// A generated subnet is not contained in the worker CIDR
    #[error("Generated subnet {subnet} escapes worker CIDR {parent}")]
    SubnetOutOfRange {
        /// Generated subnet
        subnet: String,
        /// Worker CIDR
        parent: String,
    },

    /// A subnet for an added zone overlaps a subnet already in use
    #[error("Subnet {subnet} of an added zone overlaps persisted subnet {persisted}")]
    SubnetOverlap {
        /// Generated subnet
        subnet: String,
        /// Persisted subnet it collides with
        persisted: String,
    },

    /// The provider type is not one of the supported hyperscalers
    #[error("Unsupported provider type: {0}")]
    UnsupportedProvider(String),

    /// A provider document could not be decoded
    #[error("Invalid {provider} {document} document: {source}")]
    Decode {
        /// Provider type of the document
        provider: &'static str,
        /// Document kind (e.g., "InfrastructureConfig")
        document: &'static str,
        /// Underlying decoding error
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
