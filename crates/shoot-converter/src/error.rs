//! Converter error types

use hyperscaler::HyperscalerError;
use thiserror::Error;

/// Errors that can occur while converting a Runtime into a Shoot.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Malformed Runtime input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider type is not one of the supported hyperscalers
    #[error("Unsupported provider type: {0}")]
    UnsupportedProvider(String),

    /// Zone generation or provider document error
    #[error("Hyperscaler error: {0}")]
    Hyperscaler(#[from] HyperscalerError),

    /// No audit log data configured for the provider and region
    #[error("Audit log data not found for provider {provider} in region {region}")]
    AuditLogNotFound {
        /// Provider type
        provider: String,
        /// Region
        region: String,
    },

    /// No maintenance window configured for the region
    #[error("Maintenance window not found for region: {0}")]
    MaintenanceWindowNotFound(String),

    /// Inconsistent input or missing prior state
    #[error("Internal error: {0}")]
    Internal(String),

    /// Invalid converter configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An extender of the conversion pipeline failed
    #[error("{extender} extender failed: {source}")]
    Extender {
        /// Name of the failed extender
        extender: &'static str,
        /// Underlying error
        #[source]
        source: Box<ConverterError>,
    },
}

impl ConverterError {
    /// True for lookups that found no entry, i.e. the feature does not apply.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConverterError::AuditLogNotFound { .. } | ConverterError::MaintenanceWindowNotFound(_) => true,
            ConverterError::Extender { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
