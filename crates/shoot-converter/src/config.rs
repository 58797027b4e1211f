//! Converter configuration
//!
//! Loaded once by the hosting process from a JSON document and validated
//! before any conversion runs. A configuration that fails validation is fatal
//! at startup.

use std::io::Read;

use crds::OidcConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ConverterError;

/// Complete converter configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConverterConfig {
    /// Kubernetes defaults
    #[validate(nested)]
    pub kubernetes: KubernetesConfig,

    /// Shoot DNS settings
    #[validate(nested)]
    pub dns: DnsConfig,

    /// Provider specific switches
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Machine image defaults
    #[validate(nested)]
    pub machine_image: MachineImageConfig,

    /// Gardener project settings
    #[validate(nested)]
    pub gardener: GardenerConfig,

    /// Audit logging settings
    #[validate(nested)]
    pub audit_logging: AuditLogConfig,

    /// Maintenance window settings
    #[serde(default)]
    pub maintenance_window: MaintenanceWindowConfig,
}

/// Kubernetes defaults
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesConfig {
    /// Version used when the Runtime does not request one
    #[validate(length(min = 1))]
    pub default_version: String,

    /// Let Gardener update the Kubernetes patch version
    #[serde(default)]
    pub enable_kubernetes_version_auto_update: bool,

    /// Let Gardener update machine image versions
    #[serde(default)]
    pub enable_machine_image_version_auto_update: bool,

    /// OIDC provider used when the Runtime does not configure one
    #[serde(default)]
    pub default_operator_oidc: OidcConfig,
}

/// Shoot DNS settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DnsConfig {
    /// Secret holding the DNS provider credentials
    #[validate(length(min = 1))]
    pub secret_name: String,

    /// Domain suffix appended to the shoot name
    #[validate(length(min = 1))]
    pub domain_prefix: String,

    /// DNS provider type (e.g., "aws-route53")
    #[validate(length(min = 1))]
    pub provider_type: String,
}

/// Provider specific switches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// AWS switches
    #[serde(default)]
    pub aws: AwsConfig,
}

/// AWS switches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AwsConfig {
    /// Enforce IMDSv2 on worker nodes
    #[serde(default, rename = "enableIMDSv2")]
    pub enable_imds_v2: bool,
}

/// Machine image defaults
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MachineImageConfig {
    /// Image name used when a worker does not set one
    #[validate(length(min = 1))]
    pub default_name: String,

    /// Image version used when a worker does not set one
    #[validate(length(min = 1))]
    pub default_version: String,
}

/// Gardener project settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GardenerConfig {
    /// Gardener project; shoots live in `garden-<projectName>`
    #[validate(length(min = 1))]
    pub project_name: String,
}

/// Audit logging settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogConfig {
    /// ConfigMap holding the audit policy
    #[validate(length(min = 1))]
    pub policy_config_map_name: String,

    /// Path of the audit log tenant file, read by the hosting process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_config_path: Option<String>,
}

/// Maintenance window settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindowConfig {
    /// Path of the region to window mapping, read by the hosting process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_map_path: Option<String>,
}

impl ConverterConfig {
    /// Parse a JSON configuration document and validate it
    pub fn load<R: Read>(reader: R) -> Result<Self, ConverterError> {
        let config: ConverterConfig = serde_json::from_reader(reader)
            .map_err(|e| ConverterError::Config(format!("Failed to parse converter config: {}", e)))?;
        config
            .validate()
            .map_err(|e| ConverterError::Config(format!("Invalid converter config: {}", e)))?;
        Ok(config)
    }

    /// Namespace of the Gardener project
    pub fn project_namespace(&self) -> String {
        format!("garden-{}", self.gardener.project_name)
    }
}
