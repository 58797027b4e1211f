//! OpenStack network layout and provider documents
//!
//! OpenStack clusters use a single worker network regardless of zones.

use serde::{Deserialize, Serialize};

use crate::cidr::{parse_worker_cidr, validate_zone_names};
use crate::error::HyperscalerError;
use crate::zones::ZoneGenerator;

/// API version of OpenStack provider documents
pub const API_VERSION: &str = "openstack.provider.extensions.gardener.cloud/v1alpha1";

/// Floating IP pool of new clusters
pub const DEFAULT_FLOATING_POOL_NAME: &str = "FloatingIP-external-kyma-01";

/// Load balancer provider of new clusters
pub const DEFAULT_LOAD_BALANCER_PROVIDER: &str = "f5";

/// OpenStack networks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Networks {
    /// Worker network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<String>,
}

/// Generates the OpenStack network layout
///
/// Zone names are validated but do not influence the layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenStackZoneGenerator;

impl ZoneGenerator for OpenStackZoneGenerator {
    type Layout = Networks;

    fn generate(&self, worker_cidr: &str, zone_names: &[String]) -> Result<Networks, HyperscalerError> {
        let cidr = parse_worker_cidr(worker_cidr)?;
        validate_zone_names(zone_names, 0)?;

        Ok(Networks {
            workers: Some(cidr.to_string()),
        })
    }
}

/// OpenStack `InfrastructureConfig` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// Floating IP pool
    pub floating_pool_name: String,

    /// Worker network
    pub networks: Networks,
}

impl InfrastructureConfig {
    /// Infrastructure document for a new cluster
    pub fn new(worker_cidr: &str, zone_names: &[String]) -> Result<Self, HyperscalerError> {
        Ok(Self {
            api_version: API_VERSION.to_string(),
            kind: "InfrastructureConfig".to_string(),
            floating_pool_name: DEFAULT_FLOATING_POOL_NAME.to_string(),
            networks: OpenStackZoneGenerator.generate(worker_cidr, zone_names)?,
        })
    }
}

/// OpenStack `ControlPlaneConfig` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// Load balancer provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_provider: Option<String>,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: "ControlPlaneConfig".to_string(),
            load_balancer_provider: Some(DEFAULT_LOAD_BALANCER_PROVIDER.to_string()),
        }
    }
}
