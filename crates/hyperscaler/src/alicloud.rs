//! Alicloud network layout and provider documents
//!
//! Each zone gets one eighth of the worker network as its `workers` subnet;
//! there is no public/internal split.

use serde::{Deserialize, Serialize};

use crate::cidr::{ensure_disjoint, parse_worker_cidr, validate_zone_names, ZONE_BITS};
use crate::error::HyperscalerError;
use crate::zones::ZoneGenerator;

/// API version of Alicloud provider documents
pub const API_VERSION: &str = "alicloud.provider.extensions.gardener.cloud/v1alpha1";

/// Subnet of one Alicloud zone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone name (e.g., "eu-central-1a")
    pub name: String,

    /// Worker node subnet
    pub workers: String,
}

/// Generates Alicloud zone layouts
#[derive(Debug, Clone, Copy, Default)]
pub struct AlicloudZoneGenerator;

impl ZoneGenerator for AlicloudZoneGenerator {
    type Layout = Vec<Zone>;

    fn generate(&self, worker_cidr: &str, zone_names: &[String]) -> Result<Vec<Zone>, HyperscalerError> {
        let parent = parse_worker_cidr(worker_cidr)?;
        validate_zone_names(zone_names, 1)?;

        let zone_len = parent.prefix_len() + ZONE_BITS;
        let delta = parent.size() >> ZONE_BITS;

        zone_names
            .iter()
            .enumerate()
            .map(|(index, name)| -> Result<Zone, HyperscalerError> {
                let workers = parent.subnet(index as u64 * delta, zone_len)?;
                Ok(Zone {
                    name: name.clone(),
                    workers: workers.to_string(),
                })
            })
            .collect()
    }
}

/// Alicloud `InfrastructureConfig` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// VPC and zone subnets
    pub networks: Networks,
}

/// Alicloud networks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Networks {
    /// VPC
    pub vpc: Vpc,

    /// Per-zone subnets
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// Alicloud VPC
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Vpc {
    /// Existing VPC ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// CIDR of a VPC to create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
}

impl InfrastructureConfig {
    /// Infrastructure document for a new cluster
    pub fn new(worker_cidr: &str, zone_names: &[String]) -> Result<Self, HyperscalerError> {
        Ok(Self {
            api_version: API_VERSION.to_string(),
            kind: "InfrastructureConfig".to_string(),
            networks: Networks {
                vpc: Vpc {
                    id: None,
                    cidr: Some(worker_cidr.to_string()),
                },
                zones: AlicloudZoneGenerator.generate(worker_cidr, zone_names)?,
            },
        })
    }

    /// Names of the zones in the order they were allocated
    pub fn zone_names(&self) -> Vec<String> {
        self.networks.zones.iter().map(|zone| zone.name.clone()).collect()
    }

    /// Copy of this document with `added` zones appended after the existing ones
    pub fn with_added_zones(&self, worker_cidr: &str, added: &[String]) -> Result<Self, HyperscalerError> {
        let mut names = self.zone_names();
        let persisted = names.len();
        names.extend(added.iter().cloned());

        let new_zones: Vec<Zone> = AlicloudZoneGenerator
            .generate(worker_cidr, &names)?
            .into_iter()
            .skip(persisted)
            .collect();
        ensure_disjoint(
            self.networks.zones.iter().map(|zone| zone.workers.as_str()),
            new_zones.iter().map(|zone| zone.workers.as_str()),
        )?;

        let mut updated = self.clone();
        updated.networks.zones.extend(new_zones);
        Ok(updated)
    }
}

/// Alicloud `ControlPlaneConfig` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: "ControlPlaneConfig".to_string(),
        }
    }
}
