//! Azure network layout and provider documents
//!
//! Azure zones are numbered. Each zone gets one eighth of the worker network
//! and a NAT gateway. Clusters without zones ("lite" clusters) put the whole
//! worker network into a single non-zoned subnet.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cidr::{ensure_disjoint, parse_worker_cidr, validate_zone_names, ZONE_BITS};
use crate::error::HyperscalerError;
use crate::zones::ZoneGenerator;

/// API version of Azure provider documents
pub const API_VERSION: &str = "azure.provider.extensions.gardener.cloud/v1alpha1";

/// Idle timeout of zone NAT gateways in minutes
pub const DEFAULT_IDLE_CONNECTION_TIMEOUT_MINUTES: i32 = 4;

/// Highest Azure zone number
const MAX_ZONE_NUMBER: i32 = 8;

/// Subnet of one Azure zone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone number (1-8)
    pub name: i32,

    /// Zone subnet
    pub cidr: String,

    /// NAT gateway of the zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway: Option<NatGateway>,
}

/// NAT gateway settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NatGateway {
    /// Whether a NAT gateway is deployed
    pub enabled: bool,

    /// Idle connection timeout in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_connection_timeout_minutes: Option<i32>,
}

impl NatGateway {
    fn with_default_timeout() -> Self {
        Self {
            enabled: true,
            idle_connection_timeout_minutes: Some(DEFAULT_IDLE_CONNECTION_TIMEOUT_MINUTES),
        }
    }
}

/// Generates Azure zone layouts
///
/// Zone names that are not numbers between 1 and 8 are skipped. An empty zone
/// list is valid and yields an empty layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureZoneGenerator;

impl ZoneGenerator for AzureZoneGenerator {
    type Layout = Vec<Zone>;

    fn generate(&self, worker_cidr: &str, zone_names: &[String]) -> Result<Vec<Zone>, HyperscalerError> {
        let parent = parse_worker_cidr(worker_cidr)?;
        validate_zone_names(zone_names, 0)?;

        let zone_len = parent.prefix_len() + ZONE_BITS;
        let delta = parent.size() >> ZONE_BITS;

        let mut numbers = Vec::with_capacity(zone_names.len());
        let mut seen = HashSet::new();
        for name in zone_names {
            match name.parse::<i32>() {
                Ok(number) if (1..=MAX_ZONE_NUMBER).contains(&number) => {
                    if !seen.insert(number) {
                        return Err(HyperscalerError::DuplicateZone(name.clone()));
                    }
                    numbers.push(number);
                }
                _ => debug!("Skipping non-numeric Azure zone {}", name),
            }
        }

        numbers
            .into_iter()
            .enumerate()
            .map(|(index, number)| -> Result<Zone, HyperscalerError> {
                let subnet = parent.subnet(index as u64 * delta, zone_len)?;
                Ok(Zone {
                    name: number,
                    cidr: subnet.to_string(),
                    nat_gateway: Some(NatGateway::with_default_timeout()),
                })
            })
            .collect()
    }
}

/// Azure `InfrastructureConfig` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// VNet and subnets
    pub networks: Networks,

    /// Whether the cluster spans availability zones
    #[serde(default)]
    pub zoned: bool,
}

/// Azure networks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Networks {
    /// Virtual network
    pub vnet: VNet,

    /// Worker subnet of a non-zoned cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<String>,

    /// NAT gateway of a non-zoned cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway: Option<NatGateway>,

    /// Per-zone subnets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<Zone>,
}

/// Azure virtual network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VNet {
    /// Name of an existing VNet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Resource group of an existing VNet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,

    /// CIDR of a VNet to create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
}

impl InfrastructureConfig {
    /// Infrastructure document for a new cluster
    ///
    /// Without usable zones the document describes a non-zoned cluster.
    pub fn new(worker_cidr: &str, zone_names: &[String]) -> Result<Self, HyperscalerError> {
        let zones = AzureZoneGenerator.generate(worker_cidr, zone_names)?;
        let vnet = VNet {
            cidr: Some(worker_cidr.to_string()),
            ..Default::default()
        };

        let (networks, zoned) = if zones.is_empty() {
            let networks = Networks {
                vnet,
                workers: Some(worker_cidr.to_string()),
                ..Default::default()
            };
            (networks, false)
        } else {
            let networks = Networks {
                vnet,
                zones,
                ..Default::default()
            };
            (networks, true)
        };

        Ok(Self {
            api_version: API_VERSION.to_string(),
            kind: "InfrastructureConfig".to_string(),
            networks,
            zoned,
        })
    }

    /// Zone numbers, as strings, in the order they were allocated
    pub fn zone_names(&self) -> Vec<String> {
        self.networks.zones.iter().map(|zone| zone.name.to_string()).collect()
    }

    /// Copy of this document with `added` zones appended after the existing ones
    ///
    /// Persisted zones are kept as they are; added zones must not overlap them.
    pub fn with_added_zones(&self, worker_cidr: &str, added: &[String]) -> Result<Self, HyperscalerError> {
        let mut names = self.zone_names();
        names.extend(added.iter().cloned());

        let new_zones: Vec<Zone> = AzureZoneGenerator
            .generate(worker_cidr, &names)?
            .into_iter()
            .filter(|zone| !self.networks.zones.iter().any(|existing| existing.name == zone.name))
            .collect();
        ensure_disjoint(
            self.networks.zones.iter().map(|zone| zone.cidr.as_str()),
            new_zones.iter().map(|zone| zone.cidr.as_str()),
        )?;

        let mut updated = self.clone();
        updated.networks.zones.extend(new_zones);
        updated.zoned = !updated.networks.zones.is_empty();
        Ok(updated)
    }
}

/// Azure `ControlPlaneConfig` document
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
