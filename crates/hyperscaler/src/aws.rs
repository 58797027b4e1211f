//! AWS network layout and provider documents
//!
//! Each zone gets three ranges: `workers`, `public` and `internal`. The first
//! three zones use the historical layout (a quarter of the worker network per
//! zone); zones four to eight share the last quarter in smaller blocks. For a
//! `/16` worker network:
//!
//! ```text
//! zone  workers          public           internal
//! 1     10.250.0.0/19    10.250.32.0/20   10.250.48.0/20
//! 2     10.250.64.0/19   10.250.96.0/20   10.250.112.0/20
//! 3     10.250.128.0/19  10.250.160.0/20  10.250.176.0/20
//! 4     10.250.192.0/22  10.250.196.0/22  10.250.200.0/22
//! ...
//! 8     10.250.240.0/22  10.250.244.0/22  10.250.248.0/22
//! ```

use serde::{Deserialize, Serialize};

use crate::cidr::{ensure_disjoint, parse_worker_cidr, validate_zone_names, Ipv4Cidr, ZONE_BITS};
use crate::error::HyperscalerError;
use crate::zones::ZoneGenerator;

/// API version of AWS provider documents
pub const API_VERSION: &str = "aws.provider.extensions.gardener.cloud/v1alpha1";

/// Zones laid out with the large historical blocks
const LARGE_ZONES: usize = 3;

/// Hop limit of the instance metadata service when IMDSv2 is enforced
const IMDS_HOP_LIMIT: i64 = 2;

/// Subnets of one AWS availability zone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Availability zone name (e.g., "eu-central-1a")
    pub name: String,

    /// Worker node subnet
    pub workers: String,

    /// Public (load balancer) subnet
    pub public: String,

    /// Internal subnet
    pub internal: String,
}

impl Zone {
    fn subnets(&self) -> [&str; 3] {
        [self.workers.as_str(), self.public.as_str(), self.internal.as_str()]
    }
}

/// Generates AWS zone layouts
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsZoneGenerator;

impl AwsZoneGenerator {
    fn zone(parent: &Ipv4Cidr, index: usize, name: &str) -> Result<Zone, HyperscalerError> {
        let size = parent.size();
        let bits = parent.prefix_len();
        let index = index as u64;

        let (block, workers_len, range_len) = if index < LARGE_ZONES as u64 {
            (index * (size / 4), bits + ZONE_BITS, bits + ZONE_BITS + 1)
        } else {
            let small = size / 64;
            ((3 * size / 4) + (index - LARGE_ZONES as u64) * 3 * small, bits + 6, bits + 6)
        };

        let workers = parent.subnet(block, workers_len)?;
        let public = parent.subnet(block + workers.size(), range_len)?;
        let internal = parent.subnet(block + workers.size() + public.size(), range_len)?;

        Ok(Zone {
            name: name.to_string(),
            workers: workers.to_string(),
            public: public.to_string(),
            internal: internal.to_string(),
        })
    }
}

impl ZoneGenerator for AwsZoneGenerator {
    type Layout = Vec<Zone>;

    fn generate(&self, worker_cidr: &str, zone_names: &[String]) -> Result<Vec<Zone>, HyperscalerError> {
        let parent = parse_worker_cidr(worker_cidr)?;
        validate_zone_names(zone_names, 1)?;

        zone_names
            .iter()
            .enumerate()
            .map(|(index, name)| Self::zone(&parent, index, name))
            .collect()
    }
}

/// AWS `InfrastructureConfig` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// VPC and zone subnets
    pub networks: Networks,

    /// Dual-stack switch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual_stack: Option<DualStack>,
}

/// AWS networks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Networks {
    /// VPC
    pub vpc: Vpc,

    /// Per-zone subnets
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// AWS VPC; either an existing VPC ID or a CIDR for a new VPC
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

/// Dual-stack switch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DualStack {
    /// Whether IPv6 is enabled alongside IPv4
    pub enabled: bool,
}

impl InfrastructureConfig {
    /// Infrastructure document for a new cluster
    pub fn new(worker_cidr: &str, zone_names: &[String], dual_stack: bool) -> Result<Self, HyperscalerError> {
        Ok(Self {
            api_version: API_VERSION.to_string(),
            kind: "InfrastructureConfig".to_string(),
            networks: Networks {
                vpc: Vpc {
                    id: None,
                    cidr: Some(worker_cidr.to_string()),
                },
                zones: AwsZoneGenerator.generate(worker_cidr, zone_names)?,
            },
            dual_stack: dual_stack.then_some(DualStack { enabled: true }),
        })
    }

    /// Names of the zones in the order they were allocated
    pub fn zone_names(&self) -> Vec<String> {
        self.networks.zones.iter().map(|zone| zone.name.clone()).collect()
    }

    /// Copy of this document with `added` zones appended after the existing ones
    ///
    /// Persisted zones are kept as they are, even when their subnets differ from
    /// the generated layout. Added zones get the subnets of their position and
    /// must not overlap any persisted subnet.
    pub fn with_added_zones(&self, worker_cidr: &str, added: &[String]) -> Result<Self, HyperscalerError> {
        let mut names = self.zone_names();
        let persisted = names.len();
        names.extend(added.iter().cloned());

        let new_zones: Vec<Zone> = AwsZoneGenerator
            .generate(worker_cidr, &names)?
            .into_iter()
            .skip(persisted)
            .collect();
        ensure_disjoint(
            self.networks.zones.iter().flat_map(Zone::subnets),
            new_zones.iter().flat_map(Zone::subnets),
        )?;

        let mut updated = self.clone();
        updated.networks.zones.extend(new_zones);
        Ok(updated)
    }
}

/// AWS `ControlPlaneConfig` document
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

/// AWS `WorkerConfig` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// Instance metadata service options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_metadata_options: Option<InstanceMetadataOptions>,
}

/// Instance metadata service options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InstanceMetadataOptions {
    /// "required" enforces IMDSv2 session tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_tokens: Option<String>,

    /// Hop limit of metadata responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_put_response_hop_limit: Option<i64>,
}

impl WorkerConfig {
    /// Worker document enforcing IMDSv2
    pub fn imds_v2() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: "WorkerConfig".to_string(),
            instance_metadata_options: Some(InstanceMetadataOptions {
                http_tokens: Some("required".to_string()),
                http_put_response_hop_limit: Some(IMDS_HOP_LIMIT),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(zones: &[&str]) -> Vec<String> {
        zones.iter().map(|z| z.to_string()).collect()
    }

    fn zone(name: &str, workers: &str, public: &str, internal: &str) -> Zone {
        Zone {
            name: name.to_string(),
            workers: workers.to_string(),
            public: public.to_string(),
            internal: internal.to_string(),
        }
    }

    #[test]
    fn test_three_zones_use_historical_layout() {
        let zones = AwsZoneGenerator
            .generate("10.250.0.0/16", &names(&["eu-central-1a", "eu-central-1b", "eu-central-1c"]))
            .expect("valid layout");

        assert_eq!(
            zones,
            vec![
                zone("eu-central-1a", "10.250.0.0/19", "10.250.32.0/20", "10.250.48.0/20"),
                zone("eu-central-1b", "10.250.64.0/19", "10.250.96.0/20", "10.250.112.0/20"),
                zone("eu-central-1c", "10.250.128.0/19", "10.250.160.0/20", "10.250.176.0/20"),
            ]
        );
    }

    #[test]
    fn test_fourth_zone_takes_next_free_block() {
        let zones = AwsZoneGenerator
            .generate(
                "10.250.0.0/16",
                &names(&["eu-central-1a", "eu-central-1b", "eu-central-1c", "eu-central-1d"]),
            )
            .expect("valid layout");

        assert_eq!(zones[0], zone("eu-central-1a", "10.250.0.0/19", "10.250.32.0/20", "10.250.48.0/20"));
        assert_eq!(zones[3], zone("eu-central-1d", "10.250.192.0/22", "10.250.196.0/22", "10.250.200.0/22"));
    }

    #[test]
    fn test_eight_zones_fit_in_worker_network() {
        let all = names(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let zones = AwsZoneGenerator.generate("10.250.0.0/16", &all).expect("valid layout");

        assert_eq!(zones[7], zone("h", "10.250.240.0/22", "10.250.244.0/22", "10.250.248.0/22"));

        let parent: Ipv4Cidr = "10.250.0.0/16".parse().expect("valid CIDR");
        for zone in &zones {
            for range in [&zone.workers, &zone.public, &zone.internal] {
                let subnet: Ipv4Cidr = range.parse().expect("valid CIDR");
                assert!(parent.contains(&subnet), "{range} escapes parent");
            }
        }
    }

    #[test]
    fn test_layout_is_append_stable() {
        let all = names(&["z1", "z2", "z3", "z4", "z5", "z6", "z7", "z8"]);
        for cidr in ["10.250.0.0/16", "10.180.0.0/20", "192.168.10.0/24"] {
            let full = AwsZoneGenerator.generate(cidr, &all).expect("valid layout");
            for k in 1..=all.len() {
                let prefix = AwsZoneGenerator.generate(cidr, &all[..k]).expect("valid layout");
                assert_eq!(prefix[..], full[..k], "{cidr} with {k} zones");
            }
        }
    }

    #[test]
    fn test_zone_order_is_not_sorted() {
        let zones = AwsZoneGenerator
            .generate("10.250.0.0/16", &names(&["eu-central-1c", "eu-central-1a"]))
            .expect("valid layout");

        assert_eq!(zones[0].name, "eu-central-1c");
        assert_eq!(zones[0].workers, "10.250.0.0/19");
    }

    #[test]
    fn test_rejects_empty_and_duplicate_zones() {
        assert!(matches!(
            AwsZoneGenerator.generate("10.250.0.0/16", &[]),
            Err(HyperscalerError::ZoneCount { count: 0, .. })
        ));
        assert!(matches!(
            AwsZoneGenerator.generate("10.250.0.0/16", &names(&["a", "a"])),
            Err(HyperscalerError::DuplicateZone(_))
        ));
        assert!(matches!(
            AwsZoneGenerator.generate("10.250.0.0/12", &names(&["a"])),
            Err(HyperscalerError::UnsupportedPrefixLength { .. })
        ));
    }

    #[test]
    fn test_with_added_zones_keeps_existing_subnets() {
        let existing = InfrastructureConfig::new("10.250.0.0/16", &names(&["eu-central-1a"]), false)
            .expect("valid document");
        let updated = existing
            .with_added_zones("10.250.0.0/16", &names(&["eu-central-1b"]))
            .expect("valid document");

        assert_eq!(updated.networks.zones[0], existing.networks.zones[0]);
        assert_eq!(updated.zone_names(), names(&["eu-central-1a", "eu-central-1b"]));
        assert_eq!(updated.networks.vpc, existing.networks.vpc);
    }

    #[test]
    fn test_with_added_zones_keeps_persisted_subnets_verbatim() {
        let mut existing = InfrastructureConfig::new("10.250.0.0/16", &names(&["eu-central-1a"]), false)
            .expect("valid document");
        existing.networks.zones[0] = zone("eu-central-1a", "10.250.128.0/19", "10.250.160.0/20", "10.250.176.0/20");

        let updated = existing
            .with_added_zones("10.250.0.0/16", &names(&["eu-central-1b"]))
            .expect("valid document");

        assert_eq!(updated.networks.zones[0], existing.networks.zones[0]);
        assert_eq!(
            updated.networks.zones[1],
            zone("eu-central-1b", "10.250.64.0/19", "10.250.96.0/20", "10.250.112.0/20")
        );
    }

    #[test]
    fn test_with_added_zones_rejects_overlap_with_persisted_subnets() {
        let mut existing = InfrastructureConfig::new("10.250.0.0/16", &names(&["eu-central-1a"]), false)
            .expect("valid document");
        existing.networks.zones[0] = zone("eu-central-1a", "10.250.64.0/19", "10.250.96.0/20", "10.250.112.0/20");

        let result = existing.with_added_zones("10.250.0.0/16", &names(&["eu-central-1b"]));
        assert!(matches!(result, Err(HyperscalerError::SubnetOverlap { .. })));
    }

    #[test]
    fn test_document_wire_format() {
        let config = InfrastructureConfig::new("10.250.0.0/16", &names(&["eu-central-1a"]), true)
            .expect("valid document");
        let value = serde_json::to_value(&config).expect("serializable");

        assert_eq!(value["apiVersion"], API_VERSION);
        assert_eq!(value["kind"], "InfrastructureConfig");
        assert_eq!(value["networks"]["vpc"]["cidr"], "10.250.0.0/16");
        assert_eq!(value["networks"]["zones"][0]["internal"], "10.250.48.0/20");
        assert_eq!(value["dualStack"]["enabled"], true);

        let worker = serde_json::to_value(WorkerConfig::imds_v2()).expect("serializable");
        assert_eq!(worker["instanceMetadataOptions"]["httpTokens"], "required");
        assert_eq!(worker["instanceMetadataOptions"]["httpPutResponseHopLimit"], 2);
    }
}
