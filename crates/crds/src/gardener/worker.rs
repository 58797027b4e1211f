//! Gardener worker pool types
//!
//! Shared between the Runtime CRD (desired worker pools) and the Shoot
//! (provisioned worker pools).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named group of homogeneous cluster nodes
///
/// The `name` is the identity key of a worker pool; everything else may change
/// between reconciliations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Worker pool name (identity key)
    pub name: String,

    /// Machine type and image
    pub machine: Machine,

    /// Minimum number of machines
    pub minimum: i32,

    /// Maximum number of machines
    pub maximum: i32,

    /// Maximum number of machines created above the desired count during a rolling update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<i32>,

    /// Maximum number of machines that may be unavailable during a rolling update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<i32>,

    /// Availability zones the pool spans
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,

    /// Root volume of each machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,

    /// Provider-specific worker configuration (opaque document)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,

    /// How machines of this pool are updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_strategy: Option<MachineUpdateStrategy>,
}

impl Worker {
    /// Name of the machine image, if one is set
    pub fn image_name(&self) -> Option<&str> {
        self.machine.image.as_ref().map(|image| image.name.as_str())
    }
}

/// Machine type and image of a worker pool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Cloud machine type (e.g., "m6i.large")
    #[serde(rename = "type")]
    pub machine_type: String,

    /// Machine image; the provider extender fills in a default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ShootMachineImage>,

    /// CPU architecture (e.g., "amd64")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
}

/// Machine image name and version
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShootMachineImage {
    /// Image name (e.g., "gardenlinux")
    pub name: String,

    /// Dot-separated numeric version (e.g., "1592.1.0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Machine root volume
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Volume type (provider specific)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,

    /// Volume size (e.g., "50Gi")
    pub size: String,
}

/// Machine update strategy of a worker pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum MachineUpdateStrategy {
    /// Replace machines one by one
    AutoRollingUpdate,

    /// Update machines in place automatically
    AutoInPlaceUpdate,

    /// Update machines in place on explicit request
    ManualInPlaceUpdate,
}
