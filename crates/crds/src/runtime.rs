//! Runtime CRD
//!
//! High-level description of a managed Kubernetes cluster. The converter
//! translates a Runtime into a Gardener Shoot.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gardener::{ControlPlane, OidcConfig, Worker};

/// RuntimeSpec defines the desired shape of a cluster
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[kube(
    group = "infrastructuremanager.kyma-project.io",
    version = "v1",
    kind = "Runtime",
    namespaced,
    status = "RuntimeStatus",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSpec {
    /// Cluster shape
    pub shoot: RuntimeShoot,

    /// Security settings
    #[serde(default)]
    pub security: Security,

    /// Image registry caches to configure on the cluster
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caching: Vec<ImageRegistryCache>,
}

/// Desired cluster shape
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeShoot {
    /// Shoot name
    pub name: String,

    /// Purpose of the cluster (e.g., "production")
    #[serde(default)]
    pub purpose: String,

    /// Platform region the runtime was ordered in (e.g., "cf-eu11")
    #[serde(default)]
    pub platform_region: String,

    /// Cloud region
    pub region: String,

    /// Licence type, propagated as an annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licence_type: Option<String>,

    /// Secret binding holding the cloud credentials
    pub secret_binding_name: String,

    /// Pin the control plane to a seed in the same region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_seed_location: Option<bool>,

    /// Kubernetes settings
    #[serde(default)]
    pub kubernetes: RuntimeKubernetes,

    /// Provider and worker pools
    pub provider: RuntimeProvider,

    /// Network CIDRs
    pub networking: RuntimeNetworking,

    /// Control plane settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane: Option<ControlPlane>,
}

/// Kubernetes settings of a Runtime
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeKubernetes {
    /// Kubernetes version; the configured default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// kube-apiserver settings
    #[serde(default, rename = "kubeAPIServer")]
    #[schemars(rename = "kubeAPIServer")]
    pub kube_api_server: RuntimeApiServer,
}

/// kube-apiserver settings of a Runtime
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeApiServer {
    /// OIDC provider
    #[serde(default)]
    pub oidc_config: OidcConfig,
}

/// Provider and worker pools of a Runtime
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeProvider {
    /// Provider type ("aws", "azure", "alicloud", "openstack")
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Main worker pool (exactly one entry is required)
    pub workers: Vec<Worker>,

    /// Additional worker pools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_workers: Option<Vec<Worker>>,

    /// Pre-supplied infrastructure document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure_config: Option<serde_json::Value>,

    /// Pre-supplied control plane document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_config: Option<serde_json::Value>,
}

impl RuntimeProvider {
    /// Main workers followed by additional workers
    pub fn all_workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers
            .iter()
            .chain(self.additional_workers.iter().flatten())
    }
}

/// Network CIDRs of a Runtime
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeNetworking {
    /// Network plugin; defaults to "calico"
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub networking_type: Option<String>,

    /// Pod CIDR
    pub pods: String,

    /// Node (worker) CIDR, partitioned into zones
    pub nodes: String,

    /// Service CIDR
    pub services: String,

    /// Enable an IPv4/IPv6 dual-stack network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual_stack: Option<bool>,
}

/// Security settings of a Runtime
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    /// Cluster administrators
    #[serde(default)]
    pub administrators: Vec<String>,

    /// Network security
    #[serde(default)]
    pub networking: NetworkingSecurity,
}

/// Network security settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkingSecurity {
    /// Traffic filters
    #[serde(default)]
    pub filter: Filter,
}

/// Traffic filter switches
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Ingress filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<FilterSwitch>,

    /// Egress filter
    #[serde(default)]
    pub egress: FilterSwitch,
}

/// A single filter switch
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterSwitch {
    /// Whether the filter is enabled
    pub enabled: bool,
}

/// Image registry cache requested for a Runtime
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageRegistryCache {
    /// Cache object name
    pub name: String,

    /// Cache object namespace
    #[serde(default)]
    pub namespace: String,

    /// Cache object UID
    #[serde(default, rename = "uid")]
    pub uid: String,

    /// Cache settings
    pub config: RegistryCacheConfig,
}

/// Settings of a single registry cache
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCacheConfig {
    /// Upstream registry host (e.g., "docker.io")
    pub upstream: String,

    /// Remote URL of the upstream registry
    #[serde(default, rename = "remoteURL", skip_serializing_if = "Option::is_none")]
    #[schemars(rename = "remoteURL")]
    pub remote_url: Option<String>,

    /// Cache volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<RegistryCacheVolume>,

    /// Garbage collection of cached images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garbage_collection: Option<RegistryCacheGarbageCollection>,

    /// Secret with upstream credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_reference_name: Option<String>,
}

/// Registry cache volume
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCacheVolume {
    /// Volume size (e.g., "10Gi")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Storage class of the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
}

/// Registry cache garbage collection
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCacheGarbageCollection {
    /// Time to live of cached images (Go duration, e.g., "168h0m0s")
    pub ttl: String,
}

/// RuntimeStatus defines the observed state of a Runtime
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeStatus {
    /// Provisioning state
    #[serde(default)]
    pub state: RuntimeState,

    /// Last reconciliation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reconciled: Option<chrono::DateTime<chrono::Utc>>,
}

/// Runtime provisioning state
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum RuntimeState {
    /// Provisioning not finished
    #[default]
    Pending,

    /// Cluster provisioned and in sync
    Ready,

    /// Cluster being deleted
    Terminating,

    /// Provisioning failed
    Failed,
}

impl Runtime {
    /// Value of a label on the Runtime object
    pub fn label(&self, key: &str) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(key))
            .map(String::as_str)
    }
}
