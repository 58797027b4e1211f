//! Shoot Custom Resource
//!
//! Subset of the Gardener `core.gardener.cloud/v1beta1` Shoot object that the
//! converter produces. Field names and JSON layout follow the Gardener API so a
//! serialized Shoot can be applied to a Gardener project as-is.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::worker::Worker;

/// ShootSpec defines the desired state of a Gardener cluster
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "Shoot",
    namespaced,
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct ShootSpec {
    /// Access restrictions of the cluster (e.g., "eu-access-only")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_restrictions: Vec<AccessRestrictionWithOptions>,

    /// Cloud profile the shoot is created from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_profile_name: Option<String>,

    /// Control plane settings (high availability)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane: Option<ControlPlane>,

    /// DNS settings
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "dns")]
    #[schemars(rename = "dns")]
    pub dns: Option<Dns>,

    /// Exposure class of the API server endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_class_name: Option<String>,

    /// Ordered list of extensions; the order is significant to Gardener admission
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,

    /// Kubernetes settings
    pub kubernetes: Kubernetes,

    /// Maintenance settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<Maintenance>,

    /// Networking settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<Networking>,

    /// Provider settings (workers and provider configuration documents)
    pub provider: Provider,

    /// Purpose of the cluster (e.g., "production", "evaluation")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// Cloud region
    pub region: String,

    /// Resources referenced by extensions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<NamedResourceReference>,

    /// Name of the secret binding holding the cloud credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_binding_name: Option<String>,

    /// Constraints on the seed hosting the control plane
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_selector: Option<SeedSelector>,

    /// Seed tolerations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
}

/// Named access restriction with its options
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccessRestrictionWithOptions {
    /// Restriction name
    pub name: String,

    /// Restriction options
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

/// Seed label selector
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeedSelector {
    /// Labels the seed must carry
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

/// Control plane settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlane {
    /// High availability settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_availability: Option<HighAvailability>,
}

/// Control plane high availability
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HighAvailability {
    /// Failure tolerance of the control plane
    pub failure_tolerance: FailureTolerance,
}

/// Control plane failure tolerance
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FailureTolerance {
    /// "node" or "zone"
    #[serde(rename = "type")]
    pub tolerance_type: String,
}

/// Shoot DNS settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dns {
    /// External domain of the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Optional cluster add-on
///
/// The `type` is the identity key of an extension.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Extension type (identity key, e.g., "shoot-dns-service")
    #[serde(rename = "type")]
    pub extension_type: String,

    /// Extension-specific configuration document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,

    /// Whether the extension is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// Kubernetes settings of a shoot
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Kubernetes {
    /// Kubernetes version (e.g., "1.31.3")
    #[serde(default)]
    pub version: String,

    /// kube-apiserver settings
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "kubeAPIServer")]
    #[schemars(rename = "kubeAPIServer")]
    pub kube_api_server: Option<KubeApiServerConfig>,
}

/// kube-apiserver settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct KubeApiServerConfig {
    /// Audit policy reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_config: Option<AuditConfig>,

    /// OpenID Connect settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc_config: Option<OidcConfig>,

    /// Service account token settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_config: Option<ServiceAccountConfig>,
}

/// OpenID Connect settings of the kube-apiserver
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OidcConfig {
    /// Client ID
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "clientID")]
    #[schemars(rename = "clientID")]
    pub client_id: Option<String>,

    /// Claim used as the user's groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups_claim: Option<String>,

    /// Prefix prepended to group claims
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups_prefix: Option<String>,

    /// Issuer URL
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "issuerURL")]
    #[schemars(rename = "issuerURL")]
    pub issuer_url: Option<String>,

    /// Claims that must be present with the given values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub required_claims: BTreeMap<String, String>,

    /// Accepted signing algorithms
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signing_algs: Vec<String>,

    /// Claim used as the user name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_claim: Option<String>,

    /// Prefix prepended to user name claims
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_prefix: Option<String>,
}

impl OidcConfig {
    /// True when both client ID and issuer URL are set to non-empty values
    pub fn is_configured(&self) -> bool {
        let set = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        set(&self.client_id) && set(&self.issuer_url)
    }
}

/// Audit settings of the kube-apiserver
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditConfig {
    /// Audit policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_policy: Option<AuditPolicy>,
}

/// Audit policy reference
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditPolicy {
    /// ConfigMap holding the audit policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<ObjectReference>,
}

/// Reference to an object in the same namespace
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    /// Object name
    pub name: String,
}

/// Service account token settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountConfig {
    /// Whether the apiserver may extend token expiration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extend_token_expiration: Option<bool>,

    /// Maximum token validity (Go duration, e.g., "2592000s")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_token_expiration: Option<String>,
}

/// Maintenance settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    /// Automatic updates during the maintenance window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_update: Option<MaintenanceAutoUpdate>,

    /// Daily maintenance window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<MaintenanceTimeWindow>,
}

/// Automatic update switches
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAutoUpdate {
    /// Update Kubernetes patch versions automatically
    pub kubernetes_version: bool,

    /// Update machine image versions automatically
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_image_version: Option<bool>,
}

/// Daily maintenance window (`HHMMSS+ZZZZ` time-of-day strings)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTimeWindow {
    /// Window start
    pub begin: String,

    /// Window end
    pub end: String,
}

/// Networking settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    /// Network plugin (e.g., "calico")
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub networking_type: Option<String>,

    /// IP families of the cluster network
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_families: Vec<IpFamily>,

    /// Node (worker) CIDR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<String>,

    /// Pod CIDR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods: Option<String>,

    /// Service CIDR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
}

/// IP family of the cluster network
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum IpFamily {
    /// IPv4
    IPv4,

    /// IPv6
    IPv6,
}

/// Provider settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Provider type (e.g., "aws")
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Provider control plane document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane_config: Option<serde_json::Value>,

    /// Provider infrastructure document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure_config: Option<serde_json::Value>,

    /// Ordered worker pools
    #[serde(default)]
    pub workers: Vec<Worker>,

    /// Settings applying to all workers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers_settings: Option<WorkersSettings>,
}

/// Settings applying to all worker pools
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkersSettings {
    /// SSH access to worker nodes
    #[serde(default, rename = "sshAccess", skip_serializing_if = "Option::is_none")]
    #[schemars(rename = "sshAccess")]
    pub ssh_access: Option<SshAccess>,
}

/// SSH access switch
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SshAccess {
    /// Whether SSH access is enabled
    pub enabled: bool,
}

/// Named reference to a resource in the project namespace
///
/// The `name` is the identity key of a resource entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NamedResourceReference {
    /// Name extensions use to refer to the resource
    pub name: String,

    /// Referenced object
    pub resource_ref: CrossVersionObjectReference,
}

/// Reference to an object of any kind and version
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CrossVersionObjectReference {
    /// API version of the referent
    pub api_version: String,

    /// Kind of the referent
    pub kind: String,

    /// Name of the referent
    pub name: String,
}

/// Seed toleration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    /// Taint key
    pub key: String,

    /// Taint value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
