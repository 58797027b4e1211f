//! Provider configuration documents of Gardener shoot extensions
//!
//! A Shoot carries these documents as opaque JSON in
//! `spec.extensions[].providerConfig`. The typed forms are used to build them
//! and to compare them structurally.

use serde::{Deserialize, Serialize};

use crate::runtime::{RegistryCacheGarbageCollection, RegistryCacheVolume};

/// Network filter extension
pub const NETWORK_FILTER_EXTENSION_TYPE: &str = "shoot-networking-filter";

/// Certificate service extension
pub const CERT_EXTENSION_TYPE: &str = "shoot-cert-service";

/// DNS service extension
pub const DNS_EXTENSION_TYPE: &str = "shoot-dns-service";

/// OIDC service extension
pub const OIDC_EXTENSION_TYPE: &str = "shoot-oidc-service";

/// Audit log service extension
pub const AUDITLOG_EXTENSION_TYPE: &str = "shoot-auditlog-service";

/// Registry cache extension
pub const REGISTRY_CACHE_EXTENSION_TYPE: &str = "registry-cache";

/// API version of `CertConfig`
pub const CERT_CONFIG_API_VERSION: &str = "service.cert.extensions.gardener.cloud/v1alpha1";

/// API version of `DNSConfig`
pub const DNS_CONFIG_API_VERSION: &str = "service.dns.extensions.gardener.cloud/v1alpha1";

/// API version of `AuditlogConfig`
pub const AUDITLOG_CONFIG_API_VERSION: &str = "service.auditlog.extensions.gardener.cloud/v1alpha1";

/// API version of `RegistryConfig`
pub const REGISTRY_CONFIG_API_VERSION: &str = "registry.extensions.gardener.cloud/v1alpha3";

/// Certificate service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// Certificate issuers managed inside the shoot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoot_issuers: Option<ShootIssuers>,
}

/// Shoot issuer switch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShootIssuers {
    /// Whether issuers can be created in the shoot
    pub enabled: bool,
}

/// DNS service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// Replication of DNS providers into the shoot
    #[serde(default, rename = "dnsProviderReplication", skip_serializing_if = "Option::is_none")]
    pub dns_provider_replication: Option<DnsProviderReplication>,

    /// DNS providers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<DnsProvider>,

    /// Whether providers are taken from `spec.dns` of the Shoot
    #[serde(default, rename = "syncProvidersFromShootSpecDNS", skip_serializing_if = "Option::is_none")]
    pub sync_providers_from_shoot_spec_dns: Option<bool>,
}

/// DNS provider replication switch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsProviderReplication {
    /// Whether providers are replicated
    pub enabled: bool,
}

/// One DNS provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsProvider {
    /// Domains the provider serves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<DnsIncludeExclude>,

    /// Credentials secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,

    /// Provider type (e.g., "aws-route53")
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
}

/// Include and exclude lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DnsIncludeExclude {
    /// Included entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Excluded entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Audit log service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditlogConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// Audit log backend type
    #[serde(rename = "type")]
    pub audit_type: String,

    /// Tenant of the audit log service
    #[serde(rename = "tenantID")]
    pub tenant_id: String,

    /// Audit log service endpoint
    #[serde(rename = "serviceURL")]
    pub service_url: String,

    /// Name of the Shoot resource holding the credentials
    pub secret_reference_name: String,
}

/// Registry cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Document API version
    pub api_version: String,

    /// Document kind
    pub kind: String,

    /// Pull-through caches
    #[serde(default)]
    pub caches: Vec<RegistryCache>,
}

/// One pull-through cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCache {
    /// Upstream registry host
    pub upstream: String,

    /// Upstream URL
    #[serde(default, rename = "remoteURL", skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,

    /// Cache volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<RegistryCacheVolume>,

    /// Garbage collection settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garbage_collection: Option<RegistryCacheGarbageCollection>,

    /// Name of the Shoot resource holding upstream credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_reference_name: Option<String>,
}
