//! Shoot extensions
//!
//! Entries are keyed by extension type. New Shoots get the extensions in the
//! canonical order below. For existing Shoots every entry is replaced in place
//! and unknown types are appended, so Gardener never sees a reordering.
//!
//! 1. network filter (disabled unless egress filtering is requested)
//! 2. certificate service
//! 3. DNS service
//! 4. OIDC service
//! 5. audit log service (only with audit log data for the region)
//! 6. registry cache (only with configured caches)
//!
//! Missing audit log data or caches never remove an existing entry.

use crds::extensions::{
    AuditlogConfig, CertConfig, DnsConfig, DnsIncludeExclude, DnsProvider, DnsProviderReplication, RegistryCache,
    RegistryConfig, ShootIssuers, AUDITLOG_CONFIG_API_VERSION, AUDITLOG_EXTENSION_TYPE, CERT_CONFIG_API_VERSION,
    CERT_EXTENSION_TYPE, DNS_CONFIG_API_VERSION, DNS_EXTENSION_TYPE, NETWORK_FILTER_EXTENSION_TYPE,
    OIDC_EXTENSION_TYPE, REGISTRY_CACHE_EXTENSION_TYPE, REGISTRY_CONFIG_API_VERSION,
};
use crds::{Extension, ImageRegistryCache, Runtime, Shoot};
use serde::Serialize;
use tracing::debug;

use super::audit_log::AUDITLOG_CREDENTIALS_RESOURCE;
use super::Extender;
use crate::auditlog::{AuditLogData, AuditLogs};
use crate::error::ConverterError;
use crate::keyed::KeyedList;

/// Builds and merges the extension list
#[derive(Debug, Clone)]
pub struct ExtensionsExtender {
    dns_secret_name: String,
    dns_provider_type: String,
    audit_logs: AuditLogs,
}

impl ExtensionsExtender {
    /// Extender using the DNS provider credentials and audit log tenants
    pub fn new(dns_secret_name: impl Into<String>, dns_provider_type: impl Into<String>, audit_logs: AuditLogs) -> Self {
        Self {
            dns_secret_name: dns_secret_name.into(),
            dns_provider_type: dns_provider_type.into(),
            audit_logs,
        }
    }

    fn dns_extension(&self, domain: &str) -> Result<Extension, ConverterError> {
        let config = DnsConfig {
            api_version: DNS_CONFIG_API_VERSION.to_string(),
            kind: "DNSConfig".to_string(),
            dns_provider_replication: Some(DnsProviderReplication { enabled: true }),
            providers: vec![DnsProvider {
                domains: Some(DnsIncludeExclude {
                    include: vec![domain.to_string()],
                    exclude: Vec::new(),
                }),
                secret_name: Some(self.dns_secret_name.clone()),
                provider_type: Some(self.dns_provider_type.clone()),
            }],
            sync_providers_from_shoot_spec_dns: Some(false),
        };
        configured_extension(DNS_EXTENSION_TYPE, &config)
    }
}

impl Extender for ExtensionsExtender {
    fn name(&self) -> &'static str {
        "extensions"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let domain = shoot
            .spec
            .dns
            .as_ref()
            .and_then(|dns| dns.domain.clone())
            .ok_or_else(|| ConverterError::Internal("Shoot domain must be set before extensions".to_string()))?;

        let mut extensions = KeyedList::from(std::mem::take(&mut shoot.spec.extensions));

        extensions.upsert(network_filter_extension(runtime));
        extensions.upsert(cert_extension()?);
        extensions.upsert(self.dns_extension(&domain)?);
        extensions.upsert(plain_extension(OIDC_EXTENSION_TYPE, false));

        let provider = &runtime.spec.shoot.provider.provider_type;
        let region = &runtime.spec.shoot.region;
        match self.audit_logs.get(provider, region) {
            Ok(data) => extensions.upsert(auditlog_extension(data)?),
            Err(e) if e.is_not_found() => debug!("No audit log extension for {} in {}", provider, region),
            Err(e) => return Err(e),
        }

        if !runtime.spec.caching.is_empty() {
            extensions.upsert(registry_cache_extension(&runtime.spec.caching)?);
        }

        shoot.spec.extensions = extensions.into_vec();
        Ok(())
    }
}

fn plain_extension(extension_type: &str, disabled: bool) -> Extension {
    Extension {
        extension_type: extension_type.to_string(),
        provider_config: None,
        disabled: Some(disabled),
    }
}

fn configured_extension<T: Serialize>(extension_type: &str, config: &T) -> Result<Extension, ConverterError> {
    Ok(Extension {
        extension_type: extension_type.to_string(),
        provider_config: Some(serde_json::to_value(config)?),
        disabled: Some(false),
    })
}

// Ingress filtering is not emitted; the extension only follows the egress switch.
fn network_filter_extension(runtime: &Runtime) -> Extension {
    let egress = runtime.spec.security.networking.filter.egress.enabled;
    plain_extension(NETWORK_FILTER_EXTENSION_TYPE, !egress)
}

fn cert_extension() -> Result<Extension, ConverterError> {
    let config = CertConfig {
        api_version: CERT_CONFIG_API_VERSION.to_string(),
        kind: "CertConfig".to_string(),
        shoot_issuers: Some(ShootIssuers { enabled: true }),
    };
    configured_extension(CERT_EXTENSION_TYPE, &config)
}

fn auditlog_extension(data: &AuditLogData) -> Result<Extension, ConverterError> {
    let config = AuditlogConfig {
        api_version: AUDITLOG_CONFIG_API_VERSION.to_string(),
        kind: "AuditlogConfig".to_string(),
        audit_type: "standard".to_string(),
        tenant_id: data.tenant_id.clone(),
        service_url: data.service_url.clone(),
        secret_reference_name: AUDITLOG_CREDENTIALS_RESOURCE.to_string(),
    };
    configured_extension(AUDITLOG_EXTENSION_TYPE, &config)
}

fn registry_cache_extension(caches: &[ImageRegistryCache]) -> Result<Extension, ConverterError> {
    let config = RegistryConfig {
        api_version: REGISTRY_CONFIG_API_VERSION.to_string(),
        kind: "RegistryConfig".to_string(),
        caches: caches
            .iter()
            .map(|cache| RegistryCache {
                upstream: cache.config.upstream.clone(),
                remote_url: cache.config.remote_url.clone(),
                volume: cache.config.volume.clone(),
                garbage_collection: cache.config.garbage_collection.clone(),
                secret_reference_name: cache.config.secret_reference_name.clone(),
            })
            .collect(),
    };
    configured_extension(REGISTRY_CACHE_EXTENSION_TYPE, &config)
}
