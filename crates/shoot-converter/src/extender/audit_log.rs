//! API server audit logging

use crds::{AuditConfig, AuditPolicy, CrossVersionObjectReference, NamedResourceReference, ObjectReference, Runtime, Shoot};
use tracing::{debug, warn};

use super::{kube_api_server, Extender};
use crate::auditlog::AuditLogs;
use crate::error::ConverterError;
use crate::keyed::KeyedList;

/// Shoot resource referencing the audit log credentials
pub const AUDITLOG_CREDENTIALS_RESOURCE: &str = "auditlog-credentials";

/// Points the API server at the audit policy and references the tenant secret
///
/// Without audit log data for the provider and region the Shoot keeps the audit
/// policy it already had, if any.
#[derive(Debug, Clone)]
pub struct AuditLogExtender {
    policy_config_map_name: String,
    audit_logs: AuditLogs,
    existing_audit_config: Option<AuditConfig>,
}

impl AuditLogExtender {
    /// Extender using the audit policy in `policy_config_map_name`
    pub fn new(policy_config_map_name: impl Into<String>, audit_logs: AuditLogs) -> Self {
        Self {
            policy_config_map_name: policy_config_map_name.into(),
            audit_logs,
            existing_audit_config: None,
        }
    }

    /// Keep `audit_config` of the existing Shoot when no audit log data is found
    pub fn with_existing_audit_config(mut self, audit_config: AuditConfig) -> Self {
        self.existing_audit_config = Some(audit_config);
        self
    }
}

impl Extender for AuditLogExtender {
    fn name(&self) -> &'static str {
        "audit-log"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let provider = &runtime.spec.shoot.provider.provider_type;
        let region = &runtime.spec.shoot.region;

        let data = match self.audit_logs.get(provider, region) {
            Ok(data) => data,
            Err(e) if e.is_not_found() => {
                warn!("No audit log tenant for {} in {}, audit logging not updated", provider, region);
                if let Some(existing) = &self.existing_audit_config {
                    kube_api_server(shoot).audit_config = Some(existing.clone());
                }
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        kube_api_server(shoot).audit_config = Some(AuditConfig {
            audit_policy: Some(AuditPolicy {
                config_map_ref: Some(ObjectReference {
                    name: self.policy_config_map_name.clone(),
                }),
            }),
        });

        let mut resources = KeyedList::from(std::mem::take(&mut shoot.spec.resources));
        resources.upsert(NamedResourceReference {
            name: AUDITLOG_CREDENTIALS_RESOURCE.to_string(),
            resource_ref: CrossVersionObjectReference {
                api_version: "v1".to_string(),
                kind: "Secret".to_string(),
                name: data.secret_name.clone(),
            },
        });
        shoot.spec.resources = resources.into_vec();

        debug!("Audit log secret {} referenced", data.secret_name);
        Ok(())
    }
}
