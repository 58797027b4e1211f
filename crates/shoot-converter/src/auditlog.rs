//! Audit log tenant lookup
//!
//! Maps `provider type -> region -> tenant`. Not every provider and region
//! pair has audit logging; a miss is reported as
//! [`ConverterError::AuditLogNotFound`].

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ConverterError;

/// Audit log tenant of one region
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct AuditLogData {
    /// Tenant ID
    #[serde(rename = "tenantID")]
    #[validate(length(min = 1))]
    pub tenant_id: String,

    /// Audit log service URL
    #[serde(rename = "serviceURL")]
    #[validate(length(min = 1))]
    pub service_url: String,

    /// Secret holding the tenant credentials
    #[serde(rename = "secretName")]
    #[validate(length(min = 1))]
    pub secret_name: String,
}

/// Audit log tenants by provider type and region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct AuditLogs {
    tenants: BTreeMap<String, BTreeMap<String, AuditLogData>>,
}

impl AuditLogs {
    /// Parse the tenant file and validate every entry
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConverterError> {
        let logs: AuditLogs = serde_json::from_reader(reader)
            .map_err(|e| ConverterError::Config(format!("Failed to parse audit log data: {}", e)))?;

        for (provider, regions) in &logs.tenants {
            for (region, data) in regions {
                data.validate().map_err(|e| {
                    ConverterError::Config(format!("Invalid audit log data for {}/{}: {}", provider, region, e))
                })?;
            }
        }
        Ok(logs)
    }

    /// Tenant configured for `provider` in `region`
    pub fn get(&self, provider: &str, region: &str) -> Result<&AuditLogData, ConverterError> {
        self.tenants
            .get(provider)
            .and_then(|regions| regions.get(region))
            .ok_or_else(|| ConverterError::AuditLogNotFound {
                provider: provider.to_string(),
                region: region.to_string(),
            })
    }

    /// Add or replace the tenant of `provider` in `region`
    pub fn insert(&mut self, provider: &str, region: &str, data: AuditLogData) {
        self.tenants
            .entry(provider.to_string())
            .or_default()
            .insert(region.to_string(), data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TENANTS: &str = r#"{
        "aws": {
            "eu-central-1": {
                "tenantID": "79c64792-9c1e-4c1b-9941-ef7560dd3eae",
                "serviceURL": "https://auditlog.example.com:3001",
                "secretName": "auditlog-secret"
            }
        }
    }"#;

    #[test]
    fn test_lookup_hit_and_miss() {
        let logs = AuditLogs::from_reader(TENANTS.as_bytes()).expect("valid tenants");

        let data = logs.get("aws", "eu-central-1").expect("configured tenant");
        assert_eq!(data.secret_name, "auditlog-secret");

        let miss = logs.get("aws", "us-east-1").expect_err("no tenant");
        assert!(miss.is_not_found());
        assert!(matches!(logs.get("azure", "eu-central-1"), Err(ConverterError::AuditLogNotFound { .. })));
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let broken = TENANTS.replace("auditlog-secret", "");
        let result = AuditLogs::from_reader(broken.as_bytes());
        assert!(
            matches!(result, Err(ConverterError::Config(message)) if message.contains("aws/eu-central-1")),
            "entry with empty secret name must be rejected"
        );
    }
}
