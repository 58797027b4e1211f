//! Typed provider configuration documents
//!
//! Shoots carry the infrastructure and control plane documents as opaque JSON.
//! Inside this crate they are handled as one enum variant per provider and only
//! turned into [`serde_json::Value`] at the boundary.

use serde_json::Value;

use crate::error::HyperscalerError;
use crate::provider::ProviderType;
use crate::{alicloud, aws, azure, openstack};

/// Infrastructure document of one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfrastructureDocument {
    /// AWS `InfrastructureConfig`
    Aws(aws::InfrastructureConfig),
    /// Azure `InfrastructureConfig`
    Azure(azure::InfrastructureConfig),
    /// Alicloud `InfrastructureConfig`
    Alicloud(alicloud::InfrastructureConfig),
    /// OpenStack `InfrastructureConfig`
    OpenStack(openstack::InfrastructureConfig),
}

impl InfrastructureDocument {
    /// Generate the document of a new cluster
    ///
    /// `dual_stack` is only honoured by AWS.
    pub fn for_create(
        provider: ProviderType,
        worker_cidr: &str,
        zone_names: &[String],
        dual_stack: bool,
    ) -> Result<Self, HyperscalerError> {
        Ok(match provider {
            ProviderType::Aws => Self::Aws(aws::InfrastructureConfig::new(worker_cidr, zone_names, dual_stack)?),
            ProviderType::Azure => Self::Azure(azure::InfrastructureConfig::new(worker_cidr, zone_names)?),
            ProviderType::Alicloud => Self::Alicloud(alicloud::InfrastructureConfig::new(worker_cidr, zone_names)?),
            ProviderType::OpenStack => {
                Self::OpenStack(openstack::InfrastructureConfig::new(worker_cidr, zone_names)?)
            }
        })
    }

    /// Decode a document read from an existing Shoot
    pub fn decode(provider: ProviderType, value: &Value) -> Result<Self, HyperscalerError> {
        let decode_error = |source| HyperscalerError::Decode {
            provider: provider.as_str(),
            document: "InfrastructureConfig",
            source,
        };

        Ok(match provider {
            ProviderType::Aws => Self::Aws(serde_json::from_value(value.clone()).map_err(decode_error)?),
            ProviderType::Azure => Self::Azure(serde_json::from_value(value.clone()).map_err(decode_error)?),
            ProviderType::Alicloud => Self::Alicloud(serde_json::from_value(value.clone()).map_err(decode_error)?),
            ProviderType::OpenStack => Self::OpenStack(serde_json::from_value(value.clone()).map_err(decode_error)?),
        })
    }

    /// Provider the document belongs to
    pub fn provider(&self) -> ProviderType {
        match self {
            Self::Aws(_) => ProviderType::Aws,
            Self::Azure(_) => ProviderType::Azure,
            Self::Alicloud(_) => ProviderType::Alicloud,
            Self::OpenStack(_) => ProviderType::OpenStack,
        }
    }

    /// Zones allocated in the document, in allocation order
    ///
    /// `None` for OpenStack, whose document does not record zones.
    pub fn zone_names(&self) -> Option<Vec<String>> {
        match self {
            Self::Aws(config) => Some(config.zone_names()),
            Self::Azure(config) => Some(config.zone_names()),
            Self::Alicloud(config) => Some(config.zone_names()),
            Self::OpenStack(_) => None,
        }
    }

    /// Copy of the document with `added` zones allocated after the existing ones
    pub fn with_added_zones(&self, worker_cidr: &str, added: &[String]) -> Result<Self, HyperscalerError> {
        Ok(match self {
            Self::Aws(config) => Self::Aws(config.with_added_zones(worker_cidr, added)?),
            Self::Azure(config) => Self::Azure(config.with_added_zones(worker_cidr, added)?),
            Self::Alicloud(config) => Self::Alicloud(config.with_added_zones(worker_cidr, added)?),
            Self::OpenStack(config) => Self::OpenStack(config.clone()),
        })
    }

    /// Wire representation
    pub fn to_value(&self) -> Result<Value, HyperscalerError> {
        let value = match self {
            Self::Aws(config) => serde_json::to_value(config)?,
            Self::Azure(config) => serde_json::to_value(config)?,
            Self::Alicloud(config) => serde_json::to_value(config)?,
            Self::OpenStack(config) => serde_json::to_value(config)?,
        };
        Ok(value)
    }
}

/// Control plane document of one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlPlaneDocument {
    /// AWS `ControlPlaneConfig`
    Aws(aws::ControlPlaneConfig),
    /// Azure `ControlPlaneConfig`
    Azure(azure::ControlPlaneConfig),
    /// Alicloud `ControlPlaneConfig`
    Alicloud(alicloud::ControlPlaneConfig),
    /// OpenStack `ControlPlaneConfig`
    OpenStack(openstack::ControlPlaneConfig),
}

impl ControlPlaneDocument {
    /// Default document of a new cluster
    pub fn for_create(provider: ProviderType) -> Self {
        match provider {
            ProviderType::Aws => Self::Aws(aws::ControlPlaneConfig::default()),
            ProviderType::Azure => Self::Azure(azure::ControlPlaneConfig::default()),
            ProviderType::Alicloud => Self::Alicloud(alicloud::ControlPlaneConfig::default()),
            ProviderType::OpenStack => Self::OpenStack(openstack::ControlPlaneConfig::default()),
        }
    }

    /// Decode a document read from an existing Shoot
    pub fn decode(provider: ProviderType, value: &Value) -> Result<Self, HyperscalerError> {
        let decode_error = |source| HyperscalerError::Decode {
            provider: provider.as_str(),
            document: "ControlPlaneConfig",
            source,
        };

        Ok(match provider {
            ProviderType::Aws => Self::Aws(serde_json::from_value(value.clone()).map_err(decode_error)?),
            ProviderType::Azure => Self::Azure(serde_json::from_value(value.clone()).map_err(decode_error)?),
            ProviderType::Alicloud => Self::Alicloud(serde_json::from_value(value.clone()).map_err(decode_error)?),
            ProviderType::OpenStack => Self::OpenStack(serde_json::from_value(value.clone()).map_err(decode_error)?),
        })
    }

    /// Wire representation
    pub fn to_value(&self) -> Result<Value, HyperscalerError> {
        let value = match self {
            Self::Aws(config) => serde_json::to_value(config)?,
            Self::Azure(config) => serde_json::to_value(config)?,
            Self::Alicloud(config) => serde_json::to_value(config)?,
            Self::OpenStack(config) => serde_json::to_value(config)?,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(zones: &[&str]) -> Vec<String> {
        zones.iter().map(|z| z.to_string()).collect()
    }

    #[test]
    fn test_create_and_decode_agree() {
        for provider in [ProviderType::Aws, ProviderType::Alicloud] {
            let created = InfrastructureDocument::for_create(provider, "10.250.0.0/16", &names(&["a", "b"]), false)
                .expect("valid document");
            let value = created.to_value().expect("serializable");
            let decoded = InfrastructureDocument::decode(provider, &value).expect("decodable");

            assert_eq!(decoded, created, "{provider} document should survive the wire");
            assert_eq!(decoded.zone_names(), Some(names(&["a", "b"])));
        }
    }

    #[test]
    fn test_openstack_has_no_zone_names() {
        let created = InfrastructureDocument::for_create(ProviderType::OpenStack, "10.250.0.0/16", &names(&["a"]), false)
            .expect("valid document");
        assert_eq!(created.zone_names(), None);
        assert_eq!(created.provider(), ProviderType::OpenStack);
    }

    #[test]
    fn test_decode_reports_provider_and_document() {
        let err = InfrastructureDocument::decode(ProviderType::Azure, &json!({"networks": "broken"}))
            .expect_err("malformed document");
        match err {
            HyperscalerError::Decode { provider, document, .. } => {
                assert_eq!(provider, "azure");
                assert_eq!(document, "InfrastructureConfig");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_added_zones_keep_existing_subnets() {
        let existing = InfrastructureDocument::for_create(ProviderType::Aws, "10.250.0.0/16", &names(&["a"]), false)
            .expect("valid document");
        let updated = existing
            .with_added_zones("10.250.0.0/16", &names(&["b"]))
            .expect("valid document");

        let before = existing.to_value().expect("serializable");
        let after = updated.to_value().expect("serializable");
        assert_eq!(after["networks"]["zones"][0], before["networks"]["zones"][0]);
        assert_eq!(after["networks"]["zones"][1]["name"], "b");
    }

    #[test]
    fn test_default_control_plane_documents() {
        let value = ControlPlaneDocument::for_create(ProviderType::OpenStack)
            .to_value()
            .expect("serializable");
        assert_eq!(value["loadBalancerProvider"], "f5");

        let value = ControlPlaneDocument::for_create(ProviderType::Azure)
            .to_value()
            .expect("serializable");
        assert_eq!(value["apiVersion"], azure::API_VERSION);
        assert_eq!(value["kind"], "ControlPlaneConfig");
    }
}
