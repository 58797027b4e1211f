//! Supported hyperscalers

use std::fmt;
use std::str::FromStr;

use crate::error::HyperscalerError;

/// Closed set of cloud providers a Runtime can be provisioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    /// Amazon Web Services
    Aws,
    /// Microsoft Azure
    Azure,
    /// Alibaba Cloud
    Alicloud,
    /// SAP Converged Cloud (OpenStack)
    OpenStack,
}

impl ProviderType {
    /// Provider type as written in Runtime and Shoot objects
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderType::Aws => "aws",
            ProviderType::Azure => "azure",
            ProviderType::Alicloud => "alicloud",
            ProviderType::OpenStack => "openstack",
        }
    }
}

impl FromStr for ProviderType {
    type Err = HyperscalerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aws" => Ok(ProviderType::Aws),
            "azure" => Ok(ProviderType::Azure),
            "alicloud" => Ok(ProviderType::Alicloud),
            "openstack" => Ok(ProviderType::OpenStack),
            other => Err(HyperscalerError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
