//! Cloud profile

use crds::{Runtime, Shoot};
use hyperscaler::ProviderType;

use super::{provider_type, Extender};
use crate::error::ConverterError;

/// Gardener cloud profile of each provider
pub fn cloud_profile_name(provider: ProviderType) -> &'static str {
    match provider {
        ProviderType::Aws => "aws",
        ProviderType::Azure => "az",
        ProviderType::Alicloud => "alicloud",
        ProviderType::OpenStack => "converged-cloud-kyma",
    }
}

/// Sets `spec.cloudProfileName` from the provider type
#[derive(Debug, Clone, Default)]
pub struct CloudProfileExtender;

impl Extender for CloudProfileExtender {
    fn name(&self) -> &'static str {
        "cloud-profile"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let provider = provider_type(runtime)?;
        shoot.spec.cloud_profile_name = Some(cloud_profile_name(provider).to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_runtime, empty_shoot};

    #[test]
    fn test_profiles() {
        for (provider, profile) in [
            ("aws", "aws"),
            ("azure", "az"),
            ("alicloud", "alicloud"),
            ("openstack", "converged-cloud-kyma"),
        ] {
            let runtime = create_test_runtime(provider, &["1"]);
            let mut shoot = empty_shoot();
            CloudProfileExtender.apply(&runtime, &mut shoot).expect("profile set");
            assert_eq!(shoot.spec.cloud_profile_name.as_deref(), Some(profile), "profile of {provider}");
        }
    }

    #[test]
    fn test_unknown_provider() {
        let runtime = create_test_runtime("gcp", &["europe-west3-a"]);
        let mut shoot = empty_shoot();
        let result = CloudProfileExtender.apply(&runtime, &mut shoot);
        assert!(matches!(result, Err(ConverterError::UnsupportedProvider(provider)) if provider == "gcp"));
    }
}
