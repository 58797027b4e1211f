//! Exposure class

use crds::{Runtime, Shoot};
use hyperscaler::ProviderType;

use super::{provider_type, Extender};
use crate::error::ConverterError;

/// Exposure class of OpenStack shoots
pub const OPENSTACK_EXPOSURE_CLASS: &str = "converged-cloud-internet";

/// Sets `spec.exposureClassName` for OpenStack shoots
#[derive(Debug, Clone, Default)]
pub struct ExposureClassExtender;

impl Extender for ExposureClassExtender {
    fn name(&self) -> &'static str {
        "exposure-class"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        if provider_type(runtime)? == ProviderType::OpenStack {
            shoot.spec.exposure_class_name = Some(OPENSTACK_EXPOSURE_CLASS.to_string());
        }
        Ok(())
    }
}
