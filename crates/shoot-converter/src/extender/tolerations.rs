//! Seed tolerations

use crds::{Runtime, Shoot, Toleration};

use super::Extender;
use crate::error::ConverterError;

/// Toleration of shoots in the assured workload platform region
pub const ASSURED_WORKLOAD_TOLERATION: &str = "ksa-assured-workload";

const ASSURED_WORKLOAD_PLATFORM_REGION: &str = "cf-sa30";

/// Adds seed tolerations required by the platform region
#[derive(Debug, Clone, Default)]
pub struct TolerationsExtender;

impl Extender for TolerationsExtender {
    fn name(&self) -> &'static str {
        "tolerations"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        if runtime.spec.shoot.platform_region != ASSURED_WORKLOAD_PLATFORM_REGION {
            return Ok(());
        }

        let present = shoot
            .spec
            .tolerations
            .iter()
            .any(|toleration| toleration.key == ASSURED_WORKLOAD_TOLERATION);
        if !present {
            shoot.spec.tolerations.push(Toleration {
                key: ASSURED_WORKLOAD_TOLERATION.to_string(),
                value: None,
            });
        }
        Ok(())
    }
}
