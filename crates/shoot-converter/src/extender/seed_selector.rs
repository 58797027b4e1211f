//! Seed placement

use std::collections::BTreeMap;

use crds::labels::SEED_REGION_LABEL;
use crds::{Runtime, SeedSelector, Shoot};
use tracing::debug;

use super::Extender;
use crate::error::ConverterError;

/// Pins the control plane to a seed in the Shoot's region when requested
#[derive(Debug, Clone, Default)]
pub struct SeedSelectorExtender;

impl Extender for SeedSelectorExtender {
    fn name(&self) -> &'static str {
        "seed-selector"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let spec = &runtime.spec.shoot;
        if !spec.enforce_seed_location.unwrap_or(false) {
            return Ok(());
        }

        debug!("Pinning Shoot {} to seeds in {}", spec.name, spec.region);
        shoot.spec.seed_selector = Some(SeedSelector {
            match_labels: BTreeMap::from([(SEED_REGION_LABEL.to_string(), spec.region.clone())]),
        });
        Ok(())
    }
}
