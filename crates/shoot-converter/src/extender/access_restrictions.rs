//! Shoot access restrictions

use std::collections::BTreeMap;

use crds::labels::SHOOT_EU_ACCESS_ANNOTATION;
use crds::{AccessRestrictionWithOptions, Runtime, Shoot};

use super::annotations::EU_ACCESS_PLATFORM_REGIONS;
use super::Extender;
use crate::error::ConverterError;
use crate::keyed::KeyedList;

/// Restriction keeping cluster access inside the EU
pub const EU_ACCESS_ONLY_RESTRICTION: &str = "eu-access-only";

/// Restricts access to EU personnel for EU-access platform regions
#[derive(Debug, Clone, Default)]
pub struct AccessRestrictionsExtender;

impl Extender for AccessRestrictionsExtender {
    fn name(&self) -> &'static str {
        "access-restrictions"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        if !EU_ACCESS_PLATFORM_REGIONS.contains(&runtime.spec.shoot.platform_region.as_str()) {
            return Ok(());
        }

        let mut restrictions = KeyedList::from(std::mem::take(&mut shoot.spec.access_restrictions));
        restrictions.upsert(AccessRestrictionWithOptions {
            name: EU_ACCESS_ONLY_RESTRICTION.to_string(),
            options: BTreeMap::from([(SHOOT_EU_ACCESS_ANNOTATION.to_string(), "true".to_string())]),
        });
        shoot.spec.access_restrictions = restrictions.into_vec();
        Ok(())
    }
}
