//! Shoot annotations

use std::collections::BTreeMap;

use crds::labels::{
    RUNTIME_ID_LABEL, SHOOT_EU_ACCESS_ANNOTATION, SHOOT_LICENCE_TYPE_ANNOTATION, SHOOT_RUNTIME_ID_ANNOTATION,
};
use crds::{Runtime, Shoot};

use super::Extender;
use crate::error::ConverterError;

/// Platform regions whose nodes must stay inside the EU
pub(crate) const EU_ACCESS_PLATFORM_REGIONS: [&str; 2] = ["cf-eu11", "cf-ch20"];

/// Sets runtime ID, licence type and EU access annotations
#[derive(Debug, Clone, Default)]
pub struct AnnotationsExtender;

impl Extender for AnnotationsExtender {
    fn name(&self) -> &'static str {
        "annotations"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let annotations = shoot.metadata.annotations.get_or_insert_with(BTreeMap::new);

        if let Some(runtime_id) = runtime.label(RUNTIME_ID_LABEL) {
            annotations.insert(SHOOT_RUNTIME_ID_ANNOTATION.to_string(), runtime_id.to_string());
        }

        if let Some(licence_type) = runtime.spec.shoot.licence_type.as_deref().filter(|l| !l.is_empty()) {
            annotations.insert(SHOOT_LICENCE_TYPE_ANNOTATION.to_string(), licence_type.to_string());
        }

        if EU_ACCESS_PLATFORM_REGIONS.contains(&runtime.spec.shoot.platform_region.as_str()) {
            annotations.insert(SHOOT_EU_ACCESS_ANNOTATION.to_string(), "true".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_runtime, empty_shoot};

    #[test]
    fn test_annotations() {
        let mut runtime = create_test_runtime("aws", &["eu-central-1a"]);
        runtime.spec.shoot.licence_type = Some("CPE".to_string());
        runtime.spec.shoot.platform_region = "cf-ch20".to_string();
        let mut shoot = empty_shoot();

        AnnotationsExtender.apply(&runtime, &mut shoot).expect("annotations applied");

        let annotations = shoot.metadata.annotations.expect("annotations set");
        assert_eq!(annotations.get(SHOOT_RUNTIME_ID_ANNOTATION).map(String::as_str), Some("runtime-1"));
        assert_eq!(annotations.get(SHOOT_LICENCE_TYPE_ANNOTATION).map(String::as_str), Some("CPE"));
        assert_eq!(annotations.get(SHOOT_EU_ACCESS_ANNOTATION).map(String::as_str), Some("true"));
    }

    #[test]
    fn test_no_eu_access_outside_eu_regions() {
        let runtime = create_test_runtime("aws", &["eu-central-1a"]);
        let mut shoot = empty_shoot();

        AnnotationsExtender.apply(&runtime, &mut shoot).expect("annotations applied");

        let annotations = shoot.metadata.annotations.expect("annotations set");
        assert!(!annotations.contains_key(SHOOT_EU_ACCESS_ANNOTATION));
        assert!(!annotations.contains_key(SHOOT_LICENCE_TYPE_ANNOTATION));
    }
}
