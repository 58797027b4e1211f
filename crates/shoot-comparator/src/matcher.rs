//! Shoot matcher
//!
//! Compares the fields the converter owns. Type metadata and annotations are
//! not compared; extensions are compared as a set keyed by type.

use std::collections::BTreeMap;

use crds::Shoot;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ComparatorError;
use crate::extensions::extension_mismatches;
use crate::result::ComparisonResult;

/// Matches actual Shoots against one expected Shoot
#[derive(Debug, Clone)]
pub struct ShootMatcher {
    expected: Shoot,
}

impl ShootMatcher {
    /// Create a matcher for `expected`
    pub fn new(expected: Shoot) -> Self {
        Self { expected }
    }

    /// Compare `actual` against the expected Shoot
    pub fn matches(&self, actual: &Shoot) -> Result<ComparisonResult, ComparatorError> {
        let expected = &self.expected;
        let mut result = ComparisonResult::default();

        compare(&mut result, "metadata/name", &expected.metadata.name, &actual.metadata.name)?;
        compare(
            &mut result,
            "metadata/namespace",
            &expected.metadata.namespace,
            &actual.metadata.namespace,
        )?;
        let no_labels = BTreeMap::new();
        compare(
            &mut result,
            "metadata/labels",
            expected.metadata.labels.as_ref().unwrap_or(&no_labels),
            actual.metadata.labels.as_ref().unwrap_or(&no_labels),
        )?;

        let (e, a) = (&expected.spec, &actual.spec);
        compare(&mut result, "spec/AccessRestrictions", &e.access_restrictions, &a.access_restrictions)?;
        compare(&mut result, "spec/CloudProfileName", &e.cloud_profile_name, &a.cloud_profile_name)?;
        compare(&mut result, "spec/ControlPlane", &e.control_plane, &a.control_plane)?;
        compare(&mut result, "spec/DNS", &e.dns, &a.dns)?;
        compare(&mut result, "spec/ExposureClassName", &e.exposure_class_name, &a.exposure_class_name)?;

        let mismatches = extension_mismatches(&e.extensions, &a.extensions)?;
        if !mismatches.is_empty() {
            debug!("Field spec/Extensions differs: {}", mismatches.join("; "));
            result.push("spec/Extensions", mismatches.join("; "));
        }

        compare(&mut result, "spec/Kubernetes", &e.kubernetes, &a.kubernetes)?;
        compare(&mut result, "spec/Maintenance", &e.maintenance, &a.maintenance)?;
        compare(&mut result, "spec/Networking", &e.networking, &a.networking)?;
        compare(&mut result, "spec/Provider", &e.provider, &a.provider)?;
        compare(&mut result, "spec/Purpose", &e.purpose, &a.purpose)?;
        compare(&mut result, "spec/Region", &e.region, &a.region)?;
        compare(&mut result, "spec/Resources", &e.resources, &a.resources)?;
        compare(&mut result, "spec/SecretBindingName", &e.secret_binding_name, &a.secret_binding_name)?;
        compare(&mut result, "spec/SeedSelector", &e.seed_selector, &a.seed_selector)?;
        compare(&mut result, "spec/Tolerations", &e.tolerations, &a.tolerations)?;

        info!(
            "Compared shoot {}: {} difference(s)",
            expected.metadata.name.as_deref().unwrap_or_default(),
            result.differences().len()
        );
        Ok(result)
    }
}

fn compare<T: Serialize>(
    result: &mut ComparisonResult,
    path: &str,
    expected: &T,
    actual: &T,
) -> Result<(), ComparatorError> {
    let expected = serde_json::to_value(expected)?;
    let actual = serde_json::to_value(actual)?;
    if expected != actual {
        debug!("Field {} differs", path);
        result.push(path, format!("expected {}, got {}", expected, actual));
    }
    Ok(())
}

/// Compare two Shoots field by field
pub fn compare_shoots(expected: &Shoot, actual: &Shoot) -> Result<ComparisonResult, ComparatorError> {
    ShootMatcher::new(expected.clone()).matches(actual)
}

/// Compare two Shoot manifests given as YAML
pub fn compare_documents(expected_yaml: &str, actual_yaml: &str) -> Result<ComparisonResult, ComparatorError> {
    let expected: Shoot = serde_yaml::from_str(expected_yaml)?;
    let actual: Shoot = serde_yaml::from_str(actual_yaml)?;
    compare_shoots(&expected, &actual)
}
