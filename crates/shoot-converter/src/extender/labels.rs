//! Shoot labels

use std::collections::BTreeMap;

use crds::labels::{GLOBAL_ACCOUNT_LABEL, SHOOT_GLOBAL_ACCOUNT_LABEL, SHOOT_SUBACCOUNT_LABEL, SUBACCOUNT_LABEL};
use crds::{Runtime, Shoot};

use super::Extender;
use crate::error::ConverterError;

/// Copies the account and subaccount IDs of the Runtime
#[derive(Debug, Clone, Default)]
pub struct LabelsExtender;

impl Extender for LabelsExtender {
    fn name(&self) -> &'static str {
        "labels"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let pairs = [
            (GLOBAL_ACCOUNT_LABEL, SHOOT_GLOBAL_ACCOUNT_LABEL),
            (SUBACCOUNT_LABEL, SHOOT_SUBACCOUNT_LABEL),
        ];

        for (runtime_label, shoot_label) in pairs {
            if let Some(value) = runtime.label(runtime_label) {
                shoot
                    .metadata
                    .labels
                    .get_or_insert_with(BTreeMap::new)
                    .insert(shoot_label.to_string(), value.to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_runtime, empty_shoot};

    #[test]
    fn test_account_labels() {
        let runtime = create_test_runtime("aws", &["eu-central-1a"]);
        let mut shoot = empty_shoot();

        LabelsExtender.apply(&runtime, &mut shoot).expect("labels applied");

        let labels = shoot.metadata.labels.expect("labels set");
        assert_eq!(labels.get("account").map(String::as_str), Some("global-account-1"));
        assert_eq!(labels.get("subaccount").map(String::as_str), Some("subaccount-1"));
    }

    #[test]
    fn test_missing_labels_are_omitted() {
        let mut runtime = create_test_runtime("aws", &["eu-central-1a"]);
        runtime.metadata.labels = None;
        let mut shoot = empty_shoot();

        LabelsExtender.apply(&runtime, &mut shoot).expect("labels applied");
        assert!(shoot.metadata.labels.is_none());
    }
}
