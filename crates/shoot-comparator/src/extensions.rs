//! Extension list comparison
//!
//! Entries are paired by type and their order is ignored. Provider configs of
//! well-known extensions are decoded and compared as typed documents, so that
//! key order or defaulted fields do not count as a difference.

use std::collections::{BTreeMap, BTreeSet};

use crds::gardener::extensions::{
    AuditlogConfig, CertConfig, DnsConfig, RegistryConfig, AUDITLOG_EXTENSION_TYPE, CERT_EXTENSION_TYPE,
    DNS_EXTENSION_TYPE, REGISTRY_CACHE_EXTENSION_TYPE,
};
use crds::Extension;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ComparatorError;

/// Describe every mismatch between two extension lists
pub(crate) fn extension_mismatches(
    expected: &[Extension],
    actual: &[Extension],
) -> Result<Vec<String>, ComparatorError> {
    let mut mismatches = Vec::new();
    mismatches.extend(duplicates(expected, "expected"));
    mismatches.extend(duplicates(actual, "actual"));

    let expected_by_type = by_type(expected);
    let actual_by_type = by_type(actual);
    let types: BTreeSet<&str> = expected_by_type.keys().chain(actual_by_type.keys()).copied().collect();

    for extension_type in types {
        match (expected_by_type.get(extension_type), actual_by_type.get(extension_type)) {
            (Some(_), None) => mismatches.push(format!("extension {} is missing", extension_type)),
            (None, Some(_)) => mismatches.push(format!("extension {} is unexpected", extension_type)),
            (Some(expected), Some(actual)) => {
                if expected.disabled.unwrap_or(false) != actual.disabled.unwrap_or(false) {
                    mismatches.push(format!(
                        "extension {}: expected disabled={}, got disabled={}",
                        extension_type,
                        expected.disabled.unwrap_or(false),
                        actual.disabled.unwrap_or(false)
                    ));
                }
                if !provider_configs_match(
                    extension_type,
                    expected.provider_config.as_ref(),
                    actual.provider_config.as_ref(),
                )? {
                    mismatches.push(format!(
                        "extension {}: expected providerConfig {}, got {}",
                        extension_type,
                        render(expected.provider_config.as_ref()),
                        render(actual.provider_config.as_ref())
                    ));
                }
            }
            (None, None) => {}
        }
    }
    Ok(mismatches)
}

fn duplicates(extensions: &[Extension], side: &str) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for extension in extensions {
        *counts.entry(extension.extension_type.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(extension_type, count)| format!("extension {} appears {} times in {}", extension_type, count, side))
        .collect()
}

// Duplicates are reported separately; the first entry of a type is compared.
fn by_type(extensions: &[Extension]) -> BTreeMap<&str, &Extension> {
    extensions
        .iter()
        .rev()
        .map(|extension| (extension.extension_type.as_str(), extension))
        .collect()
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "null".to_string(), Value::to_string)
}

fn provider_configs_match(
    extension_type: &str,
    expected: Option<&Value>,
    actual: Option<&Value>,
) -> Result<bool, ComparatorError> {
    let (expected, actual) = match (expected, actual) {
        (None, None) => return Ok(true),
        (Some(expected), Some(actual)) => (expected, actual),
        _ => return Ok(false),
    };

    match extension_type {
        DNS_EXTENSION_TYPE => typed_match::<DnsConfig>(extension_type, expected, actual),
        CERT_EXTENSION_TYPE => typed_match::<CertConfig>(extension_type, expected, actual),
        AUDITLOG_EXTENSION_TYPE => typed_match::<AuditlogConfig>(extension_type, expected, actual),
        REGISTRY_CACHE_EXTENSION_TYPE => typed_match::<RegistryConfig>(extension_type, expected, actual),
        _ => Ok(expected == actual),
    }
}

fn typed_match<T>(extension_type: &str, expected: &Value, actual: &Value) -> Result<bool, ComparatorError>
where
    T: DeserializeOwned + PartialEq,
{
    let decode = |value: &Value| {
        serde_json::from_value::<T>(value.clone()).map_err(|source| ComparatorError::ExtensionDecode {
            extension_type: extension_type.to_string(),
            source,
        })
    };
    Ok(decode(expected)? == decode(actual)?)
}
