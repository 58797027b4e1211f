//! Kubernetes version

use std::cmp::Ordering;

use crds::{Runtime, Shoot};
use tracing::debug;

use super::Extender;
use crate::error::ConverterError;
use crate::version::compare_versions;

/// Resolves the Kubernetes version of the Shoot
///
/// The Runtime version wins over the configured default. When the existing
/// Shoot already runs a greater version it is kept, Kubernetes is never
/// downgraded.
#[derive(Debug, Clone)]
pub struct KubernetesVersionExtender {
    default_version: String,
    current_version: Option<String>,
}

impl KubernetesVersionExtender {
    /// Extender for a new Shoot
    pub fn new(default_version: impl Into<String>) -> Self {
        Self {
            default_version: default_version.into(),
            current_version: None,
        }
    }

    /// Extender for an existing Shoot running `current_version`
    pub fn with_current_version(mut self, current_version: impl Into<String>) -> Self {
        self.current_version = Some(current_version.into()).filter(|v: &String| !v.is_empty());
        self
    }
}

impl Extender for KubernetesVersionExtender {
    fn name(&self) -> &'static str {
        "kubernetes"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let mut version = runtime
            .spec
            .shoot
            .kubernetes
            .version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.default_version);

        if let Some(current) = self.current_version.as_deref() {
            if compare_versions(current, version) == Ordering::Greater {
                debug!("Keeping Kubernetes version {} over requested {}", current, version);
                version = current;
            }
        }

        if version.is_empty() {
            return Err(ConverterError::Validation("Kubernetes version must not be empty".to_string()));
        }

        shoot.spec.kubernetes.version = version.to_string();
        Ok(())
    }
}
