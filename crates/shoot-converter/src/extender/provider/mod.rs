//! Provider block of the Shoot
//!
//! Workers, provider documents and worker settings. New Shoots get freshly
//! generated documents; existing Shoots keep everything Gardener has already
//! accepted and only grow by appended zones.

pub mod create;
pub mod patch;

pub use create::ProviderCreateExtender;
pub use patch::ProviderPatchExtender;

use crds::{Runtime, ShootMachineImage, SshAccess, Worker, WorkersSettings};
use hyperscaler::aws::WorkerConfig;
use hyperscaler::ProviderType;
use serde_json::Value;

use crate::error::ConverterError;

/// Machine image defaults and worker switches shared by both provider extenders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerDefaults {
    /// Image name of workers without one
    pub image_name: String,

    /// Image version of workers without one
    pub image_version: String,

    /// Enforce IMDSv2 on AWS workers
    pub enable_imds_v2: bool,
}

pub(crate) fn validate_single_main_worker(runtime: &Runtime) -> Result<(), ConverterError> {
    if runtime.spec.shoot.provider.workers.len() != 1 {
        return Err(ConverterError::Validation("single main worker is required".to_string()));
    }
    Ok(())
}

/// Zones of all workers, deduplicated in order of first appearance
pub(crate) fn collect_zones<'a>(workers: impl IntoIterator<Item = &'a Worker>) -> Vec<String> {
    let mut zones: Vec<String> = Vec::new();
    for zone in workers.into_iter().flat_map(|worker| worker.zones.iter()) {
        if !zones.contains(zone) {
            zones.push(zone.clone());
        }
    }
    zones
}

/// Image of a worker, with the configured default filling the gaps
pub(crate) fn default_image(requested: Option<&ShootMachineImage>, defaults: &WorkerDefaults) -> ShootMachineImage {
    let name = requested
        .map(|image| image.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(&defaults.image_name);
    let version = requested
        .and_then(|image| image.version.as_deref())
        .filter(|version| !version.is_empty())
        .unwrap_or(&defaults.image_version);

    ShootMachineImage {
        name: name.to_string(),
        version: Some(version.to_string()),
    }
}

/// Provider document of a worker when the Runtime does not supply one
pub(crate) fn worker_provider_config(
    provider: ProviderType,
    defaults: &WorkerDefaults,
) -> Result<Option<Value>, ConverterError> {
    if provider == ProviderType::Aws && defaults.enable_imds_v2 {
        return Ok(Some(serde_json::to_value(WorkerConfig::imds_v2())?));
    }
    Ok(None)
}

pub(crate) fn workers_settings() -> WorkersSettings {
    WorkersSettings {
        ssh_access: Some(SshAccess { enabled: false }),
    }
}
