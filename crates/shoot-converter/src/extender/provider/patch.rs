//! Provider block of an existing Shoot
//!
//! Gardener rejects changes that move a zone to another subnet, so the
//! documents it has accepted are reused byte for byte unless the Runtime adds
//! zones. Added zones are appended after the existing ones, which keeps every
//! allocated subnet in place. Workers keep their existing order, zone order,
//! update strategy and, unless a newer one is requested, machine image.

use std::collections::HashSet;

use crds::{Provider, Runtime, Shoot, ShootMachineImage, Worker};
use hyperscaler::{ControlPlaneDocument, HyperscalerError, InfrastructureDocument, ProviderType};
use serde_json::Value;
use tracing::debug;

use super::{
    collect_zones, default_image, validate_single_main_worker, worker_provider_config, workers_settings,
    WorkerDefaults,
};
use crate::error::ConverterError;
use crate::extender::{provider_type, Extender};
use crate::version::max_version;

/// Updates the provider block of an existing Shoot
#[derive(Debug, Clone)]
pub struct ProviderPatchExtender {
    defaults: WorkerDefaults,
    existing_workers: Vec<Worker>,
    existing_infrastructure_config: Option<Value>,
    existing_control_plane_config: Option<Value>,
}

impl ProviderPatchExtender {
    /// Extender preserving the given state of the existing Shoot
    pub fn new(
        defaults: WorkerDefaults,
        existing_workers: Vec<Worker>,
        existing_infrastructure_config: Option<Value>,
        existing_control_plane_config: Option<Value>,
    ) -> Self {
        Self {
            defaults,
            existing_workers,
            existing_infrastructure_config,
            existing_control_plane_config,
        }
    }

    fn existing_worker(&self, name: &str) -> Option<&Worker> {
        self.existing_workers.iter().find(|worker| worker.name == name)
    }

    /// Runtime workers in the order of the existing Shoot; new pools go last
    fn ordered_workers(&self, runtime: &Runtime) -> Vec<Worker> {
        let mut workers: Vec<Worker> = runtime.spec.shoot.provider.all_workers().cloned().collect();
        workers.sort_by_key(|worker| {
            self.existing_workers
                .iter()
                .position(|existing| existing.name == worker.name)
                .unwrap_or(usize::MAX)
        });
        workers
    }

    fn existing_infrastructure(
        &self,
        provider: ProviderType,
    ) -> Result<Option<(&Value, InfrastructureDocument)>, ConverterError> {
        match &self.existing_infrastructure_config {
            Some(value) => Ok(Some((value, InfrastructureDocument::decode(provider, value)?))),
            None if provider == ProviderType::OpenStack => Ok(None),
            None => Err(ConverterError::Internal(format!(
                "Existing infrastructure config is required to update a {} Shoot",
                provider
            ))),
        }
    }

    fn infrastructure_config(
        &self,
        runtime: &Runtime,
        provider: ProviderType,
        workers: &[Worker],
    ) -> Result<Value, ConverterError> {
        let networking = &runtime.spec.shoot.networking;
        let zones_from_runtime = collect_zones(workers);

        let Some((value, existing)) = self.existing_infrastructure(provider)? else {
            let dual_stack = networking.dual_stack.unwrap_or(false);
            let created = InfrastructureDocument::for_create(provider, &networking.nodes, &zones_from_runtime, dual_stack)?;
            return Ok(created.to_value()?);
        };

        let zones_from_shoot = match existing.zone_names() {
            Some(zones) => zones,
            None => collect_zones(&self.existing_workers),
        };

        if provider == ProviderType::Azure && zones_from_shoot.is_empty() {
            debug!("Keeping infrastructure config of non-zoned Azure Shoot");
            return Ok(value.clone());
        }

        let zones_added: Vec<String> = zones_from_runtime
            .into_iter()
            .filter(|zone| !zones_from_shoot.contains(zone))
            .collect();

        if zones_added.is_empty() || provider == ProviderType::OpenStack {
            debug!("No zones added, reusing existing infrastructure config");
            return Ok(value.clone());
        }

        debug!("Allocating subnets for added zones {:?}", zones_added);
        let updated = existing
            .with_added_zones(&networking.nodes, &zones_added)
            .map_err(|err| match err {
                HyperscalerError::SubnetOverlap { .. } => ConverterError::Internal(err.to_string()),
                other => other.into(),
            })?;
        Ok(updated.to_value()?)
    }

    fn control_plane_config(&self, provider: ProviderType) -> Result<Value, ConverterError> {
        match &self.existing_control_plane_config {
            Some(value) => Ok(value.clone()),
            None => Ok(ControlPlaneDocument::for_create(provider).to_value()?),
        }
    }

    fn image(&self, requested: Option<&ShootMachineImage>, existing: Option<&ShootMachineImage>) -> ShootMachineImage {
        let requested = requested.filter(|image| !image.name.is_empty());
        match (requested, existing) {
            (None, Some(existing)) => existing.clone(),
            (Some(requested), Some(existing)) if requested.name == existing.name => {
                let version = match (requested.version.as_deref(), existing.version.as_deref()) {
                    (Some(wanted), Some(current)) => Some(max_version(wanted, current).to_string()),
                    (wanted, current) => wanted.or(current).map(str::to_string),
                };
                default_image(
                    Some(&ShootMachineImage {
                        name: requested.name.clone(),
                        version,
                    }),
                    &self.defaults,
                )
            }
            (requested, _) => default_image(requested, &self.defaults),
        }
    }

    fn patch_worker(&self, mut worker: Worker, default_provider_config: Option<&Value>) -> Worker {
        let existing = self.existing_worker(&worker.name);

        worker.machine.image = Some(self.image(
            worker.machine.image.as_ref(),
            existing.and_then(|existing| existing.machine.image.as_ref()),
        ));

        if let Some(existing) = existing {
            worker.zones = align_zones(&existing.zones, &worker.zones);
            if worker.update_strategy.is_none() {
                worker.update_strategy = existing.update_strategy;
            }
            if worker.provider_config.is_none() {
                worker.provider_config = existing.provider_config.clone();
            }
        }

        if worker.provider_config.is_none() {
            worker.provider_config = default_provider_config.cloned();
        }
        worker
    }
}

/// Existing zones in their order followed by requested zones not yet present
fn align_zones(existing: &[String], requested: &[String]) -> Vec<String> {
    let known: HashSet<&str> = existing.iter().map(String::as_str).collect();
    existing
        .iter()
        .chain(requested.iter().filter(|zone| !known.contains(zone.as_str())))
        .cloned()
        .collect()
}

impl Extender for ProviderPatchExtender {
    fn name(&self) -> &'static str {
        "provider"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        validate_single_main_worker(runtime)?;
        let provider = provider_type(runtime)?;

        let workers = self.ordered_workers(runtime);
        let infrastructure_config = self.infrastructure_config(runtime, provider, &workers)?;
        let control_plane_config = self.control_plane_config(provider)?;

        let default_provider_config = worker_provider_config(provider, &self.defaults)?;
        let workers = workers
            .into_iter()
            .map(|worker| self.patch_worker(worker, default_provider_config.as_ref()))
            .collect();

        shoot.spec.provider = Provider {
            provider_type: provider.as_str().to_string(),
            control_plane_config: Some(control_plane_config),
            infrastructure_config: Some(infrastructure_config),
            workers,
            workers_settings: Some(workers_settings()),
        };
        Ok(())
    }
}
