//! Provider block of a new Shoot

use crds::{Provider, Runtime, Shoot};
use hyperscaler::{ControlPlaneDocument, InfrastructureDocument};
use tracing::debug;

use super::{
    collect_zones, default_image, validate_single_main_worker, worker_provider_config, workers_settings,
    WorkerDefaults,
};
use crate::error::ConverterError;
use crate::extender::{provider_type, Extender};

/// Generates workers and provider documents from the Runtime alone
#[derive(Debug, Clone)]
pub struct ProviderCreateExtender {
    defaults: WorkerDefaults,
}

impl ProviderCreateExtender {
    /// Extender using `defaults` for unset worker fields
    pub fn new(defaults: WorkerDefaults) -> Self {
        Self { defaults }
    }
}

impl Extender for ProviderCreateExtender {
    fn name(&self) -> &'static str {
        "provider"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        validate_single_main_worker(runtime)?;
        let provider = provider_type(runtime)?;
        let spec = &runtime.spec.shoot;

        let zones = collect_zones(spec.provider.all_workers());
        let worker_cidr = &spec.networking.nodes;
        let dual_stack = spec.networking.dual_stack.unwrap_or(false);

        let infrastructure_config = match &spec.provider.infrastructure_config {
            Some(supplied) => {
                debug!("Using infrastructure config supplied by the Runtime");
                supplied.clone()
            }
            None => InfrastructureDocument::for_create(provider, worker_cidr, &zones, dual_stack)?.to_value()?,
        };
        let control_plane_config = match &spec.provider.control_plane_config {
            Some(supplied) => supplied.clone(),
            None => ControlPlaneDocument::for_create(provider).to_value()?,
        };

        let default_provider_config = worker_provider_config(provider, &self.defaults)?;
        let workers = spec
            .provider
            .all_workers()
            .map(|worker| {
                let mut worker = worker.clone();
                worker.machine.image = Some(default_image(worker.machine.image.as_ref(), &self.defaults));
                if worker.provider_config.is_none() {
                    worker.provider_config = default_provider_config.clone();
                }
                worker
            })
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
