//! Maintenance settings

use crds::{Maintenance, MaintenanceAutoUpdate, MaintenanceTimeWindow, Runtime, Shoot};
use tracing::warn;

use super::Extender;
use crate::error::ConverterError;
use crate::maintenance::MaintenanceWindows;

/// Sets auto-update flags and the regional maintenance window
#[derive(Debug, Clone)]
pub struct MaintenanceExtender {
    kubernetes_version_auto_update: bool,
    machine_image_version_auto_update: bool,
    windows: MaintenanceWindows,
}

impl MaintenanceExtender {
    /// Extender with the given auto-update flags and window table
    pub fn new(
        kubernetes_version_auto_update: bool,
        machine_image_version_auto_update: bool,
        windows: MaintenanceWindows,
    ) -> Self {
        Self {
            kubernetes_version_auto_update,
            machine_image_version_auto_update,
            windows,
        }
    }
}

impl Extender for MaintenanceExtender {
    fn name(&self) -> &'static str {
        "maintenance"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let region = &runtime.spec.shoot.region;
        let time_window = match self.windows.get(region) {
            Ok(window) => Some(MaintenanceTimeWindow::from(window)),
            Err(e) if e.is_not_found() => {
                warn!("No maintenance window for region {}, leaving the time window to Gardener", region);
                None
            }
            Err(e) => return Err(e),
        };

        shoot.spec.maintenance = Some(Maintenance {
            auto_update: Some(MaintenanceAutoUpdate {
                kubernetes_version: self.kubernetes_version_auto_update,
                machine_image_version: Some(self.machine_image_version_auto_update),
            }),
            time_window,
        });
        Ok(())
    }
}
