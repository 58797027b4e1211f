//! Runtime to Shoot conversion
//!
//! A [`Converter`] seeds a bare Shoot from the Runtime and runs a fixed list of
//! extenders over it. The first failing extender aborts the conversion; a
//! partially converted Shoot is never returned.

use std::fmt;

use crds::{
    AuditConfig, Extension, IpFamily, Kubernetes, NamedResourceReference, Networking, Provider, Runtime, Shoot,
    ShootSpec, Worker,
};
use kube::ResourceExt;
use serde_json::Value;
use tracing::{debug, info};

use crate::auditlog::AuditLogs;
use crate::config::ConverterConfig;
use crate::error::ConverterError;
use crate::extender::access_restrictions::AccessRestrictionsExtender;
use crate::extender::annotations::AnnotationsExtender;
use crate::extender::audit_log::AuditLogExtender;
use crate::extender::cloud_profile::CloudProfileExtender;
use crate::extender::dns::DnsExtender;
use crate::extender::exposure_class::ExposureClassExtender;
use crate::extender::extensions::ExtensionsExtender;
use crate::extender::kubernetes::KubernetesVersionExtender;
use crate::extender::labels::LabelsExtender;
use crate::extender::maintenance::MaintenanceExtender;
use crate::extender::oidc::OidcExtender;
use crate::extender::provider::{ProviderCreateExtender, ProviderPatchExtender, WorkerDefaults};
use crate::extender::seed_selector::SeedSelectorExtender;
use crate::extender::token_expiration::TokenExpirationExtender;
use crate::extender::tolerations::TolerationsExtender;
use crate::extender::Extender;
use crate::maintenance::MaintenanceWindows;

/// Default networking type of new Shoots
pub const DEFAULT_NETWORKING_TYPE: &str = "calico";

/// Whether the Shoot is created or an existing one is updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// The Shoot does not exist yet
    Create,
    /// The Shoot exists and its accepted state must be preserved
    Patch,
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionMode::Create => write!(f, "create"),
            ConversionMode::Patch => write!(f, "patch"),
        }
    }
}

/// Inputs of a converter for new Shoots
#[derive(Debug, Clone, Default)]
pub struct CreateOpts {
    /// Converter configuration
    pub config: ConverterConfig,
    /// Audit log tenants
    pub audit_logs: AuditLogs,
    /// Maintenance windows
    pub maintenance_windows: MaintenanceWindows,
}

/// State of an existing Shoot that an update must preserve
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExistingShoot {
    /// Kubernetes version the Shoot runs
    pub kubernetes_version: String,
    /// Worker pools
    pub workers: Vec<Worker>,
    /// Infrastructure document
    pub infrastructure_config: Option<Value>,
    /// Control plane document
    pub control_plane_config: Option<Value>,
    /// Extensions in their current order
    pub extensions: Vec<Extension>,
    /// Referenced resources
    pub resources: Vec<NamedResourceReference>,
    /// API server audit policy
    pub audit_config: Option<AuditConfig>,
}

impl From<&Shoot> for ExistingShoot {
    fn from(shoot: &Shoot) -> Self {
        let spec = &shoot.spec;
        Self {
            kubernetes_version: spec.kubernetes.version.clone(),
            workers: spec.provider.workers.clone(),
            infrastructure_config: spec.provider.infrastructure_config.clone(),
            control_plane_config: spec.provider.control_plane_config.clone(),
            extensions: spec.extensions.clone(),
            resources: spec.resources.clone(),
            audit_config: spec
                .kubernetes
                .kube_api_server
                .as_ref()
                .and_then(|api_server| api_server.audit_config.clone()),
        }
    }
}

/// Inputs of a converter for existing Shoots
#[derive(Debug, Clone, Default)]
pub struct PatchOpts {
    /// Converter configuration
    pub config: ConverterConfig,
    /// Audit log tenants
    pub audit_logs: AuditLogs,
    /// Maintenance windows
    pub maintenance_windows: MaintenanceWindows,
    /// State of the existing Shoot
    pub existing: ExistingShoot,
}

/// Converts Runtimes into Shoots
#[derive(Debug)]
pub struct Converter {
    mode: ConversionMode,
    namespace: String,
    seed_extensions: Vec<Extension>,
    seed_resources: Vec<NamedResourceReference>,
    extenders: Vec<Box<dyn Extender>>,
}

impl Converter {
    /// Converter producing new Shoots
    pub fn new_create(opts: CreateOpts) -> Self {
        let CreateOpts {
            config,
            audit_logs,
            maintenance_windows,
        } = opts;

        let mut extenders = base_extenders(&config, &audit_logs, maintenance_windows, None);
        extenders.push(Box::new(ProviderCreateExtender::new(worker_defaults(&config))));

        Self {
            mode: ConversionMode::Create,
            namespace: config.project_namespace(),
            seed_extensions: Vec::new(),
            seed_resources: Vec::new(),
            extenders,
        }
    }

    /// Converter updating an existing Shoot
    pub fn new_patch(opts: PatchOpts) -> Self {
        let PatchOpts {
            config,
            audit_logs,
            maintenance_windows,
            existing,
        } = opts;

        let mut extenders = base_extenders(&config, &audit_logs, maintenance_windows, Some(&existing));
        extenders.push(Box::new(ProviderPatchExtender::new(
            worker_defaults(&config),
            existing.workers,
            existing.infrastructure_config,
            existing.control_plane_config,
        )));

        Self {
            mode: ConversionMode::Patch,
            namespace: config.project_namespace(),
            seed_extensions: existing.extensions,
            seed_resources: existing.resources,
            extenders,
        }
    }

    /// Mode the converter was built for
    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    /// Convert `runtime` into a Shoot
    pub fn to_shoot(&self, runtime: &Runtime) -> Result<Shoot, ConverterError> {
        info!(
            "Converting Runtime {} to Shoot {} ({})",
            runtime.name_any(),
            runtime.spec.shoot.name,
            self.mode
        );

        let mut shoot = self.seed(runtime);
        for extender in &self.extenders {
            debug!("Applying {} extender", extender.name());
            extender
                .apply(runtime, &mut shoot)
                .map_err(|source| ConverterError::Extender {
                    extender: extender.name(),
                    source: Box::new(source),
                })?;
        }

        info!("Converted Runtime {} to Shoot {}", runtime.name_any(), shoot.name_any());
        Ok(shoot)
    }

    fn seed(&self, runtime: &Runtime) -> Shoot {
        let spec = &runtime.spec.shoot;
        let networking = &spec.networking;

        let ip_families = if networking.dual_stack.unwrap_or(false) {
            vec![IpFamily::IPv4, IpFamily::IPv6]
        } else {
            Vec::new()
        };

        let mut shoot = Shoot::new(
            &spec.name,
            ShootSpec {
                control_plane: spec.control_plane.clone(),
                extensions: self.seed_extensions.clone(),
                kubernetes: Kubernetes::default(),
                networking: Some(Networking {
                    networking_type: Some(
                        networking
                            .networking_type
                            .clone()
                            .filter(|t| !t.is_empty())
                            .unwrap_or_else(|| DEFAULT_NETWORKING_TYPE.to_string()),
                    ),
                    ip_families,
                    nodes: Some(networking.nodes.clone()),
                    pods: Some(networking.pods.clone()),
                    services: Some(networking.services.clone()),
                }),
                provider: Provider::default(),
                purpose: Some(spec.purpose.clone()).filter(|p| !p.is_empty()),
                region: spec.region.clone(),
                resources: self.seed_resources.clone(),
                secret_binding_name: Some(spec.secret_binding_name.clone()),
                ..Default::default()
            },
        );
        shoot.metadata.namespace = Some(self.namespace.clone());
        shoot
    }
}

fn worker_defaults(config: &ConverterConfig) -> WorkerDefaults {
    WorkerDefaults {
        image_name: config.machine_image.default_name.clone(),
        image_version: config.machine_image.default_version.clone(),
        enable_imds_v2: config.provider.aws.enable_imds_v2,
    }
}

/// Extenders shared by both modes, in application order
fn base_extenders(
    config: &ConverterConfig,
    audit_logs: &AuditLogs,
    maintenance_windows: MaintenanceWindows,
    existing: Option<&ExistingShoot>,
) -> Vec<Box<dyn Extender>> {
    let kubernetes = &config.kubernetes;

    let mut kubernetes_version = KubernetesVersionExtender::new(kubernetes.default_version.clone());
    let mut audit_log = AuditLogExtender::new(config.audit_logging.policy_config_map_name.clone(), audit_logs.clone());
    if let Some(existing) = existing {
        kubernetes_version = kubernetes_version.with_current_version(&existing.kubernetes_version);
        if let Some(audit_config) = &existing.audit_config {
            audit_log = audit_log.with_existing_audit_config(audit_config.clone());
        }
    }

    let mut extenders: Vec<Box<dyn Extender>> = Vec::new();
    extenders.push(Box::new(AnnotationsExtender));
    extenders.push(Box::new(LabelsExtender));
    extenders.push(Box::new(kubernetes_version));
    extenders.push(Box::new(DnsExtender::new(config.dns.domain_prefix.clone())));
    extenders.push(Box::new(OidcExtender::new(kubernetes.default_operator_oidc.clone())));
    extenders.push(Box::new(CloudProfileExtender));
    extenders.push(Box::new(AccessRestrictionsExtender));
    extenders.push(Box::new(ExtensionsExtender::new(
        config.dns.secret_name.clone(),
        config.dns.provider_type.clone(),
        audit_logs.clone(),
    )));
    extenders.push(Box::new(ExposureClassExtender));
    extenders.push(Box::new(TolerationsExtender));
    extenders.push(Box::new(SeedSelectorExtender));
    extenders.push(Box::new(MaintenanceExtender::new(
        kubernetes.enable_kubernetes_version_auto_update,
        kubernetes.enable_machine_image_version_auto_update,
        maintenance_windows,
    )));
    extenders.push(Box::new(TokenExpirationExtender));
    extenders.push(Box::new(audit_log));
    extenders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_audit_logs, create_test_config, create_test_runtime};

    fn create_converter() -> Converter {
        Converter::new_create(CreateOpts {
            config: create_test_config(),
            audit_logs: create_test_audit_logs(),
            maintenance_windows: MaintenanceWindows::default(),
        })
    }

    #[test]
    fn test_extender_order() {
        let names: Vec<&str> = create_converter().extenders.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "annotations",
                "labels",
                "kubernetes",
                "dns",
                "oidc",
                "cloud-profile",
                "access-restrictions",
                "extensions",
                "exposure-class",
                "tolerations",
                "seed-selector",
                "maintenance",
                "token-expiration",
                "audit-log",
                "provider",
            ]
        );
    }

    #[test]
    fn test_seeded_fields() {
        let mut runtime = create_test_runtime("aws", &["eu-central-1a"]);
        runtime.spec.shoot.networking.dual_stack = Some(true);

        let shoot = create_converter().to_shoot(&runtime).expect("conversion succeeds");

        assert_eq!(shoot.metadata.name.as_deref(), Some("c-1a2b3c"));
        assert_eq!(shoot.metadata.namespace.as_deref(), Some("garden-kyma-dev"));
        assert_eq!(shoot.spec.region, "eu-central-1");
        assert_eq!(shoot.spec.purpose.as_deref(), Some("production"));
        assert_eq!(shoot.spec.secret_binding_name.as_deref(), Some("aws-binding"));

        let networking = shoot.spec.networking.expect("networking set");
        assert_eq!(networking.networking_type.as_deref(), Some("calico"));
        assert_eq!(networking.ip_families, vec![IpFamily::IPv4, IpFamily::IPv6]);
        assert_eq!(networking.nodes.as_deref(), Some("10.250.0.0/16"));
    }

    #[test]
    fn test_failing_extender_is_named() {
        let mut runtime = create_test_runtime("aws", &["eu-central-1a"]);
        runtime.spec.shoot.name.clear();

        let err = create_converter().to_shoot(&runtime).expect_err("empty name");
        assert!(matches!(err, ConverterError::Extender { extender: "dns", .. }), "unexpected error: {err}");
    }

    #[test]
    fn test_existing_shoot_state() {
        let shoot = create_converter()
            .to_shoot(&create_test_runtime("aws", &["eu-central-1a"]))
            .expect("conversion succeeds");
        let existing = ExistingShoot::from(&shoot);

        assert_eq!(existing.kubernetes_version, "1.30");
        assert_eq!(existing.workers, shoot.spec.provider.workers);
        assert_eq!(existing.extensions, shoot.spec.extensions);
        assert!(existing.infrastructure_config.is_some());
        assert!(existing.audit_config.is_some());
    }

    #[test]
    fn test_patch_without_audit_data_keeps_audit_state() {
        let runtime = create_test_runtime("aws", &["eu-central-1a"]);
        let created = create_converter().to_shoot(&runtime).expect("conversion succeeds");

        let patched = Converter::new_patch(PatchOpts {
            config: create_test_config(),
            audit_logs: AuditLogs::default(),
            maintenance_windows: MaintenanceWindows::default(),
            existing: ExistingShoot::from(&created),
        })
        .to_shoot(&runtime)
        .expect("conversion succeeds");

        let audit_config = |shoot: &Shoot| {
            shoot
                .spec
                .kubernetes
                .kube_api_server
                .as_ref()
                .and_then(|api| api.audit_config.clone())
        };
        assert!(audit_config(&created).is_some());
        assert_eq!(audit_config(&patched), audit_config(&created));
        assert_eq!(patched.spec.extensions, created.spec.extensions);
        assert_eq!(patched.spec.resources, created.spec.resources);
    }
}
