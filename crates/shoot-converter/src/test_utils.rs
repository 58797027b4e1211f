//! Test fixtures shared by the extender and converter tests

#[cfg(test)]
use std::collections::BTreeMap;

#[cfg(test)]
use crds::labels::{GLOBAL_ACCOUNT_LABEL, RUNTIME_ID_LABEL, SUBACCOUNT_LABEL};
#[cfg(test)]
use crds::{
    Dns, Machine, Runtime, RuntimeNetworking, RuntimeProvider, RuntimeShoot, RuntimeSpec, Shoot, ShootSpec, Worker,
};
#[cfg(test)]
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

#[cfg(test)]
use crate::auditlog::{AuditLogData, AuditLogs};
#[cfg(test)]
use crate::config::{
    AuditLogConfig, ConverterConfig, DnsConfig, GardenerConfig, KubernetesConfig, MachineImageConfig,
};
#[cfg(test)]
use crate::extender::provider::WorkerDefaults;

/// Helper to create a worker pool in `zones`
#[cfg(test)]
pub fn create_test_worker(name: &str, zones: &[&str]) -> Worker {
    Worker {
        name: name.to_string(),
        machine: Machine {
            machine_type: "m6i.large".to_string(),
            ..Default::default()
        },
        minimum: 1,
        maximum: 3,
        zones: zones.iter().map(|z| z.to_string()).collect(),
        ..Default::default()
    }
}

/// Helper to create a Runtime with a single main worker
#[cfg(test)]
pub fn create_test_runtime(provider: &str, zones: &[&str]) -> Runtime {
    let labels = BTreeMap::from([
        (RUNTIME_ID_LABEL.to_string(), "runtime-1".to_string()),
        (GLOBAL_ACCOUNT_LABEL.to_string(), "global-account-1".to_string()),
        (SUBACCOUNT_LABEL.to_string(), "subaccount-1".to_string()),
    ]);

    Runtime {
        metadata: ObjectMeta {
            name: Some("runtime-1".to_string()),
            namespace: Some("kcp-system".to_string()),
            labels: Some(labels),
            ..Default::default()
        },
        spec: RuntimeSpec {
            shoot: RuntimeShoot {
                name: "c-1a2b3c".to_string(),
                purpose: "production".to_string(),
                platform_region: "cf-eu10".to_string(),
                region: "eu-central-1".to_string(),
                secret_binding_name: format!("{provider}-binding"),
                provider: RuntimeProvider {
                    provider_type: provider.to_string(),
                    workers: vec![create_test_worker("cpu-worker-0", zones)],
                    ..Default::default()
                },
                networking: RuntimeNetworking {
                    networking_type: None,
                    pods: "100.64.0.0/12".to_string(),
                    nodes: "10.250.0.0/16".to_string(),
                    services: "100.104.0.0/13".to_string(),
                    dual_stack: None,
                },
                ..Default::default()
            },
            ..Default::default()
        },
        status: None,
    }
}

/// Helper to create an empty Shoot
#[cfg(test)]
pub fn empty_shoot() -> Shoot {
    Shoot::new("c-1a2b3c", ShootSpec::default())
}

/// Helper to set the domain the DNS extender would set
#[cfg(test)]
pub fn with_domain(mut shoot: Shoot, domain: &str) -> Shoot {
    shoot.spec.dns = Some(Dns {
        domain: Some(domain.to_string()),
    });
    shoot
}

/// Helper to create audit log tenants for AWS in eu-central-1
#[cfg(test)]
pub fn create_test_audit_logs() -> AuditLogs {
    let mut logs = AuditLogs::default();
    logs.insert(
        "aws",
        "eu-central-1",
        AuditLogData {
            tenant_id: "79c64792-9c1e-4c1b-9941-ef7560dd3eae".to_string(),
            service_url: "https://auditlog.example.com:3001".to_string(),
            secret_name: "auditlog-secret".to_string(),
        },
    );
    logs
}

/// Helper to create worker defaults
#[cfg(test)]
pub fn create_test_worker_defaults() -> WorkerDefaults {
    WorkerDefaults {
        image_name: "gardenlinux".to_string(),
        image_version: "1592.1.0".to_string(),
        enable_imds_v2: false,
    }
}

/// Helper to create a valid converter configuration
#[cfg(test)]
pub fn create_test_config() -> ConverterConfig {
    ConverterConfig {
        kubernetes: KubernetesConfig {
            default_version: "1.30".to_string(),
            ..Default::default()
        },
        dns: DnsConfig {
            secret_name: "dns-secret".to_string(),
            domain_prefix: "dev.kyma.example.com".to_string(),
            provider_type: "aws-route53".to_string(),
        },
        machine_image: MachineImageConfig {
            default_name: "gardenlinux".to_string(),
            default_version: "1592.1.0".to_string(),
        },
        gardener: GardenerConfig {
            project_name: "kyma-dev".to_string(),
        },
        audit_logging: AuditLogConfig {
            policy_config_map_name: "audit-policy".to_string(),
            tenant_config_path: None,
        },
        ..Default::default()
    }
}
