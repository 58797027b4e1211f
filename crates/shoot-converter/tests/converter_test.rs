//! End-to-end conversion tests through the public converter API

use crds::extensions::{AUDITLOG_EXTENSION_TYPE, DNS_EXTENSION_TYPE, OIDC_EXTENSION_TYPE};
use crds::{Extension, Runtime, Shoot, ShootMachineImage};
use serde_json::Value;
use shoot_converter::{
    AuditLogs, ConverterConfig, ConverterError, Converter, CreateOpts, ExistingShoot, MaintenanceWindows, PatchOpts,
};

const CONFIG: &str = r#"{
    "kubernetes": {
        "defaultVersion": "1.30",
        "enableKubernetesVersionAutoUpdate": true,
        "enableMachineImageVersionAutoUpdate": false,
        "defaultOperatorOidc": {
            "clientID": "operator-client",
            "issuerURL": "https://kyma.accounts.example.com",
            "groupsClaim": "groups",
            "usernameClaim": "sub",
            "usernamePrefix": "-",
            "signingAlgs": ["RS256"]
        }
    },
    "dns": {
        "secretName": "dns-secret",
        "domainPrefix": "dev.kyma.example.com",
        "providerType": "aws-route53"
    },
    "machineImage": {"defaultName": "gardenlinux", "defaultVersion": "1592.1.0"},
    "gardener": {"projectName": "kyma-dev"},
    "auditLogging": {"policyConfigMapName": "audit-policy"}
}"#;

const AUDIT_LOGS: &str = r#"{
    "aws": {
        "eu-central-1": {
            "tenantID": "79c64792-9c1e-4c1b-9941-ef7560dd3eae",
            "serviceURL": "https://auditlog.example.com:3001",
            "secretName": "auditlog-secret"
        }
    }
}"#;

const MAINTENANCE_WINDOWS: &str = r#"{
    "eu-central-1": {"begin": "210000+0000", "end": "000000+0000"}
}"#;

fn runtime_manifest(provider: &str, worker_cidr: &str, zones: &[&str]) -> String {
    format!(
        r#"
apiVersion: infrastructuremanager.kyma-project.io/v1
kind: Runtime
metadata:
  name: runtime-1
  namespace: kcp-system
  labels:
    kyma-project.io/runtime-id: runtime-1
    kyma-project.io/global-account-id: global-account-1
    kyma-project.io/subaccount-id: subaccount-1
spec:
  shoot:
    name: c-1a2b3c
    purpose: production
    platformRegion: cf-eu11
    region: eu-central-1
    secretBindingName: {provider}-binding
    provider:
      type: {provider}
      workers:
        - name: cpu-worker-0
          machine:
            type: m6i.large
          minimum: 1
          maximum: 3
          zones: [{zones}]
    networking:
      pods: 100.64.0.0/12
      nodes: {worker_cidr}
      services: 100.104.0.0/13
  security:
    administrators: [admin@example.com]
    networking:
      filter:
        egress:
          enabled: true
"#,
        zones = zones.iter().map(|zone| format!("\"{zone}\"")).collect::<Vec<_>>().join(", ")
    )
}

fn runtime(provider: &str, worker_cidr: &str, zones: &[&str]) -> Runtime {
    serde_yaml::from_str(&runtime_manifest(provider, worker_cidr, zones)).expect("valid Runtime manifest")
}

fn config() -> ConverterConfig {
    ConverterConfig::load(CONFIG.as_bytes()).expect("valid config")
}

fn audit_logs() -> AuditLogs {
    AuditLogs::from_reader(AUDIT_LOGS.as_bytes()).expect("valid audit logs")
}

fn maintenance_windows() -> MaintenanceWindows {
    MaintenanceWindows::from_reader(MAINTENANCE_WINDOWS.as_bytes()).expect("valid maintenance windows")
}

fn create_converter() -> Converter {
    Converter::new_create(CreateOpts {
        config: config(),
        audit_logs: audit_logs(),
        maintenance_windows: maintenance_windows(),
    })
}

fn patch_converter(existing: &Shoot) -> Converter {
    Converter::new_patch(PatchOpts {
        config: config(),
        audit_logs: audit_logs(),
        maintenance_windows: maintenance_windows(),
        existing: ExistingShoot::from(existing),
    })
}

fn infrastructure_zones(shoot: &Shoot) -> Vec<Value> {
    shoot
        .spec
        .provider
        .infrastructure_config
        .as_ref()
        .and_then(|infra| infra["networks"]["zones"].as_array().cloned())
        .expect("zones in infrastructure config")
}

fn extension_types(extensions: &[Extension]) -> Vec<&str> {
    extensions.iter().map(|e| e.extension_type.as_str()).collect()
}

#[test]
fn test_create_is_deterministic() {
    let runtime = runtime("aws", "10.250.0.0/16", &["eu-central-1a", "eu-central-1b"]);
    let converter = create_converter();

    let first = serde_json::to_string(&converter.to_shoot(&runtime).expect("conversion succeeds")).expect("serializable");
    let second = serde_json::to_string(&converter.to_shoot(&runtime).expect("conversion succeeds")).expect("serializable");

    assert_eq!(first, second, "same Runtime must produce identical Shoots");
}

#[test]
fn test_create_aws_shoot() {
    let runtime = runtime("aws", "10.250.0.0/16", &["eu-central-1a", "eu-central-1b", "eu-central-1c"]);
    let shoot = create_converter().to_shoot(&runtime).expect("conversion succeeds");

    assert_eq!(shoot.metadata.namespace.as_deref(), Some("garden-kyma-dev"));
    assert_eq!(shoot.spec.cloud_profile_name.as_deref(), Some("aws"));
    assert_eq!(shoot.spec.kubernetes.version, "1.30");
    assert_eq!(
        shoot.spec.dns.as_ref().and_then(|dns| dns.domain.as_deref()),
        Some("c-1a2b3c.dev.kyma.example.com")
    );

    let annotations = shoot.metadata.annotations.as_ref().expect("annotations");
    assert_eq!(
        annotations.get("support.gardener.cloud/eu-access-for-cluster-nodes").map(String::as_str),
        Some("true")
    );

    let zones = infrastructure_zones(&shoot);
    assert_eq!(zones[0]["name"], "eu-central-1a");
    assert_eq!(zones[0]["workers"], "10.250.0.0/19");
    assert_eq!(zones[0]["public"], "10.250.32.0/20");
    assert_eq!(zones[0]["internal"], "10.250.48.0/20");

    let maintenance = shoot.spec.maintenance.as_ref().expect("maintenance");
    assert_eq!(maintenance.time_window.as_ref().map(|w| w.end.as_str()), Some("000000+0000"));

    let api_server = shoot.spec.kubernetes.kube_api_server.as_ref().expect("API server config");
    assert!(api_server.audit_config.is_some(), "audit log configured for aws/eu-central-1");
    assert_eq!(
        api_server.oidc_config.as_ref().and_then(|oidc| oidc.client_id.as_deref()),
        Some("operator-client")
    );
    assert_eq!(shoot.spec.resources.len(), 1);
}

#[test]
fn test_create_azure_shoot() {
    let runtime = runtime("azure", "10.250.0.0/22", &["1"]);
    let shoot = create_converter().to_shoot(&runtime).expect("conversion succeeds");

    let zones = infrastructure_zones(&shoot);
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0]["name"], 1);
    assert_eq!(zones[0]["cidr"], "10.250.0.0/25");
    assert_eq!(zones[0]["natGateway"]["enabled"], true);
    assert_eq!(zones[0]["natGateway"]["idleConnectionTimeoutMinutes"], 4);

    assert_eq!(shoot.spec.cloud_profile_name.as_deref(), Some("az"));
    assert!(
        shoot.spec.extensions.iter().all(|e| e.extension_type != AUDITLOG_EXTENSION_TYPE),
        "no audit log tenant for azure"
    );
}

#[test]
fn test_patch_of_unchanged_runtime_reproduces_shoot() {
    let runtime = runtime("aws", "10.250.0.0/16", &["eu-central-1a", "eu-central-1b"]);
    let created = create_converter().to_shoot(&runtime).expect("conversion succeeds");

    let patched = patch_converter(&created).to_shoot(&runtime).expect("conversion succeeds");

    assert_eq!(
        serde_json::to_string(&patched).expect("serializable"),
        serde_json::to_string(&created).expect("serializable")
    );
}

#[test]
fn test_patch_with_known_zones_keeps_documents() {
    let initial = runtime("aws", "10.250.0.0/16", &["eu-central-1a", "eu-central-1b", "eu-central-1c"]);
    let existing = create_converter().to_shoot(&initial).expect("conversion succeeds");

    let reduced = runtime("aws", "10.250.0.0/16", &["eu-central-1c"]);
    let patched = patch_converter(&existing).to_shoot(&reduced).expect("conversion succeeds");

    let bytes = |value: &Option<Value>| serde_json::to_vec(value).expect("serializable");
    assert_eq!(
        bytes(&patched.spec.provider.infrastructure_config),
        bytes(&existing.spec.provider.infrastructure_config)
    );
    assert_eq!(
        bytes(&patched.spec.provider.control_plane_config),
        bytes(&existing.spec.provider.control_plane_config)
    );
    assert_eq!(
        patched.spec.provider.workers[0].zones,
        vec!["eu-central-1a", "eu-central-1b", "eu-central-1c"],
        "zones are never removed or reordered"
    );
}

#[test]
fn test_patch_appends_fourth_aws_zone() {
    let initial = runtime("aws", "10.250.0.0/16", &["eu-central-1a", "eu-central-1b", "eu-central-1c"]);
    let existing = create_converter().to_shoot(&initial).expect("conversion succeeds");

    let grown = runtime(
        "aws",
        "10.250.0.0/16",
        &["eu-central-1d", "eu-central-1a", "eu-central-1b", "eu-central-1c"],
    );
    let patched = patch_converter(&existing).to_shoot(&grown).expect("conversion succeeds");

    let before = infrastructure_zones(&existing);
    let after = infrastructure_zones(&patched);
    assert_eq!(after.len(), 4);
    assert_eq!(after[..3], before[..], "allocated zones keep their subnets");
    assert_eq!(after[3]["name"], "eu-central-1d");
    assert_eq!(after[3]["workers"], "10.250.192.0/22");
    assert_eq!(after[3]["public"], "10.250.196.0/22");
    assert_eq!(after[3]["internal"], "10.250.200.0/22");
}

#[test]
fn test_patch_preserves_extension_order() {
    let runtime = runtime("aws", "10.250.0.0/16", &["eu-central-1a"]);
    let mut existing = create_converter().to_shoot(&runtime).expect("conversion succeeds");
    existing.spec.extensions.reverse();
    existing.spec.extensions.retain(|e| e.extension_type != DNS_EXTENSION_TYPE);
    let existing_types: Vec<String> = extension_types(&existing.spec.extensions)
        .into_iter()
        .map(str::to_string)
        .collect();

    let patched = patch_converter(&existing).to_shoot(&runtime).expect("conversion succeeds");
    let patched_types = extension_types(&patched.spec.extensions);

    assert_eq!(patched_types[..existing_types.len()], existing_types[..]);
    assert_eq!(patched_types.last().copied(), Some(DNS_EXTENSION_TYPE), "new types are appended");
    assert!(patched_types.contains(&OIDC_EXTENSION_TYPE));
}

#[test]
fn test_patch_never_downgrades_versions() {
    let runtime = runtime("aws", "10.250.0.0/16", &["eu-central-1a"]);
    let mut existing = create_converter().to_shoot(&runtime).expect("conversion succeeds");
    existing.spec.kubernetes.version = "1.31.3".to_string();
    existing.spec.provider.workers[0].machine.image = Some(ShootMachineImage {
        name: "gardenlinux".to_string(),
        version: Some("1592.10.0".to_string()),
    });

    let patched = patch_converter(&existing).to_shoot(&runtime).expect("conversion succeeds");

    assert_eq!(patched.spec.kubernetes.version, "1.31.3");
    assert_eq!(
        patched.spec.provider.workers[0].machine.image.as_ref().and_then(|i| i.version.as_deref()),
        Some("1592.10.0")
    );
}

#[test]
fn test_single_main_worker_is_required() {
    let mut runtime = runtime("aws", "10.250.0.0/16", &["eu-central-1a"]);
    let extra = runtime.spec.shoot.provider.workers[0].clone();
    runtime.spec.shoot.provider.workers.push(extra);

    let err = create_converter().to_shoot(&runtime).expect_err("two main workers");
    match err {
        ConverterError::Extender { extender, source } => {
            assert_eq!(extender, "provider");
            assert!(matches!(*source, ConverterError::Validation(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unsupported_provider() {
    let runtime = runtime("gcp", "10.250.0.0/16", &["europe-west3-a"]);
    let err = create_converter().to_shoot(&runtime).expect_err("gcp is not supported");
    assert!(
        matches!(&err, ConverterError::Extender { source, .. } if matches!(**source, ConverterError::UnsupportedProvider(_))),
        "unexpected error: {err}"
    );
}
