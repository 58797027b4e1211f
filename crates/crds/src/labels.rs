//! Well-known labels and annotations
//!
//! Keys read from Runtime objects and written to Shoot objects.

/// Runtime label carrying the runtime ID
pub const RUNTIME_ID_LABEL: &str = "kyma-project.io/runtime-id";

/// Runtime label carrying the global account ID
pub const GLOBAL_ACCOUNT_LABEL: &str = "kyma-project.io/global-account-id";

/// Runtime label carrying the subaccount ID
pub const SUBACCOUNT_LABEL: &str = "kyma-project.io/subaccount-id";

/// Shoot label carrying the global account ID
pub const SHOOT_GLOBAL_ACCOUNT_LABEL: &str = "account";

/// Shoot label carrying the subaccount ID
pub const SHOOT_SUBACCOUNT_LABEL: &str = "subaccount";

/// Shoot annotation carrying the runtime ID
pub const SHOOT_RUNTIME_ID_ANNOTATION: &str = "infrastructuremanager.kyma-project.io/runtime-id";

/// Shoot annotation carrying the licence type
pub const SHOOT_LICENCE_TYPE_ANNOTATION: &str = "infrastructuremanager.kyma-project.io/licence-type";

/// Shoot annotation requesting EU-only access to cluster nodes
pub const SHOOT_EU_ACCESS_ANNOTATION: &str = "support.gardener.cloud/eu-access-for-cluster-nodes";

/// Seed label carrying the seed's cloud region
pub const SEED_REGION_LABEL: &str = "seed.gardener.cloud/region";
