//! Conversion pipeline steps
//!
//! Every [`Extender`] owns one concern of the Shoot. The converter applies them
//! in a fixed order; later extenders may read what earlier ones wrote.

pub mod access_restrictions;
pub mod annotations;
pub mod audit_log;
pub mod cloud_profile;
pub mod dns;
pub mod exposure_class;
pub mod extensions;
pub mod kubernetes;
pub mod labels;
pub mod maintenance;
pub mod oidc;
pub mod provider;
pub mod seed_selector;
pub mod token_expiration;
pub mod tolerations;

use std::fmt;

use crds::{KubeApiServerConfig, Runtime, Shoot};
use hyperscaler::ProviderType;

use crate::error::ConverterError;

/// One step of the Runtime to Shoot conversion
pub trait Extender: fmt::Debug + Send + Sync {
    /// Concern handled by the extender, used in errors and logs
    fn name(&self) -> &'static str;

    /// Write the concern into `shoot`
    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError>;
}

/// Provider type of the Runtime
pub(crate) fn provider_type(runtime: &Runtime) -> Result<ProviderType, ConverterError> {
    let provider = &runtime.spec.shoot.provider.provider_type;
    provider
        .parse()
        .map_err(|_| ConverterError::UnsupportedProvider(provider.clone()))
}

/// API server section of the Shoot, created on first use
pub(crate) fn kube_api_server(shoot: &mut Shoot) -> &mut KubeApiServerConfig {
    shoot
        .spec
        .kubernetes
        .kube_api_server
        .get_or_insert_with(KubeApiServerConfig::default)
}
