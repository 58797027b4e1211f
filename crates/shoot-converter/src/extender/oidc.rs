//! API server OIDC configuration

use crds::{OidcConfig, Runtime, Shoot};
use tracing::debug;

use super::{kube_api_server, Extender};
use crate::error::ConverterError;

/// Sets the OIDC provider of the API server, falling back to the operator default
#[derive(Debug, Clone)]
pub struct OidcExtender {
    default_oidc: OidcConfig,
}

impl OidcExtender {
    /// Extender falling back to `default_oidc`
    pub fn new(default_oidc: OidcConfig) -> Self {
        Self { default_oidc }
    }
}

impl Extender for OidcExtender {
    fn name(&self) -> &'static str {
        "oidc"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let requested = &runtime.spec.shoot.kubernetes.kube_api_server.oidc_config;
        let oidc = if requested.is_configured() {
            requested
        } else {
            debug!("Runtime has no OIDC provider, using the operator default");
            &self.default_oidc
        };

        if oidc.is_configured() {
            kube_api_server(shoot).oidc_config = Some(oidc.clone());
        }
        Ok(())
    }
}
