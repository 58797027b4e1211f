//! Service account token expiration

use crds::{Runtime, ServiceAccountConfig, Shoot};

use super::{kube_api_server, Extender};
use crate::error::ConverterError;

/// Longest lifetime of service account tokens (30 days)
pub const MAX_TOKEN_EXPIRATION: &str = "2592000s";

/// Caps service account token lifetimes
#[derive(Debug, Clone, Default)]
pub struct TokenExpirationExtender;

impl Extender for TokenExpirationExtender {
    fn name(&self) -> &'static str {
        "token-expiration"
    }

    fn apply(&self, _runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        kube_api_server(shoot).service_account_config = Some(ServiceAccountConfig {
            extend_token_expiration: Some(false),
            max_token_expiration: Some(MAX_TOKEN_EXPIRATION.to_string()),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_runtime, empty_shoot};

    #[test]
    fn test_token_expiration() {
        let runtime = create_test_runtime("aws", &["eu-central-1a"]);
        let mut shoot = empty_shoot();

        TokenExpirationExtender.apply(&runtime, &mut shoot).expect("token expiration set");

        let service_accounts = shoot
            .spec
            .kubernetes
            .kube_api_server
            .and_then(|api| api.service_account_config)
            .expect("service account config set");
        assert_eq!(service_accounts.extend_token_expiration, Some(false));
        assert_eq!(service_accounts.max_token_expiration.as_deref(), Some("2592000s"));
    }
}
