//! Shoot domain

use crds::{Dns, Runtime, Shoot};

use super::Extender;
use crate::error::ConverterError;

/// Sets `spec.dns.domain` to `<shoot name>.<domain prefix>`
#[derive(Debug, Clone)]
pub struct DnsExtender {
    domain_prefix: String,
}

impl DnsExtender {
    /// Extender appending `domain_prefix` to the shoot name
    pub fn new(domain_prefix: impl Into<String>) -> Self {
        Self {
            domain_prefix: domain_prefix.into(),
        }
    }
}

impl Extender for DnsExtender {
    fn name(&self) -> &'static str {
        "dns"
    }

    fn apply(&self, runtime: &Runtime, shoot: &mut Shoot) -> Result<(), ConverterError> {
        let shoot_name = &runtime.spec.shoot.name;
        if shoot_name.is_empty() {
            return Err(ConverterError::Validation("Shoot name must not be empty".to_string()));
        }

        shoot.spec.dns = Some(Dns {
            domain: Some(format!("{}.{}", shoot_name, self.domain_prefix)),
        });
        Ok(())
    }
}
