//! Zone generator abstraction
//!
//! Each hyperscaler partitions the worker network differently, so every
//! provider module brings its own [`ZoneGenerator`] with its own layout type.
//!
//! All generators share two rules:
//! - Zones are laid out in the order their names are supplied, never sorted.
//!   Re-running a generator with a list that starts with the previously
//!   allocated zones reproduces their subnets exactly; new zones only ever
//!   take the following free blocks.
//! - Every produced subnet lies inside the worker CIDR.

use crate::error::HyperscalerError;

/// Partitions a worker network into per-zone subnets
pub trait ZoneGenerator {
    /// Network layout produced for a list of zones
    type Layout;

    /// Generate the layout for `zone_names` inside `worker_cidr`
    fn generate(&self, worker_cidr: &str, zone_names: &[String]) -> Result<Self::Layout, HyperscalerError>;
}
