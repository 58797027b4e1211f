//! Hyperscaler network layouts
//!
//! Partitions a worker network into per-zone subnets for AWS, Azure, Alicloud
//! and OpenStack, and models the provider configuration documents a Shoot
//! carries for each of them.
//!
//! Every generator implements [`ZoneGenerator`] and is append-stable: zones are
//! allocated in the order given, so the subnets of previously allocated zones
//! never change when new zones are appended.

pub mod alicloud;
pub mod aws;
pub mod azure;
pub mod cidr;
pub mod config;
pub mod error;
pub mod openstack;
pub mod provider;
pub mod zones;

pub use cidr::{parse_worker_cidr, Ipv4Cidr};
pub use config::{ControlPlaneDocument, InfrastructureDocument};
pub use error::HyperscalerError;
pub use provider::ProviderType;
pub use zones::ZoneGenerator;
