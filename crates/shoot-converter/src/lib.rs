//! Runtime to Shoot converter
//!
//! Translates a `Runtime` into the Gardener `Shoot` that provisions it, either
//! for a new cluster ([`Converter::new_create`]) or as an update of an existing
//! Shoot ([`Converter::new_patch`]) that keeps everything Gardener already
//! accepted (zone subnets, worker and extension order, image versions).
//!
//! The converter is synchronous and holds no state between calls; the
//! surrounding reconciler fetches and writes the objects.

pub mod auditlog;
pub mod config;
pub mod converter;
pub mod error;
pub mod extender;
pub mod keyed;
pub mod maintenance;
pub mod version;

#[cfg(test)]
mod test_utils;

pub use auditlog::{AuditLogData, AuditLogs};
pub use config::ConverterConfig;
pub use converter::{ConversionMode, Converter, CreateOpts, ExistingShoot, PatchOpts};
pub use error::ConverterError;
pub use extender::Extender;
pub use maintenance::{MaintenanceWindow, MaintenanceWindows};
