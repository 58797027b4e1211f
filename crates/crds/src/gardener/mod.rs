//! Gardener object model
//!
//! Types of the Gardener Shoot API consumed and produced by the converter:
//! - Shoot (the provisioned cluster)
//! - Worker pools (shared with the Runtime CRD)
//! - Provider configuration documents of shoot extensions

pub mod extensions;
pub mod shoot;
pub mod worker;

pub use shoot::*;
pub use worker::*;
