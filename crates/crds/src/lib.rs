//! Runtime and Shoot object model
//!
//! Kubernetes resource types consumed and produced by the shoot converter:
//! - `Runtime`: the high-level cluster CRD
//! - `Shoot`: the Gardener cluster object
//! - Well-known labels and annotations

pub mod gardener;
pub mod labels;
pub mod runtime;

pub use gardener::*;
pub use runtime::*;
