//! Shoot comparator
//!
//! Reports the fields in which two Gardener Shoot objects differ. Used to
//! verify that a converter change reproduces the Shoots it produced before.

pub mod error;
mod extensions;
pub mod matcher;
pub mod result;

pub use error::ComparatorError;
pub use matcher::{compare_documents, compare_shoots, ShootMatcher};
pub use result::{ComparisonResult, Difference};
