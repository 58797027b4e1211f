//! Comparison report

use std::fmt;

/// One field that differs between the expected and the actual Shoot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Field path, e.g. `spec/Provider`
    pub path: String,

    /// Both values rendered as JSON
    pub message: String,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of a Shoot comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    differences: Vec<Difference>,
}

impl ComparisonResult {
    /// True when no field differs
    pub fn passed(&self) -> bool {
        self.differences.is_empty()
    }

    /// Differing fields in comparison order
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.differences.push(Difference {
            path: path.into(),
            message: message.into(),
        });
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "Shoots are equal");
        }
        writeln!(f, "Shoots differ in {} field(s):", self.differences.len())?;
        for difference in &self.differences {
            writeln!(f, "  {}", difference)?;
        }
        Ok(())
    }
}
