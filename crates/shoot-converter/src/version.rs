//! Ordering of dot-separated version strings
//!
//! Components are compared numerically by their leading digits, so `1.10.0`
//! sorts after `1.9.3`. Missing components count as zero. Versions that are
//! numerically equal fall back to plain string order to keep the order total.

use std::cmp::Ordering;

fn components(version: &str) -> Vec<u64> {
    version
        .trim_start_matches('v')
        .split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

/// Compare two versions
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let (left_parts, right_parts) = (components(left), components(right));
    let len = left_parts.len().max(right_parts.len());

    (0..len)
        .map(|i| {
            let l = left_parts.get(i).copied().unwrap_or(0);
            let r = right_parts.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| left.cmp(right))
}

/// The greater of two versions
pub fn max_version<'a>(left: &'a str, right: &'a str) -> &'a str {
    match compare_versions(left, right) {
        Ordering::Less => right,
        _ => left,
    }
}
