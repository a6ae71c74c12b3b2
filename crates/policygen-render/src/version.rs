//! Ordering of `minimumVersion` tokens.
//!
//! Versions are compared segment by segment after splitting on dots. Numeric
//! segments compare as numbers, anything else as text, and a version sorts
//! before any longer version it is a prefix of. So `1.9 < 1.10 < 1.10.1`.

use policygen_policies::Policy;
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Distinct minimum versions of `policies`, oldest first.
pub fn supported_versions(policies: &[Policy]) -> Vec<&str> {
    let distinct: BTreeSet<&str> = policies.iter().map(|p| p.minimum_version.as_str()).collect();
    let mut versions: Vec<&str> = distinct.into_iter().collect();
    versions.sort_by(|a, b| compare_versions(a, b));
    versions
}
