//! Canonical evidence and the primary cause.

use std::collections::{BTreeMap, BTreeSet};

use crate::detection::{Violation, ViolationCause};

/// Deduplicated, byte-order sorted `package:path:cause:specifier` keys.
pub fn minimal_cut(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .map(Violation::cut_key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Worst cause by severity rank; ties go to the cause with more
/// violations, then to the lexicographically smaller name.
pub fn primary_cause(violations: &[Violation]) -> Option<ViolationCause> {
    let mut counts: BTreeMap<ViolationCause, usize> = BTreeMap::new();
    for v in violations {
        *counts.entry(v.cause).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|(a, a_count), (b, b_count)| {
            a.severity_rank()
                .cmp(&b.severity_rank())
                .then(a_count.cmp(b_count))
                .then_with(|| b.as_str().cmp(a.as_str()))
        })
        .map(|(cause, _)| cause)
}

