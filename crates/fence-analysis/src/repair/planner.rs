//! FixPlanner — one fixed rewrite rule per violation cause.
//!
//! Private-path imports (value or type) and relative escapes are rewritten
//! to the target package's public entry specifier. Deleted public API and
//! cross-package cycles have no rewrite rule.

use std::collections::BTreeSet;

use fence_core::ModuleId;

use super::types::{FixEdit, FixPlan, FixRisk, PostCondition};
use crate::detection::{Violation, ViolationCause};
use crate::workspace::WorkspaceLayout;

pub struct FixPlanner<'a> {
    layout: &'a WorkspaceLayout,
}

impl<'a> FixPlanner<'a> {
    pub fn new(layout: &'a WorkspaceLayout) -> Self {
        Self { layout }
    }

    pub fn plan(&self, violations: &[Violation]) -> FixPlan {
        let mut edits: BTreeSet<FixEdit> = BTreeSet::new();
        let mut resolves: BTreeSet<String> = BTreeSet::new();
        let mut unrepairable: BTreeSet<String> = BTreeSet::new();

        for violation in violations {
            match self.rewrite_target(violation) {
                Some(to_specifier) => {
                    edits.insert(FixEdit {
                        path: violation.path.clone(),
                        from_specifier: violation.specifier.clone(),
                        to_specifier,
                        cause: violation.cause,
                    });
                    resolves.insert(violation.cut_key());
                }
                None => {
                    unrepairable.insert(violation.cut_key());
                }
            }
        }

        let edits: Vec<FixEdit> = edits.into_iter().collect();
        let risk = assess_risk(&edits);
        tracing::debug!(
            edits = edits.len(),
            unrepairable = unrepairable.len(),
            risk = ?risk,
            "fix plan"
        );
        FixPlan {
            edits,
            risk,
            post_condition: PostCondition {
                resolves: resolves.into_iter().collect(),
                unrepairable: unrepairable.into_iter().collect(),
            },
        }
    }

    fn rewrite_target(&self, violation: &Violation) -> Option<String> {
        match violation.cause {
            ViolationCause::BoundaryViolation | ViolationCause::TypeImportPrivateTarget => {
                let target = ModuleId::parse(&violation.proof.target)?;
                let package = self.layout.package_by_id_name(target.package())?;
                Some(self.layout.entry_specifier(&package.name))
            }
            ViolationCause::RelativeEscape => {
                let escaped_into = self.layout.absolute(&violation.proof.target);
                let package = self.layout.package_for_path(&escaped_into)?;
                Some(self.layout.entry_specifier(&package.name))
            }
            ViolationCause::DeletedPublicApi | ViolationCause::CircularImport => None,
        }
    }
}

fn assess_risk(edits: &[FixEdit]) -> FixRisk {
    if edits.iter().any(|e| e.cause == ViolationCause::RelativeEscape) {
        FixRisk::High
    } else if edits
        .iter()
        .all(|e| e.cause == ViolationCause::TypeImportPrivateTarget)
    {
        FixRisk::Low
    } else {
        FixRisk::Medium
    }
}
