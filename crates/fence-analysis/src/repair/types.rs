//! Fix plan and verdict types.

use serde::{Deserialize, Serialize};

use crate::detection::ViolationCause;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixRisk {
    #[default]
    Low,
    Medium,
    High,
}

/// Replace one specifier in one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixEdit {
    /// Repo-relative.
    pub path: String,
    pub from_specifier: String,
    pub to_specifier: String,
    pub cause: ViolationCause,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCondition {
    /// Minimal-cut keys the edits are meant to remove.
    pub resolves: Vec<String>,
    /// Minimal-cut keys no rewrite rule covers.
    pub unrepairable: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixPlan {
    pub edits: Vec<FixEdit>,
    pub risk: FixRisk,
    pub post_condition: PostCondition,
}

impl FixPlan {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairDecision {
    FixProvenSafe,
    FixInsufficient,
    FixBehaviorChanged,
    FixRuntimeChanged,
    FixEvaluationOrderChanged,
    RepairImpossible,
}

impl RepairDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FixProvenSafe => "fix_proven_safe",
            Self::FixInsufficient => "fix_insufficient",
            Self::FixBehaviorChanged => "fix_behavior_changed",
            Self::FixRuntimeChanged => "fix_runtime_changed",
            Self::FixEvaluationOrderChanged => "fix_evaluation_order_changed",
            Self::RepairImpossible => "repair_impossible",
        }
    }

    pub fn is_safe(self) -> bool {
        self == Self::FixProvenSafe
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashPair {
    pub baseline: String,
    pub overlay: String,
}

impl HashPair {
    pub fn new(baseline: String, overlay: String) -> Self {
        Self { baseline, overlay }
    }

    pub fn matches(&self) -> bool {
        self.baseline == self.overlay
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalenceHashes {
    pub semantic: HashPair,
    pub runtime: HashPair,
    pub evaluation_order: HashPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairVerdict {
    pub decision: RepairDecision,
    /// Minimal cut left after the overlay re-run.
    pub residual_cut: Vec<String>,
    /// Repo-relative files the plan touches, sorted.
    pub touched_files: Vec<String>,
    /// Present only when the overlay cleared every violation.
    pub hashes: Option<EquivalenceHashes>,
    /// Status and violation count, baseline vs overlay. Always recorded.
    pub diagnostics: HashPair,
}
