//! Detection types.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCause {
    BoundaryViolation,
    DeletedPublicApi,
    TypeImportPrivateTarget,
    RelativeEscape,
    CircularImport,
}

impl ViolationCause {
    pub const ALL: [ViolationCause; 5] = [
        Self::BoundaryViolation,
        Self::DeletedPublicApi,
        Self::TypeImportPrivateTarget,
        Self::RelativeEscape,
        Self::CircularImport,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BoundaryViolation => "boundary_violation",
            Self::DeletedPublicApi => "deleted_public_api",
            Self::TypeImportPrivateTarget => "type_import_private_target",
            Self::RelativeEscape => "relative_escape",
            Self::CircularImport => "circular_import",
        }
    }

    /// Severity rank, higher is worse.
    pub fn severity_rank(self) -> u8 {
        match self {
            Self::DeletedPublicApi => 3,
            Self::BoundaryViolation | Self::RelativeEscape | Self::CircularImport => 2,
            Self::TypeImportPrivateTarget => 1,
        }
    }
}

impl fmt::Display for ViolationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact source/target/rule triple behind a violation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Proof {
    /// Repo-relative file that holds the offending statement.
    pub source: String,
    /// Module id, repo-relative path or cycle member the rule fired on.
    pub target: String,
    pub rule: ViolationCause,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Violation {
    pub package: String,
    /// Repo-relative, `/`-separated.
    pub path: String,
    pub cause: ViolationCause,
    pub specifier: String,
    pub proof: Proof,
}

impl Violation {
    /// `package:path:cause:specifier`, the minimal-cut entry.
    pub fn cut_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.package, self.path, self.cause, self.specifier
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Modified,
    Deleted,
}

/// One changed file between base and head. `path` is repo-relative.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiffEntry {
    pub status: DiffStatus,
    pub path: String,
}

impl DiffEntry {
    pub fn new(status: DiffStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    pub fn added(path: impl Into<String>) -> Self {
        Self::new(DiffStatus::Added, path)
    }

    pub fn modified(path: impl Into<String>) -> Self {
        Self::new(DiffStatus::Modified, path)
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self::new(DiffStatus::Deleted, path)
    }
}

/// A relative or workspace specifier in a changed file that resolved nowhere.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnresolvedSpecifier {
    pub path: String,
    pub specifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    /// Sorted, deduplicated.
    pub violations: Vec<Violation>,
    pub unresolved: Vec<UnresolvedSpecifier>,
    pub files_in_scope: usize,
    pub files_analyzed: usize,
    /// Deleted files could not be checked (no base revision reader).
    pub ambiguous: bool,
    pub completed: bool,
}

impl DetectionOutcome {
    /// Whether resolution or history left the result uncertain.
    pub fn is_uncertain(&self) -> bool {
        self.ambiguous || !self.unresolved.is_empty()
    }
}
