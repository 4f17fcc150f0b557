//! Resolution result types.

use std::path::PathBuf;

use fence_core::ModuleId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionKind {
    Relative,
    Workspace,
    External,
    Unresolved,
}

impl ResolutionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Workspace => "workspace",
            Self::External => "external",
            Self::Unresolved => "unresolved",
        }
    }
}

/// Where a specifier points.
///
/// `resolved_path` can be set while `target` is not: a relative import that
/// lands outside its own package still names a concrete file, which is what
/// relative-escape detection and the runtime hash need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub target: Option<ModuleId>,
    pub resolved_path: Option<PathBuf>,
    pub kind: ResolutionKind,
    pub escapes_package: bool,
}

impl Resolution {
    pub fn resolved(kind: ResolutionKind, target: ModuleId, path: PathBuf) -> Self {
        Self {
            target: Some(target),
            resolved_path: Some(path),
            kind,
            escapes_package: false,
        }
    }

    pub fn external() -> Self {
        Self {
            target: None,
            resolved_path: None,
            kind: ResolutionKind::External,
            escapes_package: false,
        }
    }

    pub fn unresolved() -> Self {
        Self {
            target: None,
            resolved_path: None,
            kind: ResolutionKind::Unresolved,
            escapes_package: false,
        }
    }

    /// An existing file outside the importer's package (or outside every
    /// package): no module id.
    pub fn outside(path: PathBuf, escapes_package: bool) -> Self {
        Self {
            target: None,
            resolved_path: Some(path),
            kind: ResolutionKind::Unresolved,
            escapes_package,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_external(&self) -> bool {
        self.kind == ResolutionKind::External
    }
}
