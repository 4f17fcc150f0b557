//! Parser output types.

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Grammar used for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    /// `.ts` → TypeScript, `.tsx` → TSX. Anything else is not parsed.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ts") => Some(Self::TypeScript),
            Some(ext) if ext.eq_ignore_ascii_case("tsx") => Some(Self::Tsx),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    pub fn ts_language(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// How a statement links to the module it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// `import … from 's'`, `import 's'`, `import x = require('s')`.
    Value,
    /// `export … from 's'`.
    Reexport,
    /// `import type … from 's'`.
    TypeImport,
    /// `export type … from 's'`.
    TypeReexport,
}

impl ImportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Reexport => "reexport",
            Self::TypeImport => "type-import",
            Self::TypeReexport => "type-reexport",
        }
    }

    /// Erased at runtime.
    pub fn is_type_only(self) -> bool {
        matches!(self, Self::TypeImport | Self::TypeReexport)
    }

    pub fn is_reexport(self) -> bool {
        matches!(self, Self::Reexport | Self::TypeReexport)
    }

    /// Part of the behavioral graph (triggers evaluation).
    pub fn is_behavioral(self) -> bool {
        !self.is_type_only()
    }
}

/// One name brought in or passed through by a statement.
///
/// `imported` is the name in the target module (`default`, `*` for a
/// namespace or star), `local` the name in this module (or the exported
/// name for re-exports).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Binding {
    pub imported: String,
    pub local: String,
}

impl Binding {
    pub fn new(imported: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            imported: imported.into(),
            local: local.into(),
        }
    }

    /// `export * from 's'`.
    pub fn is_star(&self) -> bool {
        self.imported == "*" && self.local == "*"
    }
}

/// One import or re-export statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub specifier: String,
    pub kind: ImportKind,
    /// Empty for side-effect imports. For type-only kinds these are the
    /// type names.
    pub bindings: SmallVec<[Binding; 4]>,
    /// `{ type A }` specifiers inside a value statement.
    pub inline_types: SmallVec<[Binding; 4]>,
    /// Byte range of the specifier text (inside the quotes) in the
    /// newline-normalized source.
    pub span: Range<usize>,
    /// 1-based line.
    pub line: u32,
}

impl ImportRecord {
    /// Names this statement brings in or passes through in type position.
    pub fn type_bindings(&self) -> impl Iterator<Item = &Binding> {
        let erased: &[Binding] = if self.kind.is_type_only() {
            &self.bindings
        } else {
            &[]
        };
        erased.iter().chain(self.inline_types.iter())
    }
}

/// Everything the analysis needs from one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedModule {
    /// Value-import specifiers in source order (side-effect imports included).
    pub value_imports: Vec<String>,
    /// Value re-export specifiers in source order.
    pub reexports: Vec<String>,
    /// Type-only import and re-export specifiers in source order.
    pub type_imports: Vec<String>,
    /// All statements, in source order.
    pub records: Vec<ImportRecord>,
    /// Names declared and exported by this module (`default` included).
    pub local_exports: Vec<String>,
    /// `export { local as exported }` without a source:
    /// `imported` = local name, `local` = exported name.
    pub export_aliases: Vec<Binding>,
    /// `export type { … }` and inline `{ type … }` entries of a local
    /// export list, same shape as `export_aliases`.
    pub type_export_aliases: Vec<Binding>,
    /// False when the module only imports, re-exports, lists exports and
    /// declares types, i.e. evaluating it runs no code of its own.
    pub has_own_effects: bool,
    pub has_errors: bool,
}

impl ParsedModule {
    /// Records that take part in the behavioral graph.
    pub fn behavioral_records(&self) -> impl Iterator<Item = &ImportRecord> {
        self.records.iter().filter(|r| r.kind.is_behavioral())
    }

    /// The value import that binds `local` in this module, if any.
    pub fn import_binding(&self, local: &str) -> Option<(&ImportRecord, &Binding)> {
        self.records
            .iter()
            .filter(|r| r.kind == ImportKind::Value)
            .find_map(|r| r.bindings.iter().find(|b| b.local == local).map(|b| (r, b)))
    }

    pub fn exports_locally(&self, name: &str) -> bool {
        self.local_exports.iter().any(|n| n == name)
    }
}
