//! Module parser: tree-sitter TypeScript/TSX → import, re-export and
//! type-only specifiers plus the binding data shadow repair needs.

pub mod cache;
pub mod manager;
pub mod types;
pub mod typescript;

pub use manager::ModuleParser;
pub use types::{Binding, Dialect, ImportKind, ImportRecord, ParsedModule};
