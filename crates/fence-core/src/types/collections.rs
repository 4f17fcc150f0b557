//! Fast hash collections for internal lookups.
//!
//! Anything that reaches output is re-collected into a `BTreeMap`/`BTreeSet`
//! or sorted `Vec` first; Fx iteration order never leaks.

pub use rustc_hash::{FxHashMap, FxHashSet};
