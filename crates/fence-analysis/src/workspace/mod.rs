//! Monorepo layout: packages, source roots, entries and namespace.

pub mod layout;

pub use layout::{PackageLayout, WorkspaceLayout};
