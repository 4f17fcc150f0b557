//! Specifier resolution: raw specifier + importing file → canonical module.

pub mod module_id;
pub mod specifier;
pub mod types;

pub use module_id::module_id_for;
pub use specifier::SpecifierResolver;
pub use types::{Resolution, ResolutionKind};
