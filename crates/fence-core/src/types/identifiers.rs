//! Canonical identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MODULE_ID_PREFIX;

/// Canonical, case- and extension-independent identity of a module:
/// `pkg:<package>` for a package entry, `pkg:<package>:<path>` otherwise.
///
/// Ordering is plain byte order so sorted output is identical on every platform.
/// Serialized as the bare string; deserialization goes through
/// [`ModuleId::parse`], so every id carries the `pkg:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Build an id from a package name and an optional module path
    /// (already extension-free, `/`-separated). Both parts are case-folded.
    pub fn new(package: &str, module_path: Option<&str>) -> Self {
        let package = package.to_lowercase();
        match module_path.filter(|p| !p.is_empty()) {
            Some(path) => Self(format!("{MODULE_ID_PREFIX}{package}:{}", path.to_lowercase())),
            None => Self(format!("{MODULE_ID_PREFIX}{package}")),
        }
    }

    /// The bare package id, `pkg:<package>`.
    pub fn package_root(package: &str) -> Self {
        Self::new(package, None)
    }

    /// Parse a serialized id. Returns `None` unless it has the `pkg:` prefix
    /// and a non-empty package name.
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(MODULE_ID_PREFIX)?;
        let package = rest.split(':').next().unwrap_or("");
        if package.is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Package part of the id.
    pub fn package(&self) -> &str {
        let rest = &self.0[MODULE_ID_PREFIX.len()..];
        rest.split_once(':').map(|(pkg, _)| pkg).unwrap_or(rest)
    }

    /// Module path part, `None` for a package entry.
    pub fn module_path(&self) -> Option<&str> {
        let rest = &self.0[MODULE_ID_PREFIX.len()..];
        rest.split_once(':').map(|(_, path)| path)
    }

    /// True for the bare `pkg:<package>` form.
    pub fn is_package_root(&self) -> bool {
        self.module_path().is_none()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| format!("'{raw}' is not a module id"))
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_root_has_no_path() {
        let id = ModuleId::package_root("Beta");
        assert_eq!(id.as_str(), "pkg:beta");
        assert_eq!(id.package(), "beta");
        assert!(id.is_package_root());
    }

    #[test]
    fn module_path_round_trips_through_parse() {
        let id = ModuleId::new("beta", Some("Internal/Secret"));
        assert_eq!(id.as_str(), "pkg:beta:internal/secret");
        assert_eq!(ModuleId::parse(id.as_str()), Some(id.clone()));
        assert_eq!(id.module_path(), Some("internal/secret"));
    }

    #[test]
    fn parse_rejects_foreign_strings() {
        assert!(ModuleId::parse("beta:internal").is_none());
        assert!(ModuleId::parse("pkg:").is_none());
    }

    #[test]
    fn deserialization_validates_the_prefix() {
        let id: ModuleId = serde_json::from_str("\"pkg:beta:internal/secret\"").unwrap();
        assert_eq!(id.package(), "beta");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"pkg:beta:internal/secret\"");

        assert!(serde_json::from_str::<ModuleId>("\"ab\"").is_err());
        assert!(serde_json::from_str::<ModuleId>("\"pkg:\"").is_err());
    }
}
