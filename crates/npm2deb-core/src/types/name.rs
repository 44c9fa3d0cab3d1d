//! Module and Debian package identifiers.
//!
//! Both types are validated at construction and immutable afterwards, so code
//! holding one never has to re-check it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Npm2DebError, Npm2DebResult};

/// Maximum length of an npm module name
const MAX_MODULE_NAME_LEN: usize = 214;

/// Validated npm module name (e.g. "left-pad" or "@types/node")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleName(String);

/// Debian package name derived from a module name (e.g. "node-left-pad")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DebianName(String);

impl ModuleName {
    /// Parse and validate a module name
    pub fn parse(name: &str) -> Npm2DebResult<Self> {
        let invalid = |reason: &str| Npm2DebError::InvalidModuleName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.len() > MAX_MODULE_NAME_LEN {
            return Err(invalid("name cannot be longer than 214 characters"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(invalid("name cannot contain spaces"));
        }
        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(invalid("name must be lowercase"));
        }

        match name.strip_prefix('@') {
            Some(scoped) => {
                let (scope, package) = scoped
                    .split_once('/')
                    .ok_or_else(|| invalid("scoped name must look like @scope/name"))?;
                Self::check_part(scope).map_err(|reason| invalid(reason))?;
                Self::check_part(package).map_err(|reason| invalid(reason))?;
            }
            None => Self::check_part(name).map_err(|reason| invalid(reason))?,
        }

        Ok(Self(name.to_string()))
    }

    /// Validate one path segment of a module name
    fn check_part(part: &str) -> Result<(), &'static str> {
        if part.is_empty() {
            return Err("name segment cannot be empty");
        }
        if part.starts_with('.') || part.starts_with('_') {
            return Err("name cannot start with '.' or '_'");
        }
        let allowed = |c: char| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_' | '~')
        };
        if !part.chars().all(allowed) {
            return Err("name contains characters outside a-z, 0-9, '-', '.', '_', '~'");
        }
        Ok(())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scope of a scoped module ("types" for "@types/node")
    pub fn scope(&self) -> Option<&str> {
        self.0.strip_prefix('@')?.split_once('/').map(|(scope, _)| scope)
    }

    /// Check if this is a scoped module
    pub fn is_scoped(&self) -> bool {
        self.0.starts_with('@')
    }
}

impl DebianName {
    /// Parse a Debian binary or source package name.
    ///
    /// Debian policy: at least two characters, lowercase alphanumerics plus
    /// `+`, `-` and `.`, starting with an alphanumeric.
    pub fn parse(name: &str) -> Npm2DebResult<Self> {
        let allowed = |c: char| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.')
        };
        let valid = name.len() >= 2
            && name.starts_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit())
            && name.chars().all(allowed);

        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(Npm2DebError::InvalidDebianName {
                name: name.to_string(),
                reason: "expected lowercase alphanumerics, '+', '-' or '.'".to_string(),
            })
        }
    }

    /// Wrap a name produced by the NameMapper
    pub(crate) fn from_mapped(name: String) -> Self {
        Self(name)
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ModuleName {
    type Err = Npm2DebError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for DebianName {
    type Err = Npm2DebError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ModuleName {
    type Error = Npm2DebError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<String> for DebianName {
    type Error = Npm2DebError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ModuleName> for String {
    fn from(name: ModuleName) -> Self {
        name.0
    }
}

impl From<DebianName> for String {
    fn from(name: DebianName) -> Self {
        name.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DebianName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DebianName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_module_names() {
        assert!(ModuleName::parse("left-pad").is_ok());
        assert!(ModuleName::parse("lodash.merge").is_ok());
        assert!(ModuleName::parse("string_decoder").is_ok());
        assert!(ModuleName::parse("@types/node").is_ok());
        assert!(ModuleName::parse("abc123~x").is_ok());
    }

    #[test]
    fn test_invalid_module_names() {
        assert!(ModuleName::parse("").is_err());
        assert!(ModuleName::parse("Left-Pad").is_err());
        assert!(ModuleName::parse("left pad").is_err());
        assert!(ModuleName::parse(".hidden").is_err());
        assert!(ModuleName::parse("_private").is_err());
        assert!(ModuleName::parse("bad@name").is_err());
        assert!(ModuleName::parse("@scope").is_err());
        assert!(ModuleName::parse("@/name").is_err());
        assert!(ModuleName::parse("@scope/").is_err());
        assert!(ModuleName::parse(&"a".repeat(215)).is_err());
    }

    #[test]
    fn test_invalid_name_error_carries_input() {
        match ModuleName::parse("Bad Name") {
            Err(Npm2DebError::InvalidModuleName { name, .. }) => assert_eq!(name, "Bad Name"),
            other => panic!("Expected InvalidModuleName, got {:?}", other),
        }
    }

    #[test]
    fn test_scope() {
        let scoped = ModuleName::parse("@types/node").unwrap();
        assert!(scoped.is_scoped());
        assert_eq!(scoped.scope(), Some("types"));

        let plain = ModuleName::parse("express").unwrap();
        assert!(!plain.is_scoped());
        assert_eq!(plain.scope(), None);
    }

    #[test]
    fn test_debian_names() {
        assert!(DebianName::parse("node-left-pad").is_ok());
        assert!(DebianName::parse("libjs-jquery").is_ok());
        assert!(DebianName::parse("g++").is_ok());

        assert!(DebianName::parse("a").is_err());
        assert!(DebianName::parse("-node").is_err());
        assert!(DebianName::parse("Node-x").is_err());
        assert!(DebianName::parse("node_x").is_err());
    }

    #[test]
    fn test_invalid_debian_name_is_not_a_module_error() {
        match DebianName::parse("node_x") {
            Err(Npm2DebError::InvalidDebianName { name, .. }) => assert_eq!(name, "node_x"),
            other => panic!("Expected InvalidDebianName, got {:?}", other),
        }
    }

    #[test]
    fn test_serde_validates() {
        let name: ModuleName = serde_json::from_str("\"left-pad\"").unwrap();
        assert_eq!(name.as_str(), "left-pad");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"left-pad\"");

        assert!(serde_json::from_str::<ModuleName>("\"Not Valid\"").is_err());
    }
}
