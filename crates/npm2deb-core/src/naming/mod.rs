//! Translation between npm module names and Debian package names.
//!
//! Debian ships npm modules as `node-<name>`, even when the module name
//! already starts with `node-` (`node-uuid` becomes `node-node-uuid`). Scoped
//! modules lose the `@` and have the scope joined with a dash (`@types/node`
//! becomes `node-types-node`). Characters Debian does not allow in package
//! names are replaced with `-`.

use crate::types::{DebianName, ModuleName};

/// Prefix used for every npm module packaged in Debian
pub const DEBIAN_PREFIX: &str = "node-";

/// Map a module name to its canonical Debian package name
pub fn to_debian_name(module: &ModuleName) -> DebianName {
    let debianized: String = module
        .as_str()
        .trim_start_matches('@')
        .chars()
        .map(|c| match c {
            '/' | '_' | '~' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    DebianName::from_mapped(format!("{}{}", DEBIAN_PREFIX, debianized))
}

/// Best-effort inverse of [`to_debian_name`].
///
/// Exactly one `node-` prefix is removed. Scopes and replaced characters
/// cannot be recovered, so the result is only a guess at the unscoped module
/// name.
pub fn to_module_name(debian: &DebianName) -> Option<ModuleName> {
    let stripped = debian.as_str().strip_prefix(DEBIAN_PREFIX)?;
    ModuleName::parse(stripped).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn debian(module: &str) -> String {
        to_debian_name(&ModuleName::parse(module).unwrap()).to_string()
    }

    #[test]
    fn test_plain_names() {
        assert_eq!(debian("left-pad"), "node-left-pad");
        assert_eq!(debian("string_decoder"), "node-string-decoder");
        assert_eq!(debian("lodash.merge"), "node-lodash.merge");
    }

    #[test]
    fn test_scoped_names() {
        assert_eq!(debian("@types/node"), "node-types-node");
        assert_eq!(debian("@babel/core"), "node-babel-core");
    }

    #[test]
    fn test_existing_prefix_is_kept() {
        assert_eq!(debian("node-uuid"), "node-node-uuid");
        assert_eq!(debian("node"), "node-node");
        assert_ne!(debian("uuid"), debian("node-uuid"));
    }

    #[test]
    fn test_inverse() {
        let name = DebianName::parse("node-left-pad").unwrap();
        assert_eq!(to_module_name(&name).unwrap().as_str(), "left-pad");

        let doubled = DebianName::parse("node-node-uuid").unwrap();
        assert_eq!(to_module_name(&doubled).unwrap().as_str(), "node-uuid");

        let other = DebianName::parse("libjs-jquery").unwrap();
        assert!(to_module_name(&other).is_none());
    }

    proptest! {
        #[test]
        fn mapped_names_are_valid_debian_names(raw in "[a-z0-9][a-z0-9._~-]{0,30}") {
            let module = ModuleName::parse(&raw).unwrap();
            let mapped = to_debian_name(&module);
            prop_assert!(DebianName::parse(mapped.as_str()).is_ok());
            prop_assert!(mapped.as_str().starts_with(DEBIAN_PREFIX));
        }

        #[test]
        fn mapping_is_deterministic(
            scope in "[a-z][a-z0-9-]{0,10}",
            pkg in "[a-z][a-z0-9._-]{0,10}",
        ) {
            let module = ModuleName::parse(&format!("@{}/{}", scope, pkg)).unwrap();
            prop_assert_eq!(to_debian_name(&module), to_debian_name(&module.clone()));
        }

        #[test]
        fn distinct_plain_names_stay_distinct(
            a in "[a-z0-9][a-z0-9.-]{0,20}",
            b in "[a-z0-9][a-z0-9.-]{0,20}",
        ) {
            prop_assume!(a != b);
            let a = ModuleName::parse(&a).unwrap();
            let b = ModuleName::parse(&b).unwrap();
            prop_assert_ne!(to_debian_name(&a), to_debian_name(&b));
        }

        #[test]
        fn inverse_recovers_plain_names(raw in "[a-z0-9][a-z0-9.-]{0,20}") {
            let module = ModuleName::parse(&raw).unwrap();
            prop_assert_eq!(to_module_name(&to_debian_name(&module)), Some(module));
        }
    }
}
