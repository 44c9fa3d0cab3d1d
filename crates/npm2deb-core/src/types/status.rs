//! Archive status of a Debian package.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a Debian package exists in the archive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "version", rename_all = "kebab-case")]
pub enum ArchiveStatus {
    /// Present in the archive at the given Debian version
    Packaged(String),
    /// Not present in the archive
    NotPackaged,
}

impl ArchiveStatus {
    /// Check if the package is in the archive
    pub fn is_packaged(&self) -> bool {
        matches!(self, ArchiveStatus::Packaged(_))
    }

    /// Archive version, if packaged
    pub fn version(&self) -> Option<&str> {
        match self {
            ArchiveStatus::Packaged(version) => Some(version),
            ArchiveStatus::NotPackaged => None,
        }
    }
}

impl fmt::Display for ArchiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveStatus::Packaged(version) => write!(f, "packaged ({})", version),
            ArchiveStatus::NotPackaged => f.write_str("not packaged"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let packaged = ArchiveStatus::Packaged("1.2-1".to_string());
        assert!(packaged.is_packaged());
        assert_eq!(packaged.version(), Some("1.2-1"));

        assert!(!ArchiveStatus::NotPackaged.is_packaged());
        assert_eq!(ArchiveStatus::NotPackaged.version(), None);
    }

    #[test]
    fn test_status_json_shape() {
        let json = serde_json::to_string(&ArchiveStatus::Packaged("1.2-1".to_string())).unwrap();
        assert_eq!(json, r#"{"status":"packaged","version":"1.2-1"}"#);

        let json = serde_json::to_string(&ArchiveStatus::NotPackaged).unwrap();
        assert_eq!(json, r#"{"status":"not-packaged"}"#);
    }
}
