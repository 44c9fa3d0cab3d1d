//! Parsing of `rmadison` output
//!
//! Each line is `package | version | suite | architectures`, one per suite
//! the package is published in, oldest suite first.

use npm2deb_core::types::ArchiveStatus;

/// One row of `rmadison` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MadisonEntry {
    pub package: String,
    pub version: String,
    pub suite: String,
    pub architectures: Vec<String>,
}

/// Parse every well-formed row, skipping anything else
pub fn parse(output: &str) -> Vec<MadisonEntry> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('|').map(str::trim);
            let package = fields.next().filter(|f| !f.is_empty())?;
            let version = fields.next().filter(|f| !f.is_empty())?;
            let suite = fields.next().filter(|f| !f.is_empty())?;
            let architectures = fields
                .next()
                .map(|archs| {
                    archs
                        .split(',')
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            Some(MadisonEntry {
                package: package.to_string(),
                version: version.to_string(),
                suite: suite.to_string(),
                architectures,
            })
        })
        .collect()
}

/// Pick the archive status of `package` for `suite`.
///
/// The row for the requested suite wins; otherwise the last row (the newest
/// suite) is used. No rows means the package is not in the archive.
pub fn select_status(entries: &[MadisonEntry], package: &str, suite: &str) -> ArchiveStatus {
    let rows: Vec<&MadisonEntry> = entries.iter().filter(|e| e.package == package).collect();

    rows.iter()
        .find(|e| suite_matches(&e.suite, suite))
        .or_else(|| rows.last())
        .map(|e| ArchiveStatus::Packaged(e.version.clone()))
        .unwrap_or(ArchiveStatus::NotPackaged)
}

/// Compare suite names, treating code names of the rolling suites as aliases
fn suite_matches(found: &str, wanted: &str) -> bool {
    canonical_suite(found) == canonical_suite(wanted)
}

fn canonical_suite(suite: &str) -> &str {
    match suite {
        "sid" => "unstable",
        "rc-buggy" => "experimental",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = "\
 node-uuid | 1.4.0-1        | oldoldstable | all
 node-uuid | 8.3.2+~8.3.3-2 | bookworm     | all
 node-uuid | 9.0.1+~9.0.1-1 | sid          | all
 node-uuid | 9.0.1+~9.0.1-1 | trixie       | source, all
";

    #[test]
    fn test_parse_rows() {
        let entries = parse(OUTPUT);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].package, "node-uuid");
        assert_eq!(entries[0].version, "1.4.0-1");
        assert_eq!(entries[0].suite, "oldoldstable");
        assert_eq!(entries[3].architectures, vec!["source", "all"]);
    }

    #[test]
    fn test_parse_skips_noise() {
        let entries = parse("\nrmadison: warning\n | | |\nnode-a | 1.0-1 | sid | all\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].package, "node-a");
    }

    #[test]
    fn test_select_requested_suite() {
        let entries = parse(OUTPUT);
        assert_eq!(
            select_status(&entries, "node-uuid", "bookworm"),
            ArchiveStatus::Packaged("8.3.2+~8.3.3-2".to_string())
        );
    }

    #[test]
    fn test_unstable_matches_sid() {
        let entries = parse(OUTPUT);
        assert_eq!(
            select_status(&entries, "node-uuid", "unstable"),
            ArchiveStatus::Packaged("9.0.1+~9.0.1-1".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_newest_row() {
        let entries = parse(OUTPUT);
        assert_eq!(
            select_status(&entries, "node-uuid", "experimental"),
            ArchiveStatus::Packaged("9.0.1+~9.0.1-1".to_string())
        );
    }

    #[test]
    fn test_no_rows_is_not_packaged() {
        assert_eq!(select_status(&[], "node-nothing", "unstable"), ArchiveStatus::NotPackaged);

        let entries = parse(OUTPUT);
        assert_eq!(
            select_status(&entries, "node-other", "unstable"),
            ArchiveStatus::NotPackaged
        );
    }
}
