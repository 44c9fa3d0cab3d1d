//! Parsing of `apt-cache rdepends` output

use indexmap::IndexSet;
use tracing::debug;

use npm2deb_core::types::DebianName;

/// Header line preceding the list of reverse dependencies
const REVERSE_DEPENDS_HEADER: &str = "Reverse Depends:";

/// Extract reverse dependents in the order apt lists them.
///
/// Alternative markers (`|`) and architecture qualifiers (`:i386`) are
/// dropped, duplicates keep their first position. Output without the header
/// (unknown package) yields nothing.
pub fn parse_rdepends(output: &str) -> Vec<DebianName> {
    let mut lines = output.lines();
    if !lines.any(|line| line.trim() == REVERSE_DEPENDS_HEADER) {
        return Vec::new();
    }

    let mut dependents = IndexSet::new();
    for line in lines {
        let raw = line.trim().trim_start_matches('|').trim();
        if raw.is_empty() {
            continue;
        }
        let raw = raw.split_once(':').map_or(raw, |(name, _arch)| name);

        match DebianName::parse(raw) {
            Ok(name) => {
                dependents.insert(name);
            }
            Err(_) => debug!("Ignoring unexpected apt-cache line: {}", line),
        }
    }

    dependents.into_iter().collect()
}
