//! NPM / Debian dependency tables

use npm2deb_core::types::{ArchiveStatus, DependencyKind};
use npm2deb_resolver::{DependencyReport, ReportEntry, ReportGraph};

use super::colors::ColorSupport;

/// Width of the NPM column, indentation included
pub const NPM_COLUMN_WIDTH: usize = 40;

/// Render one report as a titled table.
///
/// Deeper dependencies are indented under the module that pulled them in.
pub fn render_report(report: &DependencyReport, colors: &ColorSupport) -> String {
    let mut lines = Vec::new();

    let title = match report.kind() {
        DependencyKind::Build => "Build dependencies:",
        DependencyKind::Runtime => "Dependencies:",
    };
    lines.push(colors.bold(title));
    lines.push(colors.bold(&format_row("NPM", "Debian", 0)));

    if report.is_empty() {
        let kind = match report.kind() {
            DependencyKind::Build => "build dependencies",
            DependencyKind::Runtime => "dependencies",
        };
        lines.push(format!("Module {} has no {}.", report.root(), kind));
        return lines.join("\n");
    }

    for entry in report.entries() {
        lines.push(format_entry(entry, colors));
    }

    for warning in report.warnings() {
        lines.push(format!("{} {}", colors.yellow("warning:"), warning));
    }

    let graph = report.to_graph();
    for cycle in graph.cycles() {
        lines.push(format!(
            "{} dependency cycle {}",
            colors.yellow("note:"),
            ReportGraph::format_cycle(&cycle)
        ));
    }

    // Only a walk below the direct dependencies knows enough to order them
    if report.expanded().len() > 1 {
        let order: Vec<String> = graph
            .packaging_order()
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .filter(|name| name != report.root())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|group| !group.is_empty())
            .map(|group| group.join(" + "))
            .collect();
        if !order.is_empty() {
            lines.push(format!("Packaging order: {}", order.join(", ")));
        }
    }

    lines.join("\n")
}

fn format_entry(entry: &ReportEntry, colors: &ColorSupport) -> String {
    let debian = match &entry.status {
        ArchiveStatus::Packaged(version) => {
            colors.green(&format!("{} ({})", entry.debian_name, version))
        },
        ArchiveStatus::NotPackaged => {
            colors.yellow(&format!("{} (not packaged)", entry.debian_name))
        },
    };
    format_row(entry.edge.to.as_str(), &debian, entry.depth)
}

/// One table row, the NPM column padded to a fixed width
pub fn format_row(npm: &str, debian: &str, depth: usize) -> String {
    let npm = format!("{}{}", "  ".repeat(depth), npm);
    format!("{:<width$} {}", npm, debian, width = NPM_COLUMN_WIDTH)
}
