//! `npm2deb search` command implementation.
//!
//! Looks up the Debian package a module maps to.

use npm2deb_archive::ArchiveLookup;
use npm2deb_core::error::Npm2DebResult;
use npm2deb_core::naming;
use npm2deb_core::types::{ArchiveStatus, DebianName, ModuleName};

use super::CommandContext;
use crate::output::colors::ColorSupport;

/// Execute the `npm2deb search` command
pub async fn execute<R, A: ArchiveLookup>(
    module: &str,
    ctx: &CommandContext<R, A>,
) -> Npm2DebResult<()> {
    let module = ModuleName::parse(module)?;
    let debian_name = naming::to_debian_name(&module);
    let status = ctx.archive.status(&debian_name).await?;

    ctx.output.print(&render(
        &debian_name,
        &status,
        &ctx.config.archive.suite,
        ctx.output.colors(),
    ));
    Ok(())
}

pub fn render(
    debian_name: &DebianName,
    status: &ArchiveStatus,
    suite: &str,
    colors: &ColorSupport,
) -> String {
    let found = match status {
        ArchiveStatus::Packaged(version) => {
            colors.green(&format!("{} {}", debian_name, version))
        },
        ArchiveStatus::NotPackaged => {
            colors.yellow(&format!("{} is not in {}", debian_name, suite))
        },
    };
    format!("Looking for similar package:\n  {}", found)
}
