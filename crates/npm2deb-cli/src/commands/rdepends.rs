//! `npm2deb rdepends` command implementation.

use npm2deb_archive::ArchiveLookup;
use npm2deb_core::error::Npm2DebResult;
use npm2deb_core::naming;
use npm2deb_core::types::{DebianName, ModuleName};
use npm2deb_resolver::ReverseResolver;

use super::CommandContext;

/// Execute the `npm2deb rdepends` command
pub async fn execute<R, A: ArchiveLookup>(
    module: &str,
    ctx: &CommandContext<R, A>,
) -> Npm2DebResult<()> {
    let module = ModuleName::parse(module)?;
    let dependents = ReverseResolver::new(&ctx.archive).resolve_reverse(&module).await?;

    ctx.output.print(&render(&module, &dependents));
    Ok(())
}

pub fn render(module: &ModuleName, dependents: &[DebianName]) -> String {
    let debian_name = naming::to_debian_name(module);
    if dependents.is_empty() {
        return format!("Module {} ({}) has no reverse dependencies.", module, debian_name);
    }

    let mut lines = vec![format!("Reverse dependencies of {} ({}):", module, debian_name)];
    lines.extend(dependents.iter().map(|dependent| format!("  {}", dependent)));
    lines.join("\n")
}
