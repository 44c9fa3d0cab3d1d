//! `npm2deb depends` command implementation.
//!
//! Prints the build dependencies and then the runtime dependencies of a
//! module, each classified against the Debian archive.

use npm2deb_archive::ArchiveLookup;
use npm2deb_core::error::{Npm2DebError, Npm2DebResult};
use npm2deb_core::types::{DependencyKind, ModuleName};
use npm2deb_registry::RegistrySource;
use npm2deb_resolver::{DependencyReport, DependencyResolver, ResolveOptions};

use super::CommandContext;
use crate::output::table;

/// Flags of the `depends` command
#[derive(Debug, Clone, Copy, Default)]
pub struct DependsOptions {
    pub recursive: bool,
    pub force: bool,
    pub binary: bool,
    pub builddep: bool,
    pub json: bool,
}

impl DependsOptions {
    /// Dependency kinds to show, build first; no selection means both
    pub fn kinds(&self) -> Vec<DependencyKind> {
        match (self.binary, self.builddep) {
            (true, false) => vec![DependencyKind::Runtime],
            (false, true) => vec![DependencyKind::Build],
            _ => vec![DependencyKind::Build, DependencyKind::Runtime],
        }
    }

    fn resolve_options(&self, kind: DependencyKind) -> ResolveOptions {
        ResolveOptions::new(kind).recursive(self.recursive).force(self.force)
    }
}

/// Resolve every selected dependency kind of `module`
pub async fn collect_reports<R, A>(
    module: &ModuleName,
    options: DependsOptions,
    ctx: &CommandContext<R, A>,
) -> Npm2DebResult<Vec<DependencyReport>>
where
    R: RegistrySource,
    A: ArchiveLookup,
{
    let resolver = DependencyResolver::new(&ctx.registry, &ctx.archive);

    let mut reports = Vec::new();
    for kind in options.kinds() {
        reports.push(resolver.resolve(module, options.resolve_options(kind)).await?);
    }
    Ok(reports)
}

/// Execute the `npm2deb depends` command
pub async fn execute<R, A>(
    module: &str,
    options: DependsOptions,
    ctx: &CommandContext<R, A>,
) -> Npm2DebResult<()>
where
    R: RegistrySource,
    A: ArchiveLookup,
{
    let module = ModuleName::parse(module)?;
    let reports = collect_reports(&module, options, ctx).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&reports).map_err(|e| Npm2DebError::Io {
            message: "Failed to serialize reports".to_string(),
            source: e.into(),
        })?;
        ctx.output.print(&json);
        return Ok(());
    }

    let rendered: Vec<String> = reports
        .iter()
        .map(|report| table::render_report(report, ctx.output.colors()))
        .collect();
    ctx.output.print(&rendered.join("\n\n"));
    Ok(())
}
