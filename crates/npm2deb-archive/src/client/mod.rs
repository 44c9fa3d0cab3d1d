//! Archive lookups backed by the Debian command line tools

use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use npm2deb_core::error::Npm2DebError;
use npm2deb_core::types::{ArchiveStatus, DebianName};

use crate::lookup::ArchiveLookup;
use crate::{apt, madison, ArchiveResult};

/// Archive lookups through `rmadison` and `apt-cache`
#[derive(Debug, Clone)]
pub struct DebianArchive {
    /// `rmadison` executable
    madison: String,
    /// `apt-cache` executable
    apt_cache: String,
    /// Archive queried by rmadison (`-u`)
    archive: String,
    /// Suite whose version is reported
    suite: String,
}

impl Default for DebianArchive {
    fn default() -> Self {
        Self::new("debian", "unstable")
    }
}

impl DebianArchive {
    /// Query `archive` and report versions from `suite`
    pub fn new(archive: impl Into<String>, suite: impl Into<String>) -> Self {
        Self {
            madison: "rmadison".to_string(),
            apt_cache: "apt-cache".to_string(),
            archive: archive.into(),
            suite: suite.into(),
        }
    }

    /// Use different executables for the two tools
    pub fn with_tools(mut self, madison: impl Into<String>, apt_cache: impl Into<String>) -> Self {
        self.madison = madison.into();
        self.apt_cache = apt_cache.into();
        self
    }

    /// Suite whose version is reported
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Run a tool to completion, mapping spawn failures to `ArchiveTool`
    async fn run(&self, tool: &str, args: &[&str]) -> ArchiveResult<Output> {
        debug!("Running {} {}", tool, args.join(" "));

        Command::new(tool)
            .args(args)
            .env("LC_ALL", "C")
            .output()
            .await
            .map_err(|e| Npm2DebError::archive_tool(tool, format!("could not run: {}", e)))
    }
}

#[async_trait]
impl ArchiveLookup for DebianArchive {
    async fn status(&self, package: &DebianName) -> ArchiveResult<ArchiveStatus> {
        let output = self
            .run(&self.madison, &["-u", self.archive.as_str(), package.as_str()])
            .await?;

        if !output.status.success() {
            return Err(Npm2DebError::archive_tool(
                &self.madison,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let entries = madison::parse(&String::from_utf8_lossy(&output.stdout));
        let status = madison::select_status(&entries, package.as_str(), &self.suite);
        debug!("{} is {}", package, status);
        Ok(status)
    }

    async fn reverse_dependents(&self, package: &DebianName) -> ArchiveResult<Vec<DebianName>> {
        let output = self.run(&self.apt_cache, &["rdepends", package.as_str()]).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // An unknown package is a valid empty answer, not a failure
            if stderr.contains("No packages found") || stderr.contains("Unable to locate") {
                info!("{} is unknown to apt", package);
                return Ok(Vec::new());
            }
            return Err(Npm2DebError::archive_tool(&self.apt_cache, stderr.trim().to_string()));
        }

        Ok(apt::parse_rdepends(&String::from_utf8_lossy(&output.stdout)))
    }
}
