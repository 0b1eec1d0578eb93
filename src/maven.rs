//! Maven invocation and POM version queries.
//!
//! The project version is only ever *written* by Maven itself (the
//! `versions:set` goal); reading it goes through `xmllint --xpath` so the
//! tool never parses or rewrites the POM directly.

use std::path::Path;
use std::process::Command;

use crate::config::MavenConfig;
use crate::error::{ReleaseError, Result};

/// Environment variable overriding the Maven command line.
pub const MVN_COMMAND_ENV: &str = "MVN_COMMAND";

/// XPath expression selecting the project version text node.
///
/// `local-name()` sidesteps the POM namespace so the same expression works
/// with and without `xmlns` declarations.
const VERSION_XPATH: &str = "/*[local-name()='project']/*[local-name()='version']/text()";

/// Abstraction over the build tool's version-setting capability.
pub trait BuildTool {
    /// Rewrite the project version across the build metadata.
    fn set_version(&self, version: &str) -> Result<()>;
}

/// Maven driven through its CLI.
pub struct Maven {
    command: String,
}

impl Maven {
    /// Build from configuration, honoring the `MVN_COMMAND` override.
    pub fn from_env(config: &MavenConfig) -> Self {
        let command = std::env::var(MVN_COMMAND_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| config.command.clone());
        Maven { command }
    }

    /// The full command line the tool will invoke (may carry arguments,
    /// e.g. `MVN_COMMAND="./mvnw -q"`).
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The executable to resolve on PATH: the command line's first token.
    pub fn program(&self) -> &str {
        self.command
            .split_whitespace()
            .next()
            .unwrap_or(&self.command)
    }
}

impl BuildTool for Maven {
    fn set_version(&self, version: &str) -> Result<()> {
        let mut parts = self.command.split_whitespace();
        let program = match parts.next() {
            Some(program) => program,
            None => return Err(ReleaseError::build_tool("empty Maven command")),
        };

        let status = Command::new(program)
            .args(parts)
            .arg("versions:set")
            .arg(format!("-DnewVersion={}", version))
            .arg("-DgenerateBackupPoms=false")
            .status()
            .map_err(|e| {
                ReleaseError::build_tool(format!("failed to execute {}: {}", self.command, e))
            })?;

        if !status.success() {
            return Err(ReleaseError::build_tool(format!(
                "{} versions:set -DnewVersion={} exited with {}",
                self.command, version, status
            )));
        }
        Ok(())
    }
}

/// Read the project version from a POM via `xmllint --xpath`.
///
/// # Returns
/// * `Ok(String)` - The trimmed `/project/version` text node
/// * `Err` - If xmllint fails or the POM carries no version element
pub fn project_version(pom: &Path) -> Result<String> {
    let output = Command::new("xmllint")
        .arg("--xpath")
        .arg(VERSION_XPATH)
        .arg(pom)
        .output()
        .map_err(|e| ReleaseError::build_tool(format!("failed to execute xmllint: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReleaseError::build_tool(format!(
            "could not read the project version from {}: {}",
            pom.display(),
            stderr.trim()
        )));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(ReleaseError::build_tool(format!(
            "{} has no /project/version element",
            pom.display()
        )));
    }
    Ok(version)
}
