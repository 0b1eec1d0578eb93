//! Pre-flight checks for the external tools the pipeline drives.

use std::process::Command;

use crate::error::{ReleaseError, Result};
use crate::maven::{Maven, MVN_COMMAND_ENV};

/// Tools consumed through their standard CLIs, checked before any mutation.
const REQUIRED_TOOLS: &[&str] = &["git", "xmllint"];

/// Verify every required external tool resolves on PATH and that xmllint
/// carries XPath support. Runs before anything touches the repository.
pub fn check_dependencies(maven: &Maven) -> Result<()> {
    for tool in REQUIRED_TOOLS {
        check_tool(tool)?;
    }

    which::which(maven.program()).map_err(|_| {
        ReleaseError::dependency(format!(
            "build tool command '{}' was not found on PATH (set {} to override)",
            maven.program(),
            MVN_COMMAND_ENV
        ))
    })?;

    if !xmllint_supports_xpath()? {
        return Err(ReleaseError::dependency(
            "xmllint on PATH does not support --xpath; install a libxml2 build with XPath support",
        ));
    }

    Ok(())
}

fn check_tool(name: &str) -> Result<()> {
    which::which(name)
        .map(|_| ())
        .map_err(|_| ReleaseError::dependency(format!("required tool '{}' was not found on PATH", name)))
}

/// Probe xmllint's help output for the `--xpath` option.
///
/// libxml2 prints usage to stderr, so both streams are searched.
pub fn xmllint_supports_xpath() -> Result<bool> {
    let output = Command::new("xmllint")
        .arg("--help")
        .output()
        .map_err(|e| ReleaseError::dependency(format!("failed to execute xmllint: {}", e)))?;

    let mut help = String::from_utf8_lossy(&output.stdout).into_owned();
    help.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(help_mentions_xpath(&help))
}

fn help_mentions_xpath(help: &str) -> bool {
    help.contains("--xpath")
}
