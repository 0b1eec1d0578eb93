//! Interactive resolution of the release and next-development versions.

use std::io::{BufRead, Write};

use crate::error::{ReleaseError, Result};
use crate::ui;
use crate::version::{increment_last_component, strip_suffix, with_suffix};

/// The literal flag value that accepts the computed default without prompting.
pub const AUTO_SENTINEL: &str = "auto";

/// How a version value was supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionInput {
    /// Not supplied: prompt with the computed default.
    Prompt,
    /// The `auto` sentinel (or `-a`): use the computed default silently.
    Auto,
    /// Supplied explicitly on the command line.
    Explicit(String),
}

impl VersionInput {
    /// Interpret a flag value, with `-a` filling in unset flags as `auto`.
    pub fn from_flag(flag: Option<String>, auto: bool) -> Self {
        match flag {
            Some(value) if value == AUTO_SENTINEL => VersionInput::Auto,
            Some(value) => VersionInput::Explicit(value),
            None if auto => VersionInput::Auto,
            None => VersionInput::Prompt,
        }
    }
}

/// The resolved versions the pipeline releases and bumps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// Version currently in the POM (or the `-c` override).
    pub current: String,
    /// Version being released.
    pub release: String,
    /// Next development version, already carrying the pre-release suffix.
    pub next: String,
}

/// Resolve the release and next versions from flags, defaults and prompts.
///
/// Fails without prompting further if the release version equals the current
/// version (there is nothing to release), or if the bump would be a no-op.
pub fn resolve_plan(
    current: &str,
    release_input: &VersionInput,
    next_input: &VersionInput,
    suffix: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<ReleasePlan> {
    let release_default = strip_suffix(current, suffix);
    let release = resolve_value("Release version", release_default, release_input, input, output)?;

    if release == current {
        return Err(ReleaseError::version(format!(
            "release version '{}' equals the current project version; only {} versions can be released",
            release, suffix
        )));
    }

    let next_default = increment_last_component(&release);
    let next = resolve_value(
        "Next development version",
        next_default,
        next_input,
        input,
        output,
    )?;
    let next = with_suffix(&next, suffix);

    if next == with_suffix(&release, suffix) {
        return Err(ReleaseError::version(format!(
            "next development version '{}' does not move past the release version",
            next
        )));
    }

    Ok(ReleasePlan {
        current: current.to_string(),
        release,
        next,
    })
}

fn resolve_value(
    label: &str,
    default: String,
    choice: &VersionInput,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<String> {
    match choice {
        VersionInput::Explicit(value) => Ok(value.clone()),
        VersionInput::Auto => Ok(default),
        VersionInput::Prompt => ui::prompt_with_default(label, &default, input, output),
    }
}
