//! Version string rules for release and next-development versions.
//!
//! Maven project versions here are dot-separated numeric components with an
//! optional pre-release suffix (`-SNAPSHOT` by default). This is deliberately
//! looser than semver: `2`, `2.0` and `1.2.3.4` are all valid inputs.

use regex::Regex;

/// Default pre-release marker appended to development versions.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Strip every trailing occurrence of the pre-release suffix, case-insensitively.
///
/// Stripping is idempotent: `"2.0-SNAPSHOT-snapshot"`, `"2.0-SNAPSHOT"` and
/// `"2.0"` all map to `"2.0"`.
pub fn strip_suffix(version: &str, suffix: &str) -> String {
    if let Ok(re) = Regex::new(&format!(r"(?i)({})+$", regex::escape(suffix))) {
        return re.replace(version, "").into_owned();
    }
    version.to_string()
}

/// Normalize a version to carry exactly one pre-release suffix.
pub fn with_suffix(version: &str, suffix: &str) -> String {
    format!("{}{}", strip_suffix(version, suffix), suffix)
}

/// Increment only the trailing numeric component of a version.
///
/// For versions of the form `(N.)*N` the trailing `N` is incremented and all
/// preceding `N.` groups are preserved verbatim: `"3"` -> `"4"`,
/// `"1.2.9"` -> `"1.2.10"`. A version with no trailing numeric component is
/// returned unchanged; the caller prompts with the result, so the operator
/// can still correct it.
pub fn increment_last_component(version: &str) -> String {
    if let Ok(re) = Regex::new(r"^((?:[0-9]+\.)*)([0-9]+)$") {
        if let Some(caps) = re.captures(version) {
            if let Ok(last) = caps[2].parse::<u64>() {
                return format!("{}{}", &caps[1], last + 1);
            }
        }
    }
    version.to_string()
}
