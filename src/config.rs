use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};
use crate::version::SNAPSHOT_SUFFIX;

/// Complete configuration for mvn-release.
///
/// Every field defaults to the fixed git-flow topology the tool assumes
/// (`develop`, `master`, `release/*`, remote `origin`), so running without a
/// configuration file is the normal case.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub maven: MavenConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Branch roles used by the release pipeline.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BranchesConfig {
    #[serde(default = "default_development")]
    pub development: String,

    #[serde(default = "default_trunk")]
    pub trunk: String,

    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,
}

fn default_development() -> String {
    "develop".to_string()
}

fn default_trunk() -> String {
    "master".to_string()
}

fn default_release_prefix() -> String {
    "release/".to_string()
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            development: default_development(),
            trunk: default_trunk(),
            release_prefix: default_release_prefix(),
        }
    }
}

/// Version and tag formatting settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct VersioningConfig {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_snapshot_suffix")]
    pub snapshot_suffix: String,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_snapshot_suffix() -> String {
    SNAPSHOT_SUFFIX.to_string()
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            tag_prefix: default_tag_prefix(),
            snapshot_suffix: default_snapshot_suffix(),
        }
    }
}

/// Build-tool settings. The `MVN_COMMAND` environment variable overrides
/// `command` at runtime.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MavenConfig {
    #[serde(default = "default_maven_command")]
    pub command: String,

    #[serde(default = "default_pom")]
    pub pom: String,
}

fn default_maven_command() -> String {
    "mvn".to_string()
}

fn default_pom() -> String {
    "pom.xml".to_string()
}

impl Default for MavenConfig {
    fn default() -> Self {
        MavenConfig {
            command: default_maven_command(),
            pom: default_pom(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            branches: BranchesConfig::default(),
            versioning: VersioningConfig::default(),
            maven: MavenConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `mvnrelease.toml` in the current directory
/// 3. `mvnrelease.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./mvnrelease.toml").exists() {
        fs::read_to_string("./mvnrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("mvnrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_topology() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.branches.development, "develop");
        assert_eq!(config.branches.trunk, "master");
        assert_eq!(config.branches.release_prefix, "release/");
        assert_eq!(config.versioning.tag_prefix, "v");
        assert_eq!(config.versioning.snapshot_suffix, "-SNAPSHOT");
        assert_eq!(config.maven.command, "mvn");
        assert_eq!(config.maven.pom, "pom.xml");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[branches]\ntrunk = \"main\"\n").unwrap();
        assert_eq!(config.branches.trunk, "main");
        assert_eq!(config.branches.development, "develop");
        assert_eq!(config.remote, "origin");
    }

    #[test]
    fn test_kebab_case_keys() {
        let config: Config = toml::from_str(
            "[versioning]\ntag-prefix = \"release-\"\nsnapshot-suffix = \"-DEV\"\n",
        )
        .unwrap();
        assert_eq!(config.versioning.tag_prefix, "release-");
        assert_eq!(config.versioning.snapshot_suffix, "-DEV");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = toml::from_str::<Config>("remote = [")
            .map_err(|e| ReleaseError::config(e.to_string()))
            .unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
