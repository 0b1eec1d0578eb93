//! Git backend driving the system `git` CLI.
//!
//! Mutating commands inherit the terminal so the operator sees git's own
//! output (merge summaries, push progress, credential prompts). Queries are
//! captured and parsed.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ReleaseError, Result};
use crate::git::Vcs;

/// Git backend using the system `git` binary.
pub struct SystemGit {
    work_tree: PathBuf,
}

impl SystemGit {
    /// Open the repository containing `path`.
    ///
    /// One subprocess call resolves the working tree root; failure means the
    /// path is not inside a git checkout.
    pub fn open(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| ReleaseError::git(format!("failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::git(format!(
                "not a git repository: {}",
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(SystemGit {
            work_tree: PathBuf::from(stdout.trim()),
        })
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.work_tree);
        cmd
    }

    /// Run a mutating git command with inherited stdio.
    fn run(&self, args: &[&str]) -> Result<()> {
        let status = self
            .git_cmd()
            .args(args)
            .status()
            .map_err(|e| ReleaseError::git(format!("failed to execute git: {}", e)))?;

        if !status.success() {
            return Err(ReleaseError::git(format!(
                "git {} exited with {}",
                args.join(" "),
                status
            )));
        }
        Ok(())
    }

    /// Run a query command and capture stdout.
    fn capture(&self, args: &[&str]) -> Result<String> {
        let output = self
            .git_cmd()
            .args(args)
            .output()
            .map_err(|e| ReleaseError::git(format!("failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Vcs for SystemGit {
    fn status_entries(&self, include_untracked: bool) -> Result<Vec<String>> {
        let stdout = if include_untracked {
            self.capture(&["status", "--porcelain"])?
        } else {
            self.capture(&["status", "--porcelain", "--untracked-files=no"])?
        };

        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect())
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        let refname = format!("refs/heads/{}", name);
        let output = self
            .git_cmd()
            .args(["rev-parse", "--verify", "--quiet", &refname])
            .output()
            .map_err(|e| ReleaseError::git(format!("failed to execute git: {}", e)))?;
        Ok(output.status.success())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        let stdout = self.capture(&["tag", "--list", name])?;
        Ok(!stdout.trim().is_empty())
    }

    fn create_branch(&self, name: &str, from: &str) -> Result<()> {
        self.run(&["checkout", "-b", name, from])
    }

    fn checkout(&self, name: &str) -> Result<()> {
        self.run(&["checkout", name])
    }

    fn merge(&self, branch: &str) -> Result<()> {
        self.run(&["merge", branch])
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-a", "-m", message])
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", remote, branch])
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.run(&["tag", name])
    }

    fn push_tags(&self, remote: &str) -> Result<()> {
        self.run(&["push", remote, "--tags"])
    }

    fn reset_hard(&self, target: &str) -> Result<()> {
        self.run(&["reset", "--hard", target])
    }
}
