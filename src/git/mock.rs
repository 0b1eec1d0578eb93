//! Recording mock for testing the release pipeline without a repository.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::error::{ReleaseError, Result};
use crate::git::Vcs;

/// Mock [Vcs] that records every call and can be scripted to fail.
///
/// Calls are recorded as flat strings (`"push origin release/1.3.0"`); a
/// failure prefix registered with [MockVcs::fail_on] makes the matching call
/// return an error after being recorded, so tests can assert on what the
/// pipeline attempted before and after a failure.
pub struct MockVcs {
    calls: RefCell<Vec<String>>,
    failures: RefCell<Vec<String>>,
    status: RefCell<Vec<String>>,
    tags: RefCell<HashSet<String>>,
    branches: RefCell<HashSet<String>>,
}

impl MockVcs {
    /// Create an empty mock with a clean working tree.
    pub fn new() -> Self {
        MockVcs {
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(Vec::new()),
            status: RefCell::new(Vec::new()),
            tags: RefCell::new(HashSet::new()),
            branches: RefCell::new(HashSet::new()),
        }
    }

    /// Script the porcelain status entries the mock reports.
    pub fn set_status(&self, entries: &[&str]) {
        *self.status.borrow_mut() = entries.iter().map(|s| s.to_string()).collect();
    }

    /// Register an existing tag.
    pub fn add_tag(&self, name: impl Into<String>) {
        self.tags.borrow_mut().insert(name.into());
    }

    /// Register an existing local branch.
    pub fn add_branch(&self, name: impl Into<String>) {
        self.branches.borrow_mut().insert(name.into());
    }

    /// Make every call whose recorded form starts with `prefix` fail.
    pub fn fail_on(&self, prefix: impl Into<String>) {
        self.failures.borrow_mut().push(prefix.into());
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls starting with `prefix`.
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call.clone());
        if self
            .failures
            .borrow()
            .iter()
            .any(|prefix| call.starts_with(prefix.as_str()))
        {
            return Err(ReleaseError::git(format!("scripted failure: {}", call)));
        }
        Ok(())
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vcs for MockVcs {
    fn status_entries(&self, include_untracked: bool) -> Result<Vec<String>> {
        self.record(format!("status include_untracked={}", include_untracked))?;
        Ok(self.status.borrow().clone())
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        self.record(format!("branch-exists {}", name))?;
        Ok(self.branches.borrow().contains(name))
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        self.record(format!("tag-exists {}", name))?;
        Ok(self.tags.borrow().contains(name))
    }

    fn create_branch(&self, name: &str, from: &str) -> Result<()> {
        self.record(format!("create-branch {} {}", name, from))?;
        self.branches.borrow_mut().insert(name.to_string());
        Ok(())
    }

    fn checkout(&self, name: &str) -> Result<()> {
        self.record(format!("checkout {}", name))
    }

    fn merge(&self, branch: &str) -> Result<()> {
        self.record(format!("merge {}", branch))
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        self.record(format!("commit {}", message))
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {} {}", remote, branch))
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.record(format!("tag {}", name))?;
        self.tags.borrow_mut().insert(name.to_string());
        Ok(())
    }

    fn push_tags(&self, remote: &str) -> Result<()> {
        self.record(format!("push-tags {}", remote))
    }

    fn reset_hard(&self, target: &str) -> Result<()> {
        self.record(format!("reset --hard {}", target))
    }
}
