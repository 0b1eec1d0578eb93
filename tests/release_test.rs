//! Release pipeline tests against the recording mock.

use std::cell::RefCell;

use mvn_release::config::Config;
use mvn_release::git::MockVcs;
use mvn_release::maven::BuildTool;
use mvn_release::release;
use mvn_release::resolver::ReleasePlan;
use mvn_release::{ReleaseError, Result};

struct MockBuildTool {
    versions: RefCell<Vec<String>>,
    fail: bool,
}

impl MockBuildTool {
    fn new() -> Self {
        MockBuildTool {
            versions: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        MockBuildTool {
            versions: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    fn versions(&self) -> Vec<String> {
        self.versions.borrow().clone()
    }
}

impl BuildTool for MockBuildTool {
    fn set_version(&self, version: &str) -> Result<()> {
        self.versions.borrow_mut().push(version.to_string());
        if self.fail {
            return Err(ReleaseError::build_tool("scripted versions:set failure"));
        }
        Ok(())
    }
}

fn plan() -> ReleasePlan {
    ReleasePlan {
        current: "1.3.0-SNAPSHOT".to_string(),
        release: "1.3.0".to_string(),
        next: "1.3.1-SNAPSHOT".to_string(),
    }
}

#[test]
fn test_publish_happy_path_call_sequence() {
    let vcs = MockVcs::new();
    let build = MockBuildTool::new();

    release::publish(&vcs, &build, &plan(), &Config::default(), "master").unwrap();

    assert_eq!(
        vcs.calls(),
        vec![
            "tag-exists v1.3.0",
            "create-branch release/1.3.0 develop",
            "merge develop",
            "commit Release 1.3.0",
            "push origin release/1.3.0",
            "checkout master",
            "merge release/1.3.0",
            "push origin master",
            "tag v1.3.0",
            "push-tags origin",
        ]
    );
    assert_eq!(build.versions(), vec!["1.3.0"]);
}

#[test]
fn test_existing_tag_stops_before_any_mutation() {
    let vcs = MockVcs::new();
    vcs.add_tag("v1.3.0");
    let build = MockBuildTool::new();

    let err = release::publish(&vcs, &build, &plan(), &Config::default(), "master").unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(vcs.count_calls("create-branch"), 0);
    assert_eq!(vcs.count_calls("commit"), 0);
    assert!(build.versions().is_empty());
}

#[test]
fn test_version_set_failure_needs_no_rollback() {
    let vcs = MockVcs::new();
    let build = MockBuildTool::failing();

    let err = release::publish(&vcs, &build, &plan(), &Config::default(), "master").unwrap_err();

    assert!(err.to_string().contains("setting project version"));
    assert_eq!(vcs.count_calls("commit"), 0);
    assert_eq!(vcs.count_calls("push"), 0);
    assert_eq!(vcs.count_calls("reset"), 0);
}

#[test]
fn test_release_push_failure_rolls_back_exactly_once() {
    let vcs = MockVcs::new();
    vcs.fail_on("push origin release/1.3.0");
    let build = MockBuildTool::new();

    let err = release::publish(&vcs, &build, &plan(), &Config::default(), "master").unwrap_err();

    assert!(err.to_string().contains("rolled back"));
    assert_eq!(vcs.count_calls("reset --hard HEAD~1"), 1);
    // The pipeline stopped: trunk was never touched.
    assert_eq!(vcs.count_calls("checkout master"), 0);
    assert_eq!(vcs.count_calls("tag v1.3.0"), 0);
}

#[test]
fn test_trunk_push_failure_rolls_back() {
    let vcs = MockVcs::new();
    vcs.fail_on("push origin master");
    let build = MockBuildTool::new();

    let err = release::publish(&vcs, &build, &plan(), &Config::default(), "master").unwrap_err();

    assert!(err.to_string().contains("rolled back"));
    assert_eq!(vcs.count_calls("reset --hard HEAD~1"), 1);
    assert_eq!(vcs.count_calls("tag v1.3.0"), 0);
}

#[test]
fn test_tag_failure_is_manual_follow_up() {
    let vcs = MockVcs::new();
    vcs.fail_on("tag v1.3.0");
    let build = MockBuildTool::new();

    let err = release::publish(&vcs, &build, &plan(), &Config::default(), "master").unwrap_err();

    assert!(err.to_string().contains("finish tagging manually"));
    assert_eq!(vcs.count_calls("reset"), 0);
}

#[test]
fn test_tag_push_failure_is_manual_follow_up() {
    let vcs = MockVcs::new();
    vcs.fail_on("push-tags");
    let build = MockBuildTool::new();

    let err = release::publish(&vcs, &build, &plan(), &Config::default(), "master").unwrap_err();

    assert!(err.to_string().contains("finish tagging manually"));
    assert_eq!(vcs.count_calls("reset"), 0);
}

#[test]
fn test_bump_next_happy_path() {
    let vcs = MockVcs::new();
    let build = MockBuildTool::new();

    release::bump_next(&vcs, &build, &plan(), &Config::default(), "master").unwrap();

    assert_eq!(
        vcs.calls(),
        vec![
            "checkout develop",
            "merge master",
            "commit Prepare next development version 1.3.1-SNAPSHOT",
            "push origin develop",
        ]
    );
    assert_eq!(build.versions(), vec!["1.3.1-SNAPSHOT"]);
}

#[test]
fn test_bump_failure_is_manual_follow_up() {
    let vcs = MockVcs::new();
    vcs.fail_on("push origin develop");
    let build = MockBuildTool::new();

    let err = release::bump_next(&vcs, &build, &plan(), &Config::default(), "master").unwrap_err();

    assert!(err.to_string().contains("finish preparing"));
    assert_eq!(vcs.count_calls("reset"), 0);
}

#[test]
fn test_custom_topology_flows_through() {
    let mut config = Config::default();
    config.remote = "upstream".to_string();
    config.branches.development = "dev".to_string();
    config.branches.release_prefix = "rel-".to_string();
    config.versioning.tag_prefix = "release-".to_string();

    let vcs = MockVcs::new();
    let build = MockBuildTool::new();
    release::publish(&vcs, &build, &plan(), &config, "main").unwrap();

    let calls = vcs.calls();
    assert_eq!(calls[0], "tag-exists release-1.3.0");
    assert_eq!(calls[1], "create-branch rel-1.3.0 dev");
    assert!(calls.contains(&"push upstream rel-1.3.0".to_string()));
    assert!(calls.contains(&"checkout main".to_string()));
    assert!(calls.contains(&"push-tags upstream".to_string()));
}
