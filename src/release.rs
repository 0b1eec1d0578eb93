//! The release pipeline: working-tree guard, publisher and next-version bump.
//!
//! The publisher and bumper are ordered lists of [Step]s, each tagged with
//! the rollback policy that applies if it fails:
//!
//! - [Rollback::Abort] - nothing was pushed yet, just stop
//! - [Rollback::UndoCommit] - a release commit exists; undo exactly one
//!   commit (`git reset --hard HEAD~1`) before stopping
//! - [Rollback::Manual] - shared history was already pushed, automatic
//!   rollback is unsafe; stop and tell the operator how to finish by hand
//!
//! [run_steps] executes the list and dispatches the policy of the first
//! failing step. There is no retry anywhere.

use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::git::Vcs;
use crate::maven::BuildTool;
use crate::resolver::ReleasePlan;
use crate::ui;

/// What to do when a step fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rollback {
    /// Stop; no remote state was touched.
    Abort,
    /// Undo exactly the most recent commit, then stop.
    UndoCommit,
    /// Stop with an instruction for the operator; carries the instruction.
    Manual(String),
}

/// One externally-visible action in the pipeline.
pub struct Step<'a> {
    label: String,
    rollback: Rollback,
    action: Box<dyn Fn() -> Result<()> + 'a>,
}

impl<'a> Step<'a> {
    pub fn new(
        label: impl Into<String>,
        rollback: Rollback,
        action: Box<dyn Fn() -> Result<()> + 'a>,
    ) -> Self {
        Step {
            label: label.into(),
            rollback,
            action,
        }
    }
}

/// Execute steps in order, stopping at the first failure and applying its
/// rollback policy.
pub fn run_steps(vcs: &dyn Vcs, steps: Vec<Step<'_>>) -> Result<()> {
    for step in steps {
        ui::display_status(&step.label);
        if let Err(err) = (step.action)() {
            return Err(dispatch_failure(vcs, &step.label, step.rollback, err));
        }
    }
    Ok(())
}

fn dispatch_failure(
    vcs: &dyn Vcs,
    label: &str,
    rollback: Rollback,
    err: ReleaseError,
) -> ReleaseError {
    match rollback {
        Rollback::Abort => ReleaseError::step(format!("{}: {}", label, err)),
        Rollback::UndoCommit => {
            ui::display_status("rolling back the release commit");
            match vcs.reset_hard("HEAD~1") {
                Ok(()) => ReleaseError::step(format!(
                    "{}: {}; the release commit was rolled back",
                    label, err
                )),
                Err(reset_err) => ReleaseError::step(format!(
                    "{}: {}; rolling back the release commit also failed: {}",
                    label, err, reset_err
                )),
            }
        }
        Rollback::Manual(instruction) => {
            ReleaseError::step(format!("{}: {}. {}", label, err, instruction))
        }
    }
}

/// Abort unless the working tree is clean.
///
/// With `ignore_untracked`, untracked files are not considered. Runs before
/// any mutation; a dirty tree lists the offending entries and fails.
pub fn ensure_clean_worktree(vcs: &dyn Vcs, ignore_untracked: bool) -> Result<()> {
    let entries = vcs.status_entries(!ignore_untracked)?;
    if entries.is_empty() {
        return Ok(());
    }

    ui::display_dirty_entries(&entries);
    Err(ReleaseError::worktree(
        "commit or stash your changes before releasing",
    ))
}

/// Resolve the trunk branch to release onto.
///
/// The configured trunk is used when it exists; a default `master` falls
/// back to `main` when only that exists. Anything else is an error before
/// any mutation happens.
pub fn resolve_trunk(vcs: &dyn Vcs, configured: &str) -> Result<String> {
    if vcs.branch_exists(configured)? {
        return Ok(configured.to_string());
    }
    if configured == "master" && vcs.branch_exists("main")? {
        return Ok("main".to_string());
    }
    Err(ReleaseError::git(format!(
        "trunk branch '{}' not found in this repository",
        configured
    )))
}

/// Publish the release: cut the release branch, set the version, commit,
/// push, merge to trunk, tag, push tags.
///
/// The tag-existence check is a pure precondition; nothing has been mutated
/// when it fails. Pushing the release branch is the point of no return:
/// from there every failure up to (but not including) tagging undoes the
/// release commit, while tagging and tag-push failures are left for the
/// operator because the merge is already published.
pub fn publish(
    vcs: &dyn Vcs,
    build: &dyn BuildTool,
    plan: &ReleasePlan,
    config: &Config,
    trunk: &str,
) -> Result<()> {
    let tag = format!("{}{}", config.versioning.tag_prefix, plan.release);
    let release_branch = format!("{}{}", config.branches.release_prefix, plan.release);
    let development = config.branches.development.as_str();
    let remote = config.remote.as_str();

    if vcs.tag_exists(&tag)? {
        return Err(ReleaseError::step(format!(
            "tag '{}' already exists; delete it or choose another release version",
            tag
        )));
    }

    let finish_tagging = format!(
        "the release is already pushed; finish tagging manually: git tag {} && git push {} --tags",
        tag, remote
    );

    let steps = vec![
        {
            let branch = release_branch.clone();
            Step::new(
                format!("creating branch {} from {}", release_branch, development),
                Rollback::Abort,
                Box::new(move || vcs.create_branch(&branch, development)),
            )
        },
        Step::new(
            format!("merging {} into {}", development, release_branch),
            Rollback::Abort,
            Box::new(move || vcs.merge(development)),
        ),
        {
            let version = plan.release.clone();
            Step::new(
                format!("setting project version to {}", plan.release),
                Rollback::Abort,
                Box::new(move || build.set_version(&version)),
            )
        },
        {
            let message = format!("Release {}", plan.release);
            Step::new(
                format!("committing release {}", plan.release),
                Rollback::Abort,
                Box::new(move || vcs.commit_all(&message)),
            )
        },
        {
            let branch = release_branch.clone();
            Step::new(
                format!("pushing {} to {}", release_branch, remote),
                Rollback::UndoCommit,
                Box::new(move || vcs.push(remote, &branch)),
            )
        },
        {
            let trunk = trunk.to_string();
            Step::new(
                format!("switching to {}", trunk),
                Rollback::UndoCommit,
                Box::new(move || vcs.checkout(&trunk)),
            )
        },
        {
            let branch = release_branch.clone();
            Step::new(
                format!("merging {} into {}", release_branch, trunk),
                Rollback::UndoCommit,
                Box::new(move || vcs.merge(&branch)),
            )
        },
        {
            let trunk = trunk.to_string();
            Step::new(
                format!("pushing {} to {}", trunk, remote),
                Rollback::UndoCommit,
                Box::new(move || vcs.push(remote, &trunk)),
            )
        },
        {
            let tag = tag.clone();
            Step::new(
                format!("tagging {}", tag),
                Rollback::Manual(finish_tagging.clone()),
                Box::new(move || vcs.tag(&tag)),
            )
        },
        Step::new(
            format!("pushing tags to {}", remote),
            Rollback::Manual(finish_tagging),
            Box::new(move || vcs.push_tags(remote)),
        ),
    ];

    run_steps(vcs, steps)
}

/// Prepare the next development iteration: merge trunk back into the
/// development branch, set the next SNAPSHOT version, commit and push.
///
/// The release itself already succeeded when this runs, so every failure is
/// left for the operator to finish by hand.
pub fn bump_next(
    vcs: &dyn Vcs,
    build: &dyn BuildTool,
    plan: &ReleasePlan,
    config: &Config,
    trunk: &str,
) -> Result<()> {
    let development = config.branches.development.as_str();
    let remote = config.remote.as_str();
    let finish_manually = format!(
        "the release itself succeeded; finish preparing {} on {} manually",
        plan.next, development
    );

    let steps = vec![
        Step::new(
            format!("switching to {}", development),
            Rollback::Manual(finish_manually.clone()),
            Box::new(move || vcs.checkout(development)),
        ),
        {
            let trunk = trunk.to_string();
            Step::new(
                format!("merging {} into {}", trunk, development),
                Rollback::Manual(finish_manually.clone()),
                Box::new(move || vcs.merge(&trunk)),
            )
        },
        {
            let version = plan.next.clone();
            Step::new(
                format!("setting project version to {}", plan.next),
                Rollback::Manual(finish_manually.clone()),
                Box::new(move || build.set_version(&version)),
            )
        },
        {
            let message = format!("Prepare next development version {}", plan.next);
            Step::new(
                format!("committing next development version {}", plan.next),
                Rollback::Manual(finish_manually.clone()),
                Box::new(move || vcs.commit_all(&message)),
            )
        },
        Step::new(
            format!("pushing {} to {}", development, remote),
            Rollback::Manual(finish_manually),
            Box::new(move || vcs.push(remote, development)),
        ),
    ];

    run_steps(vcs, steps)
}
