use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use mvn_release::config;
use mvn_release::deps;
use mvn_release::git::SystemGit;
use mvn_release::maven::{self, Maven};
use mvn_release::release;
use mvn_release::resolver::{self, VersionInput};
use mvn_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "mvn-release",
    about = "Cut a Maven release from develop, publish it to the trunk branch, and bump to the next SNAPSHOT"
)]
struct Args {
    #[arg(
        short = 'a',
        long,
        help = "Accept the computed release and next versions without prompting"
    )]
    auto: bool,

    #[arg(
        short = 'r',
        long,
        value_name = "VERSION",
        help = "Release version, or 'auto' for the computed default"
    )]
    release_version: Option<String>,

    #[arg(
        short = 'n',
        long,
        value_name = "VERSION",
        help = "Next development version, or 'auto' for the computed default"
    )]
    next_version: Option<String>,

    #[arg(
        short = 'c',
        long,
        value_name = "VERSION",
        help = "Skip reading the POM and treat VERSION as the current project version"
    )]
    current_version: Option<String>,

    #[arg(
        short = 'i',
        long,
        help = "Ignore untracked files when checking the working tree"
    )]
    ignore_untracked: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        ui::display_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(None).context("loading configuration")?;

    // Pre-flight: every external tool must resolve before anything mutates.
    let maven = Maven::from_env(&config.maven);
    deps::check_dependencies(&maven).context("checking dependencies")?;
    ui::display_success("All required tools are available");

    let git = SystemGit::open(Path::new(".")).context("opening repository")?;

    release::ensure_clean_worktree(&git, args.ignore_untracked)
        .context("checking working tree")?;
    ui::display_success("Working tree is clean");

    // Current version: trust the override if given, otherwise ask the POM
    let current = match args.current_version {
        Some(version) => version,
        None => maven::project_version(Path::new(&config.maven.pom))
            .context("reading current version")?,
    };

    let release_input = VersionInput::from_flag(args.release_version, args.auto);
    let next_input = VersionInput::from_flag(args.next_version, args.auto);

    // Resolve the versions to release and to bump to
    let stdin = io::stdin();
    let stdout = io::stdout();
    let plan = {
        let mut input = stdin.lock();
        let mut output = stdout.lock();
        resolver::resolve_plan(
            &current,
            &release_input,
            &next_input,
            &config.versioning.snapshot_suffix,
            &mut input,
            &mut output,
        )
        .context("resolving versions")?
    };
    ui::display_release_plan(&plan.current, &plan.release, &plan.next);

    let trunk =
        release::resolve_trunk(&git, &config.branches.trunk).context("resolving trunk branch")?;

    release::publish(&git, &maven, &plan, &config, &trunk)?;
    ui::display_success(&format!("Released {}", plan.release));

    release::bump_next(&git, &maven, &plan, &config, &trunk)?;
    ui::display_success(&format!(
        "{} is now at {}",
        config.branches.development, plan.next
    ));

    let mut input = stdin.lock();
    let mut output = stdout.lock();
    ui::wait_for_enter("Press Enter to finish.", &mut input, &mut output)?;
    Ok(())
}
