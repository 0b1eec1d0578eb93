//! Display functions for terminal output.

use console::style;

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Show the resolved versions before any mutation starts.
pub fn display_release_plan(current: &str, release: &str, next: &str) {
    println!("\n{}", style("Release plan:").bold());
    println!("  Current version: {}", current);
    println!("  Release version: {}", style(release).green());
    println!("  Next version:    {}", style(next).cyan());
    println!();
}

/// List the working-tree entries that block a release.
pub fn display_dirty_entries(entries: &[String]) {
    eprintln!("{}", style("Uncommitted changes:").bold());
    for entry in entries {
        eprintln!("  {}", entry);
    }
}
