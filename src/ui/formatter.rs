//! Pure formatting functions for UI output.
//!
//! Functions here build the text of multi-line reports; writing it out is
//! the [`Reporter`](super::Reporter)'s job.

/// Snapshot of the repository as shown at the start of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryStatus {
    pub working_tree_clean: bool,
    pub staged_changes: bool,
    pub changelog_exists: bool,
}

/// Status block lines, e.g. `Working tree: clean`.
pub fn repository_status_lines(status: &RepositoryStatus, changelog_name: &str) -> Vec<String> {
    vec![
        format!(
            "Working tree: {}",
            if status.working_tree_clean { "clean" } else { "dirty" }
        ),
        format!(
            "Staged changes: {}",
            if status.staged_changes { "yes" } else { "no" }
        ),
        format!(
            "{}: {}",
            changelog_name,
            if status.changelog_exists { "exists" } else { "missing" }
        ),
    ]
}

/// List up to `limit` files, then collapse the rest.
///
/// # Arguments
/// * `files` - Staged file paths in the order the repository reported them
/// * `limit` - Maximum number of paths shown individually
pub fn file_listing(files: &[String], limit: usize) -> Vec<String> {
    let mut lines = vec![format!("Files to commit: {}", files.len())];

    for file in files.iter().take(limit) {
        lines.push(format!("  {}", file));
    }

    if files.len() > limit {
        lines.push(format!("  ... and {} more", files.len() - limit));
    }

    lines
}
