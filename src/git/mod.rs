//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations smartcommit needs, allowing for multiple implementations
//! including a real repository and a mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Opening a [Git2Repository] is the "is this a repository?" check: it fails
//! with an environment error outside a work tree.
//!
//! # Usage
//!
//! ```rust
//! # use smartcommit::git::Repository;
//! # fn example(repo: &dyn Repository) -> smartcommit::Result<()> {
//! if repo.has_staged_changes()? {
//!     let files = repo.staged_files()?;
//!     repo.commit(&format!("chore: Update {} files", files.len()))?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to
/// [crate::error::SmartCommitError] variants.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation for mocking Git operations
pub trait Repository {
    /// Whether the work tree has no modified, staged or untracked files
    fn working_tree_clean(&self) -> Result<bool>;

    /// Whether the index differs from HEAD
    fn has_staged_changes(&self) -> Result<bool> {
        Ok(!self.staged_files()?.is_empty())
    }

    /// Paths staged for the next commit, relative to the repository root
    fn staged_files(&self) -> Result<Vec<String>>;

    /// Commit the index to HEAD with `message`
    ///
    /// # Returns
    /// * `Ok(String)` - Hash of the new commit
    /// * `Err` - If the commit cannot be created
    fn commit(&self, message: &str) -> Result<String>;

    /// Create a lightweight tag named `name` on HEAD
    ///
    /// Fails if the tag already exists.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// All tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Versions of the `<prefix><semver>` tags, highest first, prefix stripped
    fn list_version_tags_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(sort_version_tags(&self.list_tags()?, prefix))
    }

    /// Versions of the `v<semver>` tags, highest first, `v` stripped
    fn list_version_tags(&self) -> Result<Vec<String>> {
        self.list_version_tags_with_prefix("v")
    }
}

/// Keep tags of the form `<prefix><semver>`, sorted by version, highest first.
///
/// Returned strings have the prefix removed. Tags whose remainder is not a
/// valid semantic version are skipped.
pub fn sort_version_tags(tags: &[String], prefix: &str) -> Vec<String> {
    let mut versions: Vec<(semver::Version, String)> = tags
        .iter()
        .filter_map(|tag| tag.strip_prefix(prefix))
        .filter_map(|raw| {
            semver::Version::parse(raw)
                .ok()
                .map(|version| (version, raw.to_string()))
        })
        .collect();

    versions.sort_by(|a, b| b.0.cmp(&a.0));
    versions.into_iter().map(|(_, raw)| raw).collect()
}
