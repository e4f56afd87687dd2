use crate::error::{Result, SmartCommitError};
use crate::git::Repository;
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
///
/// Commits and tags are recorded so tests can assert on them.
#[derive(Default)]
pub struct MockRepository {
    clean: bool,
    staged: Vec<String>,
    tags: RefCell<Vec<String>>,
    commits: RefCell<Vec<String>>,
    fail_commit: bool,
    fail_tag: bool,
}

impl MockRepository {
    /// Create a new mock repository with a clean tree and nothing staged
    pub fn new() -> Self {
        MockRepository {
            clean: true,
            ..Default::default()
        }
    }

    /// Stage files; a tree with staged files is never clean
    pub fn stage(&mut self, path: impl Into<String>) {
        self.staged.push(path.into());
        self.clean = false;
    }

    /// Mark the work tree as dirty or clean
    pub fn set_clean(&mut self, clean: bool) {
        self.clean = clean;
    }

    /// Add an existing tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.borrow_mut().push(name.into());
    }

    /// Make every `commit` call fail
    pub fn fail_commits(&mut self) {
        self.fail_commit = true;
    }

    /// Make every `create_tag` call fail
    pub fn fail_tags(&mut self) {
        self.fail_tag = true;
    }

    /// Messages of the commits created so far
    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }

    /// All tags, existing and created
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn working_tree_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn staged_files(&self) -> Result<Vec<String>> {
        Ok(self.staged.clone())
    }

    fn commit(&self, message: &str) -> Result<String> {
        if self.fail_commit {
            return Err(SmartCommitError::Git(git2::Error::from_str(
                "commit rejected by mock",
            )));
        }
        let mut commits = self.commits.borrow_mut();
        commits.push(message.to_string());
        Ok(format!("{:040x}", commits.len()))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.fail_tag {
            return Err(SmartCommitError::Git(git2::Error::from_str(
                "tag rejected by mock",
            )));
        }
        let mut tags = self.tags.borrow_mut();
        if tags.iter().any(|t| t == name) {
            return Err(SmartCommitError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }
        tags.push(name.to_string());
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().clone())
    }
}
