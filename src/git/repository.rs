use crate::error::{Result, SmartCommitError};
use git2::{Commit, ErrorCode, Repository as Git2Repo, Status, StatusOptions};
use std::path::Path;

/// Status bits meaning "differs between HEAD and the index"
fn staged_mask() -> Status {
    Status::INDEX_NEW
        | Status::INDEX_MODIFIED
        | Status::INDEX_DELETED
        | Status::INDEX_RENAMED
        | Status::INDEX_TYPECHANGE
}

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    ///
    /// Fails with an environment error when `path` is not inside a work tree.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            SmartCommitError::environment(format!("Not in a git repository: {}", e.message()))
        })?;

        if repo.is_bare() {
            return Err(SmartCommitError::environment(
                "Bare repositories have no work tree",
            ));
        }

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn statuses(&self) -> Result<git2::Statuses<'_>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);
        Ok(self.repo.statuses(Some(&mut options))?)
    }

    /// HEAD commit, or `None` on an unborn branch
    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl super::Repository for Git2Repository {
    fn working_tree_clean(&self) -> Result<bool> {
        Ok(self.statuses()?.is_empty())
    }

    fn staged_files(&self) -> Result<Vec<String>> {
        let statuses = self.statuses()?;
        let mask = staged_mask();

        let files = statuses
            .iter()
            .filter(|entry| entry.status().intersects(mask))
            .filter_map(|entry| {
                // A staged rename is listed under its new name.
                entry
                    .head_to_index()
                    .and_then(|delta| delta.new_file().path())
                    .and_then(Path::to_str)
                    .or_else(|| entry.path())
                    .map(str::to_string)
            })
            .collect();

        Ok(files)
    }

    fn commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;

        let signature = self.repo.signature().map_err(|e| {
            SmartCommitError::environment(format!(
                "Cannot determine commit author (set user.name and user.email): {}",
                e.message()
            ))
        })?;

        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(oid.to_string())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self
            .head_commit()?
            .ok_or_else(|| SmartCommitError::precondition("Cannot tag: HEAD has no commits"))?;

        self.repo.tag_lightweight(name, head.as_object(), false)?;

        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }
}
