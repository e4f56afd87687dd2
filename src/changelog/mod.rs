//! Changelog file management
//!
//! [`ChangelogStore`] owns the on-disk changelog. Every mutation reads the
//! whole file, edits a [`ChangelogDocument`], and atomically replaces the
//! file with the rendered result.

pub mod document;

pub use document::{infer_bump_kind, ChangelogDocument, ReleaseBlock, UNRELEASED_HEADING};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tempfile::NamedTempFile;

use crate::boundary::ReleaseWarning;
use crate::domain::CommitCategory;
use crate::error::{Result, SmartCommitError};

/// Contents written by [`ChangelogStore::create_initial`].
pub const INITIAL_TEMPLATE: &str = "# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/),
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).

## [Unreleased]

";

/// Outcome of [`ChangelogStore::create_release`]
pub type ReleaseResult = std::result::Result<(), ReleaseWarning>;

/// Mode of a newly created changelog (`rw-r--r--`)
#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

/// Changelog file at a fixed path
#[derive(Debug, Clone)]
pub struct ChangelogStore {
    path: PathBuf,
}

impl ChangelogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ChangelogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the whole changelog, or `None` when the file does not exist.
    pub fn read(&self) -> Result<Option<String>> {
        if !self.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path).map_err(|e| {
            SmartCommitError::changelog(format!("Cannot read {}: {}", self.path.display(), e))
        })?;
        Ok(Some(text))
    }

    fn load(&self) -> Result<ChangelogDocument> {
        let text = self.read()?.unwrap_or_default();
        Ok(ChangelogDocument::parse(&text))
    }

    /// Replace the file contents atomically (temp file + rename in the same directory).
    fn write(&self, contents: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // Temp files are created owner-only; the changelog keeps its own mode.
        let permissions = match fs::metadata(&self.path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(_) => new_file_permissions(),
        };

        let mut tmp = NamedTempFile::new_in(&dir)?;
        if let Some(permissions) = permissions {
            tmp.as_file().set_permissions(permissions)?;
        }
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            SmartCommitError::changelog(format!(
                "Cannot write {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        tracing::debug!(path = %self.path.display(), bytes = contents.len(), "changelog written");
        Ok(())
    }

    /// Write the initial template unless the file already exists.
    pub fn create_initial(&self) -> Result<()> {
        if self.exists() {
            return Ok(());
        }
        self.write(INITIAL_TEMPLATE)
    }

    /// Whether the Unreleased span contains at least one `### ` section.
    ///
    /// A missing or unreadable file counts as having no pending entries.
    pub fn has_pending_entries(&self) -> bool {
        match self.read() {
            Ok(Some(text)) => ChangelogDocument::parse(&text).has_pending_entries(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "treating unreadable changelog as empty");
                false
            }
        }
    }

    /// Append `- message` under the section for `category`, creating the file first if needed.
    pub fn add_entry(&self, category: &CommitCategory, message: &str) -> Result<()> {
        self.create_initial()?;

        let mut doc = self.load()?;
        doc.add_entry(category, message);
        self.write(&doc.render())
    }

    /// Promote Unreleased into a `## [version] - <today>` section.
    pub fn create_release(&self, version: &str) -> Result<ReleaseResult> {
        self.create_release_on(version, Local::now().date_naive())
    }

    /// Promote Unreleased into a `## [version] - <date>` section.
    ///
    /// Warnings leave the file untouched; I/O failures are errors.
    pub fn create_release_on(&self, version: &str, date: NaiveDate) -> Result<ReleaseResult> {
        let Some(text) = self.read()? else {
            return Ok(Err(ReleaseWarning::MissingChangelog {
                path: self.path.display().to_string(),
            }));
        };

        let mut doc = ChangelogDocument::parse(&text);
        if let Err(warning) = doc.promote_unreleased(version, &date.format("%Y-%m-%d").to_string())
        {
            return Ok(Err(warning));
        }

        self.write(&doc.render())?;
        Ok(Ok(()))
    }

    /// Bump kind suggested by the Unreleased span (see [`infer_bump_kind`]).
    pub fn infer_bump_kind(&self) -> crate::domain::BumpKind {
        let text = self.read().ok().flatten();
        infer_bump_kind(text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ChangelogStore {
        ChangelogStore::new(dir.path().join("CHANGELOG.md"))
    }

    #[test]
    fn test_create_initial_writes_template() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.create_initial().unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, INITIAL_TEMPLATE);
        assert!(!store.has_pending_entries());
    }

    #[test]
    fn test_create_initial_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "custom\n").unwrap();

        store.create_initial().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "custom\n");
    }

    #[test]
    fn test_missing_file_has_no_pending_entries() {
        let dir = TempDir::new().unwrap();
        assert!(!store_in(&dir).has_pending_entries());
    }

    #[test]
    fn test_add_entry_creates_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.add_entry(&CommitCategory::Feat, "Add login").unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("## [Unreleased]\n\n### Added\n- Add login\n"));
        assert!(store.has_pending_entries());
    }

    #[test]
    fn test_release_on_missing_file_is_warning() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let outcome = store.create_release_on("1.0.0", date).unwrap();
        assert!(matches!(outcome, Err(ReleaseWarning::MissingChangelog { .. })));
        assert!(!store.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_writes_keep_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mode = |store: &ChangelogStore| {
            fs::metadata(store.path()).unwrap().permissions().mode() & 0o777
        };

        store.create_initial().unwrap();
        assert_eq!(mode(&store), 0o644);

        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o664)).unwrap();
        store.add_entry(&CommitCategory::Feat, "Add export").unwrap();
        assert_eq!(mode(&store), 0o664);

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(store.create_release_on("1.1.0", date).unwrap(), Ok(()));
        assert_eq!(mode(&store), 0o664);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add_entry(&CommitCategory::Fix, "Fix crash").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("CHANGELOG.md")]);
    }
}
