//! Main workflow orchestration logic
//!
//! Decides whether a run sets up the changelog, commits staged work, or cuts
//! a release, and sequences the repository, classifier, changelog and
//! version calculator accordingly. Parsing of command-line flags stays in
//! `main.rs`; this module only sees [`WorkflowArgs`].

use std::fmt;

use chrono::{Local, NaiveDate};

use crate::changelog::ChangelogStore;
use crate::classifier::FileClassifier;
use crate::config::Config;
use crate::domain::{next_version, BumpKind};
use crate::error::{Result, SmartCommitError};
use crate::git::Repository;
use crate::ui::{file_listing, repository_status_lines, Reporter, RepositoryStatus};
use crate::version::VersionCalculator;

/// Operating mode of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    Commit,
    Release,
    Setup,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Commit => "commit",
            Mode::Release => "release",
            Mode::Setup => "setup",
        };
        f.write_str(name)
    }
}

/// Arguments for the workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowArgs {
    /// Commit message used instead of the generated one
    pub message: Option<String>,

    /// Explicit mode; skips detection
    pub mode: Option<Mode>,

    /// Commit even when a release looks due
    pub force_commit: bool,

    /// Release even with staged changes
    pub force_release: bool,

    /// Literal release version, used without validation
    pub version: Option<String>,

    /// Bump kind used instead of the one inferred from the changelog
    pub bump: Option<BumpKind>,

    /// Analyze and report, but change nothing
    pub dry_run: bool,
}

/// What a successful run did (or, in dry-run mode, would have done)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowResult {
    pub mode: Mode,

    /// Message of the created commit
    pub commit_message: Option<String>,

    /// Version of the created release
    pub version: Option<String>,

    /// Name of the created tag
    pub tag: Option<String>,

    pub dry_run: bool,
}

impl WorkflowResult {
    fn new(mode: Mode, dry_run: bool) -> Self {
        WorkflowResult {
            mode,
            commit_message: None,
            version: None,
            tag: None,
            dry_run,
        }
    }
}

/// Pick the operating mode. The first matching rule wins:
/// 1. explicit mode
/// 2. `force_commit` → commit
/// 3. `force_release` → release
/// 4. no changelog → setup
/// 5. clean tree, pending entries and nothing staged → release
/// 6. otherwise → commit
pub fn determine_mode(args: &WorkflowArgs, status: &RepositoryStatus, has_pending: bool) -> Mode {
    if let Some(mode) = args.mode {
        return mode;
    }
    if args.force_commit {
        return Mode::Commit;
    }
    if args.force_release {
        return Mode::Release;
    }
    if !status.changelog_exists {
        return Mode::Setup;
    }
    if status.working_tree_clean && has_pending && !status.staged_changes {
        return Mode::Release;
    }
    Mode::Commit
}

/// Sequences one smartcommit run against injected collaborators
pub struct Workflow<'a> {
    repo: &'a dyn Repository,
    changelog: ChangelogStore,
    classifier: FileClassifier,
    versions: VersionCalculator<'a>,
    reporter: &'a dyn Reporter,
    tag_prefix: String,
    max_listed_files: usize,
    today: NaiveDate,
}

impl<'a> Workflow<'a> {
    pub fn new(
        repo: &'a dyn Repository,
        changelog: ChangelogStore,
        versions: VersionCalculator<'a>,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Workflow {
            repo,
            changelog,
            classifier: FileClassifier::new(),
            versions,
            reporter,
            tag_prefix: "v".to_string(),
            max_listed_files: 5,
            today: Local::now().date_naive(),
        }
    }

    /// Apply tag prefix, listing limit and classifier patterns from `config`.
    pub fn with_config(mut self, config: &Config) -> Result<Self> {
        self.classifier = FileClassifier::with_config(&config.classifier)?;
        self.tag_prefix = config.release.tag_prefix.clone();
        self.max_listed_files = config.commit.max_listed_files;
        Ok(self)
    }

    /// Date written into release headings
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn changelog_name(&self) -> String {
        self.changelog
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.changelog.path().display().to_string())
    }

    /// Current repository and changelog state
    pub fn status(&self) -> Result<RepositoryStatus> {
        Ok(RepositoryStatus {
            working_tree_clean: self.repo.working_tree_clean()?,
            staged_changes: self.repo.has_staged_changes()?,
            changelog_exists: self.changelog.exists(),
        })
    }

    /// Run the workflow: report status, pick a mode, execute it.
    pub fn run(&self, args: &WorkflowArgs) -> Result<WorkflowResult> {
        self.reporter.step("SmartCommit - Intelligent Git Workflow");

        let status = self.status()?;
        for line in repository_status_lines(&status, &self.changelog_name()) {
            self.reporter.result(&line);
        }

        let has_pending = self.changelog.has_pending_entries();
        let mode = determine_mode(args, &status, has_pending);
        tracing::info!(%mode, ?status, has_pending, dry_run = args.dry_run, "mode selected");
        self.reporter.result(&format!("Mode: {}", mode));

        match mode {
            Mode::Setup => self.run_setup(args),
            Mode::Commit => self.run_commit(args),
            Mode::Release => self.run_release(args),
        }
    }

    /// Setup mode - create the initial changelog.
    pub fn run_setup(&self, args: &WorkflowArgs) -> Result<WorkflowResult> {
        let name = self.changelog_name();
        self.reporter.step(&format!("Creating {}...", name));

        if args.dry_run {
            self.reporter
                .result(&format!("Would create {} with initial structure", name));
            return Ok(WorkflowResult::new(Mode::Setup, true));
        }

        if let Err(e) = self.changelog.create_initial() {
            self.reporter.error(&format!("Failed to create {}", name));
            return Err(e);
        }
        self.reporter.success(&format!("{} created successfully", name));

        Ok(WorkflowResult::new(Mode::Setup, false))
    }

    /// Commit mode - classify staged files, commit, then file a changelog entry.
    pub fn run_commit(&self, args: &WorkflowArgs) -> Result<WorkflowResult> {
        let files = self.repo.staged_files()?;
        if files.is_empty() {
            self.reporter.result("Stage changes first: git add <files>");
            return Err(SmartCommitError::precondition("No staged changes found"));
        }

        let classification = self.classifier.classify(&files);
        tracing::debug!(category = %classification.category, summary = %classification.summary, "staged files classified");

        for line in file_listing(&files, self.max_listed_files) {
            self.reporter.result(&line);
        }

        let final_message = match &args.message {
            Some(message) => {
                self.reporter
                    .result(&format!("Using custom message: {}", message));
                message.clone()
            }
            None => {
                let generated = classification.commit_message();
                self.reporter
                    .result(&format!("Generated message: {}", generated));
                generated
            }
        };

        let mut result = WorkflowResult::new(Mode::Commit, args.dry_run);
        result.commit_message = Some(final_message.clone());

        let name = self.changelog_name();
        if args.dry_run {
            self.reporter
                .result(&format!("Would execute: git commit -m \"{}\"", final_message));
            self.reporter.result(&format!(
                "Would add \"- {}\" under \"{}\" in {}",
                classification.summary,
                classification.category.section_heading(),
                name
            ));
            return Ok(result);
        }

        self.reporter.step("Executing commit...");
        if let Err(e) = self.repo.commit(&final_message) {
            self.reporter.error("Commit failed");
            return Err(e);
        }
        self.reporter.success("Commit executed successfully");

        // The commit stands even if the changelog cannot be updated.
        self.reporter.step(&format!("Updating {}...", name));
        match self
            .changelog
            .add_entry(&classification.category, &classification.summary)
        {
            Ok(()) => self.reporter.success(&format!("{} updated", name)),
            Err(e) => {
                tracing::warn!(error = %e, "changelog update failed after commit");
                self.reporter
                    .warning(&format!("Failed to update {}: {}", name, e));
            }
        }

        Ok(result)
    }

    /// Release mode - promote Unreleased to a version and tag it.
    pub fn run_release(&self, args: &WorkflowArgs) -> Result<WorkflowResult> {
        if !self.changelog.has_pending_entries() {
            return Err(SmartCommitError::precondition(
                "No entries in [Unreleased] section",
            ));
        }

        if self.repo.has_staged_changes()? && !args.force_release {
            self.reporter
                .result("Use --force-release to proceed, or commit changes first");
            return Err(SmartCommitError::precondition(
                "Both staged changes AND [Unreleased] entries exist",
            ));
        }

        self.reporter.step("Analyzing [Unreleased] entries...");

        let bump = args
            .bump
            .unwrap_or_else(|| self.changelog.infer_bump_kind());
        let current = self.versions.current_version();
        let next = next_version(&current, Some(bump), args.version.as_deref());
        let tag = format!("{}{}", self.tag_prefix, next);

        self.reporter.result(&format!("Current version: {}", current));
        self.reporter.result(&format!("Version bump: {}", bump));
        self.reporter.result(&format!("Next version: {}", next));

        let mut result = WorkflowResult::new(Mode::Release, args.dry_run);
        result.version = Some(next.clone());
        result.tag = Some(tag.clone());

        let date = self.today.format("%Y-%m-%d");
        if args.dry_run {
            self.reporter
                .result(&format!("Would create release [{}] - {}", next, date));
            self.reporter
                .result(&format!("Would create git tag: {}", tag));
            return Ok(result);
        }

        self.reporter.step("Creating release...");
        if let Err(warning) = self.changelog.create_release_on(&next, self.today)? {
            self.reporter.warning(&warning.to_string());
            return Err(SmartCommitError::changelog(format!(
                "Failed to create release: {}",
                warning
            )));
        }
        self.reporter.success(&format!(
            "Version [{}] created in {}",
            next,
            self.changelog_name()
        ));

        if let Err(e) = self.repo.create_tag(&tag) {
            self.reporter.warning("Failed to create git tag");
            return Err(e);
        }
        self.reporter.success(&format!("Git tag created: {}", tag));
        self.reporter
            .result(&format!("Release ready! Run: git push origin {}", tag));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(clean: bool, staged: bool, exists: bool) -> RepositoryStatus {
        RepositoryStatus {
            working_tree_clean: clean,
            staged_changes: staged,
            changelog_exists: exists,
        }
    }

    #[test]
    fn test_clean_tree_with_pending_entries_releases() {
        let mode = determine_mode(&WorkflowArgs::default(), &status(true, false, true), true);
        assert_eq!(mode, Mode::Release);
    }

    #[test]
    fn test_dirty_or_staged_commits() {
        let args = WorkflowArgs::default();
        assert_eq!(determine_mode(&args, &status(false, false, true), true), Mode::Commit);
        assert_eq!(determine_mode(&args, &status(true, true, true), true), Mode::Commit);
        assert_eq!(determine_mode(&args, &status(true, false, true), false), Mode::Commit);
    }

    #[test]
    fn test_missing_changelog_sets_up() {
        let args = WorkflowArgs::default();
        assert_eq!(determine_mode(&args, &status(true, false, false), true), Mode::Setup);
        assert_eq!(determine_mode(&args, &status(false, true, false), false), Mode::Setup);
    }

    #[test]
    fn test_flags_override_detection() {
        let missing = status(true, false, false);

        let args = WorkflowArgs {
            mode: Some(Mode::Release),
            force_commit: true,
            ..Default::default()
        };
        assert_eq!(determine_mode(&args, &missing, false), Mode::Release);

        let args = WorkflowArgs {
            force_commit: true,
            force_release: true,
            ..Default::default()
        };
        assert_eq!(determine_mode(&args, &missing, false), Mode::Commit);

        let args = WorkflowArgs {
            force_release: true,
            ..Default::default()
        };
        assert_eq!(determine_mode(&args, &missing, false), Mode::Release);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Setup.to_string(), "setup");
        assert_eq!(Mode::Release.to_string(), "release");
    }
}
