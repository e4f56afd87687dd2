//! Staged-file classification.
//!
//! Maps a list of staged paths to a single [`CommitCategory`] by scoring
//! each category against an ordered pattern table, and builds the short
//! commit summary that goes with it.

use regex::{Regex, RegexBuilder};

use crate::config::ClassifierConfig;
use crate::domain::CommitCategory;
use crate::error::{Result, SmartCommitError};

/// Built-in pattern table, in declaration order. Earlier rows win ties.
const BUILTIN_PATTERNS: [(CommitCategory, &[&str]); 5] = [
    (
        CommitCategory::Feat,
        &[
            r"\.py$",
            r"\.js$",
            r"\.ts$",
            r"\.jsx$",
            r"\.tsx$",
            r"src/",
            r"lib/",
            r"components/",
            r"services/",
        ],
    ),
    (
        CommitCategory::Fix,
        &[r".*fix.*", r".*bug.*", r".*error.*", r".*issue.*"],
    ),
    (
        CommitCategory::Docs,
        &[
            r"README",
            r"\.md$",
            r"docs/",
            r"documentation/",
            r"CHANGELOG",
            r"LICENSE",
        ],
    ),
    (
        CommitCategory::Test,
        &[
            r"test_",
            r"_test\.py$",
            r"\.test\.js$",
            r"spec/",
            r"tests/",
            r"__tests__/",
        ],
    ),
    (
        CommitCategory::Chore,
        &[
            r"\.json$",
            r"\.toml$",
            r"\.yaml$",
            r"\.yml$",
            r"\.lock$",
            r"package-lock\.json",
            r"requirements\.txt",
            r"\.gitignore",
            r"docker",
            r".*config.*",
        ],
    ),
];

const PYTHON_EXTENSIONS: &[&str] = &[".py"];
const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".ts", ".jsx", ".tsx"];
const DOC_EXTENSIONS: &[&str] = &[".md"];
const CONFIG_EXTENSIONS: &[&str] = &[".json", ".toml", ".yaml", ".yml"];

/// Result of classifying a set of staged files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: CommitCategory,
    pub summary: String,
}

impl Classification {
    /// Conventional commit message, e.g. `feat: Add Python functionality`
    pub fn commit_message(&self) -> String {
        format!("{}: {}", self.category, self.summary)
    }
}

struct CategoryRule {
    category: CommitCategory,
    patterns: Vec<Regex>,
}

/// Ordered, case-insensitive pattern table over file paths
pub struct FileClassifier {
    rules: Vec<CategoryRule>,
}

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

impl FileClassifier {
    /// Classifier with the built-in pattern table only
    pub fn new() -> Self {
        let rules = BUILTIN_PATTERNS
            .iter()
            .map(|(category, patterns)| CategoryRule {
                category: category.clone(),
                patterns: patterns.iter().filter_map(|p| compile(p).ok()).collect(),
            })
            .collect();

        FileClassifier { rules }
    }

    /// Classifier with configured patterns appended to the built-in rows.
    ///
    /// Keys must name one of the classified categories and every pattern
    /// must compile, otherwise a configuration error is returned.
    pub fn with_config(config: &ClassifierConfig) -> Result<Self> {
        let mut classifier = Self::new();

        for (name, patterns) in &config.patterns {
            let category: CommitCategory = name.parse().unwrap_or(CommitCategory::Chore);
            let rule = classifier
                .rules
                .iter_mut()
                .find(|rule| rule.category == category)
                .ok_or_else(|| {
                    SmartCommitError::config(format!(
                        "Unknown classifier category '{}' (expected feat, fix, docs, test or chore)",
                        name
                    ))
                })?;

            for pattern in patterns {
                let regex = compile(pattern).map_err(|e| {
                    SmartCommitError::config(format!(
                        "Invalid classifier pattern '{}' for '{}': {}",
                        pattern, name, e
                    ))
                })?;
                rule.patterns.push(regex);
            }
        }

        Ok(classifier)
    }

    /// Score each category: every file counts once, for the first row
    /// that has a matching pattern.
    pub fn scores(&self, files: &[String]) -> Vec<(CommitCategory, usize)> {
        let mut scores: Vec<(CommitCategory, usize)> = self
            .rules
            .iter()
            .map(|rule| (rule.category.clone(), 0))
            .collect();

        for file in files {
            let hit = self
                .rules
                .iter()
                .position(|rule| rule.patterns.iter().any(|p| p.is_match(file)));
            if let Some(index) = hit {
                scores[index].1 += 1;
            }
        }

        scores
    }

    /// Classify staged files into a category and summary.
    pub fn classify(&self, files: &[String]) -> Classification {
        if files.is_empty() {
            return Classification {
                category: CommitCategory::Chore,
                summary: "Initial commit".to_string(),
            };
        }

        let scores = self.scores(files);
        tracing::debug!(?scores, "classification scores");

        // Keep the first maximum so declaration order breaks ties.
        let mut winner: Option<&(CommitCategory, usize)> = None;
        for entry in &scores {
            if winner.map_or(true, |best| entry.1 > best.1) {
                winner = Some(entry);
            }
        }

        let category = match winner {
            Some((category, score)) if *score > 0 => category.clone(),
            _ => CommitCategory::Chore,
        };

        let summary = summarize(&category, files);
        Classification { category, summary }
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify with the built-in table.
pub fn classify(files: &[String]) -> Classification {
    FileClassifier::new().classify(files)
}

fn count_with_extension(files: &[String], extensions: &[&str]) -> usize {
    files
        .iter()
        .filter(|f| extensions.iter().any(|ext| f.ends_with(ext)))
        .count()
}

/// Short description of what the files are, e.g. "2 Python files, documentation".
pub fn describe_files(files: &[String]) -> String {
    let mut parts = Vec::new();

    match count_with_extension(files, PYTHON_EXTENSIONS) {
        0 => {}
        1 => parts.push("Python functionality".to_string()),
        n => parts.push(format!("{} Python files", n)),
    }
    match count_with_extension(files, SCRIPT_EXTENSIONS) {
        0 => {}
        1 => parts.push("JavaScript functionality".to_string()),
        n => parts.push(format!("{} JS/TS files", n)),
    }
    if count_with_extension(files, DOC_EXTENSIONS) > 0 {
        parts.push("documentation".to_string());
    }
    if count_with_extension(files, CONFIG_EXTENSIONS) > 0 {
        parts.push("configuration".to_string());
    }

    if parts.is_empty() {
        let count = files.len();
        return format!("{} file{}", count, if count == 1 { "" } else { "s" });
    }

    parts.truncate(2);
    parts.join(", ")
}

fn summarize(category: &CommitCategory, files: &[String]) -> String {
    let description = describe_files(files);
    match category {
        CommitCategory::Feat => format!("Add {}", description),
        CommitCategory::Fix => format!("Fix issues in {}", description),
        CommitCategory::Test => format!("Add tests for {}", description),
        _ => format!("Update {}", description),
    }
}
