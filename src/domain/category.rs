use std::fmt;
use std::str::FromStr;

/// Conventional-commit category of a change
///
/// The classifier only ever produces the first five variants. `Perf` and
/// `Refactor` exist as changelog section kinds, and any other type string
/// is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommitCategory {
    Feat,
    Fix,
    Docs,
    Test,
    Chore,
    Perf,
    Refactor,
    Other(String),
}

impl CommitCategory {
    /// Conventional-commit type prefix (e.g. "feat")
    pub fn as_str(&self) -> &str {
        match self {
            CommitCategory::Feat => "feat",
            CommitCategory::Fix => "fix",
            CommitCategory::Docs => "docs",
            CommitCategory::Test => "test",
            CommitCategory::Chore => "chore",
            CommitCategory::Perf => "perf",
            CommitCategory::Refactor => "refactor",
            CommitCategory::Other(name) => name,
        }
    }

    /// Changelog heading under which entries of this category are filed
    pub fn section_heading(&self) -> &'static str {
        match self {
            CommitCategory::Feat => "### Added",
            CommitCategory::Fix => "### Fixed",
            CommitCategory::Docs => "### Documentation",
            CommitCategory::Test => "### Testing",
            CommitCategory::Chore => "### Maintenance",
            CommitCategory::Perf => "### Performance",
            CommitCategory::Refactor => "### Refactoring",
            CommitCategory::Other(_) => "### Changed",
        }
    }
}

impl fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim().to_ascii_lowercase().as_str() {
            "feat" => CommitCategory::Feat,
            "fix" => CommitCategory::Fix,
            "docs" => CommitCategory::Docs,
            "test" => CommitCategory::Test,
            "chore" => CommitCategory::Chore,
            "perf" => CommitCategory::Perf,
            "refactor" => CommitCategory::Refactor,
            other => CommitCategory::Other(other.to_string()),
        };
        Ok(category)
    }
}
