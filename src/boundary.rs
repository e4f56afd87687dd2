use std::fmt;

/// Non-fatal outcomes of promoting the Unreleased section.
/// These are reported to the user as warnings; the changelog is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseWarning {
    /// The changelog has no `## [Unreleased]` heading
    MissingUnreleased,
    /// The `## [Unreleased]` heading has nothing but whitespace below it
    EmptyUnreleased,
    /// The changelog file does not exist yet
    MissingChangelog { path: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::MissingUnreleased => write!(f, "No [Unreleased] section found"),
            ReleaseWarning::EmptyUnreleased => write!(f, "[Unreleased] section is empty"),
            ReleaseWarning::MissingChangelog { path } => {
                write!(f, "Changelog '{}' does not exist", path)
            }
        }
    }
}
