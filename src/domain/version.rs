use crate::error::{Result, SmartCommitError};
use std::fmt;
use std::str::FromStr;

/// Fallback used whenever a version cannot be read or parsed
pub const DEFAULT_VERSION: SemanticVersion = SemanticVersion {
    major: 1,
    minor: 0,
    patch: 0,
};

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse version from a string (e.g., "1.2.3" or "v1.2.3" -> SemanticVersion(1,2,3))
    pub fn parse(raw: &str) -> Result<Self> {
        let clean = raw.trim().trim_start_matches('v').trim_start_matches('V');

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(SmartCommitError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                raw
            )));
        }

        let major = parts[0].parse::<u64>().map_err(|_| {
            SmartCommitError::version(format!("Invalid major version: {}", parts[0]))
        })?;
        let minor = parts[1].parse::<u64>().map_err(|_| {
            SmartCommitError::version(format!("Invalid minor version: {}", parts[1]))
        })?;
        let patch = parts[2].parse::<u64>().map_err(|_| {
            SmartCommitError::version(format!("Invalid patch version: {}", parts[2]))
        })?;

        Ok(SemanticVersion {
            major,
            minor,
            patch,
        })
    }

    /// Version string after applying `bump`, or `None` if a component overflows
    fn bumped(&self, bump: BumpKind) -> Option<String> {
        match bump {
            BumpKind::Major => Some(format!("{}.0.0", self.major.checked_add(1)?)),
            BumpKind::Minor => Some(format!("{}.{}.0", self.major, self.minor.checked_add(1)?)),
            BumpKind::Patch => Some(format!("{}.{}", self.major, self.minor.checked_add(1)?)),
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which component of the version a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        };
        f.write_str(name)
    }
}

impl FromStr for BumpKind {
    type Err = SmartCommitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(SmartCommitError::version(format!(
                "Unknown bump kind: '{}'",
                other
            ))),
        }
    }
}

/// Compute the version string of the next release.
///
/// An override is returned untouched, without validation. Otherwise the
/// current version is parsed (falling back to 1.0.0, also when the bumped
/// component would overflow) and bumped:
/// - **Major**: `(major+1).0.0`
/// - **Minor**: `major.(minor+1).0`
/// - **Patch**: `major.(minor+1)`, a two-component string. Existing tags and
///   changelogs were produced with this rule, so it is kept as is.
///
/// Without a bump kind the current version is returned unchanged.
pub fn next_version(current: &str, bump: Option<BumpKind>, override_version: Option<&str>) -> String {
    if let Some(version) = override_version {
        return version.to_string();
    }

    let Some(bump) = bump else {
        return current.to_string();
    };

    SemanticVersion::parse(current)
        .ok()
        .and_then(|parsed| parsed.bumped(bump))
        .or_else(|| DEFAULT_VERSION.bumped(bump))
        .unwrap_or_else(|| current.to_string())
}
