//! Current-version discovery and next-version calculation.
//!
//! The calculator never reaches into the filesystem or the repository on
//! its own: it asks an ordered list of [`VersionSource`]s and takes the
//! first answer.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::domain::{next_version, BumpKind, DEFAULT_VERSION};
use crate::git::Repository;

/// Something that may know the project's current version
pub trait VersionSource {
    /// Short label used in logs (e.g. "package.json")
    fn name(&self) -> &str;

    /// The declared version, or `None` when absent or unreadable
    ///
    /// A manifest that exists but declares no version also answers `None`,
    /// so the next source is asked instead of settling on 1.0.0.
    fn read_version(&self) -> Option<String>;
}

/// `version` field of a `package.json`
pub struct PackageJsonSource {
    path: PathBuf,
}

impl PackageJsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PackageJsonSource { path: path.into() }
    }
}

impl VersionSource for PackageJsonSource {
    fn name(&self) -> &str {
        "package.json"
    }

    fn read_version(&self) -> Option<String> {
        let text = fs::read_to_string(&self.path).ok()?;
        let data: serde_json::Value = serde_json::from_str(&text).ok()?;
        data.get("version")?.as_str().map(str::to_string)
    }
}

/// Version declared in a TOML manifest.
///
/// `tables` lists the dotted table paths whose `version` key is consulted,
/// in order. If the file does not parse as TOML, the first
/// `version = "..."` line is used instead.
pub struct TomlManifestSource {
    label: String,
    path: PathBuf,
    tables: Vec<Vec<String>>,
}

impl TomlManifestSource {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>, tables: &[&str]) -> Self {
        TomlManifestSource {
            label: label.into(),
            path: path.into(),
            tables: tables
                .iter()
                .map(|t| t.split('.').map(str::to_string).collect())
                .collect(),
        }
    }

    /// `pyproject.toml`: `[project]` then `[tool.poetry]`
    pub fn pyproject(root: &Path) -> Self {
        Self::new(
            "pyproject.toml",
            root.join("pyproject.toml"),
            &["project", "tool.poetry"],
        )
    }

    /// `Cargo.toml`: `[package]`
    pub fn cargo(root: &Path) -> Self {
        Self::new("Cargo.toml", root.join("Cargo.toml"), &["package"])
    }

    fn structured(&self, text: &str) -> Option<Option<String>> {
        let doc: toml::Value = toml::from_str(text).ok()?;
        let found = self.tables.iter().find_map(|table| {
            table
                .iter()
                .try_fold(&doc, |value, key| value.get(key))
                .and_then(|t| t.get("version"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        });
        Some(found)
    }
}

/// First `version = "x"` (or single-quoted) assignment in the text
pub fn permissive_version(text: &str) -> Option<String> {
    let re = Regex::new(r#"version\s*=\s*["']([^"']+)["']"#).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

impl VersionSource for TomlManifestSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn read_version(&self) -> Option<String> {
        let text = fs::read_to_string(&self.path).ok()?;
        match self.structured(&text) {
            Some(found) => found,
            None => permissive_version(&text),
        }
    }
}

/// Highest `<prefix><semver>` tag known to the repository
pub struct TagSource<'a> {
    repo: &'a dyn Repository,
    prefix: String,
}

impl<'a> TagSource<'a> {
    pub fn new(repo: &'a dyn Repository, prefix: impl Into<String>) -> Self {
        TagSource {
            repo,
            prefix: prefix.into(),
        }
    }
}

impl VersionSource for TagSource<'_> {
    fn name(&self) -> &str {
        "git tags"
    }

    fn read_version(&self) -> Option<String> {
        match self.repo.list_version_tags_with_prefix(&self.prefix) {
            Ok(tags) => tags.into_iter().next(),
            Err(e) => {
                tracing::debug!(error = %e, "cannot list version tags");
                None
            }
        }
    }
}

/// A source with a fixed answer
pub struct StaticSource {
    version: Option<String>,
}

impl StaticSource {
    pub fn new(version: Option<&str>) -> Self {
        StaticSource {
            version: version.map(str::to_string),
        }
    }
}

impl VersionSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn read_version(&self) -> Option<String> {
        self.version.clone()
    }
}

/// Reads the current version and computes the next one
pub struct VersionCalculator<'a> {
    sources: Vec<Box<dyn VersionSource + 'a>>,
}

impl<'a> VersionCalculator<'a> {
    pub fn new(sources: Vec<Box<dyn VersionSource + 'a>>) -> Self {
        VersionCalculator { sources }
    }

    /// Default source chain for a project rooted at `root`:
    /// package.json, pyproject.toml, Cargo.toml, then version tags.
    pub fn for_project(root: &Path, repo: &'a dyn Repository, tag_prefix: &str) -> Self {
        let sources: Vec<Box<dyn VersionSource + 'a>> = vec![
            Box::new(PackageJsonSource::new(root.join("package.json"))),
            Box::new(TomlManifestSource::pyproject(root)),
            Box::new(TomlManifestSource::cargo(root)),
            Box::new(TagSource::new(repo, tag_prefix)),
        ];
        Self::new(sources)
    }

    /// First version any source reports, else `1.0.0`.
    pub fn current_version(&self) -> String {
        for source in &self.sources {
            if let Some(version) = source.read_version() {
                tracing::debug!(source = source.name(), %version, "current version found");
                return version;
            }
        }
        DEFAULT_VERSION.to_string()
    }

    /// Next release version; see [`next_version`].
    pub fn next_version(&self, bump: Option<BumpKind>, override_version: Option<&str>) -> String {
        next_version(&self.current_version(), bump, override_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use tempfile::TempDir;

    fn fixed(version: Option<&str>) -> Box<dyn VersionSource> {
        Box::new(StaticSource::new(version))
    }

    #[test]
    fn test_first_source_wins() {
        let calc = VersionCalculator::new(vec![fixed(None), fixed(Some("2.3.4")), fixed(Some("9.0.0"))]);
        assert_eq!(calc.current_version(), "2.3.4");
    }

    #[test]
    fn test_default_when_no_source_answers() {
        let calc = VersionCalculator::new(vec![fixed(None)]);
        assert_eq!(calc.current_version(), "1.0.0");
    }

    #[test]
    fn test_next_version_uses_current() {
        let calc = VersionCalculator::new(vec![fixed(Some("1.2.3"))]);
        assert_eq!(calc.next_version(Some(BumpKind::Patch), None), "1.3");
        assert_eq!(calc.next_version(Some(BumpKind::Major), None), "2.0.0");
        assert_eq!(calc.next_version(None, Some("9.9.9")), "9.9.9");
    }

    #[test]
    fn test_package_json_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "demo", "version": "3.1.4"}"#).unwrap();
        assert_eq!(PackageJsonSource::new(&path).read_version().as_deref(), Some("3.1.4"));

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(PackageJsonSource::new(&path).read_version(), None);
    }

    #[test]
    fn test_pyproject_structured_and_permissive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pyproject.toml");

        fs::write(&path, "[project]\nname = \"demo\"\nversion = \"0.4.2\"\n").unwrap();
        let source = TomlManifestSource::pyproject(dir.path());
        assert_eq!(source.read_version().as_deref(), Some("0.4.2"));

        fs::write(&path, "[tool.poetry]\nversion = \"0.5.0\"\n").unwrap();
        assert_eq!(source.read_version().as_deref(), Some("0.5.0"));

        // Not valid TOML: fall back to the first version assignment.
        fs::write(&path, "[project\nversion = '0.6.1'\n").unwrap();
        assert_eq!(source.read_version().as_deref(), Some("0.6.1"));
    }

    #[test]
    fn test_manifest_without_version_falls_through() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[workspace]\nmembers = []\n").unwrap();

        let mut repo = MockRepository::new();
        repo.add_tag("v0.9.0");
        repo.add_tag("v0.10.0");

        let calc = VersionCalculator::for_project(dir.path(), &repo, "v");
        assert_eq!(calc.current_version(), "0.10.0");
    }

    #[test]
    fn test_permissive_version() {
        assert_eq!(permissive_version("version= \"1.2.3\"").as_deref(), Some("1.2.3"));
        assert_eq!(permissive_version("name = 'x'"), None);
    }
}
