//! Line-indexed changelog model.
//!
//! A document is a preamble followed by release blocks. Every line that
//! starts with `## [` opens a new block; the block runs until the next such
//! line or the end of the text. Lines are kept verbatim, so parsing and
//! serializing an untouched document reproduces it exactly. Lines added by
//! edits follow the document's line ending (`\r\n` or `\n`).

use crate::boundary::ReleaseWarning;
use crate::domain::{BumpKind, CommitCategory};

/// Heading of the pending section.
pub const UNRELEASED_HEADING: &str = "## [Unreleased]";

const RELEASE_HEADING_PREFIX: &str = "## [";
const SECTION_HEADING_PREFIX: &str = "### ";

const MAJOR_KEYWORDS: &[&str] = &["breaking", "removed", "deprecated"];
const MINOR_KEYWORDS: &[&str] = &["added", "feat", "new"];

/// One `## [...]` heading and the lines below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBlock {
    pub heading: String,
    pub body: Vec<String>,
}

impl ReleaseBlock {
    fn is_unreleased(&self) -> bool {
        self.heading.trim() == UNRELEASED_HEADING
    }

    /// Body text with surrounding whitespace removed
    fn trimmed_content(&self) -> String {
        self.body.join("\n").trim().to_string()
    }
}

/// Parsed changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    preamble: Vec<String>,
    releases: Vec<ReleaseBlock>,
    crlf: bool,
}

impl ChangelogDocument {
    /// Split text into preamble and release blocks.
    pub fn parse(text: &str) -> Self {
        let mut preamble = Vec::new();
        let mut releases: Vec<ReleaseBlock> = Vec::new();

        for line in text.split('\n') {
            if line.starts_with(RELEASE_HEADING_PREFIX) {
                releases.push(ReleaseBlock {
                    heading: line.to_string(),
                    body: Vec::new(),
                });
            } else if let Some(block) = releases.last_mut() {
                block.body.push(line.to_string());
            } else {
                preamble.push(line.to_string());
            }
        }

        ChangelogDocument {
            preamble,
            releases,
            crlf: text.contains("\r\n"),
        }
    }

    /// `text` as a stored line, carrying the `\r` of a CRLF document
    fn line(&self, text: &str) -> String {
        if self.crlf {
            format!("{}\r", text.strip_suffix('\r').unwrap_or(text))
        } else {
            text.to_string()
        }
    }

    /// Render back to text.
    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = self.preamble.iter().map(String::as_str).collect();
        for block in &self.releases {
            lines.push(&block.heading);
            lines.extend(block.body.iter().map(String::as_str));
        }
        lines.join("\n")
    }

    pub fn releases(&self) -> &[ReleaseBlock] {
        &self.releases
    }

    fn unreleased(&self) -> Option<&ReleaseBlock> {
        self.releases.iter().find(|block| block.is_unreleased())
    }

    fn unreleased_mut(&mut self) -> Option<&mut ReleaseBlock> {
        self.releases.iter_mut().find(|block| block.is_unreleased())
    }

    /// True when the Unreleased span holds at least one `### ` section.
    ///
    /// Sections are counted, not bullets: a section heading with no entries
    /// still counts.
    pub fn has_pending_entries(&self) -> bool {
        self.unreleased().map_or(false, |block| {
            block
                .body
                .iter()
                .any(|line| line.trim().starts_with(SECTION_HEADING_PREFIX))
        })
    }

    /// Raw text of the Unreleased span, if the heading exists
    pub fn unreleased_text(&self) -> Option<String> {
        self.unreleased().map(|block| block.body.join("\n"))
    }

    /// File `- message` under the category's section heading.
    ///
    /// The entry goes right below the first line in the whole document that
    /// equals the heading, whichever release that line belongs to. Without
    /// such a line the section is opened at the top of Unreleased, and
    /// without Unreleased a fresh Unreleased block is put at the very top.
    pub fn add_entry(&mut self, category: &CommitCategory, message: &str) {
        let heading = category.section_heading();
        let entry = self.line(&format!("- {}", message));

        if let Some(pos) = self.preamble.iter().position(|l| is_heading_line(l, heading)) {
            self.preamble.insert(pos + 1, entry);
            return;
        }
        for block in &mut self.releases {
            if let Some(pos) = block.body.iter().position(|l| is_heading_line(l, heading)) {
                block.body.insert(pos + 1, entry);
                return;
            }
        }

        let blank = self.line("");
        let heading_line = self.line(heading);

        if let Some(block) = self.unreleased_mut() {
            let mut body = vec![blank, heading_line, entry];
            body.append(&mut block.body);
            block.body = body;
            return;
        }

        // The old preamble ends up inside the new Unreleased block, exactly
        // where a re-parse of the written text would put it.
        let mut body = vec![blank.clone(), heading_line, entry, blank];
        body.append(&mut self.preamble);
        let unreleased_heading = self.line(UNRELEASED_HEADING);
        self.releases.insert(
            0,
            ReleaseBlock {
                heading: unreleased_heading,
                body,
            },
        );
    }

    /// Move the Unreleased content into a new `## [version] - date` block.
    ///
    /// Unreleased is left as its heading plus one blank line, and the new
    /// block is inserted directly below it.
    pub fn promote_unreleased(
        &mut self,
        version: &str,
        date: &str,
    ) -> std::result::Result<(), ReleaseWarning> {
        let index = self
            .releases
            .iter()
            .position(|block| block.is_unreleased())
            .ok_or(ReleaseWarning::MissingUnreleased)?;

        let content = self.releases[index].trimmed_content();
        if content.is_empty() {
            return Err(ReleaseWarning::EmptyUnreleased);
        }

        let blank = self.line("");
        let mut body = vec![blank.clone()];
        body.extend(content.split('\n').map(|l| self.line(l)));
        // The last line of the file is whatever follows the final newline.
        if index + 1 == self.releases.len() {
            body.push(String::new());
        } else {
            body.push(blank.clone());
        }

        let heading = self.line(&format!("## [{}] - {}", version, date));
        let unreleased_heading = self.line(UNRELEASED_HEADING);
        self.releases[index].heading = unreleased_heading;
        self.releases[index].body = vec![blank];
        self.releases.insert(index + 1, ReleaseBlock { heading, body });

        Ok(())
    }
}

fn is_heading_line(line: &str, heading: &str) -> bool {
    line.trim_end() == heading
}

/// Guess the bump kind from the Unreleased span of a changelog.
///
/// Missing changelog or missing Unreleased heading gives `Patch`.
pub fn infer_bump_kind(contents: Option<&str>) -> BumpKind {
    let Some(text) = contents
        .map(ChangelogDocument::parse)
        .and_then(|doc| doc.unreleased_text())
    else {
        return BumpKind::Patch;
    };

    let lowered = text.to_lowercase();
    if MAJOR_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        BumpKind::Major
    } else if MINOR_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        BumpKind::Minor
    } else {
        BumpKind::Patch
    }
}
