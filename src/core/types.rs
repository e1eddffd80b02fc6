use serde::{Deserialize, Serialize};

use crate::core::verse_key::VerseKey;
use crate::parsing::usfm::parse_marker_line;

/// Section heading markers, `s` being the same level as `s1`
pub const SECTION_HEADING_MARKERS: [&str; 5] = ["s", "s1", "s2", "s3", "s4"];

/// Substrings that reveal a section heading in raw USFM text
const SECTION_HEADING_TAGS: [&str; 5] = ["\\s ", "\\s1", "\\s2", "\\s3", "\\s4"];

/// A heading-delimited span of a book.
///
/// `end` is the start of the following section, so the span is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBoundary {
    pub start: VerseKey,
    pub end: VerseKey,
}

impl SectionBoundary {
    #[must_use]
    pub fn new(start: VerseKey, end: VerseKey) -> Self {
        debug_assert!(start <= end, "section starts after it ends");
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, key: &VerseKey) -> bool {
        self.start <= *key && *key < self.end
    }
}

/// One USFM line split into its marker and the text that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerEntry {
    /// Marker without the backslash, `None` for continuation text
    pub marker: Option<String>,
    pub text: String,
}

impl MarkerEntry {
    pub fn new(marker: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            marker: marker.map(str::to_string),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_section_heading(&self) -> bool {
        self.marker
            .as_deref()
            .is_some_and(|m| SECTION_HEADING_MARKERS.contains(&m))
    }
}

/// Verse content as handed to the section locator.
///
/// Editors hold raw USFM text for a verse, resource windows hold entries
/// that have already been split by marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum VerseData {
    PlainText(String),
    Structured(Vec<MarkerEntry>),
}

impl VerseData {
    /// Split raw USFM text into marker entries, skipping blank lines
    #[must_use]
    pub fn structured_from_text(text: &str) -> Self {
        Self::Structured(
            text.lines()
                .filter(|line| !line.trim().is_empty())
                .map(parse_marker_line)
                .collect(),
        )
    }

    #[must_use]
    pub fn has_section_heading(&self) -> bool {
        match self {
            Self::PlainText(text) => SECTION_HEADING_TAGS.iter().any(|tag| text.contains(tag)),
            Self::Structured(entries) => entries.iter().any(MarkerEntry::is_section_heading),
        }
    }
}

/// Navigation group a window belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum GroupCode {
    A,
    B,
    C,
    D,
}

impl GroupCode {
    pub const ALL: [GroupCode; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub fn slot(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}

impl std::fmt::Display for GroupCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        write!(f, "{code}")
    }
}

/// How a related passage is connected to the verse it is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// Direct quotation of an Old Testament passage
    QuotedOtReference,
    /// Clear allusion without quotation
    AlludedOtReference,
    /// Possible allusion
    PossibleOtReference,
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotedOtReference => write!(f, "quoted"),
            Self::AlludedOtReference => write!(f, "alluded"),
            Self::PossibleOtReference => write!(f, "possible"),
        }
    }
}
