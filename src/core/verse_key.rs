use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::book::BookCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerseKeyError {
    #[error("Unknown book code: {0}")]
    UnknownBook(String),

    #[error("Invalid verse reference: {0}")]
    InvalidReference(String),

    #[error("Passage range ends before it starts: {0}")]
    InvertedRange(String),
}

/// A (book, chapter, verse) identifier.
///
/// Chapter or verse 0 refers to the introduction before verse 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseKey {
    book: BookCode,
    chapter: u32,
    verse: u32,
}

impl VerseKey {
    #[must_use]
    pub fn new(book: BookCode, chapter: u32, verse: u32) -> Self {
        Self {
            book,
            chapter,
            verse,
        }
    }

    #[must_use]
    pub fn book(&self) -> BookCode {
        self.book
    }

    #[must_use]
    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    #[must_use]
    pub fn verse(&self) -> u32 {
        self.verse
    }

    #[must_use]
    pub fn bcv(&self) -> (BookCode, u32, u32) {
        (self.book, self.chapter, self.verse)
    }

    /// Same book, different chapter and verse
    #[must_use]
    pub fn with_cv(&self, chapter: u32, verse: u32) -> Self {
        Self::new(self.book, chapter, verse)
    }
}

impl std::fmt::Display for VerseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

impl std::str::FromStr for VerseKey {
    type Err = VerseKeyError;

    /// Accepts `MAT 2:18`, `MAT_2:18` and `MAT 2.18`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VerseKeyError::InvalidReference(s.to_string());
        let trimmed = s.trim();

        let (book, cv) = trimmed
            .split_once([' ', '_'])
            .ok_or_else(invalid)?;
        let book: BookCode = book.parse()?;

        let (chapter, verse) = cv.trim().split_once([':', '.']).ok_or_else(invalid)?;
        let chapter = chapter.parse().map_err(|_| invalid())?;
        let verse = verse.parse().map_err(|_| invalid())?;

        Ok(Self::new(book, chapter, verse))
    }
}

impl TryFrom<String> for VerseKey {
    type Error = VerseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VerseKey> for String {
    fn from(key: VerseKey) -> Self {
        key.to_string()
    }
}

/// A verse or contiguous span of verses within one book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PassageRange {
    pub start: VerseKey,
    pub end: Option<VerseKey>,
}

impl PassageRange {
    #[must_use]
    pub fn single(key: VerseKey) -> Self {
        Self {
            start: key,
            end: None,
        }
    }

    /// Last verse covered by the passage
    #[must_use]
    pub fn last(&self) -> VerseKey {
        self.end.unwrap_or(self.start)
    }

    #[must_use]
    pub fn contains(&self, key: &VerseKey) -> bool {
        self.start <= *key && *key <= self.last()
    }
}

impl std::fmt::Display for PassageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)?;
        if let Some(end) = self.end {
            if end.chapter() == self.start.chapter() {
                write!(f, "-{}", end.verse())?;
            } else {
                write!(f, "-{}:{}", end.chapter(), end.verse())?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for PassageRange {
    type Err = VerseKeyError;

    /// Accepts `ISA 40:3`, `ISA 61:1-2` and `ISA 40:3-41:2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((start, tail)) = s.trim().split_once('-') else {
            return Ok(Self::single(s.parse()?));
        };
        let start: VerseKey = start.parse()?;
        let invalid = || VerseKeyError::InvalidReference(s.to_string());

        let end = match tail.split_once(':') {
            Some((chapter, verse)) => start.with_cv(
                chapter.trim().parse().map_err(|_| invalid())?,
                verse.trim().parse().map_err(|_| invalid())?,
            ),
            None => start.with_cv(start.chapter(), tail.trim().parse().map_err(|_| invalid())?),
        };

        if end < start {
            return Err(VerseKeyError::InvertedRange(s.to_string()));
        }

        Ok(Self {
            start,
            end: (end != start).then_some(end),
        })
    }
}

impl TryFrom<String> for PassageRange {
    type Error = VerseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PassageRange> for String {
    fn from(range: PassageRange) -> Self {
        range.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> VerseKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let k = key("MAT 2:18");
        assert_eq!(k.book().as_str(), "MAT");
        assert_eq!(k.chapter(), 2);
        assert_eq!(k.verse(), 18);
        assert_eq!(k.to_string(), "MAT 2:18");

        assert_eq!(key("mat_2:18"), k);
        assert_eq!(key("MAT 2.18"), k);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "XXX 1:1".parse::<VerseKey>(),
            Err(VerseKeyError::UnknownBook(_))
        ));
        assert!(matches!(
            "MAT 1".parse::<VerseKey>(),
            Err(VerseKeyError::InvalidReference(_))
        ));
        assert!(matches!(
            "MAT -1:2".parse::<VerseKey>(),
            Err(VerseKeyError::InvalidReference(_))
        ));
        assert!("MAT".parse::<VerseKey>().is_err());
    }

    #[test]
    fn test_ordering_book_then_chapter_then_verse() {
        assert!(key("MAT 1:25") < key("MAT 2:1"));
        assert!(key("MAT 2:1") < key("MAT 2:10"));
        assert!(key("MAL 4:6") < key("MAT 1:1"));
        assert!(key("JHN 0:0") < key("JHN 1:1"));
    }

    #[test]
    fn test_passage_range_forms() {
        let single: PassageRange = "ISA 40:3".parse().unwrap();
        assert_eq!(single.end, None);
        assert_eq!(single.to_string(), "ISA 40:3");

        let same_chapter: PassageRange = "ISA 61:1-2".parse().unwrap();
        assert_eq!(same_chapter.last(), key("ISA 61:2"));
        assert_eq!(same_chapter.to_string(), "ISA 61:1-2");
        assert!(same_chapter.contains(&key("ISA 61:2")));
        assert!(!same_chapter.contains(&key("ISA 61:3")));

        let cross_chapter: PassageRange = "ISA 40:3-41:2".parse().unwrap();
        assert_eq!(cross_chapter.last(), key("ISA 41:2"));
        assert_eq!(cross_chapter.to_string(), "ISA 40:3-41:2");
    }

    #[test]
    fn test_passage_range_inverted() {
        assert!(matches!(
            "ISA 40:5-3".parse::<PassageRange>(),
            Err(VerseKeyError::InvertedRange(_))
        ));
    }

    #[test]
    fn test_serde_as_text() {
        let k = key("JER 31:15");
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, "\"JER 31:15\"");
        let back: VerseKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k);
    }
}
