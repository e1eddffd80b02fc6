use serde::{Deserialize, Serialize};

use crate::core::verse_key::VerseKeyError;

/// Canonical book codes in canonical order.
pub const BOOK_CODES: [&str; 66] = [
    "GEN", "EXO", "LEV", "NUM", "DEU", "JOS", "JDG", "RUT", "SA1", "SA2", "KI1", "KI2", "CH1",
    "CH2", "EZR", "NEH", "EST", "JOB", "PSA", "PRO", "ECC", "SNG", "ISA", "JER", "LAM", "EZE",
    "DAN", "HOS", "JOL", "AMO", "OBA", "JNA", "MIC", "NAH", "HAB", "ZEP", "HAG", "ZEC", "MAL",
    "MAT", "MRK", "LUK", "JHN", "ACT", "ROM", "CO1", "CO2", "GAL", "EPH", "PHP", "COL", "TH1",
    "TH2", "TI1", "TI2", "TIT", "PHM", "HEB", "JAM", "PE1", "PE2", "JN1", "JN2", "JN3", "JDE",
    "REV",
];

/// Number of Old Testament books at the front of [`BOOK_CODES`]
pub const OLD_TESTAMENT_BOOKS: usize = 39;

/// A book code from the canonical list.
///
/// Stored as the index into [`BOOK_CODES`], so the derived ordering is
/// canonical book order rather than alphabetical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookCode(u8);

impl BookCode {
    /// Look up a code case-insensitively. Returns `None` for anything not in the canonical list.
    #[must_use]
    pub fn lookup(code: &str) -> Option<Self> {
        let code = code.trim();
        BOOK_CODES
            .iter()
            .position(|c| c.eq_ignore_ascii_case(code))
            .and_then(|i| u8::try_from(i).ok())
            .map(Self)
    }

    /// Check whether the given text is a canonical book code
    #[must_use]
    pub fn is_valid(code: &str) -> bool {
        Self::lookup(code).is_some()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        BOOK_CODES[usize::from(self.0)]
    }

    /// Zero-based position in canonical order
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn is_old_testament(self) -> bool {
        self.index() < OLD_TESTAMENT_BOOKS
    }

    /// All books in canonical order
    pub fn all() -> impl Iterator<Item = BookCode> {
        (0..BOOK_CODES.len()).filter_map(|i| u8::try_from(i).ok().map(Self))
    }
}

impl std::fmt::Display for BookCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookCode {
    type Err = VerseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| VerseKeyError::UnknownBook(s.to_string()))
    }
}

impl TryFrom<String> for BookCode {
    type Error = VerseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BookCode> for String {
    fn from(code: BookCode) -> Self {
        code.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(BookCode::lookup("mat").map(BookCode::as_str), Some("MAT"));
        assert_eq!(BookCode::lookup(" JHN ").map(BookCode::as_str), Some("JHN"));
        assert!(BookCode::lookup("XYZ").is_none());
        assert!(BookCode::lookup("").is_none());
    }

    #[test]
    fn test_canonical_ordering() {
        let gen = BookCode::lookup("GEN").unwrap();
        let mal = BookCode::lookup("MAL").unwrap();
        let mat = BookCode::lookup("MAT").unwrap();
        let jhn = BookCode::lookup("JHN").unwrap();
        let gal = BookCode::lookup("GAL").unwrap();

        assert!(gen < mal);
        assert!(mal < mat);
        // Canonical, not alphabetical
        assert!(jhn < gal);
        assert!(mal.is_old_testament());
        assert!(!mat.is_old_testament());
    }

    #[test]
    fn test_all_books() {
        let all: Vec<_> = BookCode::all().collect();
        assert_eq!(all.len(), 66);
        assert_eq!(all[0].as_str(), "GEN");
        assert_eq!(all[65].as_str(), "REV");
    }

    #[test]
    fn test_serde_as_string() {
        let code = BookCode::lookup("OBA").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"OBA\"");

        let back: BookCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<BookCode>("\"ZZZ\"").is_err());
    }
}
