use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::catalog::books::BookCatalog;
use crate::core::book::BookCode;
use crate::core::types::MarkerEntry;
use crate::navigation::versification::Versification;
use crate::utils::validation::{validate_book_text, ValidationError};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read book file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("No \\id line naming a known book")]
    MissingBookId,
}

/// Read a USFM book file, rejecting oversized or binary files
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or
/// `LoadError::Invalid` if the content is not usable book text.
pub fn load_book_text(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path)?;
    Ok(validate_book_text(&bytes)?.to_string())
}

/// Book named by the first `\id` line, resolved through the catalog so both
/// canonical codes and USFM ids (`1SA`, `EZK`) are accepted
///
/// # Errors
///
/// Returns `LoadError::MissingBookId` if there is no `\id` line or its
/// book cannot be resolved.
pub fn book_from_id_line(text: &str, catalog: &BookCatalog) -> Result<BookCode, LoadError> {
    text.lines()
        .map(parse_marker_line)
        .find(|entry| entry.marker.as_deref() == Some("id"))
        .and_then(|entry| {
            let id = entry.text.split_whitespace().next()?;
            catalog.resolve_name(id)
        })
        .ok_or(LoadError::MissingBookId)
}

/// Split one USFM line into marker and text.
///
/// The marker runs from after the backslash over alphanumerics (and `¬`, which
/// some exports use to flag closed markers). Lines without a leading
/// backslash are continuation text.
#[must_use]
pub fn parse_marker_line(line: &str) -> MarkerEntry {
    let Some(rest) = line.strip_prefix('\\') else {
        return MarkerEntry::new(None, line);
    };

    let marker_len: usize = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '¬')
        .map(char::len_utf8)
        .sum();
    let (marker, text) = rest.split_at(marker_len);

    MarkerEntry::new(Some(marker), text.trim_start())
}

/// Highest chapter or verse number taken from a marker. Typed references
/// allow three digits, so anything larger is a typo and stays plain content.
pub const MAX_MARKER_NUMBER: u32 = 999;

/// Chapter number from a `\c N` line (either case), `None` if absent
#[must_use]
pub fn chapter_marker(line: &str) -> Option<u32> {
    marker_number(line, 'c')
}

/// Verse number from a `\v N` line (either case), `None` if absent
#[must_use]
pub fn verse_marker(line: &str) -> Option<u32> {
    marker_number(line, 'v')
}

/// True for lines starting `\c ` or `\v ` (either case), with or without a
/// usable number
#[must_use]
pub fn is_chapter_or_verse_line(line: &str) -> bool {
    marker_tail(line, 'c').is_some() || marker_tail(line, 'v').is_some()
}

/// Text after `\x `, `None` if the line does not start with that marker
fn marker_tail(line: &str, marker: char) -> Option<&str> {
    let rest = line.strip_prefix('\\')?;
    let mut chars = rest.chars();
    let found = chars.next()?;
    if !found.eq_ignore_ascii_case(&marker) || chars.next()? != ' ' {
        return None;
    }
    Some(chars.as_str())
}

/// Reads the leading digits after `\x ` so `\v 12a` gives 12
fn marker_number(line: &str, marker: char) -> Option<u32> {
    let digits: String = marker_tail(line, marker)?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits
        .parse()
        .ok()
        .filter(|number| *number <= MAX_MARKER_NUMBER)
}

/// Text of an empty book: identification lines plus every chapter and verse
/// marker the versification knows about.
#[must_use]
pub fn empty_book_text(
    book: BookCode,
    catalog: &BookCatalog,
    versification: &impl Versification,
    creator: &str,
) -> String {
    let usfm_id = catalog
        .usfm_id(book)
        .unwrap_or_else(|| book.as_str())
        .to_uppercase();
    let name = catalog.book_name(book).unwrap_or("Bookname");

    let mut text = format!("\\id {usfm_id} Empty book created by {creator}\n");
    text.push_str("\\ide UTF-8\n");
    text.push_str(&format!("\\h {name}\n"));
    text.push_str(&format!("\\mt {name}\n"));

    for chapter in 1..=versification.num_chapters(book).unwrap_or(0) {
        text.push_str(&format!("\\c {chapter}\n"));
        for verse in 1..=versification.num_verses(book, chapter).unwrap_or(0) {
            text.push_str(&format!("\\v {verse} \n"));
        }
    }

    text
}

/// Size summary of a book text, as written to the change log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookStats {
    pub characters: usize,
    pub chapters: usize,
    pub verses: usize,
}

impl BookStats {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            chapters: text.matches("\\c ").count(),
            verses: text.matches("\\v ").count(),
        }
    }
}
