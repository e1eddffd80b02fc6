use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::book::BookCode;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog entry: {0}")]
    InvalidEntry(String),
}

/// Book catalog version for compatibility checking
pub const BOOK_CATALOG_VERSION: &str = "1.0.0";

/// Shortest partial name accepted when resolving by prefix
const MIN_PREFIX_LEN: usize = 3;

/// Catalog entry for one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    pub code: BookCode,

    /// Identifier used on the USFM `\id` line (e.g. `1SA` for `SA1`)
    pub usfm_id: String,

    /// English display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abbreviations: Vec<String>,

    /// Number of chapters in the reference versification
    pub chapters: u32,
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCatalogData {
    pub version: String,
    pub books: Vec<BookInfo>,
}

/// Book names, abbreviations and chapter counts, indexed for name resolution
#[derive(Debug)]
pub struct BookCatalog {
    /// All books in catalog order
    pub books: Vec<BookInfo>,

    /// Index: code -> index in books vec
    code_to_index: HashMap<BookCode, usize>,

    /// Index: normalized code, USFM id, name or abbreviation -> code
    name_to_code: HashMap<String, BookCode>,
}

impl BookCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            code_to_index: HashMap::new(),
            name_to_code: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time via build.rs
        const EMBEDDED_BOOKS: &str = include_str!("../../data/books.json");
        Self::from_json(EMBEDDED_BOOKS)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: BookCatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != BOOK_CATALOG_VERSION {
            warn!(
                expected = BOOK_CATALOG_VERSION,
                found = %data.version,
                "Book catalog version mismatch"
            );
        }

        let mut catalog = Self::new();
        for book in data.books {
            catalog.add_book(book)?;
        }

        Ok(catalog)
    }

    /// Add a book to the catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidEntry` if the book is already present
    /// or claims zero chapters.
    pub fn add_book(&mut self, book: BookInfo) -> Result<(), CatalogError> {
        if self.code_to_index.contains_key(&book.code) {
            return Err(CatalogError::InvalidEntry(format!(
                "duplicate book {}",
                book.code
            )));
        }
        if book.chapters == 0 {
            return Err(CatalogError::InvalidEntry(format!(
                "book {} has no chapters",
                book.code
            )));
        }

        let index = self.books.len();
        self.code_to_index.insert(book.code, index);

        let names = std::iter::once(book.code.as_str())
            .chain(std::iter::once(book.usfm_id.as_str()))
            .chain(std::iter::once(book.name.as_str()))
            .chain(book.abbreviations.iter().map(String::as_str));

        for name in names {
            let key = normalize_name(name);
            match self.name_to_code.get(&key) {
                Some(existing) if *existing != book.code => {
                    warn!(
                        name,
                        book = %book.code,
                        existing = %existing,
                        "Book name already claimed, ignoring"
                    );
                }
                Some(_) => {}
                None => {
                    self.name_to_code.insert(key, book.code);
                }
            }
        }

        self.books.push(book);
        Ok(())
    }

    /// Get a book by code
    pub fn get(&self, code: BookCode) -> Option<&BookInfo> {
        self.code_to_index.get(&code).map(|&idx| &self.books[idx])
    }

    pub fn num_chapters(&self, code: BookCode) -> Option<u32> {
        self.get(code).map(|b| b.chapters)
    }

    /// Books such as Obadiah or Jude, where a bare number means a verse
    pub fn is_single_chapter(&self, code: BookCode) -> bool {
        self.num_chapters(code) == Some(1)
    }

    pub fn usfm_id(&self, code: BookCode) -> Option<&str> {
        self.get(code).map(|b| b.usfm_id.as_str())
    }

    pub fn book_name(&self, code: BookCode) -> Option<&str> {
        self.get(code).map(|b| b.name.as_str())
    }

    /// Resolve a user-entered book name ("Gn", "1 John", "matt.") to a code.
    ///
    /// Exact matches on codes, USFM ids, names and abbreviations win. Otherwise
    /// the text may be an unambiguous prefix of a full name. Returns `None`
    /// when nothing (or more than one book) matches.
    pub fn resolve_name(&self, text: &str) -> Option<BookCode> {
        let key = normalize_name(text);
        if key.is_empty() {
            return None;
        }

        if let Some(code) = self.name_to_code.get(&key) {
            return Some(*code);
        }

        if key.chars().count() < MIN_PREFIX_LEN {
            return None;
        }

        let mut candidates = self
            .books
            .iter()
            .filter(|b| normalize_name(&b.name).starts_with(&key))
            .map(|b| b.code);

        match (candidates.next(), candidates.next()) {
            (Some(code), None) => Some(code),
            _ => None,
        }
    }

    /// Number of books in catalog
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Default for BookCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase and drop spaces and periods so "1 Jn." matches "1JN"
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_uppercase)
        .collect()
}
