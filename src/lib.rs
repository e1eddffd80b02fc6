//! # usfm-nav
//!
//! Navigation helpers for Bible book texts in USFM (Unified Standard Format
//! Markers), as used behind a Bible editor's reference box, section view and
//! resource windows.
//!
//! ## Features
//!
//! - **Reference parsing**: resolves free-form text such as `3:16`, `Jn 3`,
//!   `Jude v4` or `MAT 3:3` against the current position
//! - **Section location**: finds the heading-delimited section around a verse,
//!   never looking more than one chapter either way
//! - **Verse cache**: splits a book's USFM text by chapter and verse, plus a
//!   bounded recent-verse cache for resource windows
//! - **Link tables**: cross references, synoptic parallels and typed related
//!   passages keyed by verse
//!
//! ## Example
//!
//! ```rust
//! use usfm_nav::{find_section, BookCatalog, ReferenceParser, ScannedVersification, VerseCache};
//!
//! let books = BookCatalog::load_embedded().unwrap();
//! let text = "\\id MRK\n\\c 1\n\\s1 John the Baptist\n\\v 1 a\n\\v 2 b\n\\s1 The Baptism\n\\v 3 c\n";
//!
//! let current = "MRK 1:3".parse().unwrap();
//! let key = ReferenceParser::new(&books).parse("v1", &current).verse_key().unwrap();
//!
//! let cache = VerseCache::from_text(key.book(), text);
//! let versification = ScannedVersification::from_cache(&cache);
//! let section = find_section(&key, &versification, |k| cache.verse_data(k));
//!
//! assert_eq!(section.start.to_string(), "MRK 1:0");
//! assert_eq!(section.end.to_string(), "MRK 1:2");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: book codes, verse keys and shared types
//! - [`catalog`]: the book catalog and reference link tables
//! - [`parsing`]: reference text and USFM line parsing
//! - [`navigation`]: verse cache, section locator and versification
//! - [`utils`]: validation and change logging
//! - [`cli`]: command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod navigation;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::books::{BookCatalog, CatalogError};
pub use catalog::links::{ReferenceLinks, RelatedPassage};
pub use core::book::BookCode;
pub use core::types::*;
pub use core::verse_key::{PassageRange, VerseKey, VerseKeyError};
pub use navigation::cache::{RecentVerseCache, VerseCache};
pub use navigation::section::find_section;
pub use navigation::versification::{ScannedVersification, Versification};
pub use parsing::reference::{ParsedReference, ReferenceParser};
