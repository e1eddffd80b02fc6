//! Core data types for verse navigation.
//!
//! - [`BookCode`](book::BookCode): a code from the fixed canonical book list
//! - [`VerseKey`](verse_key::VerseKey): an immutable (book, chapter, verse) identifier
//! - [`PassageRange`](verse_key::PassageRange): a verse or span of verses
//! - [`SectionBoundary`](types::SectionBoundary), [`VerseData`](types::VerseData):
//!   section locator inputs and outputs
//! - [`GroupCode`](types::GroupCode), [`LinkType`](types::LinkType): link table metadata
//!
//! ## Chapter and verse zero
//!
//! USFM books carry material before the first chapter (`\id`, `\h`, `\mt`, ...)
//! and before the first verse of a chapter. Those positions use chapter 0 or
//! verse 0:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `MAT 0:1` | first line of the book introduction |
//! | `MAT 3:0` | chapter 3 material before verse 1 |
//! | `MAT 3:1` | chapter 3 verse 1 |

pub mod book;
pub mod types;
pub mod verse_key;
