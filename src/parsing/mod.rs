//! Parsers for typed references and USFM book text.
//!
//! - [`reference`]: turns what a user types into a reference box (`3:16`,
//!   `Jn 3`, `Jude v4`, `MAT 3:3`) into a book, chapter and verse
//! - [`usfm`]: line-level USFM helpers (markers, `\c`/`\v` numbers, empty
//!   book skeletons, size statistics, loading book files)
//!
//! ## Example
//!
//! ```rust
//! use usfm_nav::{BookCatalog, ReferenceParser, VerseKey};
//!
//! let books = BookCatalog::load_embedded().unwrap();
//! let parser = ReferenceParser::new(&books);
//!
//! let current: VerseKey = "JHN 1:1".parse().unwrap();
//! let parsed = parser.parse("3:16", &current);
//! assert_eq!(parsed.verse_key(), Some("JHN 3:16".parse().unwrap()));
//!
//! let parsed = parser.parse("Obadiah 4", &current);
//! assert_eq!(parsed.verse_key(), Some("OBA 1:4".parse().unwrap()));
//! ```
//!
//! ## Reference forms
//!
//! Forms are tried in a fixed order and the first match wins:
//!
//! | Input | Result (current `JHN 1:1`) |
//! |-------|----------------------------|
//! | `3:16` | `JHN 3:16` |
//! | `3` | `JHN 3:1` (a verse in single-chapter books) |
//! | `v16` | `JHN 1:16` |
//! | `MAT 3:3` | `MAT 3:3` |
//! | `JDE v4` | `JDE 1:4` |
//! | `Gn 15:2` | `GEN 15:2` |
//! | `Jude` | `JDE 1:1` |

pub mod reference;
pub mod usfm;
