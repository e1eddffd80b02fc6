//! Navigation helpers built on cached book text.
//!
//! - [`cache`]: per-book verse cache and the bounded recent-verse cache
//! - [`section`]: heading-delimited section lookup around a verse
//! - [`versification`]: chapter/verse count accessors
//!
//! ## Example
//!
//! ```rust
//! use usfm_nav::core::book::BookCode;
//! use usfm_nav::navigation::{cache::VerseCache, section::find_section};
//! use usfm_nav::navigation::versification::ScannedVersification;
//! use usfm_nav::VerseKey;
//!
//! let book = BookCode::lookup("MRK").unwrap();
//! let text = "\\c 1\n\\s1 Heading\n\\v 1 a\n\\v 2 b\n";
//! let cache = VerseCache::from_text(book, text);
//! let versification = ScannedVersification::from_cache(&cache);
//!
//! let current = VerseKey::new(book, 1, 2);
//! let section = find_section(&current, &versification, |k| cache.verse_data(k));
//! assert_eq!(section.start, VerseKey::new(book, 1, 0));
//! ```

pub mod cache;
pub mod section;
pub mod versification;
