//! Static reference data: the book catalog and the reference link tables.
//!
//! Both are compiled into the binary as JSON (validated by `build.rs`) and can
//! be replaced with custom files at runtime.
//!
//! ## Example
//!
//! ```rust,no_run
//! use usfm_nav::{BookCatalog, ReferenceLinks, VerseKey};
//!
//! let books = BookCatalog::load_embedded().unwrap();
//! assert_eq!(books.resolve_name("Gn").map(|b| b.as_str()), Some("GEN"));
//!
//! let links = ReferenceLinks::load_embedded().unwrap();
//! let key: VerseKey = "MAT 2:18".parse().unwrap();
//! if let Some(related) = links.related_verse(&key) {
//!     println!("{key} quotes {related}");
//! }
//! ```

pub mod books;
pub mod links;
