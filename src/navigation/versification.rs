use std::collections::BTreeMap;

use crate::catalog::books::BookCatalog;
use crate::core::book::BookCode;
use crate::navigation::cache::VerseCache;

/// Chapter and verse counts for books.
///
/// `None` means the count is unknown, not zero.
pub trait Versification {
    fn num_chapters(&self, book: BookCode) -> Option<u32>;

    fn num_verses(&self, book: BookCode, chapter: u32) -> Option<u32>;
}

/// The catalog carries chapter counts only
impl Versification for BookCatalog {
    fn num_chapters(&self, book: BookCode) -> Option<u32> {
        BookCatalog::num_chapters(self, book)
    }

    fn num_verses(&self, _book: BookCode, _chapter: u32) -> Option<u32> {
        None
    }
}

/// Adapter for a pair of plain accessor functions
pub struct VersificationFns<C, V> {
    chapters: C,
    verses: V,
}

impl<C, V> VersificationFns<C, V>
where
    C: Fn(BookCode) -> Option<u32>,
    V: Fn(BookCode, u32) -> Option<u32>,
{
    pub fn new(chapters: C, verses: V) -> Self {
        Self { chapters, verses }
    }
}

impl<C, V> Versification for VersificationFns<C, V>
where
    C: Fn(BookCode) -> Option<u32>,
    V: Fn(BookCode, u32) -> Option<u32>,
{
    fn num_chapters(&self, book: BookCode) -> Option<u32> {
        (self.chapters)(book)
    }

    fn num_verses(&self, book: BookCode, chapter: u32) -> Option<u32> {
        (self.verses)(book, chapter)
    }
}

/// Counts taken from the markers actually present in one book's text.
///
/// The chapter count is the highest `\c` number, each chapter's verse count
/// its highest `\v` number. Chapter 0 counts the introduction lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedVersification {
    book: BookCode,
    verse_counts: BTreeMap<u32, u32>,
}

impl ScannedVersification {
    #[must_use]
    pub fn from_usfm(book: BookCode, text: &str) -> Self {
        let mut cache = VerseCache::new(book);
        cache.rebuild(text);
        Self::from_cache(&cache)
    }

    #[must_use]
    pub fn from_cache(cache: &VerseCache) -> Self {
        let mut verse_counts: BTreeMap<u32, u32> = BTreeMap::new();
        for key in cache.keys() {
            let highest = verse_counts.entry(key.chapter()).or_default();
            *highest = (*highest).max(key.verse());
        }

        Self {
            book: cache.book(),
            verse_counts,
        }
    }

    #[must_use]
    pub fn book(&self) -> BookCode {
        self.book
    }
}

impl Versification for ScannedVersification {
    fn num_chapters(&self, book: BookCode) -> Option<u32> {
        if book != self.book {
            return None;
        }
        self.verse_counts.keys().next_back().copied()
    }

    fn num_verses(&self, book: BookCode, chapter: u32) -> Option<u32> {
        if book != self.book {
            return None;
        }
        self.verse_counts.get(&chapter).copied()
    }
}

/// Total verses in chapters 1..=N.
///
/// Falls back to 1 when any count is unknown or the total does not fit in a
/// `u32`, so callers computing progress ratios never divide by zero.
pub fn total_verses(book: BookCode, versification: &impl Versification) -> u32 {
    let Some(chapters) = versification.num_chapters(book) else {
        return 1;
    };

    (1..=chapters)
        .try_fold(0u32, |total, chapter| {
            total.checked_add(versification.num_verses(book, chapter)?)
        })
        .unwrap_or(1)
}
