use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

use crate::core::book::BookCode;
use crate::core::types::VerseData;
use crate::core::verse_key::VerseKey;
use crate::parsing::usfm::{chapter_marker, is_chapter_or_verse_line, verse_marker};

/// Capacity of a resource window's recent-verse cache
pub const MAX_CACHED_VERSES: usize = 30;

/// Outcome of a cache rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RebuildSummary {
    /// Entries held after the rebuild
    pub entries: usize,

    /// Keys that appeared more than once; the later text was kept
    pub duplicates: Vec<VerseKey>,
}

/// Raw USFM text of one book, split by verse.
///
/// Lines before the first `\c` are keyed as chapter 0 with one pseudo-verse per
/// marker line. Lines after a `\c N` and before its first `\v` go to verse 0.
#[derive(Debug, Clone)]
pub struct VerseCache {
    book: BookCode,
    entries: HashMap<VerseKey, String>,
}

impl VerseCache {
    pub fn new(book: BookCode) -> Self {
        Self {
            book,
            entries: HashMap::new(),
        }
    }

    /// Cache built from a book text in one step
    pub fn from_text(book: BookCode, book_text: &str) -> Self {
        let mut cache = Self::new(book);
        cache.rebuild(book_text);
        cache
    }

    pub fn book(&self) -> BookCode {
        self.book
    }

    /// Drop every entry and re-split the given book text
    pub fn rebuild(&mut self, book_text: &str) -> RebuildSummary {
        self.entries.clear();

        let mut duplicates = Vec::new();
        let mut key = VerseKey::new(self.book, 0, 0);
        let mut current = String::new();

        for line in book_text.lines() {
            let next_key = if let Some(chapter) = chapter_marker(line) {
                Some(key.with_cv(chapter, 0))
            } else if let Some(verse) = verse_marker(line) {
                Some(key.with_cv(key.chapter(), verse))
            } else if key.chapter() == 0
                && line.starts_with('\\')
                && !is_chapter_or_verse_line(line)
            {
                Some(key.with_cv(0, key.verse() + 1))
            } else {
                None
            };

            if let Some(next_key) = next_key {
                self.insert_entry(key, std::mem::take(&mut current), &mut duplicates);
                key = next_key;
            }

            current.push_str(line);
            current.push('\n');
        }
        self.insert_entry(key, current, &mut duplicates);

        debug!(
            book = %self.book,
            entries = self.entries.len(),
            duplicates = duplicates.len(),
            "Rebuilt verse cache"
        );

        RebuildSummary {
            entries: self.entries.len(),
            duplicates,
        }
    }

    fn insert_entry(&mut self, key: VerseKey, text: String, duplicates: &mut Vec<VerseKey>) {
        if text.is_empty() {
            return;
        }
        if let Some(previous) = self.entries.insert(key, text) {
            warn!(
                %key,
                discarded = %previous.trim_end(),
                "Duplicate verse in book text, keeping the later one"
            );
            duplicates.push(key);
        }
    }

    /// Cached text for a verse, `None` if the book text has no such verse
    pub fn lookup(&self, key: &VerseKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Cached text wrapped for the section locator
    pub fn verse_data(&self, key: &VerseKey) -> Option<VerseData> {
        self.lookup(key).map(|text| VerseData::PlainText(text.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &VerseKey> {
        self.entries.keys()
    }

    /// Entries in verse order
    pub fn sorted_entries(&self) -> Vec<(VerseKey, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, text)| (*key, text.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(key, _)| *key);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bounded cache of verse data fetched for a resource window.
///
/// Hits move to the back; once full, the least recently used verse is dropped.
/// Misses are remembered too, since fetching them again gives the same answer.
#[derive(Debug, Clone)]
pub struct RecentVerseCache {
    capacity: usize,
    entries: HashMap<VerseKey, Option<VerseData>>,
    order: VecDeque<VerseKey>,
}

impl RecentVerseCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn get_or_fetch<F>(&mut self, key: &VerseKey, fetch: F) -> Option<&VerseData>
    where
        F: FnOnce(&VerseKey) -> Option<VerseData>,
    {
        if self.entries.contains_key(key) {
            if let Some(pos) = self.order.iter().position(|k| k == key) {
                self.order.remove(pos);
            }
            self.order.push_back(*key);
        } else {
            let data = fetch(key);
            self.entries.insert(*key, data);
            self.order.push_back(*key);

            if self.order.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
        }

        self.entries.get(key).and_then(Option::as_ref)
    }

    pub fn contains(&self, key: &VerseKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RecentVerseCache {
    fn default() -> Self {
        Self::new(MAX_CACHED_VERSES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATTHEW: &str = r"\id MAT
\h Matthew
\mt Matthew
\c 3
\s1 John the Baptist
\p
\v 1 In those days
\v 2 and saying,
continuation line
\c 4
\v 1 Then Jesus
";

    fn mat() -> BookCode {
        BookCode::lookup("MAT").unwrap()
    }

    fn key(chapter: u32, verse: u32) -> VerseKey {
        VerseKey::new(mat(), chapter, verse)
    }

    #[test]
    fn test_rebuild_and_lookup() {
        let mut cache = VerseCache::new(mat());
        let summary = cache.rebuild(MATTHEW);

        assert_eq!(summary.entries, 8);
        assert!(summary.duplicates.is_empty());

        assert_eq!(cache.lookup(&key(0, 1)), Some("\\id MAT\n"));
        assert_eq!(cache.lookup(&key(0, 2)), Some("\\h Matthew\n"));
        assert_eq!(cache.lookup(&key(0, 3)), Some("\\mt Matthew\n"));
        assert_eq!(
            cache.lookup(&key(3, 0)),
            Some("\\c 3\n\\s1 John the Baptist\n\\p\n")
        );
        assert_eq!(cache.lookup(&key(3, 1)), Some("\\v 1 In those days\n"));
        assert_eq!(
            cache.lookup(&key(3, 2)),
            Some("\\v 2 and saying,\ncontinuation line\n")
        );
        assert_eq!(cache.lookup(&key(4, 1)), Some("\\v 1 Then Jesus\n"));
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let cache = VerseCache::from_text(mat(), MATTHEW);
        assert_eq!(cache.lookup(&key(3, 3)), None);
        assert_eq!(cache.lookup(&key(28, 20)), None);
        assert!(cache.verse_data(&key(3, 3)).is_none());
    }

    #[test]
    fn test_entries_concatenate_to_source_lines() {
        let cache = VerseCache::from_text(mat(), MATTHEW);
        let rebuilt: String = cache
            .sorted_entries()
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        assert_eq!(rebuilt, MATTHEW);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut cache = VerseCache::new(mat());
        cache.rebuild(MATTHEW);
        let first: Vec<(VerseKey, String)> = cache
            .sorted_entries()
            .into_iter()
            .map(|(k, t)| (k, t.to_string()))
            .collect();

        cache.rebuild(MATTHEW);
        let second: Vec<(VerseKey, String)> = cache
            .sorted_entries()
            .into_iter()
            .map(|(k, t)| (k, t.to_string()))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_rebuild_clears_previous_entries() {
        let mut cache = VerseCache::from_text(mat(), MATTHEW);
        cache.rebuild("\\c 1\n\\v 1 The book of the genealogy\n");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup(&key(3, 1)), None);
        assert!(cache.lookup(&key(1, 1)).is_some());
    }

    #[test]
    fn test_duplicate_keeps_later_text() {
        let text = "\\c 1\n\\v 1 first\n\\v 1 second\n";
        let mut cache = VerseCache::new(mat());
        let summary = cache.rebuild(text);

        assert_eq!(summary.duplicates, vec![key(1, 1)]);
        assert_eq!(cache.lookup(&key(1, 1)), Some("\\v 1 second\n"));
    }

    #[test]
    fn test_marker_without_number_is_content() {
        let cache = VerseCache::from_text(mat(), "\\c 1\n\\v 1 a\n\\v b\n");
        assert_eq!(cache.lookup(&key(1, 1)), Some("\\v 1 a\n\\v b\n"));
    }

    #[test]
    fn test_numberless_marker_in_introduction_is_content() {
        let cache = VerseCache::from_text(mat(), "\\id MAT\n\\c \n\\v x\n\\h Matthew\n\\c 1\n");
        assert_eq!(cache.lookup(&key(0, 1)), Some("\\id MAT\n\\c \n\\v x\n"));
        assert_eq!(cache.lookup(&key(0, 2)), Some("\\h Matthew\n"));
        assert_eq!(cache.lookup(&key(0, 3)), None);
    }

    #[test]
    fn test_oversized_verse_number_is_content() {
        let cache = VerseCache::from_text(mat(), "\\c 1\n\\v 1 a\n\\v 50000000 typo\n");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup(&key(1, 1)), Some("\\v 1 a\n\\v 50000000 typo\n"));
    }

    #[test]
    fn test_empty_text() {
        let mut cache = VerseCache::new(mat());
        let summary = cache.rebuild("");
        assert_eq!(summary, RebuildSummary::default());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_recent_cache_fetches_once() {
        let mut cache = RecentVerseCache::new(2);
        let mut fetches = 0;

        for _ in 0..3 {
            let data = cache.get_or_fetch(&key(1, 1), |_| {
                fetches += 1;
                Some(VerseData::PlainText("a".to_string()))
            });
            assert!(data.is_some());
        }
        assert_eq!(fetches, 1);
    }

    #[test]
    fn test_recent_cache_evicts_least_recent() {
        let mut cache = RecentVerseCache::new(2);
        let fetch = |k: &VerseKey| Some(VerseData::PlainText(k.to_string()));

        cache.get_or_fetch(&key(1, 1), fetch);
        cache.get_or_fetch(&key(1, 2), fetch);
        // Touch 1:1 so 1:2 becomes the oldest
        cache.get_or_fetch(&key(1, 1), fetch);
        cache.get_or_fetch(&key(1, 3), fetch);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&key(1, 1)));
        assert!(!cache.contains(&key(1, 2)));
        assert!(cache.contains(&key(1, 3)));
    }

    #[test]
    fn test_recent_cache_remembers_misses() {
        let mut cache = RecentVerseCache::default();
        assert!(cache.get_or_fetch(&key(9, 9), |_| None).is_none());
        assert!(cache.contains(&key(9, 9)));
        assert!(cache
            .get_or_fetch(&key(9, 9), |_| panic!("should not refetch"))
            .is_none());

        cache.clear();
        assert!(cache.is_empty());
    }
}
