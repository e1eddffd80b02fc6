//! Library-level navigation behaviour across parser, cache, section locator
//! and link tables.

use usfm_nav::navigation::versification::VersificationFns;
use usfm_nav::{
    find_section, BookCatalog, BookCode, GroupCode, RecentVerseCache, ReferenceLinks,
    ReferenceParser, ScannedVersification, VerseCache, VerseData, VerseKey,
};

const MATTHEW: &str = r"\id MAT
\h Matthew
\mt Matthew
\c 2
\s1 The Flight to Egypt
\p
\v 13 Now when they had departed
\v 14 And he rose
\v 15 And was there
\s1 Herod Kills the Children
\p
\v 16 Then Herod
\v 17 Then was fulfilled
\v 18 A voice was heard in Ramah
\s1 The Return to Nazareth
\p
\v 19 But when Herod died
\c 3
\s1 John the Baptist Prepares the Way
\p
\v 1 In those days
\v 2 and saying
\v 3 For this is he
";

fn key(s: &str) -> VerseKey {
    s.parse().unwrap()
}

fn mat() -> BookCode {
    BookCode::lookup("MAT").unwrap()
}

#[test]
fn test_typed_references_resolve_against_current_position() {
    let books = BookCatalog::load_embedded().unwrap();
    let parser = ReferenceParser::new(&books);

    let cases = [
        ("3:16", "JHN 1:1", "JHN 3:16"),
        ("4", "OBA 1:1", "OBA 1:4"),
        ("MAT 3:3", "GEN 1:1", "MAT 3:3"),
        ("MAT 3:3", "REV 22:21", "MAT 3:3"),
        ("v7", "ROM 8:1", "ROM 8:7"),
        ("1 John 4:8", "GEN 1:1", "JN1 4:8"),
    ];

    for (text, current, expected) in cases {
        let parsed = parser.parse(text, &key(current));
        assert_eq!(parsed.verse_key(), Some(key(expected)), "parsing {text:?}");
    }
}

#[test]
fn test_rebuild_then_lookup_gives_lines_between_markers() {
    let cache = VerseCache::from_text(mat(), MATTHEW);

    assert_eq!(
        cache.lookup(&key("MAT 2:15")),
        Some("\\v 15 And was there\n\\s1 Herod Kills the Children\n\\p\n")
    );
    assert_eq!(
        cache.lookup(&key("MAT 2:0")),
        Some("\\c 2\n\\s1 The Flight to Egypt\n\\p\n")
    );
    assert_eq!(cache.lookup(&key("MAT 0:2")), Some("\\h Matthew\n"));
    assert_eq!(cache.lookup(&key("MAT 2:20")), None);

    // Concatenating every entry in order gives back the book text
    let rebuilt: String = cache.sorted_entries().into_iter().map(|(_, t)| t).collect();
    assert_eq!(rebuilt, MATTHEW);
}

#[test]
fn test_rebuild_is_idempotent() {
    let mut cache = VerseCache::new(mat());
    let first = cache.rebuild(MATTHEW);
    let entries: Vec<(VerseKey, String)> = cache
        .sorted_entries()
        .into_iter()
        .map(|(k, t)| (k, t.to_string()))
        .collect();

    let second = cache.rebuild(MATTHEW);
    assert_eq!(first, second);

    let again: Vec<(VerseKey, String)> = cache
        .sorted_entries()
        .into_iter()
        .map(|(k, t)| (k, t.to_string()))
        .collect();
    assert_eq!(entries, again);
}

#[test]
fn test_section_from_cached_book() {
    let cache = VerseCache::from_text(mat(), MATTHEW);
    let versification = ScannedVersification::from_cache(&cache);

    let section = find_section(&key("MAT 2:17"), &versification, |k| cache.verse_data(k));
    assert_eq!(section.start, key("MAT 2:15"));
    assert_eq!(section.end, key("MAT 2:18"));
    assert!(section.contains(&key("MAT 2:17")));
}

#[test]
fn test_section_never_leaves_neighbouring_chapters() {
    let book = BookCode::lookup("PSA").unwrap();
    let versification = VersificationFns::new(|_| Some(150), |_, _| Some(20));

    for chapter in [1, 2, 75, 149, 150] {
        for verse in [0, 1, 10, 20] {
            let current = VerseKey::new(book, chapter, verse);
            let mut fetched = Vec::new();
            let section = find_section(&current, &versification, |k| {
                fetched.push(*k);
                None
            });

            assert!(fetched
                .iter()
                .all(|k| k.chapter() + 1 >= chapter && k.chapter() <= chapter + 1));
            assert!(section.start.chapter() + 1 >= chapter);
            assert!(section.end.chapter() <= chapter + 1);
            assert!(section.start <= current && current <= section.end);
        }
    }
}

#[test]
fn test_recent_cache_feeds_section_locator() {
    let cache = VerseCache::from_text(mat(), MATTHEW);
    let versification = ScannedVersification::from_cache(&cache);
    let mut recent = RecentVerseCache::default();
    let mut fetches = 0;
    let mut fetches_after_pass = Vec::new();

    for _ in 0..2 {
        let section = find_section(&key("MAT 3:2"), &versification, |k| {
            recent
                .get_or_fetch(k, |k| {
                    fetches += 1;
                    cache.verse_data(k).map(|d| match d {
                        VerseData::PlainText(text) => VerseData::structured_from_text(&text),
                        structured => structured,
                    })
                })
                .cloned()
        });
        assert_eq!(section.start, key("MAT 3:0"));
        assert_eq!(section.end, key("MAT 3:3"));
        fetches_after_pass.push(fetches);
    }

    // 3:2, 3:1 and 3:0 going back, 3:3 going forward; the second pass is all hits
    assert_eq!(fetches_after_pass, vec![4, 4]);
    assert_eq!(recent.len(), 4);
}

#[test]
fn test_link_tables() {
    let links = ReferenceLinks::load_embedded().unwrap();

    assert_eq!(links.related_verse(&key("MAT 2:18")), Some(key("JER 31:15")));
    assert_eq!(links.related_verse(&key("MAT 2:19")), None);

    assert_eq!(
        links.parallel_verse(GroupCode::B, &key("MAT 3:13")),
        Some(key("MRK 1:9"))
    );
    assert_eq!(
        links.parallel_verse(GroupCode::D, &key("MAT 3:13")),
        Some(key("JHN 1:31"))
    );
    assert_eq!(links.parallel_verse(GroupCode::A, &key("MAT 3:13")), None);

    assert!(!links.related_passages(&key("LUK 4:18")).is_empty());
    assert!(links.related_passages(&key("GEN 1:1")).is_empty());
}
