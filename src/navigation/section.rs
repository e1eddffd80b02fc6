use crate::core::types::{SectionBoundary, VerseData};
use crate::core::verse_key::VerseKey;
use crate::navigation::versification::Versification;

/// Find the heading-delimited section around `current`.
///
/// The start is the nearest verse at or before `current` whose data holds a
/// section heading, looking back no further than the start of the previous
/// chapter. The end is the next such verse after `current`, looking no further
/// than the end of the following chapter. When no heading is found the
/// boundary falls back to the edge of that window, so at most two chapters'
/// worth of verses are ever fetched in each direction.
///
/// Unknown verse counts are treated as zero.
pub fn find_section<V, F>(current: &VerseKey, versification: &V, mut verse_data: F) -> SectionBoundary
where
    V: Versification + ?Sized,
    F: FnMut(&VerseKey) -> Option<VerseData>,
{
    let (book, chapter, verse) = current.bcv();
    let verse_count = |c: u32| versification.num_verses(book, c);
    let mut has_heading = |key: &VerseKey| {
        verse_data(key).is_some_and(|data| data.has_section_heading())
    };

    // Backwards from the current verse into the previous chapter
    let first_chapter = chapter.saturating_sub(1);
    let mut start = None;
    'backward: for c in (first_chapter..=chapter).rev() {
        let from = if c == chapter {
            verse_count(c).map_or(verse, |n| verse.min(n))
        } else {
            verse_count(c).unwrap_or(0)
        };
        for v in (0..=from).rev() {
            let key = current.with_cv(c, v);
            if has_heading(&key) {
                start = Some(key);
                break 'backward;
            }
        }
    }
    let start = start.unwrap_or_else(|| current.with_cv(first_chapter, 0));

    // Forwards from the next verse into the following chapter
    let num_chapters = versification.num_chapters(book).unwrap_or(0);
    let last_chapter = chapter.max(chapter.saturating_add(1).min(num_chapters));
    let mut end = None;
    'forward: for c in chapter..=last_chapter {
        let from = if c == chapter { verse.saturating_add(1) } else { 0 };
        for v in from..=verse_count(c).unwrap_or(0) {
            let key = current.with_cv(c, v);
            if has_heading(&key) {
                end = Some(key);
                break 'forward;
            }
        }
    }
    let end = end.unwrap_or_else(|| {
        let window_end = current.with_cv(last_chapter, verse_count(last_chapter).unwrap_or(0));
        window_end.max(*current)
    });

    SectionBoundary::new(start, end)
}
