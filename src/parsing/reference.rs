use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

use crate::catalog::books::BookCatalog;
use crate::core::book::BookCode;
use crate::core::verse_key::VerseKey;

// Patterns without a book name. The most specific go first.
static CHAPTER_VERSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,3})[:. ]([0-9]{1,3})$").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{1,3})$").unwrap());
static VERSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[Vv:.]([0-9]{1,3})$").unwrap());

// Patterns led by a book code, matched against the uppercased input
static CODE_CHAPTER_VERSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z1-5][A-Z1-8]{2}) ?([0-9]{1,3})[:. ]([0-9]{1,3})$").unwrap()
});
static CODE_VERSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z1-5][A-Z1-8]{2}) ?[V:.]([0-9]{1,3})$").unwrap());
static CODE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z1-5][A-Z1-8]{2}) ?([0-9]{1,3})$").unwrap());

// Patterns led by a free-text book name ("Gn", "1 John", "Song of Songs")
static NAME_CHAPTER_VERSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([123]?[^0-9]+?) ?([0-9]{1,3})[:. ]([0-9]{1,3})$").unwrap()
});
static NAME_VERSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([123]?[^0-9]+?) ?[Vv:.]([0-9]{1,3})$").unwrap());
static NAME_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([123]?[^0-9]+?) ?([0-9]{1,3})$").unwrap());

/// The shape of reference text that was recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceForm {
    /// `3:16`, `3.16` or `3 16` in the current book
    CurrentBookChapterVerse,
    /// `3`: a verse in single-chapter books, otherwise a chapter
    CurrentBookNumber,
    /// `v16`, `:16` or `.16` in the current chapter
    CurrentChapterVerse,
    /// `MAT 3:3`
    CodeChapterVerse,
    /// `JDE v4`, keeping the current chapter
    CodeVerse,
    /// `JDE 4` or `MAT 3`
    CodeNumber,
    /// `Gn 15:2`
    NameChapterVerse,
    /// `Jude v4`
    NameVerse,
    /// `Obadiah 4` or `Jn 3`
    NameNumber,
    /// Anything else, taken as a book name on its own
    BookOnly,
}

impl ReferenceForm {
    /// Pattern forms in the order they are tried. [`ReferenceForm::BookOnly`]
    /// is the fallback once all of them fail.
    pub const CASCADE: [ReferenceForm; 9] = [
        Self::CurrentBookChapterVerse,
        Self::CurrentBookNumber,
        Self::CurrentChapterVerse,
        Self::CodeChapterVerse,
        Self::CodeVerse,
        Self::CodeNumber,
        Self::NameChapterVerse,
        Self::NameVerse,
        Self::NameNumber,
    ];

    fn pattern(self) -> Option<&'static Regex> {
        let re: &LazyLock<Regex> = match self {
            Self::CurrentBookChapterVerse => &CHAPTER_VERSE_RE,
            Self::CurrentBookNumber => &NUMBER_RE,
            Self::CurrentChapterVerse => &VERSE_RE,
            Self::CodeChapterVerse => &CODE_CHAPTER_VERSE_RE,
            Self::CodeVerse => &CODE_VERSE_RE,
            Self::CodeNumber => &CODE_NUMBER_RE,
            Self::NameChapterVerse => &NAME_CHAPTER_VERSE_RE,
            Self::NameVerse => &NAME_VERSE_RE,
            Self::NameNumber => &NAME_NUMBER_RE,
            Self::BookOnly => return None,
        };
        Some(LazyLock::force(re))
    }

    fn matches_uppercase(self) -> bool {
        matches!(
            self,
            Self::CodeChapterVerse | Self::CodeVerse | Self::CodeNumber
        )
    }
}

impl std::fmt::Display for ReferenceForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CurrentBookChapterVerse => "chapter:verse",
            Self::CurrentBookNumber => "number",
            Self::CurrentChapterVerse => "verse",
            Self::CodeChapterVerse => "code chapter:verse",
            Self::CodeVerse => "code verse",
            Self::CodeNumber => "code number",
            Self::NameChapterVerse => "name chapter:verse",
            Self::NameVerse => "name verse",
            Self::NameNumber => "name number",
            Self::BookOnly => "book",
        };
        write!(f, "{name}")
    }
}

/// A resolved (book, chapter, verse).
///
/// `book` is `None` when a book name could not be resolved. Chapter and verse
/// are not checked against the book's versification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedReference {
    pub book: Option<BookCode>,
    pub chapter: u32,
    pub verse: u32,
    pub form: ReferenceForm,
}

impl ParsedReference {
    #[must_use]
    pub fn verse_key(&self) -> Option<VerseKey> {
        self.book
            .map(|book| VerseKey::new(book, self.chapter, self.verse))
    }
}

/// Turns typed reference text into a verse position, using the current
/// position to fill in whatever the text leaves out.
pub struct ReferenceParser<'a> {
    books: &'a BookCatalog,
}

impl<'a> ReferenceParser<'a> {
    pub fn new(books: &'a BookCatalog) -> Self {
        Self { books }
    }

    /// Resolve `text` relative to `current`. Never fails: text matching no
    /// pattern is looked up as a book name.
    pub fn parse(&self, text: &str, current: &VerseKey) -> ParsedReference {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let uppercase = normalized.to_uppercase();

        let parsed = ReferenceForm::CASCADE
            .into_iter()
            .find_map(|form| {
                let input = if form.matches_uppercase() {
                    &uppercase
                } else {
                    &normalized
                };
                self.try_form(form, input, current)
            })
            .unwrap_or_else(|| self.book_only(&normalized, current));

        debug!(
            input = %text,
            form = %parsed.form,
            book = ?parsed.book.map(BookCode::as_str),
            chapter = parsed.chapter,
            verse = parsed.verse,
            "Resolved reference"
        );

        parsed
    }

    fn try_form(
        &self,
        form: ReferenceForm,
        input: &str,
        current: &VerseKey,
    ) -> Option<ParsedReference> {
        let caps = form.pattern()?.captures(input)?;
        let number = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
        let code = || BookCode::lookup(caps.get(1)?.as_str());
        let name = || self.books.resolve_name(caps.get(1).map_or("", |m| m.as_str()));

        let (book, chapter, verse) = match form {
            ReferenceForm::CurrentBookChapterVerse => {
                (Some(current.book()), number(1)?, number(2)?)
            }
            ReferenceForm::CurrentBookNumber => self.chapter_or_verse(current.book(), number(1)?),
            ReferenceForm::CurrentChapterVerse => {
                (Some(current.book()), current.chapter(), number(1)?)
            }
            ReferenceForm::CodeChapterVerse => (Some(code()?), number(2)?, number(3)?),
            ReferenceForm::CodeVerse => (Some(code()?), current.chapter(), number(2)?),
            ReferenceForm::CodeNumber => self.chapter_or_verse(code()?, number(2)?),
            ReferenceForm::NameChapterVerse => (name(), number(2)?, number(3)?),
            ReferenceForm::NameVerse => (name(), current.chapter(), number(2)?),
            ReferenceForm::NameNumber => match name() {
                Some(book) => self.chapter_or_verse(book, number(2)?),
                None => (None, number(2)?, 1),
            },
            ReferenceForm::BookOnly => return None,
        };

        Some(ParsedReference {
            book,
            chapter,
            verse,
            form,
        })
    }

    /// A bare number is a verse in single-chapter books, otherwise a chapter
    fn chapter_or_verse(&self, book: BookCode, number: u32) -> (Option<BookCode>, u32, u32) {
        if self.books.is_single_chapter(book) {
            (Some(book), 1, number)
        } else {
            (Some(book), number, 1)
        }
    }

    fn book_only(&self, text: &str, current: &VerseKey) -> ParsedReference {
        let book = self.books.resolve_name(text);
        let (chapter, verse) = if book == Some(current.book()) {
            (current.chapter(), current.verse())
        } else {
            (1, 1)
        };

        ParsedReference {
            book,
            chapter,
            verse,
            form: ReferenceForm::BookOnly,
        }
    }
}
