use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::Args;

use crate::catalog::books::BookCatalog;
use crate::cli::{DataArgs, OutputFormat};
use crate::core::book::BookCode;
use crate::core::types::{SectionBoundary, VerseData};
use crate::core::verse_key::VerseKey;
use crate::navigation::cache::{RecentVerseCache, VerseCache};
use crate::navigation::section::find_section;
use crate::navigation::versification::ScannedVersification;
use crate::parsing::reference::ReferenceParser;
use crate::parsing::usfm::{book_from_id_line, load_book_text};

#[derive(Args)]
pub struct SectionArgs {
    /// USFM book file
    #[arg(required = true)]
    pub file: PathBuf,

    /// Verse inside the section, e.g. "3:13" or "MAT 3:13"
    #[arg(required = true)]
    pub reference: String,

    /// Also print the USFM text of the section
    #[arg(long)]
    pub show_text: bool,
}

#[derive(Args)]
pub struct VerseArgs {
    /// USFM book file
    #[arg(required = true)]
    pub file: PathBuf,

    /// Verse to print, e.g. "3:13" or "MAT 3:13"; chapter or verse 0 for introductions
    #[arg(required = true)]
    pub reference: String,

    /// Print the verse split into markers
    #[arg(long)]
    pub structured: bool,
}

/// A book file loaded into a verse cache
struct LoadedBook {
    book: BookCode,
    cache: VerseCache,
}

impl LoadedBook {
    fn load(path: &Path, books: &BookCatalog, verbose: bool) -> anyhow::Result<Self> {
        let text =
            load_book_text(path).with_context(|| format!("Failed to load {}", path.display()))?;
        let book = book_from_id_line(&text, books)
            .with_context(|| format!("Cannot tell which book {} holds", path.display()))?;

        let mut cache = VerseCache::new(book);
        let summary = cache.rebuild(&text);

        if verbose {
            eprintln!(
                "Loaded {} from {} ({} cached entries)",
                book,
                path.display(),
                summary.entries
            );
        }
        for key in &summary.duplicates {
            eprintln!("Warning: {key} appears more than once, using the later text");
        }

        Ok(Self { book, cache })
    }

    /// Resolve reference text relative to the start of this book
    fn resolve(&self, books: &BookCatalog, reference: &str) -> anyhow::Result<VerseKey> {
        let start = VerseKey::new(self.book, 1, 1);
        let key = ReferenceParser::new(books)
            .parse(reference, &start)
            .verse_key()
            .ok_or_else(|| anyhow!("No book found for '{reference}'"))?;

        if key.book() != self.book {
            bail!("{key} is not in this file, which holds {}", self.book);
        }

        Ok(key)
    }
}

/// Execute the section command
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the reference is for
/// another book.
pub fn run(
    args: SectionArgs,
    data: &DataArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let books = data.book_catalog(verbose)?;
    let loaded = LoadedBook::load(&args.file, &books, verbose)?;
    let key = loaded.resolve(&books, &args.reference)?;

    let versification = ScannedVersification::from_cache(&loaded.cache);
    let mut recent = RecentVerseCache::default();
    let mut fetched = 0;
    let section = find_section(&key, &versification, |k| {
        recent
            .get_or_fetch(k, |k| {
                fetched += 1;
                loaded.cache.verse_data(k)
            })
            .cloned()
    });

    if verbose {
        eprintln!("Checked {fetched} verses for headings");
    }

    let text: Vec<(VerseKey, &str)> = loaded
        .cache
        .sorted_entries()
        .into_iter()
        .filter(|(k, _)| section.contains(k))
        .collect();

    let shown = args.show_text.then_some(text.as_slice());
    match format {
        OutputFormat::Text => print_text_section(&key, &section, shown),
        OutputFormat::Json => print_json_section(&key, &section, shown)?,
        OutputFormat::Tsv => {
            println!("verse\tstart\tend");
            println!("{}\t{}\t{}", key, section.start, section.end);
        }
    }

    Ok(())
}

/// Execute the verse command
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or holds no such verse.
pub fn run_verse(
    args: VerseArgs,
    data: &DataArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let books = data.book_catalog(verbose)?;
    let loaded = LoadedBook::load(&args.file, &books, verbose)?;
    let key = loaded.resolve(&books, &args.reference)?;

    let text = loaded
        .cache
        .lookup(&key)
        .ok_or_else(|| anyhow!("{key} not found in {}", args.file.display()))?;

    let data = if args.structured {
        VerseData::structured_from_text(text)
    } else {
        VerseData::PlainText(text.to_string())
    };

    match format {
        OutputFormat::Text => match &data {
            VerseData::PlainText(text) => print!("{text}"),
            VerseData::Structured(entries) => {
                for entry in entries {
                    println!("{:<6} {}", entry.marker.as_deref().unwrap_or("-"), entry.text);
                }
            }
        },
        OutputFormat::Json => {
            let output = serde_json::json!({
                "reference": key,
                "has_section_heading": data.has_section_heading(),
                "verse": data,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("marker\ttext");
            if let VerseData::Structured(entries) = &data {
                for entry in entries {
                    println!("{}\t{}", entry.marker.as_deref().unwrap_or(""), entry.text);
                }
            } else {
                for line in text.lines() {
                    println!("\t{line}");
                }
            }
        }
    }

    Ok(())
}

fn print_text_section(
    key: &VerseKey,
    section: &SectionBoundary,
    text: Option<&[(VerseKey, &str)]>,
) {
    println!("Section containing {key}");
    println!("   Start: {}", section.start);
    println!("   End:   {} (next section)", section.end);

    if let Some(entries) = text {
        println!("\n{}", "─".repeat(60));
        for (_, verse_text) in entries {
            print!("{verse_text}");
        }
    }
}

fn print_json_section(
    key: &VerseKey,
    section: &SectionBoundary,
    text: Option<&[(VerseKey, &str)]>,
) -> anyhow::Result<()> {
    let mut output = serde_json::json!({
        "reference": key,
        "start": section.start,
        "end": section.end,
    });

    if let Some(entries) = text {
        output["text"] = entries
            .iter()
            .map(|(_, verse_text)| *verse_text)
            .collect::<String>()
            .into();
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
