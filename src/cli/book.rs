use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::Args;

use crate::cli::{DataArgs, OutputFormat};
use crate::navigation::versification::{total_verses, ScannedVersification, Versification};
use crate::parsing::usfm::{book_from_id_line, empty_book_text, load_book_text, BookStats};
use crate::utils::changelog::append_change_log;

#[derive(Args)]
pub struct StatsArgs {
    /// USFM book file
    #[arg(required = true)]
    pub file: PathBuf,

    /// Append a change-log entry for this book to a log in this folder
    #[arg(long, value_name = "DIR")]
    pub log_folder: Option<PathBuf>,

    /// Project name used for the change-log file name
    #[arg(long, default_value = "Project")]
    pub project: String,

    /// User recorded in the change log
    #[arg(long, default_value = "unknown")]
    pub user: String,
}

#[derive(Args)]
pub struct EmptyArgs {
    /// Book to create (code or name)
    #[arg(required = true)]
    pub book: String,

    /// Existing USFM text of the same book to copy the chapter and verse layout from
    #[arg(long, value_name = "FILE")]
    pub like: Option<PathBuf>,

    /// Name written into the `\id` line
    #[arg(long, default_value = "usfm-nav")]
    pub creator: String,

    /// Write the book here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the books command
///
/// # Errors
///
/// Returns an error if the book catalog cannot be loaded.
pub fn run_books(data: &DataArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let books = data.book_catalog(verbose)?;

    match format {
        OutputFormat::Text => {
            println!("Book Catalog ({} books)\n", books.len());
            println!("{:<5} {:<5} {:<20} {:>8}  Abbreviations", "Code", "USFM", "Name", "Chapters");
            println!("{}", "-".repeat(60));
            for book in &books.books {
                println!(
                    "{:<5} {:<5} {:<20} {:>8}  {}",
                    book.code.as_str(),
                    book.usfm_id,
                    book.name,
                    book.chapters,
                    book.abbreviations.join(", ")
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&books.books)?);
        }
        OutputFormat::Tsv => {
            println!("code\tusfm_id\tname\tchapters\tabbreviations");
            for book in &books.books {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    book.code,
                    book.usfm_id,
                    book.name,
                    book.chapters,
                    book.abbreviations.join(",")
                );
            }
        }
    }

    Ok(())
}

/// Execute the stats command
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the change log cannot be
/// written.
pub fn run_stats(
    args: StatsArgs,
    data: &DataArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let books = data.book_catalog(verbose)?;
    let text = load_book_text(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let book = book_from_id_line(&text, &books)
        .with_context(|| format!("Cannot tell which book {} holds", args.file.display()))?;

    let stats = BookStats::from_text(&text);
    let versification = ScannedVersification::from_usfm(book, &text);
    let expected_chapters = books.num_chapters(book);

    if let Some(folder) = &args.log_folder {
        let path = append_change_log(folder, &args.project, &args.user, book, &text)?;
        if verbose {
            eprintln!("Appended change log entry to {}", path.display());
        }
    }

    match format {
        OutputFormat::Text => {
            println!("{book}: {}", books.book_name(book).unwrap_or("Unknown"));
            println!("   Characters: {}", stats.characters);
            println!("   Chapters:   {}", stats.chapters);
            println!("   Verses:     {}", stats.verses);
            if let Some(expected) = expected_chapters {
                let found = versification.num_chapters(book).unwrap_or(0);
                if found != expected {
                    println!("   Note: catalog lists {expected} chapters, text has {found}");
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "book": book,
                "stats": stats,
                "total_verses": total_verses(book, &versification),
                "catalog_chapters": expected_chapters,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("book\tcharacters\tchapters\tverses");
            println!(
                "{}\t{}\t{}\t{}",
                book, stats.characters, stats.chapters, stats.verses
            );
        }
    }

    Ok(())
}

/// Execute the empty command
///
/// # Errors
///
/// Returns an error if the book is unknown, the `--like` file is for another
/// book, or the output cannot be written.
pub fn run_empty(
    args: EmptyArgs,
    data: &DataArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let books = data.book_catalog(verbose)?;
    let book = books
        .resolve_name(&args.book)
        .ok_or_else(|| anyhow!("Unknown book '{}'", args.book))?;

    let text = match &args.like {
        Some(path) => {
            let like = load_book_text(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let like_book = book_from_id_line(&like, &books)?;
            if like_book != book {
                bail!("{} holds {like_book}, not {book}", path.display());
            }
            let versification = ScannedVersification::from_usfm(book, &like);
            empty_book_text(book, &books, &versification, &args.creator)
        }
        None => {
            if verbose {
                eprintln!("No --like file given, creating chapter markers only");
            }
            empty_book_text(book, &books, &books, &args.creator)
        }
    };

    if let Some(path) = &args.output {
        std::fs::write(path, &text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if verbose {
            eprintln!("Wrote empty {book} to {}", path.display());
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "book": book,
                "text": text,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => print!("{text}"),
    }

    Ok(())
}

