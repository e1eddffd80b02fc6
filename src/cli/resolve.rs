use anyhow::anyhow;
use clap::Args;

use crate::catalog::books::BookCatalog;
use crate::cli::{DataArgs, OutputFormat};
use crate::core::verse_key::VerseKey;
use crate::parsing::reference::{ParsedReference, ReferenceParser};

#[derive(Args)]
pub struct ResolveArgs {
    /// Reference text as typed, e.g. "3:16", "Jn 3" or "Jude v4"
    #[arg(required = true)]
    pub text: String,

    /// Book currently shown (code or name)
    #[arg(long, default_value = "GEN")]
    pub book: String,

    /// Chapter currently shown
    #[arg(long, default_value_t = 1)]
    pub chapter: u32,

    /// Verse currently shown
    #[arg(long, default_value_t = 1)]
    pub verse: u32,
}

/// Execute the resolve command
///
/// # Errors
///
/// Returns an error if the current book or the typed text names no known book.
pub fn run(
    args: ResolveArgs,
    data: &DataArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let books = data.book_catalog(verbose)?;
    let current = current_position(&books, &args.book, args.chapter, args.verse)?;

    if verbose {
        eprintln!("Resolving '{}' from {current}", args.text);
    }

    let parsed = ReferenceParser::new(&books).parse(&args.text, &current);
    let key = parsed
        .verse_key()
        .ok_or_else(|| anyhow!("No book found for '{}'", args.text))?;

    match format {
        OutputFormat::Text => print_text(&books, &parsed, &key),
        OutputFormat::Json => print_json(&args.text, &parsed, &key)?,
        OutputFormat::Tsv => print_tsv(&args.text, &parsed),
    }

    Ok(())
}

/// Position used to fill in whatever reference text leaves out
///
/// # Errors
///
/// Returns an error if `book` is not a known book code or name.
pub fn current_position(
    books: &BookCatalog,
    book: &str,
    chapter: u32,
    verse: u32,
) -> anyhow::Result<VerseKey> {
    let book = books
        .resolve_name(book)
        .ok_or_else(|| anyhow!("Unknown book '{book}'"))?;
    Ok(VerseKey::new(book, chapter, verse))
}

fn print_text(books: &BookCatalog, parsed: &ParsedReference, key: &VerseKey) {
    let name = books.book_name(key.book()).unwrap_or_else(|| key.book().as_str());
    println!("{key}");
    println!("   Book: {name}");
    println!("   Matched as: {}", parsed.form);
}

fn print_json(text: &str, parsed: &ParsedReference, key: &VerseKey) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input": text,
        "reference": key,
        "book": parsed.book,
        "chapter": parsed.chapter,
        "verse": parsed.verse,
        "form": parsed.form,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(text: &str, parsed: &ParsedReference) {
    println!("input\tbook\tchapter\tverse\tform");
    println!(
        "{}\t{}\t{}\t{}\t{}",
        text,
        parsed.book.map_or("", |b| b.as_str()),
        parsed.chapter,
        parsed.verse,
        parsed.form
    );
}
