use anyhow::anyhow;
use clap::Args;

use crate::catalog::links::{ReferenceLinks, RelatedPassage};
use crate::cli::{DataArgs, OutputFormat};
use crate::core::types::GroupCode;
use crate::core::verse_key::VerseKey;
use crate::parsing::reference::ReferenceParser;

#[derive(Args)]
pub struct LinksArgs {
    /// Verse to look up, e.g. "MAT 2:18" or "Mt 3:13"
    #[arg(required = true)]
    pub reference: String,

    /// Only show the parallel for this window group
    #[arg(long, value_enum, ignore_case = true)]
    pub group: Option<GroupCode>,
}

/// Everything the link tables know about one verse
struct VerseLinks<'a> {
    related: Option<VerseKey>,
    parallels: Vec<(GroupCode, VerseKey)>,
    passages: &'a [RelatedPassage],
}

impl<'a> VerseLinks<'a> {
    fn lookup(links: &'a ReferenceLinks, key: &VerseKey, group: Option<GroupCode>) -> Self {
        let groups = group.map_or_else(|| GroupCode::ALL.to_vec(), |g| vec![g]);
        Self {
            related: links.related_verse(key),
            parallels: groups
                .into_iter()
                .filter_map(|g| links.parallel_verse(g, key).map(|k| (g, k)))
                .collect(),
            passages: links.related_passages(key),
        }
    }

    fn is_empty(&self) -> bool {
        self.related.is_none() && self.parallels.is_empty() && self.passages.is_empty()
    }
}

/// Execute the links command
///
/// # Errors
///
/// Returns an error if the reference names no known book or a data file
/// cannot be loaded.
pub fn run(
    args: LinksArgs,
    data: &DataArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let books = data.book_catalog(verbose)?;
    let links = data.reference_links(verbose)?;

    // Bare chapter:verse text has no book to fall back on beyond Genesis
    let start: VerseKey = "GEN 1:1".parse()?;
    let key = ReferenceParser::new(&books)
        .parse(&args.reference, &start)
        .verse_key()
        .ok_or_else(|| anyhow!("No book found for '{}'", args.reference))?;

    let found = VerseLinks::lookup(&links, &key, args.group);

    match format {
        OutputFormat::Text => print_text_links(&key, &found),
        OutputFormat::Json => print_json_links(&key, &found)?,
        OutputFormat::Tsv => print_tsv_links(&key, &found),
    }

    Ok(())
}

fn print_text_links(key: &VerseKey, found: &VerseLinks<'_>) {
    if found.is_empty() {
        println!("No links recorded for {key}");
        return;
    }

    println!("Links from {key}");

    if let Some(related) = found.related {
        println!("   Cross reference: {related}");
    }

    if !found.parallels.is_empty() {
        println!("\n   Parallels:");
        for (group, parallel) in &found.parallels {
            println!("   - Group {group}: {parallel}");
        }
    }

    if !found.passages.is_empty() {
        println!("\n   Related passages:");
        for passage in found.passages {
            println!("   - {:<16} ({})", passage.passage.to_string(), passage.link_type);
        }
    }
}

fn print_json_links(key: &VerseKey, found: &VerseLinks<'_>) -> anyhow::Result<()> {
    let parallels: serde_json::Map<String, serde_json::Value> = found
        .parallels
        .iter()
        .map(|(group, parallel)| (group.to_string(), serde_json::json!(parallel)))
        .collect();

    let output = serde_json::json!({
        "reference": key,
        "cross_reference": found.related,
        "parallels": parallels,
        "related_passages": found.passages,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_links(key: &VerseKey, found: &VerseLinks<'_>) {
    println!("from\tkind\tto");
    if let Some(related) = found.related {
        println!("{key}\tcross_reference\t{related}");
    }
    for (group, parallel) in &found.parallels {
        println!("{key}\tparallel_{group}\t{parallel}");
    }
    for passage in found.passages {
        println!("{key}\t{}\t{}", passage.link_type, passage.passage);
    }
}
