//! Command-line interface for usfm-nav.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **resolve**: Resolve typed reference text against a current position
//! - **section**: Find the section around a verse in a USFM book file
//! - **verse**: Print the cached text of one verse
//! - **links**: Show cross references, parallels and related passages
//! - **books**: List the book catalog
//! - **stats**: Count characters, chapters and verses, optionally logging the save
//! - **empty**: Create an empty USFM book
//!
//! ## Usage
//!
//! ```text
//! # Resolve a reference typed while at John 1:1
//! usfm-nav resolve "3:16" --book JHN
//!
//! # Section around Mark 1:4
//! usfm-nav section 42MRK.SFM "1:4"
//!
//! # JSON output for scripting
//! usfm-nav links "Mt 3:13" --format json
//!
//! # Empty Matthew with the verse layout of an existing translation
//! usfm-nav empty MAT --like 41MAT.SFM
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::catalog::books::BookCatalog;
use crate::catalog::links::ReferenceLinks;

pub mod book;
pub mod links;
pub mod resolve;
pub mod section;

#[derive(Parser)]
#[command(name = "usfm-nav")]
#[command(author = "Biblelator Developers")]
#[command(version)]
#[command(about = "Resolve references, find sections and cache verses in USFM books")]
#[command(
    long_about = "usfm-nav provides the navigation logic of a USFM Bible editor on the command line.\n\nIt can:\n- Resolve typed references like '3:16', 'Jn 3' or 'Jude v4'\n- Find the heading-delimited section around a verse\n- Look up cross references and synoptic parallels"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve reference text to a book, chapter and verse
    Resolve(resolve::ResolveArgs),

    /// Find the section containing a verse of a USFM book
    Section(section::SectionArgs),

    /// Print the text of one verse of a USFM book
    Verse(section::VerseArgs),

    /// Show links from a verse to other passages
    Links(links::LinksArgs),

    /// List the books in the catalog
    Books,

    /// Show size statistics for a USFM book
    Stats(book::StatsArgs),

    /// Create an empty USFM book
    Empty(book::EmptyArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Replacement data files shared by every command
#[derive(clap::Args, Clone, Debug, Default)]
pub struct DataArgs {
    /// Book catalog JSON to use instead of the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    pub books: Option<PathBuf>,

    /// Reference link tables JSON to use instead of the built-in ones
    #[arg(long, global = true, value_name = "FILE")]
    pub links: Option<PathBuf>,
}

impl DataArgs {
    /// Load the book catalog, from `--books` if given
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn book_catalog(&self, verbose: bool) -> anyhow::Result<BookCatalog> {
        let catalog = match &self.books {
            Some(path) => BookCatalog::load_from_file(path)
                .with_context(|| format!("Failed to load book catalog {}", path.display()))?,
            None => BookCatalog::load_embedded()?,
        };

        if verbose {
            eprintln!("Loaded book catalog with {} books", catalog.len());
        }
        debug!(books = catalog.len(), "Book catalog loaded");

        Ok(catalog)
    }

    /// Load the reference link tables, from `--links` if given
    ///
    /// # Errors
    ///
    /// Returns an error if the links file cannot be read or parsed.
    pub fn reference_links(&self, verbose: bool) -> anyhow::Result<ReferenceLinks> {
        let links = match &self.links {
            Some(path) => ReferenceLinks::load_from_file(path)
                .with_context(|| format!("Failed to load reference links {}", path.display()))?,
            None => ReferenceLinks::load_embedded()?,
        };

        if verbose {
            eprintln!("Loaded reference links for {} verses", links.len());
        }

        Ok(links)
    }
}
