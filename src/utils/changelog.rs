//! Per-project change log written whenever a book is saved.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::book::BookCode;
use crate::parsing::usfm::BookStats;
use crate::utils::validation::{make_safe_filename, ValidationError};

#[derive(Error, Debug)]
pub enum ChangeLogError {
    #[error("Failed to write change log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unusable project name: {0}")]
    ProjectName(#[from] ValidationError),
}

/// Change log location for a project inside the logging folder
///
/// # Errors
///
/// Returns `ChangeLogError::ProjectName` if the project name has no usable characters.
pub fn change_log_path(folder: &Path, project: &str) -> Result<PathBuf, ChangeLogError> {
    let name = make_safe_filename(&format!("{project}_ChangeLog.txt"))?;
    Ok(folder.join(name))
}

/// One log line, without the trailing newline.
///
/// Character and verse counts are grouped in thousands (`1,234`).
#[must_use]
pub fn change_log_line(timestamp: &str, book: BookCode, stats: &BookStats, user: &str) -> String {
    format!(
        "{timestamp} {book} {} characters ({} chapters, {} verses) saved by {user}",
        group_thousands(stats.characters),
        stats.chapters,
        group_thousands(stats.verses)
    )
}

fn group_thousands(count: usize) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Append a line recording that `book` was saved.
///
/// Returns the path that was written.
///
/// # Errors
///
/// Returns `ChangeLogError` if the project name is unusable or the file cannot
/// be opened or written.
pub fn append_change_log(
    folder: &Path,
    project: &str,
    user: &str,
    book: BookCode,
    book_text: &str,
) -> Result<PathBuf, ChangeLogError> {
    let path = change_log_path(folder, project)?;
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let line = change_log_line(&timestamp, book, &BookStats::from_text(book_text), user);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(file, "{line}")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn jde() -> BookCode {
        BookCode::lookup("JDE").unwrap()
    }

    #[test]
    fn test_change_log_path() {
        let path = change_log_path(Path::new("/logs"), "My Bible").unwrap();
        assert_eq!(path, Path::new("/logs/My_Bible_ChangeLog.txt"));
    }

    #[test]
    fn test_change_log_line() {
        let stats = BookStats {
            characters: 1234,
            chapters: 1,
            verses: 25,
        };
        assert_eq!(
            change_log_line("2024-01-02 03:04:05", jde(), &stats, "robert"),
            "2024-01-02 03:04:05 JDE 1,234 characters (1 chapters, 25 verses) saved by robert"
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(31_102), "31,102");
        assert_eq!(group_thousands(4_567_890), "4,567,890");
    }

    #[test]
    fn test_append_change_log() {
        let dir = TempDir::new().unwrap();
        let text = "\\id JUD\n\\c 1\n\\v 1 Jude\n\\v 2 Mercy\n";

        let path = append_change_log(dir.path(), "Test Project", "ann", jde(), text).unwrap();
        append_change_log(dir.path(), "Test Project", "ann", jde(), text).unwrap();

        let log = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("JDE 34 characters (1 chapters, 2 verses) saved by ann"));
    }
}
