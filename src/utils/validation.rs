//! Centralized validation and helper functions.

/// Largest book text the CLI will load (Psalms with full notes is a few MB)
pub const MAX_BOOK_TEXT_BYTES: usize = 32 * 1024 * 1024;

pub const MAX_FILENAME_LENGTH: usize = 255;

/// Validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: nothing usable left after removing unsafe characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("Book text too large: {0} bytes exceeds maximum of {MAX_BOOK_TEXT_BYTES}")]
    TextTooLarge(usize),
    #[error("Book text is not valid UTF-8")]
    NotUtf8,
    #[error("Book text contains binary data")]
    BinaryContent,
}

/// Check a text size against [`MAX_BOOK_TEXT_BYTES`].
///
/// Returns an error message if the text is too large, None if it is fine.
#[must_use]
pub fn check_book_text_size(len: usize) -> Option<String> {
    if len > MAX_BOOK_TEXT_BYTES {
        Some(format!(
            "Book text of {len} bytes exceeds maximum of {MAX_BOOK_TEXT_BYTES}"
        ))
    } else {
        None
    }
}

/// Turn a project name into something safe to use as a file name.
///
/// Spaces become underscores; anything other than ASCII alphanumerics, `.`,
/// `-` and `_` is dropped. Directory traversal is impossible since `/`, `\`
/// and leading dots cannot survive.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` for blank input,
/// `ValidationError::FilenameTooLong` past [`MAX_FILENAME_LENGTH`], or
/// `ValidationError::InvalidFilename` if nothing usable remains.
///
/// # Examples
///
/// ```
/// use usfm_nav::utils::validation::make_safe_filename;
///
/// assert_eq!(make_safe_filename("My Project").unwrap(), "My_Project");
/// assert_eq!(make_safe_filename("../etc/passwd").unwrap(), "etcpasswd");
/// ```
pub fn make_safe_filename(name: &str) -> Result<String, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if name.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-' || *c == '_')
        .collect();
    let sanitized = sanitized.trim_start_matches('.');

    if sanitized.is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized.to_string())
}

/// Check that raw bytes look like a USFM text and borrow them as `str`.
///
/// Non-ASCII letters are fine (most Bibles are not in English); control
/// characters other than tab, newline and carriage return are not.
///
/// # Errors
///
/// Returns `ValidationError::TextTooLarge`, `ValidationError::NotUtf8` or
/// `ValidationError::BinaryContent`.
pub fn validate_book_text(content: &[u8]) -> Result<&str, ValidationError> {
    if check_book_text_size(content.len()).is_some() {
        return Err(ValidationError::TextTooLarge(content.len()));
    }

    let text = std::str::from_utf8(content).map_err(|_| ValidationError::NotUtf8)?;

    let control_count = content
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32) || b == 127)
        .count();

    // Allow the odd stray control character, as some exports contain them
    if control_count > 0 && control_count > content.len() / 100 {
        return Err(ValidationError::BinaryContent);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_book_text_size() {
        assert!(check_book_text_size(0).is_none());
        assert!(check_book_text_size(MAX_BOOK_TEXT_BYTES).is_none());
        assert!(check_book_text_size(MAX_BOOK_TEXT_BYTES + 1).is_some());
    }

    #[test]
    fn test_make_safe_filename() {
        assert_eq!(make_safe_filename("My Project").unwrap(), "My_Project");
        assert_eq!(make_safe_filename("  Spanish NT 2024 ").unwrap(), "Spanish_NT_2024");
        assert_eq!(make_safe_filename("a/b\\c").unwrap(), "abc");
        assert_eq!(make_safe_filename(".hidden").unwrap(), "hidden");
    }

    #[test]
    fn test_make_safe_filename_rejects() {
        assert_eq!(make_safe_filename(""), Err(ValidationError::EmptyFilename));
        assert_eq!(make_safe_filename("   "), Err(ValidationError::EmptyFilename));
        assert_eq!(make_safe_filename("///"), Err(ValidationError::InvalidFilename));
        assert_eq!(
            make_safe_filename(&"a".repeat(MAX_FILENAME_LENGTH + 1)),
            Err(ValidationError::FilenameTooLong)
        );
    }

    #[test]
    fn test_validate_book_text() {
        let usfm = "\\id GEN\n\\c 1\n\\v 1 En el principio creó Dios\n";
        assert_eq!(validate_book_text(usfm.as_bytes()).unwrap(), usfm);

        assert_eq!(
            validate_book_text(&[0xff, 0xfe, 0x00]),
            Err(ValidationError::NotUtf8)
        );

        let binary = vec![0u8; 200];
        assert_eq!(
            validate_book_text(&binary),
            Err(ValidationError::BinaryContent)
        );
    }
}
