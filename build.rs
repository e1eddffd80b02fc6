use std::path::Path;

const BOOKS_PATH: &str = "data/books.json";
const LINKS_PATH: &str = "data/reference_links.json";
const EXPECTED_BOOKS: usize = 66;

fn main() {
    let books = read_json(Path::new(BOOKS_PATH));
    validate_book_catalog(&books);

    let links = read_json(Path::new(LINKS_PATH));
    validate_reference_links(&links);

    set_build_dependencies();
}

fn read_json(path: &Path) -> serde_json::Value {
    // Ensure data file exists at build time
    assert!(
        path.exists(),
        "\n\nDATA BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the data file before building.\n",
        path.display()
    );

    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\nDATA BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    });

    let value: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nDATA BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            path.display()
        );
    });

    assert!(
        value.is_object(),
        "\n\nDATA BUILD ERROR: Root of {} must be a JSON object\n",
        path.display()
    );
    assert!(
        value.get("version").and_then(|v| v.as_str()).is_some(),
        "\n\nDATA BUILD ERROR: {} is missing a 'version' string\n",
        path.display()
    );

    value
}

fn validate_book_catalog(catalog: &serde_json::Value) {
    let books = catalog
        .get("books")
        .and_then(|b| b.as_array())
        .unwrap_or_else(|| {
            panic!(
                "\n\nDATA BUILD ERROR: Missing 'books' array in {BOOKS_PATH}\n"
            );
        });

    assert!(
        books.len() == EXPECTED_BOOKS,
        "\n\nDATA BUILD ERROR: {BOOKS_PATH} lists {} books, expected {EXPECTED_BOOKS}\n",
        books.len()
    );

    for (i, book) in books.iter().enumerate() {
        let code = book
            .get("code")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");

        for field in ["code", "usfm_id", "name"] {
            assert!(
                book.get(field).and_then(|v| v.as_str()).is_some(),
                "\n\nDATA BUILD ERROR: Book '{code}' (index {i}) missing '{field}' string\n"
            );
        }

        let chapters = book.get("chapters").and_then(serde_json::Value::as_u64);
        assert!(
            chapters.is_some_and(|c| c > 0),
            "\n\nDATA BUILD ERROR: Book '{code}' (index {i}) needs 'chapters' > 0\n"
        );
    }

    println!(
        "cargo:warning=Validated book catalog: {} books",
        books.len()
    );
}

fn validate_reference_links(links: &serde_json::Value) {
    let mut total = 0;

    for (table, fields) in [
        ("cross_references", &["from", "to"][..]),
        ("parallels", &["from", "groups"][..]),
        ("related_passages", &["from", "link_type", "passage"][..]),
    ] {
        let Some(entries) = links.get(table) else {
            continue;
        };
        let entries = entries.as_array().unwrap_or_else(|| {
            panic!("\n\nDATA BUILD ERROR: '{table}' in {LINKS_PATH} must be an array\n");
        });

        for (i, entry) in entries.iter().enumerate() {
            for field in fields {
                assert!(
                    entry.get(*field).is_some(),
                    "\n\nDATA BUILD ERROR: {table} entry {i} missing '{field}' field\n"
                );
            }
        }
        total += entries.len();
    }

    println!("cargo:warning=Validated reference links: {total} entries");
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the embedded data changes
    println!("cargo:rerun-if-changed={BOOKS_PATH}");
    println!("cargo:rerun-if-changed={LINKS_PATH}");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
