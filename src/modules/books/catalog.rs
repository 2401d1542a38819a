//! In-memory book catalog.
//!
//! The catalog is loaded once at startup and never changes afterwards, so it
//! is shared between handlers behind a plain `Arc` with no locking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bookstore_kernel::settings::CatalogSettings;
use thiserror::Error;

use super::models::{Book, BookMap, Reviews};
use crate::utils::eq_ignore_case;

/// Catalog shipped with the binary.
pub const DEFAULT_SEED: &str = include_str!("../../../data/books.json");

/// Lookup failures. Every variant is a "not found".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("ISBN not found")]
    IsbnNotFound,
    #[error("No books by that author")]
    AuthorNotFound,
    #[error("Title not found")]
    TitleNotFound,
}

/// Failures while building a catalog from seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read catalog seed {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog seed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate ISBN '{0}' in catalog")]
    DuplicateIsbn(String),
}

#[derive(Debug, Default)]
pub struct Catalog {
    books: BookMap,
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from books in the order given.
    pub fn new(books: Vec<Book>) -> Result<Self, SeedError> {
        let mut positions = HashMap::with_capacity(books.len());
        for (position, book) in books.iter().enumerate() {
            if positions.insert(book.isbn.clone(), position).is_some() {
                return Err(SeedError::DuplicateIsbn(book.isbn.clone()));
            }
        }

        Ok(Self {
            books: BookMap::from_books(books),
            positions,
        })
    }

    /// Build a catalog from a seed document: a JSON object of ISBN to
    /// `{"author", "title", "reviews"}`.
    pub fn from_json(seed: &str) -> Result<Self, SeedError> {
        let books: BookMap = serde_json::from_str(seed)?;
        Self::new(books.into_books())
    }

    /// Read a seed document from disk.
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let seed = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&seed)
    }

    /// The built-in catalog.
    pub fn seeded() -> Result<Self, SeedError> {
        Self::from_json(DEFAULT_SEED)
    }

    /// Load the catalog named by the settings, falling back to the built-in one.
    pub fn load(settings: &CatalogSettings) -> anyhow::Result<Self> {
        let catalog = match &settings.seed_path {
            Some(path) => Self::from_path(path)
                .with_context(|| format!("failed to load catalog from {}", path.display()))?,
            None => Self::seeded().context("failed to load built-in catalog")?,
        };

        let source = settings
            .seed_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string());
        tracing::info!(books = catalog.len(), source = %source, "catalog loaded");

        Ok(catalog)
    }

    /// Every book, keyed by ISBN in catalog order.
    pub fn all(&self) -> &BookMap {
        &self.books
    }

    pub fn by_isbn(&self, isbn: &str) -> Result<&Book, CatalogError> {
        self.positions
            .get(isbn)
            .map(|&position| &self.books.books()[position])
            .ok_or(CatalogError::IsbnNotFound)
    }

    /// Every book whose author matches, ignoring case.
    pub fn by_author(&self, author: &str) -> Result<Vec<&Book>, CatalogError> {
        let matches: Vec<&Book> = self
            .books
            .books()
            .iter()
            .filter(|book| eq_ignore_case(&book.author, author))
            .collect();

        if matches.is_empty() {
            Err(CatalogError::AuthorNotFound)
        } else {
            Ok(matches)
        }
    }

    /// The first book whose title matches, ignoring case.
    pub fn by_title(&self, title: &str) -> Result<&Book, CatalogError> {
        self.books
            .books()
            .iter()
            .find(|book| eq_ignore_case(&book.title, title))
            .ok_or(CatalogError::TitleNotFound)
    }

    pub fn reviews(&self, isbn: &str) -> Result<&Reviews, CatalogError> {
        self.by_isbn(isbn).map(|book| &book.reviews)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf() -> Catalog {
        Catalog::new(vec![
            Book::new("1", "Chinua Achebe", "Things Fall Apart")
                .with_review("ada", "A classic")
                .with_review("bo", "Still relevant"),
            Book::new("2", "Chinua Achebe", "Arrow of God"),
            Book::new("3", "Someone Else", "Things Fall Apart"),
        ])
        .unwrap()
    }

    #[test]
    fn default_seed_loads_in_order() {
        let catalog = Catalog::seeded().unwrap();
        assert_eq!(catalog.len(), 10);

        let isbns: Vec<_> = catalog
            .all()
            .books()
            .iter()
            .map(|b| b.isbn.as_str())
            .collect();
        assert_eq!(isbns, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);

        let first = catalog.by_isbn("1").unwrap();
        assert_eq!(first.title, "Things Fall Apart");
        assert_eq!(first.author, "Chinua Achebe");
    }

    #[test]
    fn by_isbn_returns_the_stored_record() {
        let catalog = shelf();
        let book = catalog.by_isbn("1").unwrap();
        assert_eq!(book, &catalog.all().books()[0]);
        assert_eq!(catalog.by_isbn("999"), Err(CatalogError::IsbnNotFound));
    }

    #[test]
    fn by_author_ignores_case_and_returns_every_match() {
        let catalog = shelf();
        let lower = catalog.by_author("chinua achebe").unwrap();
        let exact = catalog.by_author("Chinua Achebe").unwrap();
        assert_eq!(lower, exact);

        let titles: Vec<_> = lower.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Things Fall Apart", "Arrow of God"]);
    }

    #[test]
    fn by_author_is_exact_match() {
        let catalog = shelf();
        assert_eq!(catalog.by_author("Achebe"), Err(CatalogError::AuthorNotFound));
    }

    #[test]
    fn by_title_returns_first_match_only() {
        let catalog = shelf();
        let book = catalog.by_title("THINGS FALL APART").unwrap();
        assert_eq!(book.isbn, "1");
        assert_eq!(catalog.by_title("Dune"), Err(CatalogError::TitleNotFound));
    }

    #[test]
    fn reviews_for_unreviewed_book_are_empty() {
        let catalog = shelf();
        assert!(catalog.reviews("2").unwrap().is_empty());
        assert_eq!(catalog.reviews("1").unwrap().len(), 2);
        assert_eq!(catalog.reviews("42"), Err(CatalogError::IsbnNotFound));
    }

    #[test]
    fn duplicate_isbns_are_rejected() {
        let err = Catalog::new(vec![
            Book::new("1", "A", "B"),
            Book::new("1", "C", "D"),
        ])
        .unwrap_err();
        assert!(matches!(err, SeedError::DuplicateIsbn(isbn) if isbn == "1"));
    }

    #[test]
    fn load_reads_seed_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(
            &path,
            r#"{"42": {"author": "Douglas Adams", "title": "Life, the Universe and Everything"}}"#,
        )
        .unwrap();

        let catalog = Catalog::load(&CatalogSettings {
            seed_path: Some(path),
        })
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.by_isbn("42").unwrap().author, "Douglas Adams");
    }

    #[test]
    fn load_reports_missing_seed_file() {
        let err = Catalog::load(&CatalogSettings {
            seed_path: Some(PathBuf::from("/definitely/not/here.json")),
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("failed to load catalog from"));
    }
}
