use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Review text keyed by reviewer.
pub type Reviews = BTreeMap<String, String>;

/// A book in the catalog.
///
/// The ISBN is the catalog key, so it never appears in the book's own JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// ISBN the book is filed under; empty when decoded from a single record
    #[serde(skip)]
    pub isbn: String,
    /// Author of the book
    pub author: String,
    /// Title of the book
    pub title: String,
    /// Reviews left for the book
    #[serde(default)]
    pub reviews: Reviews,
}

impl Book {
    pub fn new(isbn: impl Into<String>, author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            author: author.into(),
            title: title.into(),
            reviews: Reviews::new(),
        }
    }

    pub fn with_review(mut self, reviewer: impl Into<String>, text: impl Into<String>) -> Self {
        self.reviews.insert(reviewer.into(), text.into());
        self
    }
}

/// A seed entry: the book without its key.
#[derive(Debug, Clone, Deserialize)]
struct BookRecord {
    author: String,
    title: String,
    #[serde(default)]
    reviews: Reviews,
}

/// Books keyed by ISBN, kept in catalog order.
///
/// Serializes as a JSON object whose keys appear in the same order the books
/// were seeded, so `"10"` follows `"9"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookMap(Vec<Book>);

impl BookMap {
    /// Books in catalog order
    pub fn books(&self) -> &[Book] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn from_books(books: Vec<Book>) -> Self {
        Self(books)
    }

    pub(crate) fn into_books(self) -> Vec<Book> {
        self.0
    }
}

impl Serialize for BookMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for book in &self.0 {
            map.serialize_entry(&book.isbn, book)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BookMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BookMapVisitor;

        impl<'de> Visitor<'de> for BookMapVisitor {
            type Value = BookMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ISBN to book records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<BookMap, A::Error> {
                let mut seen = HashSet::new();
                let mut books = Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some((isbn, record)) = access.next_entry::<String, BookRecord>()? {
                    if !seen.insert(isbn.clone()) {
                        return Err(de::Error::custom(format!("duplicate ISBN '{isbn}'")));
                    }
                    books.push(Book {
                        isbn,
                        author: record.author,
                        title: record.title,
                        reviews: record.reviews,
                    });
                }

                Ok(BookMap(books))
            }
        }

        deserializer.deserialize_map(BookMapVisitor)
    }
}
