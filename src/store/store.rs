//! The book store
//!
//! Owns the record log and the in-memory index rebuilt from it on open.
//! Ids are allocated monotonically and never reused; since the index is
//! keyed by id, iteration order is insertion order.

use std::collections::BTreeMap;
use std::path::Path;

use crate::model::{Book, BookDraft};
use crate::observability::Logger;

use super::errors::{StoreError, StoreResult};
use super::log::BookLog;
use super::record::BookRecord;

/// Search criteria for [`BookStore::search`].
///
/// Provided criteria are ANDed; omitted criteria are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive substring match on the title.
    pub title: Option<String>,
    /// Case-insensitive substring match on the author.
    pub author: Option<String>,
    /// Exact match on the publication year.
    pub year: Option<i32>,
}

/// Durable mapping from id to book record.
pub struct BookStore {
    log: BookLog,
    books: BTreeMap<u64, Book>,
    next_id: u64,
}

impl BookStore {
    /// Opens the store, replaying the record log into memory.
    ///
    /// The next id to allocate is one past the highest id ever written,
    /// tombstones included, so deleted ids are never reused.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corruption` if any log record fails validation;
    /// the store refuses to open over a corrupted log.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let log = BookLog::open(data_dir)?;

        let mut books = BTreeMap::new();
        let mut next_id: u64 = 1;
        for record in log.replay()? {
            next_id = next_id.max(record.id + 1);
            if record.is_tombstone {
                books.remove(&record.id);
            } else {
                books.insert(record.id, record.into_book());
            }
        }

        Logger::info(
            "STORE_OPENED",
            &[("books", &books.len().to_string()), ("next_id", &next_id.to_string())],
        );

        Ok(Self {
            log,
            books,
            next_id,
        })
    }

    /// Creates a new book under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the draft fails validation;
    /// nothing is persisted in that case.
    pub fn create(&mut self, draft: &BookDraft) -> StoreResult<Book> {
        draft.validate()?;

        let book = draft.clone().into_book(self.next_id);
        self.log.append(&BookRecord::live(&book))?;

        self.next_id += 1;
        self.books.insert(book.id, book.clone());

        Logger::info("BOOK_CREATED", &[("id", &book.id.to_string())]);
        Ok(book)
    }

    /// Returns the book under the given id.
    pub fn get(&self, id: u64) -> StoreResult<Book> {
        self.books.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Returns books in insertion order, skipping `skip` records and
    /// returning at most `limit`.
    pub fn list(&self, skip: usize, limit: usize) -> Vec<Book> {
        self.books.values().skip(skip).take(limit).cloned().collect()
    }

    /// Replaces all mutable fields of the book under `id`.
    ///
    /// Validation is checked before existence, so an invalid draft is
    /// rejected the same way whether or not the id exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` on an invalid draft and
    /// `StoreError::NotFound` if the id is absent.
    pub fn update(&mut self, id: u64, draft: &BookDraft) -> StoreResult<Book> {
        draft.validate()?;

        if !self.books.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        let book = draft.clone().into_book(id);
        self.log.append(&BookRecord::live(&book))?;
        self.books.insert(id, book.clone());

        Logger::info("BOOK_UPDATED", &[("id", &id.to_string())]);
        Ok(book)
    }

    /// Removes the book under `id` by appending a tombstone.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is absent.
    pub fn delete(&mut self, id: u64) -> StoreResult<()> {
        if !self.books.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        self.log.append(&BookRecord::tombstone(id))?;
        self.books.remove(&id);

        Logger::info("BOOK_DELETED", &[("id", &id.to_string())]);
        Ok(())
    }

    /// Returns books matching every provided criterion, in insertion order.
    pub fn search(&self, query: &SearchQuery) -> Vec<Book> {
        let title_needle = query.title.as_deref().map(str::to_lowercase);
        let author_needle = query.author.as_deref().map(str::to_lowercase);

        self.books
            .values()
            .filter(|book| {
                if let Some(needle) = &title_needle {
                    if !book.title.to_lowercase().contains(needle.as_str()) {
                        return false;
                    }
                }
                if let Some(needle) = &author_needle {
                    if !book.author.to_lowercase().contains(needle.as_str()) {
                        return false;
                    }
                }
                if let Some(year) = query.year {
                    if book.year != Some(year) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }

    /// Number of live books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
