//! Black-box invariants of the book store.

use bookdb::model::BookDraft;
use bookdb::store::{BookStore, SearchQuery, StoreError};
use tempfile::TempDir;

fn draft(title: &str, author: &str, year: Option<i32>) -> BookDraft {
    BookDraft::new(title, author, year)
}

#[test]
fn created_ids_are_unique_across_the_store_lifetime() {
    let tmp = TempDir::new().unwrap();
    let mut store = BookStore::open(tmp.path()).unwrap();

    let mut seen = Vec::new();
    for i in 0..5 {
        let book = store.create(&draft(&format!("Book {}", i), "Author", None)).unwrap();
        assert!(!seen.contains(&book.id));
        seen.push(book.id);
    }

    // Deleting does not free an id for reuse.
    store.delete(seen[2]).unwrap();
    let fresh = store.create(&draft("Another", "Author", None)).unwrap();
    assert!(!seen.contains(&fresh.id));
}

#[test]
fn get_returns_the_created_record() {
    let tmp = TempDir::new().unwrap();
    let mut store = BookStore::open(tmp.path()).unwrap();

    let created = store
        .create(&draft("The Left Hand of Darkness", "Ursula K. Le Guin", Some(1969)))
        .unwrap();
    let fetched = store.get(created.id).unwrap();

    assert_eq!(fetched.title, "The Left Hand of Darkness");
    assert_eq!(fetched.author, "Ursula K. Le Guin");
    assert_eq!(fetched.year, Some(1969));
}

#[test]
fn update_is_isolated_to_its_record() {
    let tmp = TempDir::new().unwrap();
    let mut store = BookStore::open(tmp.path()).unwrap();

    let target = store.create(&draft("Draft Title", "Author A", None)).unwrap();
    let bystander = store.create(&draft("Bystander", "Author B", Some(2001))).unwrap();

    let replacement = draft("Final Title", "Author A", Some(1999));
    store.update(target.id, &replacement).unwrap();

    let after = store.get(target.id).unwrap();
    assert_eq!(after.title, "Final Title");
    assert_eq!(after.year, Some(1999));
    assert_eq!(store.get(bystander.id).unwrap(), bystander);
}

#[test]
fn delete_makes_the_id_unresolvable() {
    let tmp = TempDir::new().unwrap();
    let mut store = BookStore::open(tmp.path()).unwrap();

    let book = store.create(&draft("Ephemeral", "Author", None)).unwrap();
    store.delete(book.id).unwrap();

    assert!(matches!(store.get(book.id), Err(StoreError::NotFound(_))));
}

#[test]
fn search_title_matches_exactly_the_containing_records() {
    let tmp = TempDir::new().unwrap();
    let mut store = BookStore::open(tmp.path()).unwrap();

    store.create(&draft("War and Peace", "Leo Tolstoy", Some(1869))).unwrap();
    store.create(&draft("The Art of War", "Sun Tzu", Some(500))).unwrap();
    store.create(&draft("Warlock", "Oakley Hall", Some(1958))).unwrap();
    store.create(&draft("Anna Karenina", "Leo Tolstoy", Some(1878))).unwrap();

    let query = SearchQuery {
        title: Some("war".to_string()),
        ..Default::default()
    };
    let hits = store.search(&query);

    let titles: Vec<&str> = hits.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["War and Peace", "The Art of War", "Warlock"]);
}

#[test]
fn list_first_page_returns_first_inserted() {
    let tmp = TempDir::new().unwrap();
    let mut store = BookStore::open(tmp.path()).unwrap();

    let first = store.create(&draft("First", "a", None)).unwrap();
    store.create(&draft("Second", "b", None)).unwrap();
    store.create(&draft("Third", "c", None)).unwrap();

    assert_eq!(store.list(0, 1), vec![first]);
}

#[test]
fn failed_create_leaves_no_trace_across_reopen() {
    let tmp = TempDir::new().unwrap();

    {
        let mut store = BookStore::open(tmp.path()).unwrap();
        store.create(&draft("Kept", "Author", None)).unwrap();
        assert!(matches!(
            store.create(&draft("", "Author", None)),
            Err(StoreError::Validation(_))
        ));
    }

    let store = BookStore::open(tmp.path()).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.list(0, 100)[0].title, "Kept");
}

#[test]
fn reopened_store_continues_id_allocation() {
    let tmp = TempDir::new().unwrap();

    let highest = {
        let mut store = BookStore::open(tmp.path()).unwrap();
        store.create(&draft("A", "a", None)).unwrap();
        let b = store.create(&draft("B", "b", None)).unwrap();
        store.delete(b.id).unwrap();
        b.id
    };

    let mut store = BookStore::open(tmp.path()).unwrap();
    let fresh = store.create(&draft("C", "c", None)).unwrap();
    assert!(fresh.id > highest);
}

#[test]
fn corrupted_log_refuses_to_open() {
    let tmp = TempDir::new().unwrap();

    {
        let mut store = BookStore::open(tmp.path()).unwrap();
        store.create(&draft("Soon corrupt", "Author", None)).unwrap();
    }

    let log_path = tmp.path().join("data").join("books.log");
    let mut bytes = std::fs::read(&log_path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    std::fs::write(&log_path, bytes).unwrap();

    assert!(matches!(
        BookStore::open(tmp.path()),
        Err(StoreError::Corruption(_))
    ));
}
