//! Book Service - catalogue operations on the ledger
//!
//! Creation, replacement and removal of titles, raw copy adjustments and the
//! catalogue search used by both the student and the staff views.

use std::collections::BTreeSet;

use crate::domain::DomainError;
use crate::models::{Book, BookDraft, SearchField};
use crate::services::Ledger;

impl Ledger {
    /// Adds a title with all of its copies on the shelf
    pub fn add_book(&mut self, draft: BookDraft) -> Result<Book, DomainError> {
        let draft = draft.normalize()?;
        let book = Book::from_draft(self.book_ids.next_id(), draft);

        tracing::info!(
            "Book added: id={}, title={:?}, quantity={}",
            book.id,
            book.title,
            book.quantity
        );
        self.books.push(book.clone());
        Ok(book)
    }

    /// Replaces the catalogue record, keeping copies currently on loan.
    ///
    /// The shelf count is recomputed as `quantity - on_loan`, so the new
    /// quantity may not drop below the copies that are out.
    pub fn update_book(&mut self, id: i32, draft: BookDraft) -> Result<Book, DomainError> {
        let idx = self.book_index(id)?;
        let draft = draft.normalize()?;

        let on_loan = self.books[idx].on_loan();
        if draft.quantity < on_loan {
            return Err(DomainError::validation(format!(
                "Quantity cannot be lower than the {} copies on loan",
                on_loan
            )));
        }

        let mut book = Book::from_draft(id, draft);
        book.available_quantity = book.quantity - on_loan;

        tracing::info!("Book updated: id={}, title={:?}", book.id, book.title);
        self.books[idx] = book.clone();
        Ok(book)
    }

    /// Removes a title. Refused while any copy is on loan; closed loans keep
    /// the title they captured at issue time.
    pub fn delete_book(&mut self, id: i32) -> Result<(), DomainError> {
        let idx = self.book_index(id)?;

        let open_loans = self
            .transactions
            .iter()
            .filter(|t| t.book_id == id && !t.is_returned())
            .count();
        if open_loans > 0 {
            tracing::warn!("Refusing to delete book {}: {} open loans", id, open_loans);
            return Err(DomainError::InUse(format!(
                "Book {} has {} copies on loan",
                id, open_loans
            )));
        }

        let removed = self.books.remove(idx);
        tracing::info!("Book deleted: id={}, title={:?}", removed.id, removed.title);
        Ok(())
    }

    pub fn book(&self, id: i32) -> Result<Book, DomainError> {
        let idx = self.book_index(id)?;
        Ok(self.books[idx].clone())
    }

    pub fn books(&self) -> Vec<Book> {
        self.books.clone()
    }

    /// Takes one copy off the shelf without recording a loan.
    /// `Ok(false)` when no copy was left.
    pub fn borrow_copy(&mut self, id: i32) -> Result<bool, DomainError> {
        let idx = self.book_index(id)?;
        Ok(self.books[idx].borrow_copy())
    }

    /// Puts one copy back on the shelf without touching any loan.
    /// `Ok(false)` when every copy was already shelved.
    pub fn return_copy(&mut self, id: i32) -> Result<bool, DomainError> {
        let idx = self.book_index(id)?;
        Ok(self.books[idx].return_copy())
    }

    /// Case-insensitive search over title, author, isbn, section and genre.
    /// An empty query returns the whole catalogue.
    pub fn search_books(&self, query: &str) -> Vec<Book> {
        self.search_in(query, SearchField::All)
    }

    /// Like `search_books` but restricted to one field; unknown field names
    /// search every field.
    pub fn search_books_by_field(&self, query: &str, field: &str) -> Vec<Book> {
        self.search_in(query, SearchField::parse(field))
    }

    pub fn search_in(&self, query: &str, field: SearchField) -> Vec<Book> {
        let needle = query.to_lowercase();
        let books: Vec<Book> = self
            .books
            .iter()
            .filter(|b| b.matches(&needle, field))
            .cloned()
            .collect();

        tracing::debug!(
            "Search {:?} in {:?} matched {} books",
            needle,
            field,
            books.len()
        );
        books
    }

    pub fn available_books(&self) -> Vec<Book> {
        self.books
            .iter()
            .filter(|b| b.is_available())
            .cloned()
            .collect()
    }

    /// Unique genres present in the catalogue, sorted; untagged books count as `General`
    pub fn distinct_genres(&self) -> Vec<String> {
        self.books
            .iter()
            .map(|b| b.genre_label().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManualClock;
    use crate::services::LedgerPolicy;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn ledger() -> Ledger {
        let clock = Arc::new(ManualClock::new(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
        Ledger::new(LedgerPolicy::default(), clock)
    }

    fn catalogue(ledger: &mut Ledger) {
        ledger
            .add_book(
                BookDraft::new("1984", "George Orwell", 2)
                    .isbn("978-0451524935")
                    .located("Fiction", "A2")
                    .genre("Dystopian"),
            )
            .unwrap();
        ledger
            .add_book(
                BookDraft::new("Clean Code", "Robert C. Martin", 2)
                    .isbn("978-0132350884")
                    .located("Academic", "B2")
                    .genre("Software Engineering"),
            )
            .unwrap();
        ledger
            .add_book(
                BookDraft::new("Nineteen Eighty-Four Companion", "Various", 1)
                    .located("Reference", "R1"),
            )
            .unwrap();
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut ledger = ledger();
        let first = ledger.add_book(BookDraft::new("A", "X", 1)).unwrap();
        ledger.delete_book(first.id).unwrap();
        let second = ledger.add_book(BookDraft::new("B", "Y", 1)).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_failed_validation_does_not_consume_id() {
        let mut ledger = ledger();
        assert!(ledger.add_book(BookDraft::new("", "X", 1)).is_err());
        let book = ledger.add_book(BookDraft::new("A", "X", 1)).unwrap();
        assert_eq!(book.id, 1);
    }

    #[test]
    fn test_search_by_title_field() {
        let mut ledger = ledger();
        catalogue(&mut ledger);

        let hits = ledger.search_books_by_field("1984", "Title");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "1984");

        let hits = ledger.search_books_by_field("CLEAN", "title");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_unknown_field_falls_back_to_all_fields() {
        let mut ledger = ledger();
        catalogue(&mut ledger);

        let hits = ledger.search_books_by_field("dystopian", "Shelf");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "1984");
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let mut ledger = ledger();
        catalogue(&mut ledger);

        let ids: Vec<i32> = ledger.search_books("").iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_distinct_genres_lists_untagged_as_general() {
        let mut ledger = ledger();
        catalogue(&mut ledger);
        ledger
            .add_book(BookDraft::new("Animal Farm", "George Orwell", 1).genre("Dystopian"))
            .unwrap();

        assert_eq!(
            ledger.distinct_genres(),
            vec![
                "Dystopian".to_string(),
                "General".to_string(),
                "Software Engineering".to_string()
            ]
        );
    }

    #[test]
    fn test_genre_search_sees_untagged_books() {
        let mut ledger = ledger();
        catalogue(&mut ledger);

        assert_eq!(ledger.search_books_by_field("", "Genre").len(), 3);

        let hits = ledger.search_books_by_field("general", "Genre");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);

        let hits = ledger.search_books("GENERAL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Nineteen Eighty-Four Companion");
    }

    #[test]
    fn test_query_whitespace_is_part_of_the_needle() {
        let mut ledger = ledger();
        catalogue(&mut ledger);

        assert!(ledger.search_books_by_field("1984 ", "Title").is_empty());

        let hits = ledger.search_books_by_field("code ", "Title");
        assert!(hits.is_empty());

        let hits = ledger.search_books_by_field(" code", "Title");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Clean Code");
    }

    #[test]
    fn test_raw_copy_adjustments_are_bounded() {
        let mut ledger = ledger();
        let book = ledger.add_book(BookDraft::new("A", "X", 1)).unwrap();

        assert!(!ledger.return_copy(book.id).unwrap());
        assert!(ledger.borrow_copy(book.id).unwrap());
        assert!(!ledger.borrow_copy(book.id).unwrap());
        assert_eq!(ledger.book(book.id).unwrap().available_quantity(), 0);
        assert_eq!(ledger.available_books().len(), 0);

        assert!(matches!(
            ledger.borrow_copy(99),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_snapshots_are_detached() {
        let mut ledger = ledger();
        catalogue(&mut ledger);

        let mut books = ledger.books();
        books.clear();
        let mut first = ledger.book(1).unwrap();
        first.title = "Changed".to_string();

        assert_eq!(ledger.books().len(), 3);
        assert_eq!(ledger.book(1).unwrap().title, "1984");
    }
}
