use chrono::Days;

use crate::domain::DomainError;
use crate::models::{BookDraft, MemberDraft};
use crate::services::Ledger;

/// Loads the demo catalogue: eight titles, three members and a loan in each
/// state (active, overdue, returned late).
pub fn seed_demo_data(ledger: &mut Ledger) -> Result<(), DomainError> {
    // 1. Catalogue
    let books = [
        ("To Kill a Mockingbird", "Harper Lee", "978-0061120084", "Fiction", "Classic Fiction", "A1", 3),
        ("1984", "George Orwell", "978-0451524935", "Fiction", "Dystopian", "A2", 2),
        ("The Great Gatsby", "F. Scott Fitzgerald", "978-0743273565", "Fiction", "Classic Fiction", "A1", 2),
        ("Pride and Prejudice", "Jane Austen", "978-0141439518", "Fiction", "Romance", "A3", 2),
        ("The Catcher in the Rye", "J.D. Salinger", "978-0316769488", "Fiction", "Coming of Age", "A2", 1),
        ("Introduction to Algorithms", "Thomas H. Cormen", "978-0262033848", "Academic", "Computer Science", "B1", 3),
        ("Clean Code", "Robert C. Martin", "978-0132350884", "Academic", "Software Engineering", "B2", 2),
        ("A Brief History of Time", "Stephen Hawking", "978-0553380163", "Science", "Physics", "C1", 2),
    ];

    let mut book_ids = Vec::with_capacity(books.len());
    for (title, author, isbn, section, genre, shelf, quantity) in books {
        let book = ledger.add_book(
            BookDraft::new(title, author, quantity)
                .isbn(isbn)
                .located(section, shelf)
                .genre(genre),
        )?;
        book_ids.push(book.id);
    }

    // 2. Members
    let members = [
        ("Alice Johnson", "alice@university.edu", "+1-555-0101", (2024, 9, 1)),
        ("Bob Smith", "bob@university.edu", "+1-555-0102", (2024, 9, 15)),
        ("Carol Williams", "carol@university.edu", "+1-555-0103", (2025, 1, 10)),
    ];

    let mut member_ids = Vec::with_capacity(members.len());
    for (name, email, phone, (y, m, d)) in members {
        let mut draft = MemberDraft::new(name, email).phone(phone);
        if let Some(since) = chrono::NaiveDate::from_ymd_opt(y, m, d) {
            draft = draft.since(since);
        }
        member_ids.push(ledger.add_member(draft)?.id);
    }

    // 3. Loans relative to today
    let today = ledger.today();
    let ago = |days: u64| today - Days::new(days);

    ledger.issue(book_ids[0], member_ids[0], ago(10), today + Days::new(4))?;
    ledger.issue(book_ids[5], member_ids[1], ago(20), ago(6))?;
    let late = ledger.issue(book_ids[2], member_ids[0], ago(30), ago(16))?;
    ledger.close_on(late.id, ago(14))?;

    tracing::info!(
        "Demo data seeded: {} books, {} members, {} loans",
        ledger.total_books(),
        ledger.total_members(),
        ledger.transactions().len()
    );
    Ok(())
}
