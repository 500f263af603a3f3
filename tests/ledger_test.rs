use chrono::{Days, NaiveDate};
use std::sync::Arc;

use lending_desk::models::{BookDraft, MemberDraft, RequestDraft, RequestStatus};
use lending_desk::{DomainError, Ledger, LedgerPolicy, ManualClock};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

// Helper to create a ledger with a pinned clock
fn setup_test_ledger() -> (Ledger, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start()));
    let ledger = Ledger::new(LedgerPolicy::default(), clock.clone());
    (ledger, clock)
}

// Every book must satisfy the shelf bounds and match its open loans
fn assert_copy_invariants(ledger: &Ledger) {
    for book in ledger.books() {
        assert!(book.available_quantity() >= 0, "negative shelf for {}", book.id);
        assert!(
            book.available_quantity() <= book.quantity(),
            "shelf above stock for {}",
            book.id
        );

        let open = ledger
            .transactions()
            .iter()
            .filter(|t| t.book_id == book.id && !t.is_returned())
            .count();
        assert_eq!(
            open as i32,
            book.quantity() - book.available_quantity(),
            "open loans out of sync for book {}",
            book.id
        );
    }

    for t in ledger.transactions() {
        if let Some(returned) = t.return_date {
            assert!(returned >= t.borrow_date);
        }
    }
}

#[test]
fn test_last_copy_scenario() {
    let (mut ledger, clock) = setup_test_ledger();
    let book = ledger
        .add_book(BookDraft::new("The Catcher in the Rye", "J.D. Salinger", 1))
        .unwrap();
    let alice = ledger
        .add_member(MemberDraft::new("Alice Johnson", "alice@university.edu"))
        .unwrap();
    let bob = ledger
        .add_member(MemberDraft::new("Bob Smith", "bob@university.edu"))
        .unwrap();

    let loan = ledger.issue_for_days(book.id, alice.id, 14).unwrap();
    assert_eq!(ledger.book(book.id).unwrap().available_quantity(), 0);

    let err = ledger.issue_for_days(book.id, bob.id, 14).unwrap_err();
    assert_eq!(err, DomainError::BookUnavailable(book.id));
    assert_eq!(ledger.transactions().len(), 1);

    clock.advance_days(3);
    ledger.return_transaction(loan.id).unwrap();
    assert_eq!(ledger.book(book.id).unwrap().available_quantity(), 1);

    let second = ledger.issue_for_days(book.id, bob.id, 14).unwrap();
    assert_eq!(second.id, 2);
    assert_eq!(second.member_id, bob.id);
    assert_copy_invariants(&ledger);
}

#[test]
fn test_request_reject_then_approve_scenario() {
    let (mut ledger, _) = setup_test_ledger();
    let carol = ledger
        .add_member(MemberDraft::new("Carol Williams", "carol@university.edu"))
        .unwrap();

    let request = ledger
        .submit_request(RequestDraft {
            member_id: carol.id,
            book_title: "Dune".to_string(),
            author_name: "Frank Herbert".to_string(),
            reason: "Book club pick".to_string(),
        })
        .unwrap();
    assert_eq!(request.status.to_string(), "Pending");

    ledger.decide_request(request.id, false).unwrap();
    assert_eq!(ledger.request(request.id).unwrap().status, RequestStatus::Rejected);

    ledger.decide_request(request.id, true).unwrap();
    assert_eq!(ledger.request(request.id).unwrap().status.to_string(), "Rejected");
}

#[test]
fn test_invariants_hold_across_mixed_operations() {
    let (mut ledger, clock) = setup_test_ledger();
    for (title, qty) in [("A", 1), ("B", 2), ("C", 3)] {
        ledger.add_book(BookDraft::new(title, "Author", qty)).unwrap();
    }
    for name in ["M1", "M2", "M3"] {
        ledger.add_member(MemberDraft::new(name, "")).unwrap();
    }

    let mut open = Vec::new();
    for round in 0..6 {
        for book_id in 1..=3 {
            let member_id = (round + book_id) % 3 + 1;
            if let Ok(t) = ledger.issue_for_days(book_id, member_id, 7) {
                open.push(t.id);
            }
            assert_copy_invariants(&ledger);
        }

        clock.advance_days(2);
        if round % 2 == 1 {
            for id in open.drain(..).step_by(2) {
                ledger.return_transaction(id).unwrap();
            }
        }
        assert_copy_invariants(&ledger);
    }

    // Returning everything restores every shelf
    for t in ledger.active_transactions() {
        ledger.return_transaction(t.id).unwrap();
    }
    for book in ledger.books() {
        assert_eq!(book.available_quantity(), book.quantity());
    }
    assert_copy_invariants(&ledger);
}

#[test]
fn test_fine_examples() {
    let (mut ledger, clock) = setup_test_ledger();
    ledger.add_book(BookDraft::new("Clean Code", "Robert C. Martin", 4)).unwrap();
    ledger.add_member(MemberDraft::new("Bob Smith", "")).unwrap();

    let due = start() + Days::new(10);
    let on_time = ledger.issue(1, 1, start(), due).unwrap();
    let late = ledger.issue(1, 1, start(), due).unwrap();
    let open = ledger.issue(1, 1, start(), due).unwrap();
    let early = ledger.issue(1, 1, start(), due).unwrap();

    clock.set(due - Days::new(1));
    ledger.return_transaction(early.id).unwrap();
    clock.set(due);
    ledger.return_transaction(on_time.id).unwrap();
    clock.set(due + Days::new(3));
    ledger.return_transaction(late.id).unwrap();
    clock.set(due + Days::new(5));

    assert_eq!(ledger.calculate_fine(on_time.id).unwrap(), 0.0);
    assert_eq!(ledger.calculate_fine(late.id).unwrap(), 6.0);
    assert_eq!(ledger.calculate_fine(open.id).unwrap(), 10.0);
    assert_eq!(ledger.calculate_fine(early.id).unwrap(), 0.0);
    assert_eq!(ledger.total_outstanding_fines(), 16.0);

    ledger.pay_fine(late.id).unwrap();
    ledger.pay_fine(late.id).unwrap();
    assert!(ledger.transaction(late.id).unwrap().fine_paid);
    assert_eq!(ledger.total_fines_collected(), 6.0);
    assert_eq!(ledger.total_outstanding_fines(), 10.0);
}

#[test]
fn test_delete_with_open_loans_is_refused() {
    let (mut ledger, _) = setup_test_ledger();
    let book = ledger.add_book(BookDraft::new("1984", "George Orwell", 2)).unwrap();
    let member = ledger.add_member(MemberDraft::new("Alice", "")).unwrap();
    let loan = ledger.issue_for_days(book.id, member.id, 14).unwrap();

    assert!(matches!(ledger.delete_book(book.id), Err(DomainError::InUse(_))));
    assert!(matches!(
        ledger.delete_member(member.id),
        Err(DomainError::InUse(_))
    ));

    ledger.return_transaction(loan.id).unwrap();
    ledger.delete_book(book.id).unwrap();
    ledger.delete_member(member.id).unwrap();

    // History keeps the names captured at issue time
    let history = ledger.transaction(loan.id).unwrap();
    assert_eq!(history.book_title, "1984");
    assert_eq!(history.member_name, "Alice");
    assert!(matches!(
        ledger.book(book.id),
        Err(DomainError::NotFound { .. })
    ));
}

#[test]
fn test_update_book_keeps_copies_on_loan() {
    let (mut ledger, _) = setup_test_ledger();
    let book = ledger.add_book(BookDraft::new("Clean Code", "Robert C. Martin", 3)).unwrap();
    let member = ledger.add_member(MemberDraft::new("Alice", "")).unwrap();
    ledger.issue_for_days(book.id, member.id, 14).unwrap();
    ledger.issue_for_days(book.id, member.id, 14).unwrap();

    let err = ledger
        .update_book(book.id, BookDraft::new("Clean Code", "Robert C. Martin", 1))
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let updated = ledger
        .update_book(
            book.id,
            BookDraft::new("Clean Code (2nd ed.)", "Robert C. Martin", 5).genre("Software Engineering"),
        )
        .unwrap();
    assert_eq!(updated.quantity(), 5);
    assert_eq!(updated.available_quantity(), 3);
    assert_copy_invariants(&ledger);

    assert!(matches!(
        ledger.update_book(99, BookDraft::new("X", "Y", 1)),
        Err(DomainError::NotFound { .. })
    ));
}
