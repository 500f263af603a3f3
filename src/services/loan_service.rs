//! Loan Service - issuing, returning and fines
//!
//! `issue` checks every precondition before touching state, so a refused loan
//! leaves no trace: no transaction, no consumed id, no copy taken.

use chrono::{Days, NaiveDate};

use crate::domain::DomainError;
use crate::models::transaction::MAX_LOAN_DAYS;
use crate::models::{LoanDetails, Transaction};
use crate::services::Ledger;

impl Ledger {
    /// Lends one copy of `book_id` to `member_id`
    pub fn issue(
        &mut self,
        book_id: i32,
        member_id: i32,
        borrow_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Result<Transaction, DomainError> {
        let book_idx = self.book_index(book_id)?;
        let member_idx = self.member_index(member_id)?;

        if due_date <= borrow_date {
            return Err(DomainError::validation(
                "Due date must be after the borrow date",
            ));
        }

        if self.books[book_idx].available_quantity() <= 0 {
            tracing::warn!("Issue refused: book {} has no copy left", book_id);
            return Err(DomainError::BookUnavailable(book_id));
        }

        if self.policy().enforce_borrow_limit {
            let limit = self.library_info.max_books_per_student;
            if self.remaining_borrow_limit(member_id) <= 0 {
                tracing::warn!(
                    "Issue refused: member {} is at the limit of {}",
                    member_id,
                    limit
                );
                return Err(DomainError::BorrowLimitReached { member_id, limit });
            }
        }

        let book = &mut self.books[book_idx];
        book.borrow_copy();

        let transaction = Transaction {
            id: self.transaction_ids.next_id(),
            book_id,
            member_id,
            book_title: book.title.clone(),
            member_name: self.members[member_idx].name.clone(),
            borrow_date,
            due_date,
            return_date: None,
            fine_paid: false,
        };

        tracing::info!(
            "Loan issued: id={}, book={}, member={}, due={}",
            transaction.id,
            book_id,
            member_id,
            due_date
        );
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Lends from today for `days` days, as the issue desk does
    pub fn issue_for_days(
        &mut self,
        book_id: i32,
        member_id: i32,
        days: u32,
    ) -> Result<Transaction, DomainError> {
        if days == 0 || days > MAX_LOAN_DAYS {
            return Err(DomainError::validation(format!(
                "Loan length must be between 1 and {} days",
                MAX_LOAN_DAYS
            )));
        }
        let today = self.today();
        let due = today + Days::new(u64::from(days));
        self.issue(book_id, member_id, today, due)
    }

    /// Closes the loan today and shelves the copy again
    pub fn return_transaction(&mut self, id: i32) -> Result<Transaction, DomainError> {
        let today = self.today();
        self.close_on(id, today)
    }

    /// Records the return as of `date`. Used directly when loading history.
    pub(crate) fn close_on(&mut self, id: i32, date: NaiveDate) -> Result<Transaction, DomainError> {
        let idx = self.transaction_index(id)?;
        if self.transactions[idx].is_returned() {
            tracing::warn!("Return refused: transaction {} already closed", id);
            return Err(DomainError::AlreadyReturned(id));
        }

        let transaction = &mut self.transactions[idx];
        // A loan dated into the future still never returns before it started
        transaction.return_date = Some(date.max(transaction.borrow_date));
        let book_id = transaction.book_id;
        let returned = transaction.clone();

        if let Some(book) = self.books.iter_mut().find(|b| b.id == book_id) {
            book.return_copy();
        }

        tracing::info!("Loan returned: id={}, book={}", id, book_id);
        Ok(returned)
    }

    /// Fine owed on the loan as of today
    pub fn calculate_fine(&self, id: i32) -> Result<f64, DomainError> {
        let idx = self.transaction_index(id)?;
        Ok(self.fine_of(&self.transactions[idx]))
    }

    pub fn fine_of(&self, transaction: &Transaction) -> f64 {
        if self.fines_enabled() {
            transaction.fine_on(self.today())
        } else {
            0.0
        }
    }

    /// Marks the fine as paid. Idempotent and does not look at the amount.
    pub fn pay_fine(&mut self, id: i32) -> Result<Transaction, DomainError> {
        let idx = self.transaction_index(id)?;
        let transaction = &mut self.transactions[idx];
        if !transaction.fine_paid {
            transaction.fine_paid = true;
            tracing::info!("Fine marked paid on transaction {}", id);
        }
        Ok(transaction.clone())
    }

    /// Staff collection of a fine: refuses loans with nothing owed or already
    /// settled, then records payment. Returns the amount collected.
    pub fn collect_fine(&mut self, id: i32) -> Result<f64, DomainError> {
        let idx = self.transaction_index(id)?;
        let fine = self.fine_of(&self.transactions[idx]);
        if fine <= 0.0 {
            return Err(DomainError::validation("No fine on this transaction"));
        }
        if self.transactions[idx].fine_paid {
            return Err(DomainError::validation("Fine already collected"));
        }
        self.pay_fine(id)?;
        Ok(fine)
    }

    pub fn transaction(&self, id: i32) -> Result<Transaction, DomainError> {
        let idx = self.transaction_index(id)?;
        Ok(self.transactions[idx].clone())
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn active_transactions(&self) -> Vec<Transaction> {
        self.filter_transactions(|t| !t.is_returned())
    }

    pub fn overdue_transactions(&self) -> Vec<Transaction> {
        let today = self.today();
        self.filter_transactions(|t| t.is_overdue_on(today))
    }

    pub fn member_transactions(&self, member_id: i32) -> Vec<Transaction> {
        self.filter_transactions(|t| t.member_id == member_id)
    }

    pub fn member_active_transactions(&self, member_id: i32) -> Vec<Transaction> {
        self.filter_transactions(|t| t.member_id == member_id && !t.is_returned())
    }

    /// Attaches today's status and fine to a loan
    pub fn details(&self, transaction: Transaction) -> LoanDetails {
        LoanDetails {
            status: transaction.status_on(self.today()),
            fine: self.fine_of(&transaction),
            transaction,
        }
    }

    fn filter_transactions<F>(&self, keep: F) -> Vec<Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        self.transactions
            .iter()
            .filter(|t| keep(t))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManualClock;
    use crate::models::{BookDraft, MemberDraft, TransactionStatus};
    use crate::services::LedgerPolicy;
    use std::sync::Arc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn setup(policy: LedgerPolicy) -> (Ledger, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(day(1)));
        let mut ledger = Ledger::new(policy, clock.clone());
        ledger
            .add_book(BookDraft::new("The Catcher in the Rye", "J.D. Salinger", 1))
            .unwrap();
        ledger
            .add_book(BookDraft::new("Introduction to Algorithms", "Thomas H. Cormen", 3))
            .unwrap();
        ledger
            .add_member(MemberDraft::new("Alice Johnson", "alice@university.edu"))
            .unwrap();
        ledger
            .add_member(MemberDraft::new("Bob Smith", "bob@university.edu"))
            .unwrap();
        (ledger, clock)
    }

    #[test]
    fn test_issue_unavailable_leaves_state_untouched() {
        let (mut ledger, _) = setup(LedgerPolicy::default());
        ledger.issue(1, 1, day(1), day(15)).unwrap();

        let err = ledger.issue(1, 2, day(1), day(15)).unwrap_err();
        assert_eq!(err, DomainError::BookUnavailable(1));
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.book(1).unwrap().available_quantity(), 0);

        // The refused attempt did not burn an id
        let next = ledger.issue(2, 2, day(1), day(15)).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_issue_rejects_due_before_borrow() {
        let (mut ledger, _) = setup(LedgerPolicy::default());
        let err = ledger.issue(2, 1, day(10), day(10)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(ledger.book(2).unwrap().available_quantity(), 3);
    }

    #[test]
    fn test_issue_unknown_member_is_not_found() {
        let (mut ledger, _) = setup(LedgerPolicy::default());
        let err = ledger.issue(2, 9, day(1), day(2)).unwrap_err();
        assert_eq!(err, DomainError::not_found("Member", 9));
    }

    #[test]
    fn test_issue_for_days_uses_clock() {
        let (mut ledger, _) = setup(LedgerPolicy::default());
        let t = ledger.issue_for_days(2, 1, 14).unwrap();
        assert_eq!(t.borrow_date, day(1));
        assert_eq!(t.due_date, day(15));
        assert_eq!(t.book_title, "Introduction to Algorithms");
        assert_eq!(t.member_name, "Alice Johnson");

        assert!(ledger.issue_for_days(2, 1, 0).is_err());
        assert!(ledger.issue_for_days(2, 1, 61).is_err());
    }

    #[test]
    fn test_return_twice_fails() {
        let (mut ledger, clock) = setup(LedgerPolicy::default());
        let t = ledger.issue(2, 1, day(1), day(15)).unwrap();

        clock.set(day(4));
        let returned = ledger.return_transaction(t.id).unwrap();
        assert_eq!(returned.return_date, Some(day(4)));
        assert_eq!(ledger.book(2).unwrap().available_quantity(), 3);

        let err = ledger.return_transaction(t.id).unwrap_err();
        assert_eq!(err, DomainError::AlreadyReturned(t.id));
        assert_eq!(ledger.book(2).unwrap().available_quantity(), 3);
    }

    #[test]
    fn test_overdue_fine_accrues_until_return() {
        let (mut ledger, clock) = setup(LedgerPolicy::default());
        let t = ledger.issue(2, 1, day(1), day(10)).unwrap();

        clock.set(day(10));
        assert_eq!(ledger.calculate_fine(t.id).unwrap(), 0.0);
        assert!(ledger.overdue_transactions().is_empty());

        clock.set(day(15));
        assert_eq!(ledger.calculate_fine(t.id).unwrap(), 10.0);
        assert_eq!(ledger.overdue_transactions().len(), 1);
        let details = ledger.details(ledger.transaction(t.id).unwrap());
        assert_eq!(details.status, TransactionStatus::Overdue);

        clock.set(day(13));
        ledger.return_transaction(t.id).unwrap();
        clock.set(day(30));
        assert_eq!(ledger.calculate_fine(t.id).unwrap(), 6.0);
        assert!(ledger.overdue_transactions().is_empty());
    }

    #[test]
    fn test_pay_fine_is_idempotent() {
        let (mut ledger, _) = setup(LedgerPolicy::default());
        let t = ledger.issue(2, 1, day(1), day(10)).unwrap();

        let once = ledger.pay_fine(t.id).unwrap();
        let twice = ledger.pay_fine(t.id).unwrap();
        assert!(once.fine_paid);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_collect_fine_preconditions() {
        let (mut ledger, clock) = setup(LedgerPolicy::default());
        let t = ledger.issue(2, 1, day(1), day(10)).unwrap();

        assert!(matches!(
            ledger.collect_fine(t.id),
            Err(DomainError::Validation(_))
        ));

        clock.set(day(12));
        assert_eq!(ledger.collect_fine(t.id).unwrap(), 4.0);
        assert!(matches!(
            ledger.collect_fine(t.id),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_fines_disabled() {
        let policy = LedgerPolicy {
            fines_enabled: false,
            ..LedgerPolicy::default()
        };
        let (mut ledger, clock) = setup(policy);
        let t = ledger.issue(2, 1, day(1), day(10)).unwrap();
        clock.set(day(20));
        assert_eq!(ledger.calculate_fine(t.id).unwrap(), 0.0);
        // Overdue detection does not depend on fines
        assert_eq!(ledger.overdue_transactions().len(), 1);
    }

    #[test]
    fn test_borrow_limit_enforced() {
        let (mut ledger, _) = setup(LedgerPolicy::default());
        let mut info = ledger.library_info();
        info.max_books_per_student = 1;
        ledger.update_library_info(info).unwrap();

        ledger.issue(2, 1, day(1), day(10)).unwrap();
        let err = ledger.issue(2, 1, day(1), day(10)).unwrap_err();
        assert_eq!(
            err,
            DomainError::BorrowLimitReached {
                member_id: 1,
                limit: 1
            }
        );
        assert_eq!(ledger.member_borrowed_count(1), 1);
    }

    #[test]
    fn test_borrow_limit_informational_when_not_enforced() {
        let policy = LedgerPolicy {
            enforce_borrow_limit: false,
            ..LedgerPolicy::default()
        };
        let (mut ledger, _) = setup(policy);
        ledger.issue(2, 1, day(1), day(10)).unwrap();
        ledger.issue(2, 1, day(1), day(10)).unwrap();

        let mut info = ledger.library_info();
        info.max_books_per_student = 1;
        ledger.update_library_info(info).unwrap();
        assert_eq!(ledger.remaining_borrow_limit(1), -1);
    }

    #[test]
    fn test_member_transaction_filters() {
        let (mut ledger, clock) = setup(LedgerPolicy::default());
        let a = ledger.issue(2, 1, day(1), day(10)).unwrap();
        ledger.issue(2, 2, day(1), day(10)).unwrap();
        ledger.issue(1, 1, day(1), day(10)).unwrap();
        clock.set(day(3));
        ledger.return_transaction(a.id).unwrap();

        assert_eq!(ledger.member_transactions(1).len(), 2);
        assert_eq!(ledger.member_active_transactions(1).len(), 1);
        assert_eq!(ledger.active_transactions().len(), 2);
    }
}
