//! Lending Ledger - the single owner of all lending-desk state
//!
//! Every collection lives here and is only reachable through the operations
//! in the sibling service modules (`book_service`, `loan_service`, ...), each
//! of which adds an `impl Ledger` block. Reads hand out clones, so callers can
//! never reach into the ledger's own records.
//!
//! A ledger is plain data with `&mut self` mutations. Sharing it between
//! request handlers is the composition root's job (one lock per instance, see
//! `infrastructure::state`).

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::{Clock, DomainError, SystemClock};
use crate::models::{Book, BookRequest, LibraryInfo, Member, Transaction};

/// Runtime switches for the optional rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPolicy {
    /// When off, every loan carries a zero fine
    pub fines_enabled: bool,
    /// When on, `issue` refuses loans past `max_books_per_student`
    pub enforce_borrow_limit: bool,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            fines_enabled: true,
            enforce_borrow_limit: true,
        }
    }
}

/// Per-kind id sequence. Starts at 1 and never hands out a value twice.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IdSequence {
    next: i32,
}

impl IdSequence {
    fn new() -> Self {
        Self { next: 1 }
    }

    /// Only called once every precondition of the creating operation holds.
    pub(crate) fn next_id(&mut self) -> i32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

pub struct Ledger {
    pub(crate) books: Vec<Book>,
    pub(crate) members: Vec<Member>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) requests: Vec<BookRequest>,
    pub(crate) library_info: LibraryInfo,
    pub(crate) book_ids: IdSequence,
    pub(crate) member_ids: IdSequence,
    pub(crate) transaction_ids: IdSequence,
    pub(crate) request_ids: IdSequence,
    policy: LedgerPolicy,
    clock: Arc<dyn Clock>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerPolicy::default(), Arc::new(SystemClock))
    }
}

impl Ledger {
    pub fn new(policy: LedgerPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            books: Vec::new(),
            members: Vec::new(),
            transactions: Vec::new(),
            requests: Vec::new(),
            library_info: LibraryInfo::default(),
            book_ids: IdSequence::new(),
            member_ids: IdSequence::new(),
            transaction_ids: IdSequence::new(),
            request_ids: IdSequence::new(),
            policy,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    pub fn fines_enabled(&self) -> bool {
        cfg!(feature = "fines") && self.policy.fines_enabled
    }

    pub fn library_info(&self) -> LibraryInfo {
        self.library_info.clone()
    }

    /// Replaces the settings record as a whole
    pub fn update_library_info(&mut self, info: LibraryInfo) -> Result<LibraryInfo, DomainError> {
        let info = info.normalize()?;
        tracing::info!(
            "Library settings updated: name={:?}, max_books_per_student={}",
            info.name,
            info.max_books_per_student
        );
        self.library_info = info.clone();
        Ok(info)
    }

    pub(crate) fn book_index(&self, id: i32) -> Result<usize, DomainError> {
        self.books
            .iter()
            .position(|b| b.id == id)
            .ok_or(DomainError::not_found("Book", id))
    }

    pub(crate) fn member_index(&self, id: i32) -> Result<usize, DomainError> {
        self.members
            .iter()
            .position(|m| m.id == id)
            .ok_or(DomainError::not_found("Member", id))
    }

    pub(crate) fn transaction_index(&self, id: i32) -> Result<usize, DomainError> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(DomainError::not_found("Transaction", id))
    }

    pub(crate) fn request_index(&self, id: i32) -> Result<usize, DomainError> {
        self.requests
            .iter()
            .position(|r| r.id == id)
            .ok_or(DomainError::not_found("Book request", id))
    }
}
