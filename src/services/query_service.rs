//! Dashboard counters computed over the whole ledger

use serde::Serialize;

use crate::services::Ledger;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub total_members: usize,
    pub active_loans: usize,
    pub overdue_loans: usize,
    pub total_fines_collected: f64,
    pub outstanding_fines: f64,
    pub pending_requests: usize,
}

impl Ledger {
    pub fn total_books(&self) -> usize {
        self.books.len()
    }

    pub fn total_members(&self) -> usize {
        self.members.len()
    }

    pub fn active_loans_count(&self) -> usize {
        self.transactions.iter().filter(|t| !t.is_returned()).count()
    }

    pub fn overdue_count(&self) -> usize {
        let today = self.today();
        self.transactions
            .iter()
            .filter(|t| t.is_overdue_on(today))
            .count()
    }

    pub fn total_fines_collected(&self) -> f64 {
        self.sum_fines(true)
    }

    pub fn total_outstanding_fines(&self) -> f64 {
        self.sum_fines(false)
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            total_books: self.total_books(),
            total_members: self.total_members(),
            active_loans: self.active_loans_count(),
            overdue_loans: self.overdue_count(),
            total_fines_collected: self.total_fines_collected(),
            outstanding_fines: self.total_outstanding_fines(),
            pending_requests: self.requests.iter().filter(|r| r.is_pending()).count(),
        }
    }

    fn sum_fines(&self, paid: bool) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.fine_paid == paid)
            .map(|t| self.fine_of(t))
            .filter(|fine| *fine > 0.0)
            .sum()
    }
}
