use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Penalty charged for each full calendar day past the due date
pub const FINE_PER_DAY: f64 = 2.0;

/// Loan length offered by the issue desk when none is given
pub const DEFAULT_LOAN_DAYS: u32 = 14;
pub const MAX_LOAN_DAYS: u32 = 60;

/// One copy of one book lent to one member.
///
/// Book title and member name are captured at issue time so the loan stays
/// readable after the catalogue entry or membership is removed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transaction {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub book_title: String,
    pub member_name: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub fine_paid: bool,
}

impl Transaction {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.is_returned() && today > self.due_date
    }

    /// Whole days between the due date and the return (or `today` while open).
    /// Negative when the loan ended or is evaluated before the due date.
    pub fn days_overdue_on(&self, today: NaiveDate) -> i64 {
        let end = self.return_date.unwrap_or(today);
        (end - self.due_date).num_days()
    }

    pub fn fine_on(&self, today: NaiveDate) -> f64 {
        let days = self.days_overdue_on(today).max(0);
        days as f64 * FINE_PER_DAY
    }

    pub fn status_on(&self, today: NaiveDate) -> TransactionStatus {
        if self.is_returned() {
            TransactionStatus::Returned
        } else if self.is_overdue_on(today) {
            TransactionStatus::Overdue
        } else {
            TransactionStatus::Active
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TransactionStatus {
    Active,
    Overdue,
    Returned,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Active => "Active",
            TransactionStatus::Overdue => "Overdue",
            TransactionStatus::Returned => "Returned",
        };
        f.write_str(label)
    }
}

/// Loan enriched with the date-dependent values, as shown to callers
#[derive(Clone, Debug, Serialize)]
pub struct LoanDetails {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub status: TransactionStatus,
    pub fine: f64,
}
