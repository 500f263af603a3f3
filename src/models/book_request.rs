use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::DomainError;

/// A member's proposal to acquire a title the library does not hold
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookRequest {
    pub id: i32,
    pub member_id: i32,
    pub requester_name: String,
    pub book_title: String,
    pub author_name: String,
    pub reason: String,
    pub request_date: NaiveDate,
    pub status: RequestStatus,
}

impl BookRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Moves a pending request to its final state. Decided requests stay put.
    pub(crate) fn decide(&mut self, approve: bool) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = if approve {
            RequestStatus::Approved
        } else {
            RequestStatus::Rejected
        };
        true
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestDraft {
    pub member_id: i32,
    pub book_title: String,
    pub author_name: String,
    #[serde(default)]
    pub reason: String,
}

impl RequestDraft {
    pub(crate) fn normalize(self) -> Result<Self, DomainError> {
        let book_title = self.book_title.trim().to_string();
        let author_name = self.author_name.trim().to_string();
        if book_title.is_empty() || author_name.is_empty() {
            return Err(DomainError::validation(
                "Please enter book title and author",
            ));
        }

        Ok(Self {
            member_id: self.member_id,
            book_title,
            author_name,
            reason: self.reason.trim().to_string(),
        })
    }
}
