//! Request Service - acquisition requests submitted by members

use crate::domain::DomainError;
use crate::models::{BookRequest, RequestDraft, RequestStatus};
use crate::services::Ledger;

impl Ledger {
    pub fn submit_request(&mut self, draft: RequestDraft) -> Result<BookRequest, DomainError> {
        let draft = draft.normalize()?;
        let member_idx = self.member_index(draft.member_id)?;

        let request = BookRequest {
            id: self.request_ids.next_id(),
            member_id: draft.member_id,
            requester_name: self.members[member_idx].name.clone(),
            book_title: draft.book_title,
            author_name: draft.author_name,
            reason: draft.reason,
            request_date: self.today(),
            status: RequestStatus::Pending,
        };

        tracing::info!(
            "Book request submitted: id={}, member={}, title={:?}",
            request.id,
            request.member_id,
            request.book_title
        );
        self.requests.push(request.clone());
        Ok(request)
    }

    /// Approves or rejects a pending request. A request that was already
    /// decided is returned unchanged.
    pub fn decide_request(&mut self, id: i32, approve: bool) -> Result<BookRequest, DomainError> {
        let idx = self.request_index(id)?;
        let request = &mut self.requests[idx];

        if request.decide(approve) {
            tracing::info!("Book request {} {}", id, request.status);
        } else {
            tracing::debug!(
                "Book request {} already {}, decision ignored",
                id,
                request.status
            );
        }
        Ok(request.clone())
    }

    pub fn request(&self, id: i32) -> Result<BookRequest, DomainError> {
        let idx = self.request_index(id)?;
        Ok(self.requests[idx].clone())
    }

    pub fn requests(&self) -> Vec<BookRequest> {
        self.requests.clone()
    }

    pub fn pending_requests(&self) -> Vec<BookRequest> {
        self.requests
            .iter()
            .filter(|r| r.is_pending())
            .cloned()
            .collect()
    }

    pub fn member_book_requests(&self, member_id: i32) -> Vec<BookRequest> {
        self.requests
            .iter()
            .filter(|r| r.member_id == member_id)
            .cloned()
            .collect()
    }
}
