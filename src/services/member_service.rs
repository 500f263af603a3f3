//! Member Service - membership records and per-member borrowing figures

use crate::domain::DomainError;
use crate::models::{Member, MemberDraft};
use crate::services::Ledger;

impl Ledger {
    pub fn add_member(&mut self, draft: MemberDraft) -> Result<Member, DomainError> {
        let draft = draft.normalize()?;
        let today = self.today();
        let member = Member::from_draft(self.member_ids.next_id(), draft, today);

        tracing::info!("Member added: id={}, name={:?}", member.id, member.name);
        self.members.push(member.clone());
        Ok(member)
    }

    /// Replaces the stored record. A draft without `member_since` keeps the
    /// original registration date.
    pub fn update_member(&mut self, id: i32, draft: MemberDraft) -> Result<Member, DomainError> {
        let idx = self.member_index(id)?;
        let draft = draft.normalize()?;

        let since = self.members[idx].member_since;
        let member = Member::from_draft(id, draft, since);

        tracing::info!("Member updated: id={}, name={:?}", member.id, member.name);
        self.members[idx] = member.clone();
        Ok(member)
    }

    /// Removes a member who holds no books. Their closed loans and requests
    /// keep the name captured when they were created.
    pub fn delete_member(&mut self, id: i32) -> Result<(), DomainError> {
        let idx = self.member_index(id)?;

        let borrowed = self.member_borrowed_count(id);
        if borrowed > 0 {
            tracing::warn!("Refusing to delete member {}: {} books out", id, borrowed);
            return Err(DomainError::InUse(format!(
                "Member {} still has {} books on loan",
                id, borrowed
            )));
        }

        let removed = self.members.remove(idx);
        tracing::info!("Member deleted: id={}, name={:?}", removed.id, removed.name);
        Ok(())
    }

    pub fn member(&self, id: i32) -> Result<Member, DomainError> {
        let idx = self.member_index(id)?;
        Ok(self.members[idx].clone())
    }

    pub fn members(&self) -> Vec<Member> {
        self.members.clone()
    }

    /// Number of loans the member has not returned yet
    pub fn member_borrowed_count(&self, member_id: i32) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.member_id == member_id && !t.is_returned())
            .count()
    }

    /// `max_books_per_student - borrowed`. Not clamped: goes negative when
    /// the limit is lowered below what the member already holds.
    pub fn remaining_borrow_limit(&self, member_id: i32) -> i32 {
        let borrowed = i32::try_from(self.member_borrowed_count(member_id)).unwrap_or(i32::MAX);
        self.library_info.max_books_per_student - borrowed
    }

    /// Unpaid fines across all of the member's loans
    pub fn member_total_fines(&self, member_id: i32) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.member_id == member_id && !t.fine_paid)
            .map(|t| self.fine_of(t))
            .filter(|fine| *fine > 0.0)
            .sum()
    }
}
