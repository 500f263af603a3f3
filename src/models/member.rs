use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub member_since: NaiveDate,
}

impl Member {
    pub(crate) fn from_draft(id: i32, draft: MemberDraft, today: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            member_since: draft.member_since.unwrap_or(today),
        }
    }
}

// Input for registering or replacing a member
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberDraft {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Defaults to the registration day when absent
    #[serde(default)]
    pub member_since: Option<NaiveDate>,
}

impl MemberDraft {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: String::new(),
            member_since: None,
        }
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.member_since = Some(date);
        self
    }

    pub(crate) fn normalize(self) -> Result<Self, DomainError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Name is required"));
        }

        Ok(Self {
            name,
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            member_since: self.member_since,
        })
    }
}
