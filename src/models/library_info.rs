use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Desk-wide settings, replaced wholesale when staff save them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LibraryInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub weekday_hours: String,
    pub saturday_hours: String,
    pub sunday_hours: String,
    pub max_books_per_student: i32,
}

impl Default for LibraryInfo {
    fn default() -> Self {
        Self {
            name: "Central Public Library".to_string(),
            address: "123 Library Street, Knowledge City, KC 12345".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            email: "info@centrallibrary.edu".to_string(),
            weekday_hours: "8:00 AM - 8:00 PM".to_string(),
            saturday_hours: "9:00 AM - 5:00 PM".to_string(),
            sunday_hours: "Closed".to_string(),
            max_books_per_student: 5,
        }
    }
}

impl LibraryInfo {
    pub(crate) fn normalize(self) -> Result<Self, DomainError> {
        if self.max_books_per_student < 1 {
            return Err(DomainError::validation(
                "Max books per student must be at least 1",
            ));
        }

        Ok(Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            weekday_hours: self.weekday_hours.trim().to_string(),
            saturday_hours: self.saturday_hours.trim().to_string(),
            sunday_hours: self.sunday_hours.trim().to_string(),
            max_books_per_student: self.max_books_per_student,
        })
    }
}
