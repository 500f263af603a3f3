use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_GENRE: &str = "General";

/// A catalogue title with a number of physical copies.
///
/// Copy counts are only changed by the ledger, which keeps
/// `0 <= available_quantity <= quantity` at all times.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub section: String,
    pub shelf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebook_url: Option<String>,
    pub(crate) quantity: i32,
    pub(crate) available_quantity: i32,
}

impl Book {
    pub(crate) fn from_draft(id: i32, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            isbn: draft.isbn,
            section: draft.section,
            shelf: draft.shelf,
            genre: draft.genre,
            ebook_url: draft.ebook_url,
            quantity: draft.quantity,
            available_quantity: draft.quantity,
        }
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn available_quantity(&self) -> i32 {
        self.available_quantity
    }

    pub fn on_loan(&self) -> i32 {
        self.quantity - self.available_quantity
    }

    pub fn is_available(&self) -> bool {
        self.available_quantity > 0
    }

    pub fn is_ebook(&self) -> bool {
        self.ebook_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Genre as displayed, falling back to the catch-all shelf label
    pub fn genre_label(&self) -> &str {
        self.genre.as_deref().unwrap_or(DEFAULT_GENRE)
    }

    pub fn location(&self) -> String {
        format!("{} - Shelf {}", self.section, self.shelf)
    }

    pub fn status_label(&self) -> String {
        if self.available_quantity > 0 {
            format!("Available ({}/{})", self.available_quantity, self.quantity)
        } else {
            "All Borrowed".to_string()
        }
    }

    /// Takes one copy off the shelf. Returns false when none is left.
    pub(crate) fn borrow_copy(&mut self) -> bool {
        if self.available_quantity > 0 {
            self.available_quantity -= 1;
            true
        } else {
            false
        }
    }

    /// Puts one copy back. Returns false when every copy is already shelved.
    pub(crate) fn return_copy(&mut self) -> bool {
        if self.available_quantity < self.quantity {
            self.available_quantity += 1;
            true
        } else {
            false
        }
    }

    /// Case-insensitive substring match; `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str, field: SearchField) -> bool {
        let hit = |value: &str| value.to_lowercase().contains(needle);
        match field {
            SearchField::Title => hit(&self.title),
            SearchField::Author => hit(&self.author),
            SearchField::Isbn => hit(&self.isbn),
            SearchField::Section => hit(&self.section),
            SearchField::Genre => hit(self.genre_label()),
            SearchField::All => {
                hit(&self.title)
                    || hit(&self.author)
                    || hit(&self.isbn)
                    || hit(&self.section)
                    || hit(self.genre_label())
            }
        }
    }
}

/// Which attribute a catalogue search looks at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    All,
    Title,
    Author,
    Isbn,
    Section,
    Genre,
}

impl SearchField {
    /// Unknown names fall back to searching every field.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "title" => SearchField::Title,
            "author" => SearchField::Author,
            "isbn" => SearchField::Isbn,
            "section" => SearchField::Section,
            "genre" => SearchField::Genre,
            _ => SearchField::All,
        }
    }
}

// Input for creating or replacing a book
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub shelf: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub ebook_url: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

impl BookDraft {
    pub fn new(title: &str, author: &str, quantity: i32) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: String::new(),
            section: String::new(),
            shelf: String::new(),
            genre: None,
            ebook_url: None,
            quantity,
        }
    }

    pub fn isbn(mut self, isbn: &str) -> Self {
        self.isbn = isbn.to_string();
        self
    }

    pub fn located(mut self, section: &str, shelf: &str) -> Self {
        self.section = section.to_string();
        self.shelf = shelf.to_string();
        self
    }

    pub fn genre(mut self, genre: &str) -> Self {
        self.genre = Some(genre.to_string());
        self
    }

    /// Trims every text field, drops blank optionals and checks required ones.
    pub(crate) fn normalize(self) -> Result<Self, DomainError> {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let draft = Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            section: self.section.trim().to_string(),
            shelf: self.shelf.trim().to_string(),
            genre: non_blank(self.genre),
            ebook_url: non_blank(self.ebook_url),
            quantity: self.quantity,
        };

        if draft.title.is_empty() || draft.author.is_empty() {
            return Err(DomainError::validation("Title and Author are required"));
        }
        if draft.quantity < 1 {
            return Err(DomainError::validation("Quantity must be at least 1"));
        }

        Ok(draft)
    }
}
