use serde::{Deserialize, Serialize};

/// A book record as stored by the collection service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier assigned by the collection service
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Whether the book can currently be lent
    pub available: bool,
}

/// Request model for creating a new book. Carries no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Whether the book can currently be lent
    #[serde(default = "NewBook::default_available")]
    pub available: bool,
}

impl NewBook {
    fn default_available() -> bool {
        true
    }

    pub fn with_id(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            available: self.available,
        }
    }
}

impl Default for NewBook {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            available: Self::default_available(),
        }
    }
}

/// Body of a delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookKey {
    pub id: String,
}
