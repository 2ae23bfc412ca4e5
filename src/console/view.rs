//! Rendering of console state into a plain view model.

use std::fmt;

use super::form::{Form, Mode};
use crate::modules::books::models::Book;

pub const HEADING: &str = "Book Library";
pub const LIST_HEADING: &str = "All Books";

/// One list row with its Edit/Delete target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: Mode,
    pub heading: &'static str,
    pub title: String,
    pub author: String,
    pub available: bool,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub rows: Vec<Row>,
    pub form: FormView,
}

pub fn availability(available: bool) -> &'static str {
    if available {
        "Available"
    } else {
        "Not Available"
    }
}

pub fn row(book: &Book) -> Row {
    Row {
        id: book.id.clone(),
        label: format!(
            "{} by {} - {}",
            book.title,
            book.author,
            availability(book.available)
        ),
    }
}

/// Render the list and whichever draft the form is bound to.
pub fn render(books: &[Book], form: &Form) -> View {
    View {
        rows: books.iter().map(row).collect(),
        form: FormView {
            mode: form.mode(),
            heading: form.heading(),
            title: form.title().to_string(),
            author: form.author().to_string(),
            available: form.available(),
            submit_label: form.submit_label(),
        },
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADING}")?;
        writeln!(f)?;
        writeln!(f, "{LIST_HEADING}")?;
        if self.rows.is_empty() {
            writeln!(f, "  (no books)")?;
        }
        for row in &self.rows {
            writeln!(f, "  [{}] {}  (edit {0} | delete {0})", row.id, row.label)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.form.heading)?;
        writeln!(f, "  Book Title: {}", self.form.title)?;
        writeln!(f, "  Author:     {}", self.form.author)?;
        writeln!(f, "  ({})", availability(self.form.available))?;
        write!(f, "  [{}]", self.form.submit_label)
    }
}
