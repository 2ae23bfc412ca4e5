//! The dual-purpose book form.
//!
//! One form, two modes. In [`Mode::Create`] the inputs edit the new-book
//! draft and submitting creates a record; in [`Mode::Edit`] they edit a copy
//! of an existing record and submitting updates it. The new-book draft that
//! was in progress is kept aside while editing and comes back afterwards.

use crate::modules::books::models::{Book, NewBook};

use super::error::{ConsoleError, ConsoleResult};
use shelf_kernel::settings::ValidationPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit,
}

/// What pressing the form's submit button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    Create,
    Update,
}

/// Working copy of an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingBook {
    /// Id of the record being edited; `None` means there is no edit target.
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl EditingBook {
    /// The record to send, or `None` when there is no edit target.
    pub fn target(&self) -> Option<Book> {
        let id = self.id.as_deref().filter(|id| !id.is_empty())?;
        Some(Book {
            id: id.to_string(),
            title: self.title.clone(),
            author: self.author.clone(),
            available: self.available,
        })
    }
}

impl Default for EditingBook {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            author: String::new(),
            available: true,
        }
    }
}

impl From<&Book> for EditingBook {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id.clone()),
            title: book.title.clone(),
            author: book.author.clone(),
            available: book.available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    Creating(NewBook),
    Editing {
        draft: EditingBook,
        /// New-book draft parked until editing ends
        pending: NewBook,
    },
}

impl Default for Form {
    fn default() -> Self {
        Form::Creating(NewBook::default())
    }
}

impl Form {
    pub fn mode(&self) -> Mode {
        match self {
            Form::Creating(_) => Mode::Create,
            Form::Editing { .. } => Mode::Edit,
        }
    }

    pub fn submit(&self) -> Submit {
        match self {
            Form::Creating(_) => Submit::Create,
            Form::Editing { .. } => Submit::Update,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.submit() {
            Submit::Create => "Add a New Book",
            Submit::Update => "Update Book",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.submit() {
            Submit::Create => "Add Book",
            Submit::Update => "Update Book",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Form::Creating(draft) => &draft.title,
            Form::Editing { draft, .. } => &draft.title,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            Form::Creating(draft) => &draft.author,
            Form::Editing { draft, .. } => &draft.author,
        }
    }

    pub fn available(&self) -> bool {
        match self {
            Form::Creating(draft) => draft.available,
            Form::Editing { draft, .. } => draft.available,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        match self {
            Form::Creating(draft) => draft.title = title.into(),
            Form::Editing { draft, .. } => draft.title = title.into(),
        }
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        match self {
            Form::Creating(draft) => draft.author = author.into(),
            Form::Editing { draft, .. } => draft.author = author.into(),
        }
    }

    pub fn set_available(&mut self, available: bool) {
        match self {
            Form::Creating(draft) => draft.available = available,
            Form::Editing { draft, .. } => draft.available = available,
        }
    }

    /// The new-book draft, whether it is bound to the inputs or parked.
    pub fn new_book(&self) -> &NewBook {
        match self {
            Form::Creating(draft) => draft,
            Form::Editing { pending, .. } => pending,
        }
    }

    /// The editing draft; the null-id default outside edit mode.
    pub fn editing(&self) -> EditingBook {
        match self {
            Form::Creating(_) => EditingBook::default(),
            Form::Editing { draft, .. } => draft.clone(),
        }
    }

    pub fn reset_new_book(&mut self) {
        match self {
            Form::Creating(draft) => *draft = NewBook::default(),
            Form::Editing { pending, .. } => *pending = NewBook::default(),
        }
    }

    /// Bind the inputs to a copy of `book`. Editing another record while
    /// already editing replaces the draft. Callers outside the console go
    /// through `LibraryConsole::start_editing`, which checks the list.
    pub(crate) fn start_editing(&mut self, book: &Book) {
        let pending = self.new_book().clone();
        *self = Form::Editing {
            draft: EditingBook::from(book),
            pending,
        };
    }

    /// Leave edit mode, dropping the editing draft.
    pub fn finish_editing(&mut self) {
        if let Form::Editing { pending, .. } = self {
            *self = Form::Creating(std::mem::take(pending));
        }
    }
}

/// Check a draft's fields against the configured policy.
pub fn validate(policy: ValidationPolicy, title: &str, author: &str) -> ConsoleResult<()> {
    if policy == ValidationPolicy::None {
        return Ok(());
    }

    let missing: Vec<&str> = [("title", title), ("author", author)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConsoleError::Validation(format!(
            "{} must not be blank",
            missing.join(" and ")
        )))
    }
}
