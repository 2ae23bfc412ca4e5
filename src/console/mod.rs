//! Library console: keeps a local copy of the book collection in step with
//! the collection service and drives the create/edit form.
//!
//! Every mutating action sends exactly one request and then reloads the whole
//! list; the list is never patched locally. Actions may overlap. Each reload
//! carries a sequence number, and a reload that resolves after a newer one
//! has been applied is dropped as stale.
//!
//! State belongs to one [`LibraryConsole`] instance, so any number of
//! consoles (one per session) can share a process.

pub mod error;
pub mod form;
pub mod service;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use tokio::{sync::RwLock, task::JoinHandle};

use crate::modules::books::models::Book;
use error::{ConsoleError, ConsoleResult};
use form::{Form, Mode, Submit};
use service::{BookService, HttpBookService};
use shelf_kernel::settings::{ConsoleSettings, FailurePolicy, ValidationPolicy};
use view::View;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleOptions {
    pub failure_policy: FailurePolicy,
    pub validation: ValidationPolicy,
}

impl From<&ConsoleSettings> for ConsoleOptions {
    fn from(settings: &ConsoleSettings) -> Self {
        Self {
            failure_policy: settings.failure_policy,
            validation: settings.validation,
        }
    }
}

/// Result of one list reload.
#[derive(Debug)]
pub enum Refresh {
    /// The response replaced the local list.
    Applied { seq: u64, books: usize },
    /// A newer reload was already applied; this response was dropped.
    Stale { seq: u64 },
    /// The reload failed and the previous list was kept.
    Failed { seq: u64, error: ConsoleError },
}

/// How an action ended.
#[derive(Debug)]
pub enum Settled {
    /// Nothing was sent and nothing changed.
    Skipped,
    /// The request completed (or failed, under the fire-and-forget policy)
    /// and the follow-up reload ran.
    Completed {
        failure: Option<ConsoleError>,
        refresh: Refresh,
    },
}

impl Settled {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Settled::Skipped)
    }

    pub fn failure(&self) -> Option<&ConsoleError> {
        match self {
            Settled::Completed { failure, .. } => failure.as_ref(),
            Settled::Skipped => None,
        }
    }

    pub fn refresh(&self) -> Option<&Refresh> {
        match self {
            Settled::Completed { refresh, .. } => Some(refresh),
            Settled::Skipped => None,
        }
    }
}

/// A user action that talks to the collection service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Update,
    Delete(String),
}

#[derive(Debug, Default)]
struct ConsoleState {
    books: Vec<Book>,
    form: Form,
    mounted: bool,
    issued_seq: u64,
    applied_seq: u64,
}

/// A console session bound to one collection service.
#[derive(Clone)]
pub struct LibraryConsole {
    service: Arc<dyn BookService>,
    options: ConsoleOptions,
    state: Arc<RwLock<ConsoleState>>,
}

impl std::fmt::Debug for LibraryConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryConsole")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl LibraryConsole {
    pub fn new(service: Arc<dyn BookService>, options: ConsoleOptions) -> Self {
        Self {
            service,
            options,
            state: Arc::new(RwLock::new(ConsoleState::default())),
        }
    }

    /// Console talking HTTP to the service configured in `settings`.
    pub fn connect(settings: &ConsoleSettings) -> ConsoleResult<Self> {
        let timeout = settings.request_timeout_ms.map(Duration::from_millis);
        let service = HttpBookService::new(&settings.base_url, timeout)?;
        tracing::info!(endpoint = %service.endpoint(), "console connected");
        Ok(Self::new(Arc::new(service), ConsoleOptions::from(settings)))
    }

    pub fn options(&self) -> ConsoleOptions {
        self.options
    }

    /// Initial load. Only the first call reaches the service.
    pub async fn mount(&self) -> Option<Refresh> {
        {
            let mut state = self.state.write().await;
            if state.mounted {
                return None;
            }
            state.mounted = true;
        }
        Some(self.load_list().await)
    }

    /// Fetch the whole collection and replace the local list with it.
    pub async fn load_list(&self) -> Refresh {
        let seq = {
            let mut state = self.state.write().await;
            state.issued_seq += 1;
            state.issued_seq
        };

        match self.service.list().await {
            Ok(mut books) => {
                let received = books.len();
                books.retain(|book| !book.id.is_empty());
                if books.len() != received {
                    tracing::warn!(
                        seq,
                        dropped = received - books.len(),
                        "dropped listed books without an id"
                    );
                }

                let mut state = self.state.write().await;
                if seq < state.applied_seq {
                    tracing::debug!(seq, applied = state.applied_seq, "stale reload dropped");
                    return Refresh::Stale { seq };
                }
                state.applied_seq = seq;
                state.books = books;
                tracing::debug!(seq, books = state.books.len(), "book list replaced");
                Refresh::Applied {
                    seq,
                    books: state.books.len(),
                }
            }
            Err(error) => {
                tracing::warn!(seq, error = %error, "reloading the book list failed");
                Refresh::Failed { seq, error }
            }
        }
    }

    /// Submit the new-book draft, then reload.
    pub async fn create_book(&self) -> ConsoleResult<Settled> {
        let draft = self.state.read().await.form.new_book().clone();
        form::validate(self.options.validation, &draft.title, &draft.author)?;

        tracing::info!(title = %draft.title, "creating book");
        let sent = self.service.create(&draft).await;
        self.settle(sent, Form::reset_new_book).await
    }

    /// Copy a listed record into the editing draft and switch to edit mode.
    /// The record is taken from the loaded list, not from `book` itself.
    pub async fn start_editing(&self, book: &Book) -> ConsoleResult<()> {
        self.start_editing_id(&book.id).await
    }

    /// [`Self::start_editing`] by id. Blank or unlisted ids leave the form
    /// untouched.
    pub async fn start_editing_id(&self, id: &str) -> ConsoleResult<()> {
        let mut state = self.state.write().await;
        let book = state
            .books
            .iter()
            .find(|book| !id.is_empty() && book.id == id)
            .cloned()
            .ok_or_else(|| ConsoleError::NotListed(id.to_string()))?;
        state.form.start_editing(&book);
        tracing::debug!(book_id = %id, "editing started");
        Ok(())
    }

    /// Leave edit mode without sending anything.
    pub async fn cancel_editing(&self) {
        self.state.write().await.form.finish_editing();
    }

    /// Send the editing draft, then reload and return to create mode.
    /// Without an edit target nothing is sent and nothing changes.
    pub async fn update_book(&self) -> ConsoleResult<Settled> {
        let Some(book) = self.state.read().await.form.editing().target() else {
            tracing::debug!("update skipped: no edit target");
            return Ok(Settled::Skipped);
        };
        form::validate(self.options.validation, &book.title, &book.author)?;

        tracing::info!(book_id = %book.id, "updating book");
        let sent = self.service.update(&book).await;
        self.settle(sent, Form::finish_editing).await
    }

    /// Delete by id, then reload. No confirmation step.
    pub async fn delete_book(&self, id: &str) -> ConsoleResult<Settled> {
        tracing::info!(book_id = %id, "deleting book");
        let sent = self.service.delete(id).await;
        self.settle(sent, |_| {}).await
    }

    /// Run the form's submit action for the current mode.
    pub async fn submit(&self) -> ConsoleResult<Settled> {
        let submit = self.state.read().await.form.submit();
        match submit {
            Submit::Create => self.create_book().await,
            Submit::Update => self.update_book().await,
        }
    }

    pub async fn dispatch(&self, action: Action) -> ConsoleResult<Settled> {
        match action {
            Action::Load => Ok(Settled::Completed {
                failure: None,
                refresh: self.load_list().await,
            }),
            Action::Create => self.create_book().await,
            Action::Update => self.update_book().await,
            Action::Delete(id) => self.delete_book(&id).await,
        }
    }

    /// Run `action` as its own task. Nothing is cancelled when the handle is
    /// dropped; the action still settles.
    pub fn spawn(&self, action: Action) -> JoinHandle<ConsoleResult<Settled>> {
        let console = self.clone();
        tokio::spawn(async move { console.dispatch(action).await })
    }

    pub async fn set_title(&self, title: impl Into<String>) {
        self.state.write().await.form.set_title(title);
    }

    pub async fn set_author(&self, author: impl Into<String>) {
        self.state.write().await.form.set_author(author);
    }

    pub async fn set_available(&self, available: bool) {
        self.state.write().await.form.set_available(available);
    }

    pub async fn books(&self) -> Vec<Book> {
        self.state.read().await.books.clone()
    }

    pub async fn form(&self) -> Form {
        self.state.read().await.form.clone()
    }

    pub async fn mode(&self) -> Mode {
        self.state.read().await.form.mode()
    }

    pub async fn view(&self) -> View {
        let state = self.state.read().await;
        view::render(&state.books, &state.form)
    }

    /// Apply the post-request steps shared by every mutation.
    ///
    /// Under [`FailurePolicy::FireAndForget`] the form transition happens
    /// whether or not the request went through. Under
    /// [`FailurePolicy::Strict`] a failure leaves the form untouched and is
    /// returned after the reload.
    async fn settle(
        &self,
        sent: ConsoleResult<()>,
        transition: impl FnOnce(&mut Form),
    ) -> ConsoleResult<Settled> {
        let failure = sent.err();
        if let Some(error) = &failure {
            tracing::warn!(
                error = %error,
                policy = ?self.options.failure_policy,
                "collection request failed"
            );
        }

        let strict = self.options.failure_policy == FailurePolicy::Strict;
        if failure.is_none() || !strict {
            transition(&mut self.state.write().await.form);
        }

        let refresh = self.load_list().await;

        match failure {
            Some(error) if strict => Err(error),
            failure => Ok(Settled::Completed { failure, refresh }),
        }
    }
}
