//! Errors surfaced by the library console.

use thiserror::Error;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request never produced a usable response: connection failure,
    /// timeout, or a body that did not decode.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} {url} returned status {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("book '{0}' is not in the loaded list")]
    NotListed(String),
}
