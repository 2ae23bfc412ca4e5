//! The console's view of the remote book collection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use super::error::{ConsoleError, ConsoleResult};
use crate::modules::books::models::{Book, BookKey, NewBook};

/// Collection path relative to the service root
pub const BOOKS_PATH: &str = "/api/books";

/// The four calls the console makes against the collection service.
/// Mutating calls only report whether they went through.
#[async_trait]
pub trait BookService: Send + Sync {
    async fn list(&self) -> ConsoleResult<Vec<Book>>;

    async fn create(&self, draft: &NewBook) -> ConsoleResult<()>;

    async fn update(&self, book: &Book) -> ConsoleResult<()>;

    async fn delete(&self, id: &str) -> ConsoleResult<()>;
}

/// JSON-over-HTTP client for the collection service.
#[derive(Debug, Clone)]
pub struct HttpBookService {
    client: Client,
    endpoint: String,
}

impl HttpBookService {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ConsoleResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), BOOKS_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        &self,
        method: &'static str,
        request: RequestBuilder,
    ) -> ConsoleResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(
            method,
            url = %self.endpoint,
            status = status.as_u16(),
            "collection responded"
        );

        if !status.is_success() {
            return Err(ConsoleError::Status {
                method,
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl BookService for HttpBookService {
    async fn list(&self) -> ConsoleResult<Vec<Book>> {
        let response = self.send("GET", self.client.get(&self.endpoint)).await?;
        Ok(response.json::<Vec<Book>>().await?)
    }

    async fn create(&self, draft: &NewBook) -> ConsoleResult<()> {
        self.send("POST", self.client.post(&self.endpoint).json(draft))
            .await?;
        Ok(())
    }

    async fn update(&self, book: &Book) -> ConsoleResult<()> {
        self.send("PUT", self.client.put(&self.endpoint).json(book))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ConsoleResult<()> {
        let key = BookKey { id: id.to_string() };
        self.send("DELETE", self.client.delete(&self.endpoint).json(&key))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let service = HttpBookService::new("http://127.0.0.1:8080/", None).unwrap();
        assert_eq!(service.endpoint(), "http://127.0.0.1:8080/api/books");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Port 9 (discard) is closed on loopback in test environments.
        let service =
            HttpBookService::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();

        let err = service.list().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Transport(_)));
    }
}
