//! In-memory book storage backing the collection endpoints.

use tokio::sync::RwLock;

use super::models::{Book, NewBook};

#[derive(Debug, Default)]
struct Shelf {
    books: Vec<Book>,
    last_id: u64,
}

/// Insertion-ordered book storage. Ids are decimal strings from a counter
/// that never reuses a value, even after deletes.
#[derive(Debug, Default)]
pub struct BookStore {
    shelf: RwLock<Shelf>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All books in insertion order
    pub async fn list(&self) -> Vec<Book> {
        self.shelf.read().await.books.clone()
    }

    /// Store a new book and return it with its assigned id
    pub async fn create(&self, draft: NewBook) -> Book {
        let mut shelf = self.shelf.write().await;
        shelf.last_id += 1;
        let book = draft.with_id(shelf.last_id.to_string());
        shelf.books.push(book.clone());
        book
    }

    /// Replace the record with the same id. `None` when no such record exists.
    pub async fn update(&self, book: Book) -> Option<Book> {
        let mut shelf = self.shelf.write().await;
        let slot = shelf.books.iter_mut().find(|stored| stored.id == book.id)?;
        *slot = book.clone();
        Some(book)
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> bool {
        let mut shelf = self.shelf.write().await;
        let before = shelf.books.len();
        shelf.books.retain(|book| book.id != id);
        shelf.books.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, author: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            available: true,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids_in_insertion_order() {
        let store = BookStore::new();
        store.create(draft("Dune", "Herbert")).await;
        store.create(draft("Emma", "Austen")).await;

        let books = store.list().await;
        let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(books[1].title, "Emma");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = BookStore::new();
        let first = store.create(draft("Dune", "Herbert")).await;
        assert!(store.delete(&first.id).await);

        let second = store.create(draft("Emma", "Austen")).await;
        assert_eq!(second.id, "2");
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let store = BookStore::new();
        store.create(draft("Dune", "Herbert")).await;
        store.create(draft("Emma", "Austen")).await;

        let updated = store
            .update(Book {
                id: "1".to_string(),
                title: "Dune Messiah".to_string(),
                author: "Herbert".to_string(),
                available: false,
            })
            .await;
        assert!(updated.is_some());

        let books = store.list().await;
        assert_eq!(books[0].title, "Dune Messiah");
        assert!(!books[0].available);
        assert_eq!(books[1].title, "Emma");
    }

    #[tokio::test]
    async fn unknown_ids_are_reported() {
        let store = BookStore::new();
        assert!(!store.delete("42").await);
        assert!(store
            .update(draft("Ghost", "Nobody").with_id("42".to_string()))
            .await
            .is_none());
    }
}
