//! HTTP handlers for the book collection: one path, four verbs.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shelf_http::error::AppError;

use super::models::{Book, BookKey, NewBook};
use super::store::BookStore;

/// Build the books router with its store attached.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_books)
                .post(create_book)
                .put(update_book)
                .delete(delete_book),
        )
        .route("/health", get(health_check))
        .with_state(store)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(State(store): State<Arc<BookStore>>) -> Json<Vec<Book>> {
    Json(store.list().await)
}

async fn create_book(
    State(store): State<Arc<BookStore>>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(draft) = payload?;
    let book = store.create(draft).await;
    tracing::info!(book_id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(book) = payload?;
    let id = book.id.clone();
    let updated = store
        .update(book)
        .await
        .ok_or_else(|| AppError::not_found(format!("book '{}' does not exist", id)))?;
    tracing::info!(book_id = %id, "book updated");
    Ok(Json(updated))
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    payload: Result<Json<BookKey>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(BookKey { id }) = payload?;
    if !store.delete(&id).await {
        return Err(AppError::not_found(format!("book '{}' does not exist", id)));
    }
    tracing::info!(book_id = %id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
    };
    use tower::ServiceExt;

    fn json_request(method: Method, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seeded() -> Arc<BookStore> {
        let store = Arc::new(BookStore::new());
        store
            .create(NewBook {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                available: true,
            })
            .await;
        store
    }

    #[tokio::test]
    async fn list_returns_books_as_json_array() {
        let app = router(seeded().await);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!([
                {"id": "1", "title": "Dune", "author": "Herbert", "available": true}
            ])
        );
    }

    #[tokio::test]
    async fn create_assigns_an_id_and_accepts_empty_fields() {
        let store = Arc::new(BookStore::new());
        let app = router(store.clone());

        let response = app
            .oneshot(json_request(
                Method::POST,
                serde_json::json!({"title": "", "author": "", "available": true}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], "1");
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_the_identified_record() {
        let store = seeded().await;
        let app = router(store.clone());

        let response = app
            .oneshot(json_request(
                Method::PUT,
                serde_json::json!({
                    "id": "1", "title": "Dune Messiah", "author": "Herbert", "available": true
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.list().await[0].title, "Dune Messiah");
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let app = router(seeded().await);

        let response = app
            .oneshot(json_request(
                Method::PUT,
                serde_json::json!({"id": "9", "title": "X", "author": "Y", "available": true}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn delete_removes_by_id_from_body() {
        let store = seeded().await;
        let app = router(store.clone());

        let response = app
            .oneshot(json_request(Method::DELETE, serde_json::json!({"id": "1"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let app = router(seeded().await);

        let response = app
            .oneshot(json_request(Method::DELETE, serde_json::json!({"key": 1})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "invalid_body");
    }
}
