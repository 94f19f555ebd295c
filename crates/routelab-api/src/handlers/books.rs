//! Book handler.

use axum::Json;
use routelab_models::{Book, BookRequest};

use crate::extract::ValidatedJson;

pub async fn create_book(ValidatedJson(request): ValidatedJson<BookRequest>) -> Json<Book> {
    Json(Book::from(request))
}
