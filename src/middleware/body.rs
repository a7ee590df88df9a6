use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json<T>` whose rejections use the API's `{ "error": { "message" } }` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
