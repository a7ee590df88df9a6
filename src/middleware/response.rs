use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Successful JSON response with an optional `Location` header
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
    pub location: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code,
            location: None,
        }
    }

    /// 201 Created pointing at the new resource
    pub fn created(data: T, location: impl Into<String>) -> Self {
        Self {
            data,
            status_code: StatusCode::CREATED,
            location: Some(location.into()),
        }
    }
}

impl ApiResponse<()> {
    /// 204 No Content (data will be ignored)
    pub fn no_content() -> Self {
        ApiResponse::with_status((), StatusCode::NO_CONTENT)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        if self.status_code == StatusCode::NO_CONTENT {
            return self.status_code.into_response();
        }

        let mut response = (self.status_code, Json(self.data)).into_response();
        if let Some(location) = self.location {
            match location.parse::<HeaderValue>() {
                Ok(value) => {
                    response.headers_mut().insert(header::LOCATION, value);
                }
                Err(e) => tracing::warn!("Dropping invalid Location header {:?}: {}", location, e),
            }
        }
        response
    }
}

/// Joins the collection path a request was made to with a new resource id,
/// e.g. `/api/folders` + `7` -> `/api/folders/7`.
pub fn resource_location(collection_path: &str, id: i64) -> String {
    format!("{}/{}", collection_path.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_sets_location() {
        let response = ApiResponse::created(serde_json::json!({"id": 7}), "/api/folders/7").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/folders/7");
    }

    #[test]
    fn no_content_has_no_location() {
        let response = ApiResponse::no_content().into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn joins_location_paths() {
        assert_eq!(resource_location("/api/notes", 3), "/api/notes/3");
        assert_eq!(resource_location("/api/notes/", 3), "/api/notes/3");
        assert_eq!(resource_location("/folders", 12), "/folders/12");
    }
}
