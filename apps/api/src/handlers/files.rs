//! File upload and download handlers.
//!
//! Upload accepts a single multipart field named `file`, stores the blob
//! under a generated name, and answers with an absolute URL that resolves
//! against the download route. Download streams the stored blob back without
//! buffering it in memory.

use std::io;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use tokio_util::io::ReaderStream;
use tracing::{debug, error};

use crate::error::{ApiError, ApiResult};
use crate::files::FileStore;
use crate::state::AppState;

/// Shapes the absolute URL for a stored file name.
fn file_url(host_api: &str, name: &str) -> String {
    format!("{}/files/product/{}", host_api.trim_end_matches('/'), name)
}

/// `POST /api/files/product` - multipart, field `file`.
///
/// Answers 201 with the absolute URL string as the body, nothing wrapped
/// around it.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let mimetype = field.content_type().unwrap_or_default().to_string();
        let Some(name) = FileStore::generate_name(&mimetype) else {
            return Err(ApiError::bad_request(
                "Make sure that the file is an image (jpg, jpeg, png, gif)",
            ));
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        state.files.save(&name, &bytes).await.map_err(|e| {
            error!(error = %e, "Failed to store uploaded file");
            ApiError::internal()
        })?;

        let secure_url = file_url(&state.config.host_api, &name);
        debug!(name, size = bytes.len(), "File uploaded");

        return Ok((StatusCode::CREATED, secure_url));
    }

    Err(ApiError::bad_request("Make sure that a file field is present"))
}

/// `GET /api/files/product/{image_name}` - streams the stored blob.
pub async fn download(
    State(state): State<AppState>,
    Path(image_name): Path<String>,
) -> ApiResult<Response> {
    let file = state.files.open(&image_name).await.map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ApiError::not_found(format!("No product found with image {}", image_name))
        } else {
            error!(error = %e, "Failed to open stored file");
            ApiError::internal()
        }
    })?;

    let stream = ReaderStream::new(file);
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, FileStore::content_type(&image_name))
        .body(Body::from_stream(stream))
        .map_err(|e| {
            error!(error = %e, "Failed to build file response");
            ApiError::internal()
        })?;

    Ok(response)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url_shape() {
        let url = file_url("http://localhost:3000/api", "cafe.png");
        assert_eq!(url, "http://localhost:3000/api/files/product/cafe.png");
    }

    #[test]
    fn test_file_url_tolerates_trailing_slash() {
        let url = file_url("http://localhost:3000/api/", "cafe.png");
        assert_eq!(url, "http://localhost:3000/api/files/product/cafe.png");
    }

    #[tokio::test]
    async fn test_upload_body_is_the_bare_url_string() {
        use axum::response::IntoResponse;

        let secure_url = file_url("http://localhost:3000/api", "cafe.png");
        let response = (StatusCode::CREATED, secure_url.clone()).into_response();

        assert_eq!(response.status(), StatusCode::CREATED);

        // Body is the URL itself, not a JSON wrapper around it
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], secure_url.as_bytes());
    }
}
