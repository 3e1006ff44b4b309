//! Product CRUD handlers.
//!
//! Validation runs here, before anything reaches the repository; the
//! repository only sees payloads that already passed the domain rules.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use tienda_core::validation::{validate_new_product, validate_patch};
use tienda_core::{NewProduct, ProductPatch, ProductPlain, DEFAULT_LIMIT, DEFAULT_OFFSET};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Pagination query parameters with catalog defaults.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[serde(default = "default_offset")]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_offset() -> i64 {
    DEFAULT_OFFSET
}

impl Pagination {
    fn check(&self) -> ApiResult<()> {
        if self.limit < 0 || self.offset < 0 {
            return Err(ApiError::bad_request("limit and offset must not be negative"));
        }
        Ok(())
    }
}

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<ProductPlain>)> {
    validate_new_product(&payload)?;

    let created = state.db.products().create(payload).await?;
    debug!(id = %created.id, slug = %created.slug, "Product created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/products?limit=&offset=`
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<ProductPlain>>> {
    pagination.check()?;

    let page = state
        .db
        .products()
        .list(pagination.limit, pagination.offset)
        .await?;

    Ok(Json(page))
}

/// `GET /api/products/{term}` - term is a UUID, a title, or a slug.
pub async fn find_one(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> ApiResult<Json<ProductPlain>> {
    let product = state.db.products().find_one_plain(&term).await?;
    Ok(Json(product))
}

/// `PATCH /api/products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<ProductPlain>> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::bad_request("id must be a UUID"))?;
    validate_patch(&patch)?;

    let updated = state.db.products().update(id, patch).await?;
    debug!(id = %updated.id, "Product updated");

    Ok(Json(updated))
}

/// `DELETE /api/products/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.products().remove(&id).await?;
    debug!(%id, "Product removed");

    Ok(StatusCode::OK)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.limit, 10);
        assert_eq!(p.offset, 0);
        assert!(p.check().is_ok());
    }

    #[test]
    fn test_negative_pagination_rejected() {
        let p = Pagination {
            limit: -1,
            offset: 0,
        };
        assert!(p.check().is_err());
    }
}
