//! Route table.
//!
//! Everything hangs off the `/api` prefix:
//!
//! ```text
//! POST   /api/products                      create
//! GET    /api/products?limit=&offset=       list
//! GET    /api/products/{term}               find by id / title / slug
//! PATCH  /api/products/{id}                 update (tx with image replacement)
//! DELETE /api/products/{id}                 remove
//! POST   /api/files/product                 multipart upload
//! GET    /api/files/product/{image_name}    download (streamed)
//! POST   /api/seed                          repopulate from fixture
//! ```

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{files, products, seed};
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/products", post(products::create).get(products::list))
        .route(
            "/products/{term}",
            get(products::find_one)
                .patch(products::update)
                .delete(products::remove),
        )
        .route("/files/product", post(files::upload))
        .route("/files/product/{image_name}", get(files::download))
        .route("/seed", post(seed::run));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
