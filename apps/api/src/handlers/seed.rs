//! Seed handler.

use axum::extract::State;
use tracing::info;

use tienda_db::SeedRunner;

use crate::error::ApiResult;
use crate::state::AppState;

/// `POST /api/seed` - wipes the catalog and repopulates it from the fixture.
pub async fn run(State(state): State<AppState>) -> ApiResult<&'static str> {
    let seeded = SeedRunner::new(state.db.products()).run().await?;
    info!(seeded, "Seed executed");

    Ok("Seed executed")
}
