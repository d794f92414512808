use axum::{extract::State, routing::get, Router};
use std::sync::Arc;

use super::Page;
use crate::{
    error::AppResult,
    middleware::Flashes,
    schedule,
    services::catalog::{self, Dashboard},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

// GET /
// Latest venues and artists, and the shows coming up next
async fn index(State(state): State<Arc<AppState>>, flashes: Flashes) -> AppResult<Page<Dashboard>> {
    let dashboard = catalog::dashboard(&state.db, schedule::now()).await?;
    Ok(Page::new(dashboard, flashes))
}
