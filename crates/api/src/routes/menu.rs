//! Menu catalog endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use order_store::{MenuCatalog, MenuItem, OrderStore};

use crate::error::ApiError;
use crate::routes::orders::AppState;

/// GET /api/menu — the full menu catalog.
#[tracing::instrument(skip(state))]
pub async fn list<S: MenuCatalog + OrderStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let menu = state.service.find_all_menu_items().await?;
    Ok(Json(menu))
}
