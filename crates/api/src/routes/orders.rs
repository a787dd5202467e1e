//! Order placement and order history endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{OrderId, UserId};
use domain::{CreateOrderRequest, OrderService};
use order_store::{MenuCatalog, Order, OrderStore};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub service: OrderService<S>,
}

/// POST /api/orders — place a new order.
///
/// Responds 201 with the persisted order (including its items and
/// server-assigned ids); validation failures map to 400.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: MenuCatalog + OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.service.create_order(req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{id} — load a single order by id.
#[tracing::instrument(skip(state))]
pub async fn get<S: MenuCatalog + OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i32>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .service
        .find_order_by_id(OrderId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;
    Ok(Json(order))
}

/// GET /api/orders/user/{user_id} — all orders placed by a user.
#[tracing::instrument(skip(state))]
pub async fn by_user<S: MenuCatalog + OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state
        .service
        .find_orders_by_user(UserId::new(user_id))
        .await?;
    Ok(Json(orders))
}
