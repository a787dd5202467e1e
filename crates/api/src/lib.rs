//! HTTP API server for the restaurant orders service.
//!
//! Exposes menu retrieval and order placement over REST, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::OrderService;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{MenuCatalog, OrderStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: MenuCatalog + OrderStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/menu", get(routes::menu::list::<S>))
        .route("/api/orders", post(routes::orders::create::<S>))
        .route("/api/orders/user/{user_id}", get(routes::orders::by_user::<S>))
        .route("/api/orders/{id}", get(routes::orders::get::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the shared application state around a store.
pub fn create_state<S: MenuCatalog + OrderStore>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        service: OrderService::new(store),
    })
}
