//! Request payloads for the order creation operation.

use common::{MenuItemId, UserId};
use serde::Deserialize;

/// A request to create a new order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// The user placing the order; not validated against any user store.
    pub user_id: UserId,
    /// The requested lines, in order. Duplicate menu item references are
    /// kept as separate lines.
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrderRequest {
    pub fn new(user_id: UserId, items: Vec<OrderItemRequest>) -> Self {
        Self { user_id, items }
    }
}

/// One requested line: which menu item, and how many.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

impl OrderItemRequest {
    pub fn new(menu_item_id: MenuItemId, quantity: u32) -> Self {
        Self {
            menu_item_id,
            quantity,
        }
    }
}
