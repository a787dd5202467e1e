use std::collections::HashMap;

use async_trait::async_trait;
use common::{MenuItemId, OrderId, UserId};

use crate::{MenuItem, NewMenuItem, NewOrder, Order, Result};

/// Read access to the menu catalog.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// Resolves a set of menu item ids to their catalog rows.
    ///
    /// Returns exactly the subset of the requested ids that exist, keyed
    /// by id; detecting missing ids is the caller's job. Duplicate ids in
    /// the input collapse to one entry. No side effects.
    async fn menu_items_by_ids(&self, ids: &[MenuItemId])
    -> Result<HashMap<MenuItemId, MenuItem>>;

    /// Returns the full catalog, in storage order.
    async fn all_menu_items(&self) -> Result<Vec<MenuItem>>;

    /// Returns the number of catalog rows.
    async fn menu_item_count(&self) -> Result<u64>;

    /// Inserts catalog rows, assigning their ids.
    ///
    /// Only the seeding procedure writes to the catalog; request handling
    /// treats it as read-only.
    async fn insert_menu_items(&self, items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>>;
}

/// Durable storage for orders.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists an order and all of its items as one atomic unit.
    ///
    /// Either the order and every item commit together, or nothing is
    /// written. Assigns the order id, the item ids, and the creation
    /// timestamp; returns the persisted order.
    async fn save_order(&self, order: NewOrder) -> Result<Order>;

    /// Returns all orders placed by a user, in storage order.
    async fn orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>>;

    /// Looks up a single order by id.
    ///
    /// Returns None if the order doesn't exist.
    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>>;
}
