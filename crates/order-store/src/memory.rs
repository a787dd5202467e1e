use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{MenuItemId, Money, OrderId, OrderItemId, UserId};
use tokio::sync::RwLock;

use crate::{
    MenuItem, NewMenuItem, NewOrder, Order, OrderItem, Result, StoreError,
    store::{MenuCatalog, OrderStore},
};

/// In-memory store implementation for tests and local runs.
///
/// Provides the same interface and constraints as the PostgreSQL
/// implementation, including the foreign key from order items to menu
/// items.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    menu_items: Vec<MenuItem>,
    orders: Vec<Order>,
    last_menu_item_id: i32,
    last_order_id: i32,
    last_order_item_id: i32,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of persisted orders.
    pub async fn order_count(&self) -> usize {
        self.inner.read().await.orders.len()
    }

    /// Replaces the catalog price of a menu item.
    ///
    /// Test hook for the price-snapshot property; the service itself never
    /// mutates the catalog. Returns false if the id is unknown.
    pub async fn set_menu_price(&self, id: MenuItemId, price: Money) -> bool {
        let mut tables = self.inner.write().await;
        match tables.menu_items.iter_mut().find(|m| m.id == id) {
            Some(item) => {
                item.price = price;
                true
            }
            None => false,
        }
    }

    /// Clears all tables.
    pub async fn clear(&self) {
        let mut tables = self.inner.write().await;
        *tables = Tables::default();
    }
}

#[async_trait]
impl MenuCatalog for InMemoryStore {
    async fn menu_items_by_ids(
        &self,
        ids: &[MenuItemId],
    ) -> Result<HashMap<MenuItemId, MenuItem>> {
        let tables = self.inner.read().await;
        let found = tables
            .menu_items
            .iter()
            .filter(|m| ids.contains(&m.id))
            .map(|m| (m.id, m.clone()))
            .collect();
        Ok(found)
    }

    async fn all_menu_items(&self) -> Result<Vec<MenuItem>> {
        let tables = self.inner.read().await;
        Ok(tables.menu_items.clone())
    }

    async fn menu_item_count(&self) -> Result<u64> {
        let tables = self.inner.read().await;
        Ok(tables.menu_items.len() as u64)
    }

    async fn insert_menu_items(&self, items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>> {
        let mut tables = self.inner.write().await;
        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            tables.last_menu_item_id += 1;
            let row = MenuItem {
                id: MenuItemId::new(tables.last_menu_item_id),
                name: item.name,
                description: item.description,
                price: item.price,
            };
            tables.menu_items.push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn save_order(&self, order: NewOrder) -> Result<Order> {
        let mut tables = self.inner.write().await;

        // Foreign key simulation: every item must reference a known menu
        // item, or the whole save is rejected with nothing written.
        for item in &order.items {
            if !tables.menu_items.iter().any(|m| m.id == item.menu_item.id) {
                return Err(StoreError::UnknownMenuItem(item.menu_item.id));
            }
        }

        tables.last_order_id += 1;
        let order_id = OrderId::new(tables.last_order_id);

        let mut order_items = Vec::with_capacity(order.items.len());
        for item in order.items {
            tables.last_order_item_id += 1;
            order_items.push(OrderItem {
                id: OrderItemId::new(tables.last_order_item_id),
                menu_item: item.menu_item,
                quantity: item.quantity,
                price_per_item: item.price_per_item,
            });
        }

        let persisted = Order {
            id: order_id,
            user_id: order.user_id,
            status: order.status,
            total_price: order.total_price,
            created_at: Utc::now(),
            order_items,
        };
        tables.orders.push(persisted.clone());
        Ok(persisted)
    }

    async fn orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let tables = self.inner.read().await;
        Ok(tables
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let tables = self.inner.read().await;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }
}
