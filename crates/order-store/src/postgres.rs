use std::collections::HashMap;

use async_trait::async_trait;
use common::{MenuItemId, Money, OrderId, OrderItemId, UserId};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    MenuItem, NewMenuItem, NewOrder, Order, OrderItem, OrderStatus, Result, StoreError,
    store::{MenuCatalog, OrderStore},
};

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_menu_item(row: &PgRow) -> Result<MenuItem> {
        Ok(MenuItem {
            id: MenuItemId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: Money::from_cents(row.try_get("price_cents")?),
        })
    }

    fn row_to_order_header(row: &PgRow) -> Result<(Order, i32)> {
        let id: i32 = row.try_get("id")?;
        let status: String = row.try_get("status")?;
        let status =
            OrderStatus::parse(&status).ok_or_else(|| StoreError::InvalidStatus(status.clone()))?;

        Ok((
            Order {
                id: OrderId::new(id),
                user_id: UserId::new(row.try_get("user_id")?),
                status,
                total_price: Money::from_cents(row.try_get("total_price_cents")?),
                created_at: row.try_get("created_at")?,
                order_items: Vec::new(),
            },
            id,
        ))
    }

    fn row_to_order_item(row: &PgRow) -> Result<OrderItem> {
        let quantity: i32 = row.try_get("quantity")?;
        Ok(OrderItem {
            id: OrderItemId::new(row.try_get("id")?),
            menu_item: MenuItem {
                id: MenuItemId::new(row.try_get("menu_item_id")?),
                name: row.try_get("name")?,
                description: row.try_get("description")?,
                price: Money::from_cents(row.try_get("price_cents")?),
            },
            quantity: quantity as u32,
            price_per_item: Money::from_cents(row.try_get("price_per_item_cents")?),
        })
    }

    /// Loads the items for a set of orders, keyed by order id.
    async fn items_for_orders(&self, order_ids: &[i32]) -> Result<HashMap<i32, Vec<OrderItem>>> {
        let rows = sqlx::query(
            r#"
            SELECT oi.order_id, oi.id, oi.quantity, oi.price_per_item_cents,
                   m.id AS menu_item_id, m.name, m.description, m.price_cents
            FROM order_items oi
            JOIN menu_items m ON m.id = oi.menu_item_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.id ASC
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            let order_id: i32 = row.try_get("order_id")?;
            by_order
                .entry(order_id)
                .or_default()
                .push(Self::row_to_order_item(&row)?);
        }
        Ok(by_order)
    }
}

#[async_trait]
impl MenuCatalog for PostgresStore {
    async fn menu_items_by_ids(
        &self,
        ids: &[MenuItemId],
    ) -> Result<HashMap<MenuItemId, MenuItem>> {
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let rows = sqlx::query(
            "SELECT id, name, description, price_cents FROM menu_items WHERE id = ANY($1)",
        )
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut found = HashMap::with_capacity(rows.len());
        for row in &rows {
            let item = Self::row_to_menu_item(row)?;
            found.insert(item.id, item);
        }
        Ok(found)
    }

    async fn all_menu_items(&self) -> Result<Vec<MenuItem>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price_cents FROM menu_items ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_menu_item).collect()
    }

    async fn menu_item_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn insert_menu_items(&self, items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>> {
        let mut tx = self.pool.begin().await?;

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let id: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO menu_items (name, description, price_cents)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price.cents())
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(MenuItem {
                id: MenuItemId::new(id),
                name: item.name,
                description: item.description,
                price: item.price,
            });
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn save_order(&self, order: NewOrder) -> Result<Order> {
        let NewOrder {
            user_id,
            status,
            total_price,
            items,
        } = order;

        // One transaction for the order and all of its items; any failure
        // rolls everything back.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (user_id, status, total_price_cents)
            VALUES ($1, $2, $3)
            RETURNING id, created_at
            "#,
        )
        .bind(user_id.as_i32())
        .bind(status.as_str())
        .bind(total_price.cents())
        .fetch_one(&mut *tx)
        .await?;

        let order_id = OrderId::new(row.try_get("id")?);
        let created_at = row.try_get("created_at")?;

        let mut order_items = Vec::with_capacity(items.len());
        for item in items {
            let menu_item_id = item.menu_item.id;
            let item_id: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO order_items (order_id, menu_item_id, quantity, price_per_item_cents)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(order_id.as_i32())
            .bind(menu_item_id.as_i32())
            .bind(item.quantity as i32)
            .bind(item.price_per_item.cents())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("order_items_menu_item_id_fkey")
                {
                    return StoreError::UnknownMenuItem(menu_item_id);
                }
                StoreError::Database(e)
            })?;

            order_items.push(OrderItem {
                id: OrderItemId::new(item_id),
                menu_item: item.menu_item,
                quantity: item.quantity,
                price_per_item: item.price_per_item,
            });
        }

        tx.commit().await?;

        tracing::debug!(order_id = %order_id, items = order_items.len(), "order persisted");

        Ok(Order {
            id: order_id,
            user_id,
            status,
            total_price,
            created_at,
            order_items,
        })
    }

    async fn orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, status, total_price_cents, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        let mut raw_ids = Vec::with_capacity(rows.len());
        for row in &rows {
            let (order, raw_id) = Self::row_to_order_header(row)?;
            orders.push(order);
            raw_ids.push(raw_id);
        }

        let mut items = self.items_for_orders(&raw_ids).await?;
        for (order, raw_id) in orders.iter_mut().zip(raw_ids) {
            order.order_items = items.remove(&raw_id).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, status, total_price_cents, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let (mut order, raw_id) = Self::row_to_order_header(&row)?;
        let mut items = self.items_for_orders(&[raw_id]).await?;
        order.order_items = items.remove(&raw_id).unwrap_or_default();

        Ok(Some(order))
    }
}
