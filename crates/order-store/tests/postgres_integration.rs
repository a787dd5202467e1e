//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p order-store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use common::{MenuItemId, Money, OrderId, UserId};
use order_store::{
    MenuCatalog, MenuItem, NewMenuItem, NewOrder, NewOrderItem, OrderStatus, OrderStore,
    PostgresStore, StoreError,
};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for migrations
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            // Run migrations using raw_sql to execute multiple statements
            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_order_tables.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresStore {
    let info = get_container_info().await;

    // Create a fresh pool for each test to avoid connection issues
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // Clear tables for test isolation
    sqlx::query("TRUNCATE TABLE order_items, orders, menu_items RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .unwrap();

    PostgresStore::new(pool)
}

async fn seed_menu(store: &PostgresStore) -> Vec<MenuItem> {
    store
        .insert_menu_items(vec![
            NewMenuItem::new(
                "Margherita Pizza",
                "Classic pizza with tomato sauce and mozzarella",
                Money::from_cents(15000),
            ),
            NewMenuItem::new(
                "Caesar Salad",
                "Salad with chicken, croutons and caesar dressing",
                Money::from_cents(12050),
            ),
        ])
        .await
        .unwrap()
}

fn line(menu_item: &MenuItem, quantity: u32) -> NewOrderItem {
    NewOrderItem {
        menu_item: menu_item.clone(),
        quantity,
        price_per_item: menu_item.price,
    }
}

fn new_order(user_id: i32, items: Vec<NewOrderItem>) -> NewOrder {
    let total_price: Money = items
        .iter()
        .map(|i| i.price_per_item.multiply(i.quantity))
        .sum();
    NewOrder {
        user_id: UserId::new(user_id),
        status: OrderStatus::Placed,
        total_price,
        items,
    }
}

#[tokio::test]
async fn insert_and_query_menu_items() {
    let store = get_test_store().await;
    let menu = seed_menu(&store).await;

    assert_eq!(menu[0].id, MenuItemId::new(1));
    assert_eq!(menu[1].id, MenuItemId::new(2));
    assert_eq!(store.menu_item_count().await.unwrap(), 2);

    let all = store.all_menu_items().await.unwrap();
    assert_eq!(all, menu);

    let found = store
        .menu_items_by_ids(&[MenuItemId::new(2), MenuItemId::new(999)])
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[&MenuItemId::new(2)].name, "Caesar Salad");
}

#[tokio::test]
async fn save_order_and_read_it_back() {
    let store = get_test_store().await;
    let menu = seed_menu(&store).await;

    let saved = store
        .save_order(new_order(7, vec![line(&menu[0], 2), line(&menu[1], 1)]))
        .await
        .unwrap();

    assert_eq!(saved.id, OrderId::new(1));
    assert_eq!(saved.status, OrderStatus::Placed);
    assert_eq!(saved.total_price, Money::from_cents(42050));
    assert_eq!(saved.order_items.len(), 2);

    let by_id = store.order_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(by_id, saved);

    let by_user = store.orders_by_user(UserId::new(7)).await.unwrap();
    assert_eq!(by_user, vec![saved]);

    assert!(
        store
            .orders_by_user(UserId::new(42))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn failed_save_writes_nothing() {
    let store = get_test_store().await;
    let menu = seed_menu(&store).await;

    let ghost = MenuItem {
        id: MenuItemId::new(999),
        name: "Ghost Dish".to_string(),
        description: String::new(),
        price: Money::from_cents(100),
    };
    let result = store
        .save_order(new_order(7, vec![line(&menu[0], 1), line(&ghost, 1)]))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::UnknownMenuItem(id)) if id == MenuItemId::new(999)
    ));

    // The transaction rolled back: no order and no items are visible.
    assert!(
        store
            .orders_by_user(UserId::new(7))
            .await
            .unwrap()
            .is_empty()
    );
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(store.pool())
        .await
        .unwrap();
    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(orders, 0);
    assert_eq!(items, 0);
}

#[tokio::test]
async fn duplicate_menu_item_lines_stay_distinct() {
    let store = get_test_store().await;
    let menu = seed_menu(&store).await;

    let saved = store
        .save_order(new_order(7, vec![line(&menu[0], 1), line(&menu[0], 3)]))
        .await
        .unwrap();

    assert_eq!(saved.order_items.len(), 2);
    assert_ne!(saved.order_items[0].id, saved.order_items[1].id);
    assert_eq!(saved.order_items[0].quantity, 1);
    assert_eq!(saved.order_items[1].quantity, 3);

    let reread = store.order_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(reread.order_items.len(), 2);
}

#[tokio::test]
async fn catalog_price_change_does_not_touch_snapshots() {
    let store = get_test_store().await;
    let menu = seed_menu(&store).await;

    let saved = store
        .save_order(new_order(7, vec![line(&menu[0], 2)]))
        .await
        .unwrap();

    sqlx::query("UPDATE menu_items SET price_cents = $1 WHERE id = $2")
        .bind(99900i64)
        .bind(menu[0].id.as_i32())
        .execute(store.pool())
        .await
        .unwrap();

    let reread = store.order_by_id(saved.id).await.unwrap().unwrap();
    // The snapshot taken at order time is immutable...
    assert_eq!(
        reread.order_items[0].price_per_item,
        Money::from_cents(15000)
    );
    assert_eq!(reread.total_price, Money::from_cents(30000));
    // ...while the embedded catalog row reflects the current price.
    assert_eq!(reread.order_items[0].menu_item.price, Money::from_cents(99900));
}
