//! Order service providing the business operations over the store.

use common::{MenuItemId, Money, OrderId, UserId};
use order_store::{
    MenuCatalog, MenuItem, NewOrder, NewOrderItem, Order, OrderStatus, OrderStore,
};

use crate::error::DomainError;
use crate::request::CreateOrderRequest;

/// Service for placing and reading orders.
///
/// Takes its store explicitly at construction; one store value serves as
/// both the menu catalog and the order store.
pub struct OrderService<S> {
    store: S,
}

impl<S: MenuCatalog + OrderStore> OrderService<S> {
    /// Creates a new order service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Places a new order.
    ///
    /// Validates the request, resolves the referenced menu items, snapshots
    /// their current prices, computes the exact total, and persists the
    /// order with all of its items in one atomic write. On validation
    /// failure nothing is written.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, DomainError> {
        if request.items.is_empty() {
            return Err(self.validation_failure(DomainError::NoItems));
        }
        if let Some(line) = request.items.iter().find(|l| l.quantity == 0) {
            return Err(self.validation_failure(DomainError::InvalidQuantity {
                quantity: line.quantity,
            }));
        }

        // 1. Distinct set of requested ids; the request lines themselves
        //    are kept as-is so duplicates become separate order items.
        let mut distinct_ids: Vec<MenuItemId> =
            request.items.iter().map(|l| l.menu_item_id).collect();
        distinct_ids.sort_unstable();
        distinct_ids.dedup();

        // 2. Resolve them against the catalog to check existence and get
        //    the current prices.
        let menu_items = self.store.menu_items_by_ids(&distinct_ids).await?;

        // 3. Any id the catalog did not return does not exist.
        if menu_items.len() != distinct_ids.len() {
            let missing: Vec<MenuItemId> = distinct_ids
                .into_iter()
                .filter(|id| !menu_items.contains_key(id))
                .collect();
            return Err(self.validation_failure(DomainError::MenuItemsNotFound { missing }));
        }

        // 4. One order item per request line, snapshotting the price at
        //    resolution time.
        let items: Vec<NewOrderItem> = request
            .items
            .iter()
            .map(|line| {
                let menu_item = menu_items[&line.menu_item_id].clone();
                NewOrderItem {
                    price_per_item: menu_item.price,
                    menu_item,
                    quantity: line.quantity,
                }
            })
            .collect();

        // 5. Exact total over the snapshotted prices.
        let total_price: Money = items
            .iter()
            .map(|item| item.price_per_item.multiply(item.quantity))
            .sum();

        // 6.-7. Build the order and hand it to the store for the single
        //        atomic write.
        let order = self
            .store
            .save_order(NewOrder {
                user_id: request.user_id,
                status: OrderStatus::Placed,
                total_price,
                items,
            })
            .await?;

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(order_id = %order.id, total = %order.total_price, "order placed");
        Ok(order)
    }

    /// Returns the full menu catalog.
    #[tracing::instrument(skip(self))]
    pub async fn find_all_menu_items(&self) -> Result<Vec<MenuItem>, DomainError> {
        Ok(self.store.all_menu_items().await?)
    }

    /// Returns all orders placed by a user.
    #[tracing::instrument(skip(self))]
    pub async fn find_orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>, DomainError> {
        Ok(self.store.orders_by_user(user_id).await?)
    }

    /// Looks up a single order.
    ///
    /// Returns None if the order doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn find_order_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.store.order_by_id(id).await?)
    }

    fn validation_failure(&self, err: DomainError) -> DomainError {
        metrics::counter!("order_validation_failures_total").increment(1);
        tracing::warn!(error = %err, "order request rejected");
        err
    }
}
