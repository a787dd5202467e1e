//! Storage records for the menu catalog and orders.
//!
//! These structs are both the persisted shape and the JSON shape served by
//! the API (camelCase field names). An order exclusively owns its items;
//! items carry a snapshot of the menu item they were ordered from and no
//! back-reference to the order.

use chrono::{DateTime, Utc};
use common::{MenuItemId, Money, OrderId, OrderItemId, UserId};
use serde::{Deserialize, Serialize};

/// A purchasable item in the menu catalog.
///
/// Immutable once created; orders snapshot its price at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Money,
}

/// A menu item awaiting insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price: Money,
}

impl NewMenuItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

/// Lifecycle status of an order.
///
/// Order creation only ever produces `Placed`; later transitions belong to
/// other services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PLACED")]
    Placed,
}

impl OrderStatus {
    /// Returns the storage/wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
        }
    }

    /// Parses the storage form back into a status.
    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "PLACED" => Some(OrderStatus::Placed),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line of an order.
///
/// `price_per_item` is the price of the menu item at the moment the order
/// was placed; later catalog price changes never touch it. The embedded
/// `menu_item` reflects the catalog row the line references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub menu_item: MenuItem,
    pub quantity: u32,
    pub price_per_item: Money,
}

/// A persisted order together with all of its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total_price: Money,
    pub created_at: DateTime<Utc>,
    pub order_items: Vec<OrderItem>,
}

/// An order line awaiting insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub menu_item: MenuItem,
    pub quantity: u32,
    pub price_per_item: Money,
}

/// An order awaiting its single atomic insertion.
///
/// The store assigns the order id, the item ids, and `created_at` at
/// commit time.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total_price: Money,
    pub items: Vec<NewOrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_item() -> MenuItem {
        MenuItem {
            id: MenuItemId::new(1),
            name: "Margherita Pizza".to_string(),
            description: "Classic pizza with tomato sauce and mozzarella".to_string(),
            price: Money::from_cents(15000),
        }
    }

    #[test]
    fn menu_item_json_shape() {
        let json = serde_json::to_value(menu_item()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Margherita Pizza",
                "description": "Classic pizza with tomato sauce and mozzarella",
                "price": "150.00",
            })
        );
    }

    #[test]
    fn order_json_uses_camel_case_and_no_back_reference() {
        let order = Order {
            id: OrderId::new(3),
            user_id: UserId::new(7),
            status: OrderStatus::Placed,
            total_price: Money::from_cents(30000),
            created_at: Utc::now(),
            order_items: vec![OrderItem {
                id: OrderItemId::new(10),
                menu_item: menu_item(),
                quantity: 2,
                price_per_item: Money::from_cents(15000),
            }],
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["status"], "PLACED");
        assert_eq!(json["totalPrice"], "300.00");
        let item = &json["orderItems"][0];
        assert_eq!(item["pricePerItem"], "150.00");
        assert_eq!(item["menuItem"]["id"], 1);
        // items never serialize a pointer back to their order
        assert!(item.get("order").is_none());
        assert!(item.get("orderId").is_none());
    }

    #[test]
    fn order_status_roundtrip() {
        assert_eq!(OrderStatus::Placed.as_str(), "PLACED");
        assert_eq!(OrderStatus::parse("PLACED"), Some(OrderStatus::Placed));
        assert_eq!(OrderStatus::parse("SHIPPED"), None);
        assert_eq!(
            serde_json::to_string(&OrderStatus::Placed).unwrap(),
            "\"PLACED\""
        );
    }
}
