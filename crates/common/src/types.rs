//! Identifier newtypes shared across the service.
//!
//! All identifiers are server-assigned integers. Wrapping them prevents
//! mixing up, say, a menu item id with an order id in a query.

use serde::{Deserialize, Serialize};

macro_rules! int_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw integer identifier.
            pub fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the underlying integer.
            pub fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

int_id! {
    /// Unique identifier of a menu item.
    MenuItemId
}

int_id! {
    /// Unique identifier of an order.
    OrderId
}

int_id! {
    /// Unique identifier of a single line item within an order.
    OrderItemId
}

int_id! {
    /// Identifier of the user placing an order.
    ///
    /// Users live in a separate service; this id is carried through
    /// without validation.
    UserId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrips_through_i32() {
        let id = MenuItemId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(MenuItemId::from(42), id);
    }

    #[test]
    fn id_display_is_the_raw_integer() {
        assert_eq!(OrderId::new(7).to_string(), "7");
    }

    #[test]
    fn id_serializes_transparently() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserId::new(7));
    }

    #[test]
    fn distinct_id_types_do_not_compare_equal_by_accident() {
        // Compile-time property really, but keep the values honest.
        let menu = MenuItemId::new(1);
        let order = OrderId::new(1);
        assert_eq!(menu.as_i32(), order.as_i32());
    }
}
