pub mod money;
pub mod types;

pub use money::Money;
pub use types::{MenuItemId, OrderId, OrderItemId, UserId};
